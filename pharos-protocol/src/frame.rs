//! Uplink framing
//!
//! ```text
//! 0xAA | len | type | body (len bytes, postcard) | xor
//! ```
//!
//! `len` is at most [`MAX_PAYLOAD_SIZE`]. The trailing byte is the XOR of
//! `len`, `type` and every body byte; the start marker is not covered.

use heapless::Vec;
use serde::{de::DeserializeOwned, Serialize};

/// Marks the first byte of every frame
pub const FRAME_START: u8 = 0xAA;

/// Largest body a frame may carry
///
/// A direct event (client byte plus event) needs well under half of this.
pub const MAX_PAYLOAD_SIZE: usize = 48;

/// Bytes around the body: marker, length, type and checksum
const OVERHEAD: usize = 4;

/// Largest encoded frame
pub const MAX_FRAME_SIZE: usize = MAX_PAYLOAD_SIZE + OVERHEAD;

/// Framing errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// Body longer than [`MAX_PAYLOAD_SIZE`]
    PayloadTooLarge,
    /// Trailing XOR did not match
    InvalidChecksum,
    /// Body does not decode as the expected message
    InvalidFrame,
    /// Output buffer cannot hold the encoded frame
    BufferTooSmall,
}

/// One message on the link
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Message type byte
    pub msg_type: u8,
    /// Raw body bytes
    pub payload: Vec<u8, MAX_PAYLOAD_SIZE>,
}

fn xor_sum(length: u8, msg_type: u8, payload: &[u8]) -> u8 {
    payload.iter().fold(length ^ msg_type, |acc, byte| acc ^ byte)
}

impl Frame {
    /// Frame carrying `payload` verbatim
    pub fn new(msg_type: u8, payload: &[u8]) -> Result<Self, FrameError> {
        let payload = Vec::from_slice(payload).map_err(|_| FrameError::PayloadTooLarge)?;
        Ok(Self { msg_type, payload })
    }

    /// Frame with an empty body
    pub fn empty(msg_type: u8) -> Self {
        Self {
            msg_type,
            payload: Vec::new(),
        }
    }

    /// Frame whose body is `prefix` followed by `body` in postcard form
    pub fn with_body<T: Serialize>(
        msg_type: u8,
        prefix: &[u8],
        body: &T,
    ) -> Result<Self, FrameError> {
        let mut scratch = [0u8; MAX_PAYLOAD_SIZE];
        let head = scratch
            .get_mut(..prefix.len())
            .ok_or(FrameError::PayloadTooLarge)?;
        head.copy_from_slice(prefix);

        let used = postcard::to_slice(body, &mut scratch[prefix.len()..])
            .map_err(|_| FrameError::PayloadTooLarge)?
            .len();

        Self::new(msg_type, &scratch[..prefix.len() + used])
    }

    /// Decode the postcard value that starts `skip` bytes into the body
    ///
    /// Trailing bytes after the value make the frame invalid.
    pub fn body<T: DeserializeOwned>(&self, skip: usize) -> Result<T, FrameError> {
        let bytes = self.payload.get(skip..).ok_or(FrameError::InvalidFrame)?;
        match postcard::take_from_bytes::<T>(bytes) {
            Ok((value, [])) => Ok(value),
            _ => Err(FrameError::InvalidFrame),
        }
    }

    /// Number of bytes [`Frame::encode`] writes
    pub fn encoded_len(&self) -> usize {
        self.payload.len() + OVERHEAD
    }

    /// Write the frame to the front of `buffer`, returning its length
    pub fn encode(&self, buffer: &mut [u8]) -> Result<usize, FrameError> {
        let total = self.encoded_len();
        let out = buffer
            .get_mut(..total)
            .ok_or(FrameError::BufferTooSmall)?;

        let length = self.payload.len() as u8;
        let (header, rest) = out.split_at_mut(3);
        header.copy_from_slice(&[FRAME_START, length, self.msg_type]);

        let (body, check) = rest.split_at_mut(self.payload.len());
        body.copy_from_slice(&self.payload);
        check[0] = xor_sum(length, self.msg_type, &self.payload);

        Ok(total)
    }

    /// Encode into an owned buffer
    pub fn encode_to_vec(&self) -> Result<Vec<u8, MAX_FRAME_SIZE>, FrameError> {
        let mut out = Vec::new();
        out.resize_default(self.encoded_len())
            .map_err(|_| FrameError::BufferTooSmall)?;
        self.encode(&mut out)?;
        Ok(out)
    }
}

/// Where the parser is inside a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    /// Discarding bytes until a start marker
    Hunt,
    /// Marker seen
    AwaitLength,
    /// Length known
    AwaitType { length: u8 },
    /// Collecting `length` body bytes
    Body { length: u8, msg_type: u8 },
    /// Body complete
    AwaitCheck { msg_type: u8 },
}

/// Incremental frame decoder for a byte stream
///
/// Bytes outside a frame are skipped. A bad length or checksum reports an
/// error and drops back to hunting for the next marker, so a corrupted frame
/// never swallows the one after it.
#[derive(Debug, Clone)]
pub struct FrameParser {
    stage: Stage,
    body: Vec<u8, MAX_PAYLOAD_SIZE>,
}

impl Default for FrameParser {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameParser {
    pub fn new() -> Self {
        Self {
            stage: Stage::Hunt,
            body: Vec::new(),
        }
    }

    /// Abandon any partial frame
    pub fn reset(&mut self) {
        self.stage = Stage::Hunt;
        self.body.clear();
    }

    /// Push one received byte
    ///
    /// Yields the frame on its checksum byte, `None` while one is still in
    /// progress.
    pub fn feed(&mut self, byte: u8) -> Result<Option<Frame>, FrameError> {
        self.stage = match self.stage {
            Stage::Hunt if byte == FRAME_START => Stage::AwaitLength,
            Stage::Hunt => Stage::Hunt,
            Stage::AwaitLength if usize::from(byte) > MAX_PAYLOAD_SIZE => {
                self.reset();
                return Err(FrameError::PayloadTooLarge);
            }
            Stage::AwaitLength => Stage::AwaitType { length: byte },
            Stage::AwaitType { length } => {
                self.body.clear();
                if length == 0 {
                    Stage::AwaitCheck { msg_type: byte }
                } else {
                    Stage::Body {
                        length,
                        msg_type: byte,
                    }
                }
            }
            Stage::Body { length, msg_type } => {
                // Bounded by the length check above
                let _ = self.body.push(byte);
                if self.body.len() < usize::from(length) {
                    Stage::Body { length, msg_type }
                } else {
                    Stage::AwaitCheck { msg_type }
                }
            }
            Stage::AwaitCheck { msg_type } => {
                let length = self.body.len() as u8;
                let valid = byte == xor_sum(length, msg_type, &self.body);
                let payload = core::mem::take(&mut self.body);
                self.reset();

                if !valid {
                    return Err(FrameError::InvalidChecksum);
                }
                return Ok(Some(Frame { msg_type, payload }));
            }
        };
        Ok(None)
    }

    /// Push bytes until the first complete frame
    ///
    /// Bytes after that frame are left unread.
    pub fn feed_bytes(&mut self, bytes: &[u8]) -> Result<Option<Frame>, FrameError> {
        for &byte in bytes {
            if let Some(frame) = self.feed(byte)? {
                return Ok(Some(frame));
            }
        }
        Ok(None)
    }
}
