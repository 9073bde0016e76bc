//! Uplink UART receive task
//!
//! Receives command frames from the bridge and queues them for the panel.

use defmt::*;
use embassy_rp::uart::BufferedUartRx;
use embedded_io_async::Read;

use pharos_protocol::{FrameParser, PanelCommand};

use crate::channels::COMMAND_CHANNEL;

/// Buffer size for UART receive
const RX_BUF_SIZE: usize = 64;

/// Uplink RX task - receives and parses frames from the bridge
#[embassy_executor::task]
pub async fn uplink_rx_task(mut rx: BufferedUartRx) {
    info!("Uplink RX task started");

    let mut parser = FrameParser::new();
    let mut buf = [0u8; RX_BUF_SIZE];

    loop {
        match rx.read(&mut buf).await {
            Ok(n) if n > 0 => {
                trace!("RX: {} bytes", n);

                for &byte in &buf[..n] {
                    match parser.feed(byte) {
                        Ok(Some(frame)) => match PanelCommand::from_frame(&frame) {
                            Ok(command) => queue_command(command),
                            Err(e) => warn!("Failed to parse command: {:?}", e),
                        },
                        Ok(None) => {}
                        Err(e) => warn!("Frame parse error: {:?}", e),
                    }
                }
            }
            Ok(_) => {}
            Err(e) => {
                warn!("UART read error: {:?}", e);
            }
        }
    }
}

fn queue_command(command: PanelCommand) {
    if COMMAND_CHANNEL.try_send(command).is_err() {
        warn!("Command channel full, dropping {:?}", command);
    }
}
