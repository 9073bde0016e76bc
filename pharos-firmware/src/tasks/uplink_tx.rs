//! Uplink UART transmit task
//!
//! Frames queued panel events and writes them to the bridge.

use defmt::*;
use embassy_rp::uart::BufferedUartTx;
use embedded_io_async::Write;

use pharos_protocol::MAX_FRAME_SIZE;

use crate::channels::UPLINK_CHANNEL;

/// Uplink TX task - sends events to the bridge in queue order
#[embassy_executor::task]
pub async fn uplink_tx_task(mut tx: BufferedUartTx) {
    info!("Uplink TX task started");

    let mut buf = [0u8; MAX_FRAME_SIZE];

    loop {
        let outbound = UPLINK_CHANNEL.receive().await;

        let frame = match outbound.to_frame() {
            Ok(frame) => frame,
            Err(e) => {
                warn!("Failed to frame {:?}: {:?}", outbound.event.topic(), e);
                continue;
            }
        };

        match frame.encode(&mut buf) {
            Ok(len) => {
                if let Err(e) = tx.write_all(&buf[..len]).await {
                    warn!("Failed to send event: {:?}", e);
                }
            }
            Err(e) => warn!("Failed to encode frame: {:?}", e),
        }
    }
}
