//! Board glue for the panel logic
//!
//! The clock reads embassy's uptime timer; broadcasts are queued for the
//! uplink TX task. Neither ever waits.

use defmt::*;
use embassy_time::Instant;

use pharos_core::scheduler::Clock;
use pharos_core::traits::Broadcast;
use pharos_protocol::{ClientId, Outbound, PanelEvent};

use crate::channels::UPLINK_CHANNEL;

/// Milliseconds since boot
///
/// No RTC is fitted, so the displayed seconds count from power-up.
pub struct UptimeClock;

impl Clock for UptimeClock {
    fn now_ms(&self) -> u64 {
        Instant::now().as_millis()
    }
}

/// Queues events for the uplink, dropping them when the queue is full
pub struct UplinkBroadcast;

impl UplinkBroadcast {
    fn queue(&mut self, outbound: Outbound) {
        if UPLINK_CHANNEL.try_send(outbound).is_err() {
            warn!("Uplink queue full, dropping {:?}", outbound.event.topic());
        }
    }
}

impl Broadcast for UplinkBroadcast {
    fn publish(&mut self, event: PanelEvent) {
        self.queue(Outbound::broadcast(event));
    }

    fn publish_to(&mut self, client: ClientId, event: PanelEvent) {
        self.queue(Outbound::direct(client, event));
    }
}
