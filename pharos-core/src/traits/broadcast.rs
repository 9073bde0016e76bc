//! Event sink for observers

use pharos_protocol::{ClientId, PanelEvent};

/// Trait for delivering events to connected observers
///
/// Delivery is fire-and-forget: the panel never waits on observers and
/// never learns whether an event arrived.
pub trait Broadcast {
    /// Send `event` to every observer
    fn publish(&mut self, event: PanelEvent);

    /// Send `event` to a single observer
    fn publish_to(&mut self, client: ClientId, event: PanelEvent);
}
