//! Embassy async tasks
//!
//! Each task runs independently and communicates via channels/signals.

pub mod panel;
pub mod tick;
pub mod uplink_rx;
pub mod uplink_tx;

pub use panel::{panel_task, BoardPanel};
pub use tick::tick_task;
pub use uplink_rx::uplink_rx_task;
pub use uplink_tx::uplink_tx_task;
