//! Inter-task communication channels
//!
//! Defines the static channels used for communication between Embassy tasks.
//! Uses embassy-sync primitives for safe async communication.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;

use pharos_protocol::{Outbound, PanelCommand};

/// Channel capacity for inbound commands
const COMMAND_CHANNEL_SIZE: usize = 8;

/// Channel capacity for outbound events
///
/// One tick publishes nine events at once; leave room for pulse traffic.
const UPLINK_CHANNEL_SIZE: usize = 32;

/// Commands decoded from the uplink, consumed by the panel task
pub static COMMAND_CHANNEL: Channel<CriticalSectionRawMutex, PanelCommand, COMMAND_CHANNEL_SIZE> =
    Channel::new();

/// Events waiting to be framed and sent to the bridge
pub static UPLINK_CHANNEL: Channel<CriticalSectionRawMutex, Outbound, UPLINK_CHANNEL_SIZE> =
    Channel::new();
