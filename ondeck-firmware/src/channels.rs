//! Inter-task communication channels
//!
//! Defines the static channels used for communication between Embassy tasks.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;

use ondeck_core::station::InboundMessage;

/// Messages that may queue while the displays are being written
const INBOUND_CHANNEL_SIZE: usize = 4;

/// Messages received from the broker, in arrival order
pub static INBOUND: Channel<CriticalSectionRawMutex, InboundMessage, INBOUND_CHANNEL_SIZE> =
    Channel::new();
