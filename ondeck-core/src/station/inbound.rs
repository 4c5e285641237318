//! Inbound message buffer
//!
//! MQTT receive buffers are reused by the client, so each message is copied
//! into a fixed-capacity [`InboundMessage`] before it crosses to the display
//! task.

use heapless::String;

use crate::config::MAX_TOPIC_LEN;

/// Longest payload accepted
///
/// Sized to the largest MQTT packet the firmware will receive, so anything
/// the transport delivers fits. The decoder places no limit of its own.
pub const MAX_PAYLOAD_LEN: usize = 512;

/// Why a received message could not be buffered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InboundError {
    /// Topic longer than [`MAX_TOPIC_LEN`]
    TopicTooLong,
    /// Payload longer than [`MAX_PAYLOAD_LEN`] bytes
    PayloadTooLong,
    /// Payload is not valid UTF-8
    NotUtf8,
}

/// Owned copy of one received message
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InboundMessage {
    topic: String<MAX_TOPIC_LEN>,
    payload: String<MAX_PAYLOAD_LEN>,
}

impl InboundMessage {
    /// Copy a topic and raw payload
    pub fn new(topic: &str, payload: &[u8]) -> Result<Self, InboundError> {
        let topic = String::try_from(topic).map_err(|_| InboundError::TopicTooLong)?;

        if payload.len() > MAX_PAYLOAD_LEN {
            return Err(InboundError::PayloadTooLong);
        }
        let text = core::str::from_utf8(payload).map_err(|_| InboundError::NotUtf8)?;
        let payload = String::try_from(text).map_err(|_| InboundError::PayloadTooLong)?;

        Ok(Self { topic, payload })
    }

    pub fn topic(&self) -> &str {
        self.topic.as_str()
    }

    pub fn payload(&self) -> &str {
        self.payload.as_str()
    }
}
