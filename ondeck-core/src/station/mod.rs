//! Station: topic gate, decoder and dispatcher wired together
//!
//! ```text
//! (topic, payload) ──► Decoder ──► Action ──► Dispatcher ──► displays
//!                        │                        │
//!                        └── foreign topic        └── DispatchReport
//!                            (Ignored)
//! ```

pub mod inbound;

pub use inbound::{InboundError, InboundMessage, MAX_PAYLOAD_LEN};

use crate::dispatch::{DispatchReport, Dispatcher};
use crate::heat::{Action, Decoder, TopicTooLong};
use crate::traits::DisplaySet;

/// What handling one message did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HandleOutcome {
    /// Message was on another topic, no display touched
    Ignored,
    /// Broadcast literal written to every display
    Broadcast(DispatchReport),
    /// Heat data rendered
    Updated {
        report: DispatchReport,
        /// Displays showing content afterwards
        lit: usize,
    },
}

impl HandleOutcome {
    /// Write failures, if any displays were touched
    pub fn report(&self) -> Option<&DispatchReport> {
        match self {
            HandleOutcome::Ignored => None,
            HandleOutcome::Broadcast(report) => Some(report),
            HandleOutcome::Updated { report, .. } => Some(report),
        }
    }
}

/// Handles inbound messages for the six-display gate
pub struct Station<D> {
    decoder: Decoder,
    dispatcher: Dispatcher<D>,
}

impl<D: DisplaySet> Station<D> {
    /// Create a station subscribed to `topic`
    pub fn new(topic: &str, displays: D) -> Result<Self, TopicTooLong> {
        Ok(Self {
            decoder: Decoder::new(topic)?,
            dispatcher: Dispatcher::new(displays),
        })
    }

    /// Subscribed topic
    pub fn topic(&self) -> &str {
        self.decoder.topic()
    }

    pub fn dispatcher(&self) -> &Dispatcher<D> {
        &self.dispatcher
    }

    pub fn dispatcher_mut(&mut self) -> &mut Dispatcher<D> {
        &mut self.dispatcher
    }

    /// Decode one message and apply it to the displays
    pub fn handle(&mut self, topic: &str, payload: &str) -> HandleOutcome {
        let action = self.decoder.decode(topic, payload);
        let report = self.dispatcher.dispatch(&action);

        match action {
            Action::Ignore => HandleOutcome::Ignored,
            Action::BroadcastLiteral(_) => HandleOutcome::Broadcast(report),
            Action::UpdateHeats(update) => {
                let lit = update
                    .iter()
                    .filter(|(index, instruction)| {
                        instruction.is_visible() && report.failure(*index).is_none()
                    })
                    .count();
                HandleOutcome::Updated { report, lit }
            }
        }
    }

    /// Handle a buffered message
    pub fn handle_message(&mut self, message: &InboundMessage) -> HandleOutcome {
        self.handle(message.topic(), message.payload())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::mock::{MockDisplays, Shown};
    use crate::heat::DisplayIndex;
    use crate::traits::DisplayError;

    fn display(number: u8) -> DisplayIndex {
        DisplayIndex::new(number).unwrap()
    }

    #[test]
    fn test_foreign_topic_is_ignored() {
        let mut station = Station::new("ondeck", MockDisplays::new()).unwrap();
        assert_eq!(station.handle("finish", "GOGO"), HandleOutcome::Ignored);
        assert!(station.dispatcher().displays().ops().is_empty());
    }

    #[test]
    fn test_broadcast() {
        let mut station = Station::new("ondeck", MockDisplays::new()).unwrap();
        let outcome = station.handle("ondeck", "GOGO");
        assert_eq!(outcome, HandleOutcome::Broadcast(DispatchReport::new()));

        for index in DisplayIndex::all() {
            assert_eq!(
                station.dispatcher().displays().shown(index),
                &Shown::text("GOGO")
            );
        }
    }

    #[test]
    fn test_update_counts_lit_displays() {
        let mut station = Station::new("ondeck", MockDisplays::new()).unwrap();
        let outcome = station.handle("ondeck", "1011----,2021    ");

        match outcome {
            HandleOutcome::Updated { report, lit } => {
                assert!(report.is_clean());
                assert_eq!(lit, 3);
            }
            other => panic!("expected update, got {:?}", other),
        }
    }

    #[test]
    fn test_failed_display_not_counted_as_lit() {
        let mut station = Station::new("ondeck", MockDisplays::failing(2)).unwrap();
        let outcome = station.handle("ondeck", "1011,2021");

        match outcome {
            HandleOutcome::Updated { report, lit } => {
                assert_eq!(report.failure(display(2)), Some(DisplayError::Bus));
                assert_eq!(lit, 1);
            }
            other => panic!("expected update, got {:?}", other),
        }
        assert!(outcome.report().is_some());
    }

    #[test]
    fn test_handle_buffered_message() {
        let mut station = Station::new("ondeck", MockDisplays::new()).unwrap();
        let message = InboundMessage::new("ondeck", b"   7,  31").unwrap();
        station.handle_message(&message);

        let displays = station.dispatcher().displays();
        assert_eq!(displays.shown(display(1)), &Shown::number(7));
        assert_eq!(displays.shown(display(2)), &Shown::number(31));
    }

    #[test]
    fn test_trailing_padding_survives_buffering() {
        let mut payload = [b' '; 139];
        payload[..9].copy_from_slice(b"1011,2021");
        let message = InboundMessage::new("ondeck", &payload).unwrap();

        let mut station = Station::new("ondeck", MockDisplays::new()).unwrap();
        match station.handle_message(&message) {
            HandleOutcome::Updated { report, lit } => {
                assert!(report.is_clean());
                assert_eq!(lit, 2);
            }
            other => panic!("expected update, got {:?}", other),
        }
    }

    #[test]
    fn test_station_topic() {
        let station = Station::new("track/ondeck", MockDisplays::new()).unwrap();
        assert_eq!(station.topic(), "track/ondeck");
        assert!(HandleOutcome::Ignored.report().is_none());
    }
}
