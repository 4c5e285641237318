//! Heat status decoder
//!
//! Turns one inbound status payload into an [`Action`]. The decoder is pure:
//! no I/O, no state carried between messages.
//!
//! # Payload format
//!
//! ```text
//! GOGO                          literal broadcast
//! <left lanes>,<right lanes>    heat data
//!
//!   12----   7,  31   4
//! └──┘└──┘└──┘
//!  h1  h2  h3    left lane, 4 chars per heat
//! ```
//!
//! Only the first comma splits the sides. Any further commas are ordinary
//! characters of the right-hand lane string and take up slot positions.

use heapless::String;

use super::layout::{DisplayIndex, Heat, Side, DISPLAY_COUNT};
use super::token::{slot_text, RacerToken, VACANT_LANE};
use crate::config::MAX_TOPIC_LEN;

/// Payload that lights every display with the same literal
pub const BROADCAST_LITERAL: &str = "GOGO";

/// What one display should show after a message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayInstruction<'a> {
    /// Leave the display blank
    Clear,
    /// Show text, fitted to the display by the driver
    ShowText(&'a str),
    /// Show a racer number
    ShowNumber(i32),
    /// Show a fixed literal such as `----`
    ShowLiteral(&'static str),
}

impl DisplayInstruction<'_> {
    /// True when the display ends up showing something
    pub fn is_visible(&self) -> bool {
        !matches!(self, DisplayInstruction::Clear)
    }
}

impl<'a> From<RacerToken<'a>> for DisplayInstruction<'a> {
    fn from(token: RacerToken<'a>) -> Self {
        match token {
            RacerToken::Blank => DisplayInstruction::Clear,
            RacerToken::Vacant => DisplayInstruction::ShowLiteral(VACANT_LANE),
            RacerToken::Number(number) => DisplayInstruction::ShowNumber(number),
            RacerToken::Text(text) => DisplayInstruction::ShowText(text),
        }
    }
}

/// Resolved instructions for all six displays
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HeatUpdate<'a> {
    instructions: [DisplayInstruction<'a>; DISPLAY_COUNT],
}

impl<'a> HeatUpdate<'a> {
    /// Every display blank
    pub const fn cleared() -> Self {
        Self {
            instructions: [DisplayInstruction::Clear; DISPLAY_COUNT],
        }
    }

    /// Instruction for one display
    pub fn get(&self, index: DisplayIndex) -> DisplayInstruction<'a> {
        self.instructions[index.offset()]
    }

    /// Instructions in ascending display order
    pub fn iter(&self) -> impl Iterator<Item = (DisplayIndex, DisplayInstruction<'a>)> + '_ {
        DisplayIndex::all().map(move |index| (index, self.get(index)))
    }

    /// Number of displays that will show something
    pub fn visible_count(&self) -> usize {
        self.instructions.iter().filter(|i| i.is_visible()).count()
    }

    fn set(&mut self, index: DisplayIndex, instruction: DisplayInstruction<'a>) {
        self.instructions[index.offset()] = instruction;
    }
}

/// Result of decoding one message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Action<'a> {
    /// Message was not on the subscribed topic
    Ignore,
    /// Write the same literal to every display, no clearing
    BroadcastLiteral(&'static str),
    /// Clear everything, then show per-display instructions
    UpdateHeats(HeatUpdate<'a>),
}

/// Split a data payload into (left, right) lane strings on the first comma
pub fn split_lanes(payload: &str) -> (&str, &str) {
    payload.split_once(',').unwrap_or((payload, ""))
}

/// Decode a payload already known to be on the subscribed topic
pub fn decode_payload(payload: &str) -> Action<'_> {
    if payload == BROADCAST_LITERAL {
        return Action::BroadcastLiteral(BROADCAST_LITERAL);
    }

    let (left, right) = split_lanes(payload);
    let mut update = HeatUpdate::cleared();

    for heat in Heat::ALL {
        for side in Side::ALL {
            let lane = match side {
                Side::Left => left,
                Side::Right => right,
            };

            let instruction = slot_text(lane, heat.slot())
                .map(|slot| DisplayInstruction::from(RacerToken::classify(slot)))
                .unwrap_or(DisplayInstruction::Clear);

            update.set(DisplayIndex::for_slot(side, heat), instruction);
        }
    }

    Action::UpdateHeats(update)
}

/// Topic too long to subscribe to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TopicTooLong;

/// Decoder bound to the one subscribed topic
#[derive(Debug, Clone)]
pub struct Decoder {
    topic: String<MAX_TOPIC_LEN>,
}

impl Decoder {
    /// Create a decoder for `topic`
    pub fn new(topic: &str) -> Result<Self, TopicTooLong> {
        Ok(Self {
            topic: String::try_from(topic).map_err(|_| TopicTooLong)?,
        })
    }

    /// Subscribed topic
    pub fn topic(&self) -> &str {
        self.topic.as_str()
    }

    /// Decode a message
    ///
    /// Messages on any other topic decode to [`Action::Ignore`], before the
    /// broadcast literal is even considered.
    pub fn decode<'p>(&self, topic: &str, payload: &'p str) -> Action<'p> {
        if topic != self.topic.as_str() {
            return Action::Ignore;
        }
        decode_payload(payload)
    }
}
