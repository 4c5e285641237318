//! HT16K33 4-digit 7-segment backpack
//!
//! The HT16K33 is an LED matrix controller with 16 bytes of display RAM.
//! On the 4-digit backpack the digits sit at RAM offsets 0, 2, 6 and 8;
//! offset 4 drives the colon.
//!
//! # I2C protocol
//!
//! Single-byte commands select the function in the high nibble:
//! - `0x21`: system setup, oscillator on
//! - `0x80 | blink << 1 | on`: display setup
//! - `0xE0 | level`: dimming, 16 levels
//!
//! A RAM write is the start address `0x00` followed by all 16 bytes.

use core::fmt::Write;

use heapless::String;
use ondeck_core::traits::{DisplayError, SegmentDisplay};
use ondeck_hal::I2cBus;

use super::font::{glyph, DECIMAL_POINT};

/// HT16K33 commands
pub mod cmd {
    /// Turn on the system oscillator
    pub const OSCILLATOR_ON: u8 = 0x21;
    /// Display setup base command
    pub const DISPLAY_SETUP: u8 = 0x80;
    /// Display-on bit of the display setup command
    pub const DISPLAY_ON: u8 = 0x01;
    /// Dimming base command
    pub const DIMMING: u8 = 0xE0;
    /// Display RAM start address
    pub const RAM_ADDRESS: u8 = 0x00;
}

/// Number of digits on the backpack
pub const DIGITS: usize = 4;

/// Brightest dimming level
pub const MAX_BRIGHTNESS: u8 = 15;

const RAM_SIZE: usize = 16;
const DIGIT_OFFSETS: [usize; DIGITS] = [0, 2, 6, 8];
const COLON_OFFSET: usize = 4;
const COLON_SEGMENTS: u8 = 0x02;

/// Display blink rate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BlinkRate {
    #[default]
    Off = 0,
    Hz2 = 1,
    Hz1 = 2,
    HalfHz = 3,
}

/// Driver error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SegmentError<E> {
    /// I2C transaction failed
    Bus(E),
    /// Number needs more than four characters
    Overflow,
}

impl<E> From<SegmentError<E>> for DisplayError {
    fn from(error: SegmentError<E>) -> Self {
        match error {
            SegmentError::Bus(_) => DisplayError::Bus,
            SegmentError::Overflow => DisplayError::Overflow,
        }
    }
}

/// One HT16K33 backpack on an I2C bus
pub struct Ht16k33<B> {
    bus: B,
    address: u8,
    digits: [u8; DIGITS],
    colon: bool,
    brightness: u8,
    blink: BlinkRate,
}

impl<B: I2cBus> Ht16k33<B> {
    /// Create a driver for the backpack at `address`
    ///
    /// Nothing is sent until [`Ht16k33::init`].
    pub fn new(bus: B, address: u8) -> Self {
        Self {
            bus,
            address,
            digits: [0; DIGITS],
            colon: false,
            brightness: MAX_BRIGHTNESS,
            blink: BlinkRate::Off,
        }
    }

    /// 7-bit I2C address
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Current dimming level
    pub fn brightness(&self) -> u8 {
        self.brightness
    }

    pub fn blink_rate(&self) -> BlinkRate {
        self.blink
    }

    /// Segment masks currently buffered, left to right
    pub fn digits(&self) -> &[u8; DIGITS] {
        &self.digits
    }

    /// Start the oscillator, turn the display on and blank it
    pub fn init(&mut self, brightness: u8) -> Result<(), SegmentError<B::Error>> {
        self.command(cmd::OSCILLATOR_ON)?;
        self.set_blink(BlinkRate::Off)?;
        self.set_brightness(brightness)?;
        self.clear()
    }

    /// Set the dimming level, clamped to 0-15
    pub fn set_brightness(&mut self, level: u8) -> Result<(), SegmentError<B::Error>> {
        let level = level.min(MAX_BRIGHTNESS);
        self.command(cmd::DIMMING | level)?;
        self.brightness = level;
        Ok(())
    }

    /// Set the blink rate, keeping the display on
    pub fn set_blink(&mut self, rate: BlinkRate) -> Result<(), SegmentError<B::Error>> {
        self.command(cmd::DISPLAY_SETUP | cmd::DISPLAY_ON | (rate as u8) << 1)?;
        self.blink = rate;
        Ok(())
    }

    /// Set every segment in the buffer on or off, without writing
    pub fn fill(&mut self, on: bool) {
        let mask = if on { 0xFF } else { 0x00 };
        self.digits = [mask; DIGITS];
        self.colon = on;
    }

    /// Blank the buffer and the display
    pub fn clear(&mut self) -> Result<(), SegmentError<B::Error>> {
        self.fill(false);
        self.write_display()
    }

    /// Light or clear the colon in the buffer
    pub fn set_colon(&mut self, on: bool) {
        self.colon = on;
    }

    /// Send the buffer to display RAM
    pub fn write_display(&mut self) -> Result<(), SegmentError<B::Error>> {
        let mut frame = [0u8; RAM_SIZE + 1];
        frame[0] = cmd::RAM_ADDRESS;
        for (digit, offset) in self.digits.iter().zip(DIGIT_OFFSETS) {
            frame[offset + 1] = *digit;
        }
        if self.colon {
            frame[COLON_OFFSET + 1] = COLON_SEGMENTS;
        }
        self.bus.write(self.address, &frame).map_err(SegmentError::Bus)
    }

    /// Show an integer, right-aligned
    ///
    /// The display is blanked first. Values needing more than four
    /// characters, sign included, leave the display untouched.
    pub fn print_number(&mut self, value: i32) -> Result<(), SegmentError<B::Error>> {
        let mut text: String<12> = String::new();
        write!(text, "{:>width$}", value, width = DIGITS).map_err(|_| SegmentError::Overflow)?;
        if text.len() > DIGITS {
            return Err(SegmentError::Overflow);
        }

        self.fill(false);
        self.push_text(&text);
        self.write_display()
    }

    /// Scroll `text` in from the right, over the current content
    ///
    /// Only the last four characters stay visible. A `.` lights the
    /// decimal point of the character before it; a `:` lights the colon
    /// and takes no digit.
    pub fn print_text(&mut self, text: &str) -> Result<(), SegmentError<B::Error>> {
        self.push_text(text);
        self.write_display()
    }

    /// Release the bus
    pub fn release(self) -> B {
        self.bus
    }

    fn push_text(&mut self, text: &str) {
        for c in text.chars() {
            match c {
                '.' => self.digits[DIGITS - 1] |= DECIMAL_POINT,
                ':' => self.colon = true,
                _ => {
                    self.digits.copy_within(1.., 0);
                    self.digits[DIGITS - 1] = glyph(c);
                }
            }
        }
    }

    fn command(&mut self, command: u8) -> Result<(), SegmentError<B::Error>> {
        self.bus.write(self.address, &[command]).map_err(SegmentError::Bus)
    }
}

impl<B: I2cBus> SegmentDisplay for Ht16k33<B> {
    fn clear(&mut self) -> Result<(), DisplayError> {
        Ht16k33::clear(self).map_err(DisplayError::from)
    }

    fn show_number(&mut self, value: i32) -> Result<(), DisplayError> {
        self.print_number(value).map_err(DisplayError::from)
    }

    fn show_text(&mut self, text: &str) -> Result<(), DisplayError> {
        self.print_text(text).map_err(DisplayError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use heapless::Vec;

    type Frame = Vec<u8, 17>;

    /// Records every write; optionally NACKs everything
    struct MockBus {
        writes: Vec<(u8, Frame), 16>,
        nack: bool,
    }

    impl MockBus {
        fn new() -> Self {
            Self {
                writes: Vec::new(),
                nack: false,
            }
        }

        fn last(&self) -> &[u8] {
            &self.writes.last().unwrap().1
        }
    }

    impl I2cBus for MockBus {
        type Error = ();

        fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error> {
            if self.nack {
                return Err(());
            }
            let frame = Frame::from_slice(data).unwrap();
            self.writes.push((address, frame)).unwrap();
            Ok(())
        }

        fn read(&mut self, _address: u8, _buf: &mut [u8]) -> Result<(), Self::Error> {
            Ok(())
        }

        fn write_read(
            &mut self,
            _address: u8,
            _write_data: &[u8],
            _read_buf: &mut [u8],
        ) -> Result<(), Self::Error> {
            Ok(())
        }
    }

    fn display() -> Ht16k33<MockBus> {
        Ht16k33::new(MockBus::new(), 0x70)
    }

    fn ram(frame: &[u8]) -> [u8; DIGITS] {
        assert_eq!(frame.len(), 17);
        assert_eq!(frame[0], cmd::RAM_ADDRESS);
        [frame[1], frame[3], frame[7], frame[9]]
    }

    #[test]
    fn test_init_sequence() {
        let mut display = display();
        display.init(8).unwrap();

        let bus = display.release();
        assert!(bus.writes.iter().all(|(address, _)| *address == 0x70));
        assert_eq!(&bus.writes[0].1[..], &[0x21]);
        assert_eq!(&bus.writes[1].1[..], &[0x81]);
        assert_eq!(&bus.writes[2].1[..], &[0xE8]);
        assert_eq!(ram(&bus.writes[3].1), [0; DIGITS]);
        assert_eq!(bus.writes.len(), 4);
    }

    #[test]
    fn test_brightness_is_clamped() {
        let mut display = display();
        display.set_brightness(40).unwrap();
        assert_eq!(display.brightness(), MAX_BRIGHTNESS);
        assert_eq!(display.release().last(), &[0xEF]);
    }

    #[test]
    fn test_blink_rate() {
        let mut display = display();
        display.set_blink(BlinkRate::Hz1).unwrap();
        assert_eq!(display.blink_rate(), BlinkRate::Hz1);
        assert_eq!(display.release().last(), &[0x85]);
    }

    #[test]
    fn test_number_right_aligned() {
        let mut display = display();
        display.print_number(42).unwrap();
        assert_eq!(display.digits(), &[0, 0, glyph('4'), glyph('2')]);
        assert_eq!(
            ram(display.release().last()),
            [0, 0, 0x66, 0x5B]
        );
    }

    #[test]
    fn test_number_replaces_previous_content() {
        let mut display = display();
        display.print_text("ABCD").unwrap();
        display.print_number(7).unwrap();
        assert_eq!(display.digits(), &[0, 0, 0, glyph('7')]);
    }

    #[test]
    fn test_number_overflow() {
        let mut display = display();
        display.print_number(1111).unwrap();

        assert_eq!(display.print_number(12345), Err(SegmentError::Overflow));
        assert_eq!(display.print_number(-1000), Err(SegmentError::Overflow));
        assert_eq!(display.digits(), &[glyph('1'); DIGITS]);

        display.print_number(-999).unwrap();
        assert_eq!(display.digits(), &[0x40, 0x6F, 0x6F, 0x6F]);
    }

    #[test]
    fn test_text_scrolls_in_from_right() {
        let mut display = display();
        display.print_text("AB").unwrap();
        assert_eq!(display.digits(), &[0, 0, glyph('A'), glyph('B')]);

        display.print_text("GOGO").unwrap();
        assert_eq!(
            display.digits(),
            &[glyph('G'), glyph('O'), glyph('G'), glyph('O')]
        );

        display.print_text("abcdef").unwrap();
        assert_eq!(
            display.digits(),
            &[glyph('c'), glyph('d'), glyph('e'), glyph('f')]
        );
    }

    #[test]
    fn test_text_overwrites_in_place() {
        let mut display = display();
        display.print_number(1234).unwrap();
        display.print_text("-").unwrap();
        assert_eq!(
            display.digits(),
            &[glyph('2'), glyph('3'), glyph('4'), glyph('-')]
        );
    }

    #[test]
    fn test_decimal_point() {
        let mut display = display();
        display.print_text("1.5").unwrap();
        assert_eq!(
            display.digits(),
            &[0, 0, glyph('1') | DECIMAL_POINT, glyph('5')]
        );
    }

    #[test]
    fn test_colon() {
        let mut display = display();
        display.set_colon(true);
        display.write_display().unwrap();
        let bus = display.release();
        assert_eq!(bus.last()[COLON_OFFSET + 1], COLON_SEGMENTS);
    }

    #[test]
    fn test_colon_in_text_takes_no_digit() {
        let mut display = display();
        display.print_text("12:34").unwrap();
        assert_eq!(
            display.digits(),
            &[glyph('1'), glyph('2'), glyph('3'), glyph('4')]
        );
        let bus = display.release();
        assert_eq!(bus.last()[COLON_OFFSET + 1], COLON_SEGMENTS);
    }

    #[test]
    fn test_bus_error_maps_to_display_error() {
        let mut bus = MockBus::new();
        bus.nack = true;
        let mut display = Ht16k33::new(bus, 0x75);

        assert_eq!(display.init(15), Err(SegmentError::Bus(())));
        assert_eq!(SegmentDisplay::show_number(&mut display, 5), Err(DisplayError::Bus));
        assert_eq!(
            SegmentDisplay::show_number(&mut display, 99999),
            Err(DisplayError::Overflow)
        );
        assert_eq!(SegmentDisplay::clear(&mut display), Err(DisplayError::Bus));
    }
}
