//! 7-segment glyphs
//!
//! Bit layout, one bit per segment:
//!
//! ```text
//!    ─a─          bit 0 = a   bit 4 = e
//!   f   b         bit 1 = b   bit 5 = f
//!    ─g─          bit 2 = c   bit 6 = g
//!   e   c         bit 3 = d   bit 7 = dp
//!    ─d─  .dp
//! ```

/// Decimal point segment
pub const DECIMAL_POINT: u8 = 0x80;

const DIGITS: [u8; 10] = [
    0x3F, // 0
    0x06, // 1
    0x5B, // 2
    0x4F, // 3
    0x66, // 4
    0x6D, // 5
    0x7D, // 6
    0x07, // 7
    0x7F, // 8
    0x6F, // 9
];

/// Letters A-Z, best-effort shapes
const LETTERS: [u8; 26] = [
    0x77, // A
    0x7C, // b
    0x39, // C
    0x5E, // d
    0x79, // E
    0x71, // F
    0x3D, // G
    0x76, // H
    0x30, // I
    0x1E, // J
    0x75, // K
    0x38, // L
    0x55, // M
    0x54, // n
    0x3F, // O
    0x73, // P
    0x67, // q
    0x50, // r
    0x6D, // S
    0x78, // t
    0x3E, // U
    0x1C, // v
    0x6A, // W
    0x76, // X
    0x6E, // y
    0x5B, // Z
];

/// Segment mask for a character; anything unknown is blank
pub fn glyph(c: char) -> u8 {
    match c {
        '0'..='9' => DIGITS[c as usize - '0' as usize],
        // Lowercase forms that differ visibly from the capitals
        'c' => 0x58,
        'h' => 0x74,
        'o' => 0x5C,
        'u' => 0x1C,
        'a'..='z' => LETTERS[c as usize - 'a' as usize],
        'A'..='Z' => LETTERS[c as usize - 'A' as usize],
        '-' => 0x40,
        '_' => 0x08,
        '=' => 0x48,
        '"' => 0x22,
        '\'' => 0x02,
        '[' | '(' => 0x39,
        ']' | ')' => 0x0F,
        '?' => 0x53,
        _ => 0x00,
    }
}
