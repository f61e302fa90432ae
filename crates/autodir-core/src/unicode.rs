use crate::types::Direction;

/// Unicode block ranges (inclusive) for right-to-left scripts.
pub const RTL_RANGES: &[(u32, u32)] = &[
    (0x0590, 0x05FF),   // Hebrew
    (0x0600, 0x06FF),   // Arabic
    (0x0700, 0x074F),   // Syriac
    (0x0750, 0x077F),   // Arabic Supplement
    (0x0780, 0x07BF),   // Thaana
    (0x08A0, 0x08FF),   // Arabic Extended-A
    (0xFB1D, 0xFDFF),   // Hebrew and Arabic Presentation Forms-A
    (0xFE70, 0xFEFF),   // Arabic Presentation Forms-B
    (0x10E60, 0x10E7F), // Rumi Numeral Symbols
    (0x1EE00, 0x1EEFF), // Arabic Mathematical Alphabetic Symbols
];

/// True if the character falls inside one of the RTL script blocks.
pub fn is_rtl(c: char) -> bool {
    let cp = c as u32;
    RTL_RANGES.iter().any(|&(lo, hi)| cp >= lo && cp <= hi)
}

/// First letter-class character of the text, any script.
pub fn first_letter(text: &str) -> Option<char> {
    text.chars().find(|c| c.is_alphabetic())
}

/// Direction inferred from the first letter of the text, if it has one.
pub fn detect_direction(text: &str) -> Option<Direction> {
    first_letter(text).map(|c| {
        if is_rtl(c) {
            Direction::Rtl
        } else {
            Direction::Ltr
        }
    })
}
