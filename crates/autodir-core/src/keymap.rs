use crate::types::{KeyCode, LogicalKey};
use std::collections::HashMap;

lazy_static::lazy_static! {
    /// Physical code -> logical identity for the named keys the engine cares about.
    static ref CODE_TO_LOGICAL: HashMap<&'static str, LogicalKey> = {
        let mut m = HashMap::new();
        m.insert("ControlLeft", LogicalKey::Control);
        m.insert("ControlRight", LogicalKey::Control);
        m.insert("ShiftLeft", LogicalKey::Shift);
        m.insert("ShiftRight", LogicalKey::Shift);
        m.insert("AltLeft", LogicalKey::Alt);
        m.insert("AltRight", LogicalKey::Alt);
        m.insert("MetaLeft", LogicalKey::Meta);
        m.insert("MetaRight", LogicalKey::Meta);
        m
    };
}

/// Resolve the logical identity a platform would report for a physical code.
/// "KeyA".."KeyZ" and "Digit0".."Digit9" resolve to their base character;
/// anything unrecognized is `Other`.
pub fn logical_for_code(code: &KeyCode) -> LogicalKey {
    if let Some(k) = CODE_TO_LOGICAL.get(code.as_str()) {
        return *k;
    }
    let name = code.as_str();
    if let Some(rest) = name.strip_prefix("Key") {
        if let Some(c) = single_char(rest) {
            if c.is_ascii_uppercase() {
                return LogicalKey::Character(c.to_ascii_lowercase());
            }
        }
    }
    if let Some(rest) = name.strip_prefix("Digit") {
        if let Some(c) = single_char(rest) {
            if c.is_ascii_digit() {
                return LogicalKey::Character(c);
            }
        }
    }
    LogicalKey::Other
}

fn single_char(s: &str) -> Option<char> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}
