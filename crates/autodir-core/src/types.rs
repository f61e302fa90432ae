use serde::{Deserialize, Serialize};
use std::fmt;

/// Physical key identifier as delivered by the host (`KeyboardEvent.code`),
/// e.g. "ControlLeft", "ShiftRight", "ArrowLeft", "KeyA".
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeyCode(String);

impl KeyCode {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// "ShiftRight", "ControlRight", "ArrowRight" all count as right-hand variants.
    pub fn is_right_variant(&self) -> bool {
        self.0.ends_with("Right")
    }

    pub fn is_left_variant(&self) -> bool {
        self.0.ends_with("Left")
    }
}

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for KeyCode {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

/// Logical key identity (`KeyboardEvent.key`), reduced to what the engine needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalKey {
    Control,
    Shift,
    Alt,
    Meta,
    Character(char),
    Other,
}

impl LogicalKey {
    /// Only Control and Shift releases can keep a chord sequence unbroken.
    pub fn is_chord_modifier(self) -> bool {
        matches!(self, LogicalKey::Control | LogicalKey::Shift)
    }
}

/// Modifier flags captured on a key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Modifiers {
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const fn none() -> Self {
        Self {
            ctrl: false,
            shift: false,
            alt: false,
            meta: false,
        }
    }

    pub const fn is_empty(self) -> bool {
        !(self.ctrl || self.shift || self.alt || self.meta)
    }
}

/// Key transition direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEdge {
    Down,
    Up,
}

/// Identity of a page element. Keys the direction-state side table and the
/// page's element map; never owns the element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub u32);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A keyboard event as seen by a capture-phase listener.
#[derive(Debug, Clone)]
pub struct KeyEvent {
    pub code: KeyCode,
    pub key: LogicalKey,
    pub mods: Modifiers,
    pub edge: KeyEdge,
    /// Focus target at dispatch time, when one exists.
    pub target: Option<NodeId>,
}

/// A browser-shaped event routed through [`crate::hooks::DocumentHooks`].
#[derive(Debug, Clone)]
pub enum DomEvent {
    KeyDown(KeyEvent),
    KeyUp(KeyEvent),
    /// The element's text changed; fired after the edit was applied.
    Input { target: NodeId },
    /// Window-level focus moved.
    FocusChange { target: Option<NodeId> },
}

/// Writing direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Ltr,
    Rtl,
}

impl Direction {
    pub fn as_css(self) -> &'static str {
        match self {
            Direction::Ltr => "ltr",
            Direction::Rtl => "rtl",
        }
    }

    pub fn from_css(s: &str) -> Option<Self> {
        match s {
            "ltr" => Some(Direction::Ltr),
            "rtl" => Some(Direction::Rtl),
            _ => None,
        }
    }
}

impl Default for Direction {
    fn default() -> Self {
        Direction::Ltr
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_css())
    }
}

/// Text alignment values the engine can observe or write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    Start,
    End,
    Left,
    Right,
    Center,
    Justify,
}

impl TextAlign {
    pub fn as_css(self) -> &'static str {
        match self {
            TextAlign::Start => "start",
            TextAlign::End => "end",
            TextAlign::Left => "left",
            TextAlign::Right => "right",
            TextAlign::Center => "center",
            TextAlign::Justify => "justify",
        }
    }

    pub fn from_css(s: &str) -> Option<Self> {
        match s {
            "start" => Some(TextAlign::Start),
            "end" => Some(TextAlign::End),
            "left" => Some(TextAlign::Left),
            "right" => Some(TextAlign::Right),
            "center" => Some(TextAlign::Center),
            "justify" => Some(TextAlign::Justify),
            _ => None,
        }
    }
}

/// Whether an element's direction follows typed content or a user override.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DirectionMode {
    Auto,
    Manual,
}

impl Default for DirectionMode {
    fn default() -> Self {
        DirectionMode::Auto
    }
}

/// What kind of editable surface an element is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ControlKind {
    /// `<input type="text">` and friends.
    Input,
    /// Password-masked input. Editable, but automatic inference must never
    /// read its content.
    Password,
    TextArea,
    ContentEditable,
    /// Anything that cannot receive typed text.
    Static,
}

impl ControlKind {
    pub fn is_editable(self) -> bool {
        !matches!(self, ControlKind::Static)
    }
}

/// Direction update produced by the engine for a single event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DirectionChange {
    pub target: NodeId,
    pub dir: Direction,
    /// True when the change came from the manual override chord.
    pub manual: bool,
}
