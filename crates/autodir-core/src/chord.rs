use crate::types::{Direction, KeyCode, KeyEvent, LogicalKey, Modifiers};
use tracing::trace;

/// One tracked key press, kept until its release.
#[derive(Debug, Clone)]
pub struct KeyPress {
    pub code: KeyCode,
    pub key: LogicalKey,
    pub mods: Modifiers,
}

/// Tracks held keys and recognizes the manual override chord.
///
/// The chord is release-triggered: exactly two keys must be tracked at the
/// moment of release, the released key must be logically Control or Shift,
/// and the later of the two press records must carry both Control and Shift
/// with a physical code ending in Right (rtl) or Left (ltr). In practice that
/// means Control held, then the right or left Shift pressed, then either
/// modifier released (or the same gesture with Control and Shift swapped).
/// Any stray key makes a third entry and breaks the sequence.
#[derive(Debug, Default)]
pub struct ChordTracker {
    /// Held keys in press order, unique by physical code.
    pressed: Vec<KeyPress>,
    /// Set once a release deviates from the two-key pattern; cleared when the
    /// next key goes down on an empty set.
    broken: bool,
}

impl ChordTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_key_down(&mut self, event: &KeyEvent) {
        if self.pressed.is_empty() {
            self.broken = false;
        }
        // Auto-repeat fires key-down again for a held code; keep the first record.
        if !self.pressed.iter().any(|p| p.code == event.code) {
            self.pressed.push(KeyPress {
                code: event.code.clone(),
                key: event.key,
                mods: event.mods,
            });
        }
    }

    /// Returns the override direction when this release completes a valid chord.
    pub fn on_key_up(&mut self, event: &KeyEvent) -> Option<Direction> {
        // Snapshot the tracked set before removing the released key.
        let snapshot_len = self.pressed.len();
        let last = self.pressed.get(1).cloned();
        self.pressed.retain(|p| p.code != event.code);

        if snapshot_len != 2 || !event.key.is_chord_modifier() {
            self.broken = true;
        }
        if self.broken {
            trace!(code = %event.code, "release outside chord pattern");
            return None;
        }

        let last = last?;
        if !(last.mods.ctrl && last.mods.shift) {
            return None;
        }
        if last.code.is_right_variant() {
            Some(Direction::Rtl)
        } else if last.code.is_left_variant() {
            Some(Direction::Ltr)
        } else {
            None
        }
    }

    /// Focus moved; whatever was held no longer forms a chord.
    pub fn clear(&mut self) {
        self.pressed.clear();
    }

    pub fn is_idle(&self) -> bool {
        self.pressed.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keymap;
    use crate::types::KeyEdge;

    fn event(code: &str, mods: Modifiers, edge: KeyEdge) -> KeyEvent {
        let code = KeyCode::from(code);
        let key = keymap::logical_for_code(&code);
        KeyEvent {
            code,
            key,
            mods,
            edge,
            target: None,
        }
    }

    fn down(code: &str, mods: Modifiers) -> KeyEvent {
        event(code, mods, KeyEdge::Down)
    }

    fn up(code: &str, mods: Modifiers) -> KeyEvent {
        event(code, mods, KeyEdge::Up)
    }

    const CTRL: Modifiers = Modifiers {
        ctrl: true,
        shift: false,
        alt: false,
        meta: false,
    };
    const CTRL_SHIFT: Modifiers = Modifiers {
        ctrl: true,
        shift: true,
        alt: false,
        meta: false,
    };

    #[test]
    fn ctrl_then_right_shift_release_shift_is_rtl() {
        let mut tracker = ChordTracker::new();
        tracker.on_key_down(&down("ControlLeft", CTRL));
        tracker.on_key_down(&down("ShiftRight", CTRL_SHIFT));
        let res = tracker.on_key_up(&up("ShiftRight", CTRL));
        assert_eq!(res, Some(Direction::Rtl));
    }

    #[test]
    fn ctrl_then_left_shift_release_shift_is_ltr() {
        let mut tracker = ChordTracker::new();
        tracker.on_key_down(&down("ControlLeft", CTRL));
        tracker.on_key_down(&down("ShiftLeft", CTRL_SHIFT));
        let res = tracker.on_key_up(&up("ShiftLeft", CTRL));
        assert_eq!(res, Some(Direction::Ltr));
    }

    #[test]
    fn releasing_first_pressed_key_also_triggers() {
        // Control goes down first but comes up first too; the Shift record is
        // still the later of the two at release time.
        let mut tracker = ChordTracker::new();
        tracker.on_key_down(&down("ControlLeft", CTRL));
        tracker.on_key_down(&down("ShiftRight", CTRL_SHIFT));
        let res = tracker.on_key_up(&up("ControlLeft", CTRL_SHIFT));
        assert_eq!(res, Some(Direction::Rtl));
    }

    #[test]
    fn shift_then_right_control_is_rtl() {
        let shift = Modifiers {
            shift: true,
            ..Modifiers::none()
        };
        let mut tracker = ChordTracker::new();
        tracker.on_key_down(&down("ShiftLeft", shift));
        tracker.on_key_down(&down("ControlRight", CTRL_SHIFT));
        let res = tracker.on_key_up(&up("ControlRight", shift));
        assert_eq!(res, Some(Direction::Rtl));
    }

    #[test]
    fn arrow_tap_makes_three_keys_and_breaks_sequence() {
        let mut tracker = ChordTracker::new();
        tracker.on_key_down(&down("ControlLeft", CTRL));
        tracker.on_key_down(&down("ShiftLeft", CTRL_SHIFT));
        tracker.on_key_down(&down("ArrowRight", CTRL_SHIFT));

        // Releasing the arrow sees three tracked keys.
        assert_eq!(tracker.on_key_up(&up("ArrowRight", CTRL_SHIFT)), None);
        // The sequence stays broken for the remaining releases.
        assert_eq!(tracker.on_key_up(&up("ShiftLeft", CTRL)), None);
        assert_eq!(tracker.on_key_up(&up("ControlLeft", Modifiers::none())), None);
        assert!(tracker.is_idle());
    }

    #[test]
    fn arrow_release_in_two_key_set_breaks_sequence() {
        let mut tracker = ChordTracker::new();
        tracker.on_key_down(&down("ControlLeft", CTRL));
        tracker.on_key_down(&down("ArrowRight", CTRL));
        // Released key is not logically Control or Shift.
        assert_eq!(tracker.on_key_up(&up("ArrowRight", CTRL)), None);
        assert_eq!(tracker.on_key_up(&up("ControlLeft", Modifiers::none())), None);
    }

    #[test]
    fn single_key_release_breaks_sequence() {
        let mut tracker = ChordTracker::new();
        tracker.on_key_down(&down("ControlLeft", CTRL));
        assert_eq!(tracker.on_key_up(&up("ControlLeft", Modifiers::none())), None);
    }

    #[test]
    fn broken_flag_resets_on_fresh_key_down() {
        let mut tracker = ChordTracker::new();
        // Break a sequence first.
        tracker.on_key_down(&down("KeyA", Modifiers::none()));
        assert_eq!(tracker.on_key_up(&up("KeyA", Modifiers::none())), None);
        assert!(tracker.is_idle());

        // A new gesture on the emptied set works again.
        tracker.on_key_down(&down("ControlLeft", CTRL));
        tracker.on_key_down(&down("ShiftRight", CTRL_SHIFT));
        assert_eq!(
            tracker.on_key_up(&up("ShiftRight", CTRL)),
            Some(Direction::Rtl)
        );
    }

    #[test]
    fn auto_repeat_key_down_keeps_first_record() {
        let mut tracker = ChordTracker::new();
        tracker.on_key_down(&down("ControlLeft", CTRL));
        tracker.on_key_down(&down("ShiftRight", CTRL_SHIFT));
        // Held Shift auto-repeats.
        tracker.on_key_down(&down("ShiftRight", CTRL_SHIFT));
        tracker.on_key_down(&down("ShiftRight", CTRL_SHIFT));
        assert_eq!(
            tracker.on_key_up(&up("ShiftRight", CTRL)),
            Some(Direction::Rtl)
        );
    }

    #[test]
    fn focus_clear_drops_chord_in_progress() {
        let mut tracker = ChordTracker::new();
        tracker.on_key_down(&down("ControlLeft", CTRL));
        tracker.on_key_down(&down("ShiftRight", CTRL_SHIFT));
        tracker.clear();
        // The release now sees an empty snapshot and cannot fire.
        assert_eq!(tracker.on_key_up(&up("ShiftRight", CTRL)), None);
    }

    #[test]
    fn plain_ctrl_shift_record_without_both_mods_does_not_fire() {
        // Second record lacks the ctrl flag (e.g. synthesized event).
        let shift_only = Modifiers {
            shift: true,
            ..Modifiers::none()
        };
        let mut tracker = ChordTracker::new();
        tracker.on_key_down(&down("ControlLeft", CTRL));
        tracker.on_key_down(&down("ShiftRight", shift_only));
        assert_eq!(tracker.on_key_up(&up("ShiftRight", Modifiers::none())), None);
    }
}
