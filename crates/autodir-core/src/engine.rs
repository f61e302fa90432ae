use crate::chord::ChordTracker;
use crate::page::Page;
use crate::policy;
use crate::types::{ControlKind, DirectionChange, DirectionMode, KeyEvent, NodeId};
use crate::unicode;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::debug;

/// Tunables for an [`Engine`] instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Recognize the Control+Shift manual override chord.
    pub manual_override: bool,
    /// Infer direction from the first typed letter.
    pub auto_detect: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            manual_override: true,
            auto_detect: true,
        }
    }
}

/// Event-driven direction engine for one document.
///
/// Owns the chord tracker and the per-element auto/manual side table. The
/// side table is keyed by [`NodeId`] and never holds the element itself, so
/// it does not keep removed elements alive.
pub struct Engine {
    options: Options,
    tracker: ChordTracker,
    /// Elements pinned by the manual chord. Absence means auto.
    manual: HashSet<NodeId>,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(Options::default())
    }
}

impl Engine {
    pub fn new(options: Options) -> Self {
        Self {
            options,
            tracker: ChordTracker::new(),
            manual: HashSet::new(),
        }
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn mode_of(&self, node: NodeId) -> DirectionMode {
        if self.manual.contains(&node) {
            DirectionMode::Manual
        } else {
            DirectionMode::Auto
        }
    }

    pub fn on_key_down(&mut self, event: &KeyEvent) {
        if !self.options.manual_override {
            return;
        }
        self.tracker.on_key_down(event);
    }

    /// Key release: consult the chord tracker, and apply a manual override to
    /// the event's focus target when it completed a valid chord on an
    /// editable element.
    pub fn on_key_up(&mut self, page: &mut Page, event: &KeyEvent) -> Option<DirectionChange> {
        if !self.options.manual_override {
            return None;
        }
        let dir = self.tracker.on_key_up(event)?;
        let target = event.target?;
        if !page.element(target)?.is_editable() {
            return None;
        }

        policy::set_direction(page, target, dir);
        self.manual.insert(target);
        debug!(node = %target, dir = %dir, "manual override chord");
        Some(DirectionChange {
            target,
            dir,
            manual: true,
        })
    }

    /// Input: the element's text already changed; infer direction from it.
    ///
    /// Password-masked inputs are never inspected. An emptied value re-arms
    /// automatic inference even if the element was pinned manually.
    pub fn on_input(&mut self, page: &mut Page, target: NodeId) -> Option<DirectionChange> {
        let (kind, empty) = {
            let element = page.element(target)?;
            (element.kind, element.value.is_empty())
        };
        if !kind.is_editable() || kind == ControlKind::Password {
            return None;
        }
        if empty {
            if self.manual.remove(&target) {
                debug!(node = %target, "cleared value, back to auto");
            }
            return None;
        }
        if !self.options.auto_detect {
            return None;
        }
        if !policy::should_auto_change(page, target, self.mode_of(target)) {
            return None;
        }

        let dir = unicode::detect_direction(&page.element(target)?.value)?;
        policy::set_direction(page, target, dir);
        Some(DirectionChange {
            target,
            dir,
            manual: false,
        })
    }

    /// Window focus moved: drop all tracked keys. A chord spanning a focus
    /// change must not complete.
    pub fn on_focus_change(&mut self) {
        self.tracker.clear();
    }
}
