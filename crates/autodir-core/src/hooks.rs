use crate::engine::{Engine, Options};
use crate::page::Page;
use crate::types::{DirectionChange, DirectionMode, DomEvent, NodeId};
use parking_lot::Mutex;
use tracing::info;

type ChangeCallback = Box<dyn Fn(&DirectionChange) + Send + Sync>;

/// Capture-phase event routing for one document.
///
/// One instance per page context owns the [`Engine`], so tracker state stays
/// page-wide without module-level globals. Hosts are expected to call
/// [`DocumentHooks::dispatch`] ahead of the page's own listeners (capture
/// phase), so the engine sees every event even when a downstream handler
/// stops propagation. Dispatch is synchronous and always runs to completion.
pub struct DocumentHooks {
    engine: Mutex<Engine>,
    on_change: Mutex<Option<ChangeCallback>>,
}

impl Default for DocumentHooks {
    fn default() -> Self {
        Self::new(Options::default())
    }
}

impl DocumentHooks {
    pub fn new(options: Options) -> Self {
        info!(?options, "installing document hooks");
        Self {
            engine: Mutex::new(Engine::new(options)),
            on_change: Mutex::new(None),
        }
    }

    /// Register a callback invoked for every applied direction change.
    pub fn set_on_change(&self, cb: impl Fn(&DirectionChange) + Send + Sync + 'static) {
        *self.on_change.lock() = Some(Box::new(cb));
    }

    /// Route one captured event through the engine.
    pub fn dispatch(&self, page: &mut Page, event: &DomEvent) -> Option<DirectionChange> {
        let change = {
            let mut engine = self.engine.lock();
            match event {
                DomEvent::KeyDown(key) => {
                    engine.on_key_down(key);
                    None
                }
                DomEvent::KeyUp(key) => engine.on_key_up(page, key),
                DomEvent::Input { target } => engine.on_input(page, *target),
                DomEvent::FocusChange { target } => {
                    page.focus(*target);
                    engine.on_focus_change();
                    None
                }
            }
        };
        if let Some(ref change) = change {
            if let Some(cb) = self.on_change.lock().as_ref() {
                cb(change);
            }
        }
        change
    }

    pub fn mode_of(&self, node: NodeId) -> DirectionMode {
        self.engine.lock().mode_of(node)
    }
}
