pub mod chord;
pub mod engine;
pub mod hooks;
pub mod keymap;
pub mod page;
pub mod policy;
pub mod script;
pub mod types;
pub mod unicode;

pub use engine::{Engine, Options};
pub use hooks::DocumentHooks;
pub use page::{Element, Page};
pub use types::{Direction, DirectionChange, DirectionMode, NodeId};
