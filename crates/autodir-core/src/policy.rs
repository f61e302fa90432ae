use crate::page::Page;
use crate::types::{Direction, DirectionMode, NodeId, TextAlign};
use tracing::debug;

/// Apply a direction to an element and normalize conflicting alignment.
///
/// An explicit left/right alignment would pin text to one physical edge after
/// the flip, so it is reset to the direction-relative "start". Other values
/// (center, justify, start, end) are left alone.
pub fn set_direction(page: &mut Page, node: NodeId, dir: Direction) {
    let Some(element) = page.element_mut(node) else {
        return;
    };
    element.style.direction = Some(dir);
    if matches!(element.resolved_align(), TextAlign::Left | TextAlign::Right) {
        element.style.text_align = Some(TextAlign::Start);
    }
    debug!(node = %node, dir = %dir, "direction set");
}

/// Whether automatic inference may touch this element.
///
/// A page that already resolves rtl combined with a right-aligned element is
/// taken as deliberately laid out for RTL; the first Latin character typed
/// must not flip it back to ltr.
pub fn should_auto_change(page: &Page, node: NodeId, mode: DirectionMode) -> bool {
    if mode == DirectionMode::Manual {
        return false;
    }
    let Some(element) = page.element(node) else {
        return false;
    };
    !(page.is_rtl() && element.resolved_align() == TextAlign::Right)
}
