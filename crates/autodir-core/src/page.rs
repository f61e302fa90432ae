use crate::types::{ControlKind, Direction, NodeId, TextAlign};
use std::collections::HashMap;

/// Inline style slots the engine is allowed to touch.
#[derive(Debug, Clone, Default)]
pub struct InlineStyle {
    pub direction: Option<Direction>,
    pub text_align: Option<TextAlign>,
}

/// A single element that can receive focus and input.
///
/// `value` is the element's current text: the control value for form fields,
/// the text content for content-editable regions.
#[derive(Debug, Clone)]
pub struct Element {
    pub kind: ControlKind,
    pub value: String,
    /// Alignment coming from the page's stylesheet, before inline overrides.
    pub sheet_align: TextAlign,
    pub style: InlineStyle,
}

impl Element {
    pub fn new(kind: ControlKind) -> Self {
        Self {
            kind,
            value: String::new(),
            sheet_align: TextAlign::Start,
            style: InlineStyle::default(),
        }
    }

    pub fn with_align(mut self, align: TextAlign) -> Self {
        self.sheet_align = align;
        self
    }

    pub fn is_editable(&self) -> bool {
        self.kind.is_editable()
    }

    /// Resolved alignment: inline wins over the stylesheet.
    pub fn resolved_align(&self) -> TextAlign {
        self.style.text_align.unwrap_or(self.sheet_align)
    }

    /// Resolved direction; elements inherit ltr when nothing was set.
    pub fn resolved_direction(&self) -> Direction {
        self.style.direction.unwrap_or_default()
    }
}

/// Writing direction declared on the page root or body. The `dir` attribute
/// wins over the computed style when both are present.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeclaredDirection {
    pub attribute: Option<Direction>,
    pub computed: Direction,
}

impl DeclaredDirection {
    pub fn resolve(self) -> Direction {
        self.attribute.unwrap_or(self.computed)
    }
}

/// Mutable model of the host document, as far as this crate needs to see it.
#[derive(Debug, Default)]
pub struct Page {
    pub html: DeclaredDirection,
    pub body: DeclaredDirection,
    pub focused: Option<NodeId>,
    elements: HashMap<NodeId, Element>,
    next_id: u32,
}

impl Page {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, element: Element) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        self.elements.insert(id, element);
        id
    }

    pub fn element(&self, id: NodeId) -> Option<&Element> {
        self.elements.get(&id)
    }

    pub fn element_mut(&mut self, id: NodeId) -> Option<&mut Element> {
        self.elements.get_mut(&id)
    }

    pub fn focus(&mut self, id: Option<NodeId>) {
        self.focused = id;
    }

    pub fn set_value(&mut self, id: NodeId, value: impl Into<String>) {
        if let Some(element) = self.elements.get_mut(&id) {
            element.value = value.into();
        }
    }

    /// True if either the root or the body resolves right-to-left.
    pub fn is_rtl(&self) -> bool {
        self.html.resolve() == Direction::Rtl || self.body.resolve() == Direction::Rtl
    }
}
