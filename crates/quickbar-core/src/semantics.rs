use crate::Rect;

/// High‑level semantic role of a node, similar to ARIA roles.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    Button,
    /// A button that opens a popup menu.
    MenuButton,
    MenuItem,
    Container,
}

/// Semantics attached to a node, used to build the accessibility tree.
#[derive(Clone, Debug, PartialEq)]
pub struct Semantics {
    pub role: Role,
    /// Human‑readable label for screen readers.
    pub label: Option<String>,
    /// Bounds in the owner's local coordinates.
    pub bounds: Rect,
    /// Pressed buttons and open menu buttons report `true`.
    pub selected: bool,
    pub enabled: bool,
}

impl Semantics {
    pub fn new(role: Role, bounds: Rect) -> Self {
        Self {
            role,
            label: None,
            bounds,
            selected: false,
            enabled: true,
        }
    }

    pub fn label(mut self, label: Option<String>) -> Self {
        self.label = label;
        self
    }

    pub fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }
}
