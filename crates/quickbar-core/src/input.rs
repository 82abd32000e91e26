use crate::Vec2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerEventKind {
    Down,
    Up,
    Move,
    Cancel,
    Enter,
    Leave,
}

/// A single-pointer touch event. Row events are in row-local px, popup
/// events in screen px.
#[derive(Clone, Debug)]
pub struct PointerEvent {
    pub event: PointerEventKind,
    pub position: Vec2,
}

impl PointerEvent {
    pub fn touch(event: PointerEventKind, x: f32, y: f32) -> Self {
        Self {
            event,
            position: Vec2 { x, y },
        }
    }

    pub fn down(x: f32, y: f32) -> Self {
        Self::touch(PointerEventKind::Down, x, y)
    }

    pub fn up(x: f32, y: f32) -> Self {
        Self::touch(PointerEventKind::Up, x, y)
    }

    pub fn moved(x: f32, y: f32) -> Self {
        Self::touch(PointerEventKind::Move, x, y)
    }

    pub fn cancel(x: f32, y: f32) -> Self {
        Self::touch(PointerEventKind::Cancel, x, y)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Enter,
    Escape,
    /// Platform back (Android back button / gesture).
    Back,
    /// Platform menu key.
    Menu,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyState {
    Pressed,
    Released,
}

#[derive(Clone, Debug)]
pub struct KeyEvent {
    pub key: Key,
    pub state: KeyState,
    pub is_repeat: bool,
}

impl KeyEvent {
    pub fn pressed(key: Key) -> Self {
        Self {
            key,
            state: KeyState::Pressed,
            is_repeat: false,
        }
    }

    pub fn released(key: Key) -> Self {
        Self {
            key,
            state: KeyState::Released,
            is_repeat: false,
        }
    }
}
