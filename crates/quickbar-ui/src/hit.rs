//! Pointer → button resolution and the per-gesture press state machine.

use quickbar_core::{PointerEventKind, Vec2};

use crate::item::ButtonItem;
use crate::layout::RowGeometry;

/// Index of the button under `point`, using the same slot rectangles the
/// painter draws. Hidden slots are gaps: they keep their place but never hit.
pub fn hit_test(geometry: &RowGeometry, buttons: &[ButtonItem], point: Vec2) -> Option<usize> {
    if !geometry.is_visible() {
        return None;
    }
    let hit = geometry
        .button_rects()
        .filter(|(i, _)| buttons.get(*i).is_some_and(|b| !b.is_hidden()))
        .find(|(_, r)| r.contains(point))
        .map(|(i, _)| i);
    log::trace!("hit_test ({}, {}) -> {:?}", point.x, point.y, hit);
    hit
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PressOutcome {
    /// Not a press/release/cancel transition, or nothing was under the pointer.
    Ignored,
    /// Down landed on this button.
    Pressed(usize),
    /// Up landed on the same button that was pressed.
    Committed(usize),
    /// The press ended elsewhere or was cancelled; no action.
    Released(usize),
}

/// `Idle → Pressed(i)` on down, `Pressed(i) → Idle` on up/cancel.
///
/// Every down starts a fresh gesture, so a stale press left over from a lost
/// up event is simply replaced.
#[derive(Clone, Copy, Debug, Default)]
pub struct PressTracker {
    pressed: Option<usize>,
}

impl PressTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pressed(&self) -> Option<usize> {
        self.pressed
    }

    pub fn reset(&mut self) -> Option<usize> {
        self.pressed.take()
    }

    pub fn handle(&mut self, kind: PointerEventKind, hit: Option<usize>) -> PressOutcome {
        match kind {
            PointerEventKind::Down => {
                self.pressed = hit;
                match hit {
                    Some(i) => PressOutcome::Pressed(i),
                    None => PressOutcome::Ignored,
                }
            }
            PointerEventKind::Up => match self.pressed.take() {
                Some(i) if hit == Some(i) => PressOutcome::Committed(i),
                Some(i) => PressOutcome::Released(i),
                None => PressOutcome::Ignored,
            },
            PointerEventKind::Cancel => match self.pressed.take() {
                Some(i) => PressOutcome::Released(i),
                None => PressOutcome::Ignored,
            },
            PointerEventKind::Move | PointerEventKind::Enter | PointerEventKind::Leave => {
                PressOutcome::Ignored
            }
        }
    }
}
