//! Placement of a sub-menu popup relative to its anchor button.
//!
//! The popup is centered horizontally over the button and kept inside
//! `[margin, screen_width - margin]`. It goes above the row, separated by
//! `gap`; when that would cross the top margin it flips below the row.
//! All arithmetic is done in whole px so positions match what the host's
//! window system will accept.

use quickbar_core::{Rect, Size, Vec2};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PopupSide {
    Above,
    Below,
}

/// Where an open popup sits on screen.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PopupPlacement {
    /// Top-left corner in screen coordinates.
    pub origin: Vec2,
    pub size: Size,
    pub side: PopupSide,
}

impl PopupPlacement {
    pub fn rect(&self) -> Rect {
        Rect::from_origin_size(self.origin, self.size)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PopupRequest {
    /// Anchor button in screen coordinates.
    pub anchor: Rect,
    /// The whole row in screen coordinates.
    pub row: Rect,
    /// Measured popup size.
    pub popup: Size,
    pub screen: Size,
    pub margin: i32,
    pub gap: i32,
}

pub fn position_popup(req: &PopupRequest) -> PopupPlacement {
    let popup_w = req.popup.width as i32;
    let popup_h = req.popup.height as i32;
    let screen_w = req.screen.width as i32;

    let mut x = req.anchor.x as i32 + (req.anchor.w as i32 - popup_w) / 2;
    if x < req.margin {
        x = req.margin;
    } else if x + popup_w > screen_w - req.margin {
        x = screen_w - req.margin - popup_w;
    }

    let mut y = req.row.y as i32 - popup_h - req.gap;
    let mut side = PopupSide::Above;
    if y < req.margin {
        y = req.row.bottom() as i32 + req.gap;
        side = PopupSide::Below;
    }

    PopupPlacement {
        origin: Vec2::new(x as f32, y as f32),
        size: req.popup,
        side,
    }
}
