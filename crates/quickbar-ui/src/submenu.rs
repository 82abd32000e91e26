//! Popup sub-menus owned by individual buttons.

use quickbar_core::{Host, IconId, Rect, Size, Vec2, dp};

use crate::popup::PopupPlacement;
use crate::style::PopupStyle;

#[derive(Clone, Debug, PartialEq)]
pub struct SubMenuEntry {
    pub id: i32,
    pub icon: IconId,
    pub label: String,
    /// Close the popup before reporting the click.
    pub dismiss_on_click: bool,
    /// Reserve a check indicator at the trailing edge.
    pub show_check: bool,
    pub checked: bool,
}

impl SubMenuEntry {
    pub fn new(id: i32, icon: IconId, label: impl Into<String>) -> Self {
        Self {
            id,
            icon,
            label: label.into(),
            dismiss_on_click: true,
            show_check: false,
            checked: false,
        }
    }

    pub fn dismiss_on_click(mut self, dismiss: bool) -> Self {
        self.dismiss_on_click = dismiss;
        self
    }

    pub fn show_check(mut self, show: bool) -> Self {
        self.show_check = show;
        self
    }
}

/// Entries plus open/closed state. Created on the first `add_sub_item` and
/// reused for every later open/close cycle.
#[derive(Clone, Debug, Default)]
pub struct SubMenu {
    entries: Vec<SubMenuEntry>,
    placement: Option<PopupPlacement>,
    pressed_entry: Option<usize>,
}

impl SubMenu {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[SubMenuEntry] {
        &self.entries
    }

    pub fn entry(&self, index: usize) -> Option<&SubMenuEntry> {
        self.entries.get(index)
    }

    pub(crate) fn entry_mut(&mut self, index: usize) -> Option<&mut SubMenuEntry> {
        self.entries.get_mut(index)
    }

    pub fn has_entries(&self) -> bool {
        !self.entries.is_empty()
    }

    pub fn is_open(&self) -> bool {
        self.placement.is_some()
    }

    pub fn placement(&self) -> Option<PopupPlacement> {
        self.placement
    }

    pub fn pressed_entry(&self) -> Option<usize> {
        self.pressed_entry
    }

    pub(crate) fn push(&mut self, entry: SubMenuEntry) -> usize {
        self.entries.push(entry);
        self.entries.len() - 1
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
        self.close();
    }

    pub(crate) fn open(&mut self, placement: PopupPlacement) {
        self.placement = Some(placement);
        self.pressed_entry = None;
    }

    /// Returns whether the menu was open. Closing a closed menu is a no-op.
    pub(crate) fn close(&mut self) -> bool {
        self.pressed_entry = None;
        self.placement.take().is_some()
    }

    pub(crate) fn set_pressed_entry(&mut self, entry: Option<usize>) {
        self.pressed_entry = entry;
    }

    /// Popup size for the current entries: `max(min_width, widest entry)`
    /// capped at `screen_width - max_width_inset`, entries stacked vertically.
    pub fn measure(&self, style: &PopupStyle, host: &dyn Host, screen: Size) -> Size {
        let text_px = dp(style.text_size_dp) as f32;
        let pad = dp(style.entry_padding_dp) as f32;
        let icon = dp(style.icon_size_dp) as f32;
        let icon_gap = dp(style.icon_gap_dp) as f32;
        let check = dp(style.check_size_dp) as f32;

        let widest = self
            .entries
            .iter()
            .map(|e| {
                let mut w = pad + icon + icon_gap + host.text_width(&e.label, text_px) + pad;
                if e.show_check {
                    w += icon_gap + check;
                }
                w.ceil()
            })
            .fold(0.0f32, f32::max);

        let max_width = (screen.width - dp(style.max_width_inset_dp) as f32).max(0.0);
        let width = widest.max(dp(style.min_width_dp) as f32).min(max_width);
        let height = 2.0 * dp(style.vertical_padding_dp) as f32
            + self.entries.len() as f32 * dp(style.entry_height_dp) as f32;

        Size::new(width, height)
    }

    /// Screen rectangle of entry `index` inside an open popup at `placement`.
    pub fn entry_rect(&self, index: usize, placement: &PopupPlacement, style: &PopupStyle) -> Option<Rect> {
        if index >= self.entries.len() {
            return None;
        }
        let entry_h = dp(style.entry_height_dp) as f32;
        let top = placement.origin.y + dp(style.vertical_padding_dp) as f32 + index as f32 * entry_h;
        Some(Rect::new(placement.origin.x, top, placement.size.width, entry_h))
    }

    /// Entry under a screen point, if the menu is open.
    pub fn entry_at(&self, point: Vec2, style: &PopupStyle) -> Option<usize> {
        let placement = self.placement?;
        (0..self.entries.len()).find(|&i| {
            self.entry_rect(i, &placement, style)
                .is_some_and(|r| r.contains(point))
        })
    }
}
