//! Services the embedding toolkit provides to widgets.
//!
//! Nothing here draws or opens windows; the host replays `Scene`s on its own
//! surface and shows popups at the placements widgets compute.

use crate::{IconId, ImageHandle, Size};

/// Font metrics for a given text size, in px. `ascent` is negative (above
/// the baseline), `descent` positive, as most platform APIs report them.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FontMetrics {
    pub ascent: f32,
    pub descent: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HapticKind {
    /// Short discrete pulse for a committed tap.
    KeyboardTap,
}

pub trait Host {
    /// `None` when the resource is missing; callers draw nothing in its place.
    fn resolve_icon(&self, icon: IconId) -> Option<ImageHandle>;

    fn font_metrics(&self, size_px: f32) -> FontMetrics;

    fn text_width(&self, text: &str, size_px: f32) -> f32;

    /// Size of the screen popups are positioned on, in px.
    fn screen_size(&self) -> Size;

    fn perform_haptic(&self, _kind: HapticKind) {}
}
