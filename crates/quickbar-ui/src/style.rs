//! Dimensions and colors for the row and its popups.
//!
//! All dimensions are in dp and resolved to px with `quickbar_core::dp` at
//! the moment geometry is derived. Both structs deserialize with defaults for
//! missing fields, so a host can ship a partial JSON override:
//!
//! ```rust
//! use quickbar_ui::RowStyle;
//!
//! let style: RowStyle = serde_json::from_str(r#"{ "max_height_dp": 64.0 }"#).unwrap();
//! assert_eq!(style.max_height_dp, 64.0);
//! assert_eq!(style.min_height_dp, 20.0);
//! ```

use quickbar_core::{Color, Theme};
use serde::{Deserialize, Serialize};

/// Upper bound for any style dimension.
pub const MAX_DIMENSION_DP: f32 = 4096.0;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RowStyle {
    pub button_spacing_dp: f32,
    pub side_margin_dp: f32,
    /// Row height at progress 0.
    pub min_height_dp: f32,
    /// Row height at progress 1.
    pub max_height_dp: f32,
    pub corner_radius_dp: f32,
    /// Icon top inset and label bottom inset.
    pub edge_padding_dp: f32,
    pub icon_size_dp: f32,
    pub text_size_dp: f32,
    /// Background opacity at full expansion, in [0, 1].
    pub background_alpha: f32,
    /// Content opacity multiplier for the pressed button, in [0, 1].
    pub disabled_content_alpha: f32,
    pub background_color: Color,
    pub content_color: Color,
}

impl Default for RowStyle {
    fn default() -> Self {
        Self::from_theme(&Theme::default())
    }
}

impl RowStyle {
    pub fn from_theme(theme: &Theme) -> Self {
        Self {
            button_spacing_dp: 8.0,
            side_margin_dp: 12.0,
            min_height_dp: 20.0,
            max_height_dp: 56.0,
            corner_radius_dp: 10.0,
            edge_padding_dp: 8.0,
            icon_size_dp: 24.0,
            text_size_dp: 11.0,
            background_alpha: 0.10,
            disabled_content_alpha: 0.5,
            background_color: theme.row_background,
            content_color: theme.row_content,
        }
    }

    /// Clamps dimensions into `[0, MAX_DIMENSION_DP]` (NaN becomes 0), lifts
    /// `max_height_dp` to at least `min_height_dp`, and clamps the alphas
    /// into [0, 1].
    pub fn sanitized(mut self) -> Self {
        for v in [
            &mut self.button_spacing_dp,
            &mut self.side_margin_dp,
            &mut self.min_height_dp,
            &mut self.max_height_dp,
            &mut self.corner_radius_dp,
            &mut self.edge_padding_dp,
            &mut self.icon_size_dp,
            &mut self.text_size_dp,
        ] {
            *v = clamp_dimension(*v);
        }
        self.max_height_dp = self.max_height_dp.max(self.min_height_dp);
        self.background_alpha = clamp_unit(self.background_alpha);
        self.disabled_content_alpha = clamp_unit(self.disabled_content_alpha);
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PopupStyle {
    pub entry_height_dp: f32,
    pub min_width_dp: f32,
    /// Popup width is capped at `screen_width - max_width_inset_dp`.
    pub max_width_inset_dp: f32,
    /// Distance kept from the screen edges.
    pub screen_margin_dp: f32,
    /// Gap between the row and the popup.
    pub anchor_gap_dp: f32,
    pub vertical_padding_dp: f32,
    pub entry_padding_dp: f32,
    pub icon_size_dp: f32,
    pub icon_gap_dp: f32,
    pub text_size_dp: f32,
    pub check_size_dp: f32,
    pub corner_radius_dp: f32,
    pub surface_color: Color,
    pub content_color: Color,
    pub accent_color: Color,
}

impl Default for PopupStyle {
    fn default() -> Self {
        Self::from_theme(&Theme::default())
    }
}

impl PopupStyle {
    pub fn from_theme(theme: &Theme) -> Self {
        Self {
            entry_height_dp: 48.0,
            min_width_dp: 196.0,
            max_width_inset_dp: 40.0,
            screen_margin_dp: 16.0,
            anchor_gap_dp: 8.0,
            vertical_padding_dp: 8.0,
            entry_padding_dp: 18.0,
            icon_size_dp: 24.0,
            icon_gap_dp: 16.0,
            text_size_dp: 16.0,
            check_size_dp: 20.0,
            corner_radius_dp: 10.0,
            surface_color: theme.popup_surface,
            content_color: theme.popup_content,
            accent_color: theme.accent,
        }
    }
}

impl PopupStyle {
    /// Clamps dimensions into `[0, MAX_DIMENSION_DP]`; NaN becomes 0.
    pub fn sanitized(mut self) -> Self {
        for v in [
            &mut self.entry_height_dp,
            &mut self.min_width_dp,
            &mut self.max_width_inset_dp,
            &mut self.screen_margin_dp,
            &mut self.anchor_gap_dp,
            &mut self.vertical_padding_dp,
            &mut self.entry_padding_dp,
            &mut self.icon_size_dp,
            &mut self.icon_gap_dp,
            &mut self.text_size_dp,
            &mut self.check_size_dp,
            &mut self.corner_radius_dp,
        ] {
            *v = clamp_dimension(*v);
        }
        self
    }
}

fn clamp_dimension(v: f32) -> f32 {
    if v.is_nan() { 0.0 } else { v.clamp(0.0, MAX_DIMENSION_DP) }
}

pub(crate) fn clamp_unit(v: f32) -> f32 {
    if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) }
}
