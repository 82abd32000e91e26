//! # Row geometry
//!
//! Everything the painter and the hit tester need is derived here, from four
//! inputs only: the measured width, the button count, the expansion progress
//! and the style. `RowGeometry` is a snapshot; it is recomputed for every
//! paint and every pointer event and never cached on the row.
//!
//! Height policy: the row interpolates between `min_height_dp` and
//! `max_height_dp`, so a collapsed row still reports its minimum height to
//! the host. Collapsed rows (progress 0) are nevertheless invisible and do
//! not intercept touches; see `RowGeometry::is_visible`.
//!
//! Icons scale linearly with progress while labels scale with its square
//! root, so labels stay readable longer while the row collapses.

use quickbar_core::{Rect, alpha_from_fraction, dp, scale_alpha};

use crate::style::RowStyle;

/// Style dimensions resolved to px under the current density.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RowMetrics {
    pub spacing: i32,
    pub side_margin: i32,
    pub min_height: i32,
    pub max_height: i32,
    pub corner_radius: i32,
    pub edge_padding: i32,
    pub icon_size: i32,
    pub text_size: i32,
}

impl RowMetrics {
    /// Resolves a sanitized copy of `style`, so heights never invert.
    pub fn resolve(style: &RowStyle) -> Self {
        let style = style.sanitized();
        Self {
            spacing: dp(style.button_spacing_dp),
            side_margin: dp(style.side_margin_dp),
            min_height: dp(style.min_height_dp),
            max_height: dp(style.max_height_dp),
            corner_radius: dp(style.corner_radius_dp),
            edge_padding: dp(style.edge_padding_dp),
            icon_size: dp(style.icon_size_dp),
            text_size: dp(style.text_size_dp),
        }
    }

    /// `floor(lerp(min_height, max_height, progress))`.
    pub fn row_height(&self, progress: f32) -> i32 {
        let p = progress.clamp(0.0, 1.0);
        let span = self.max_height.saturating_sub(self.min_height).max(0);
        (self.min_height as f32 + span as f32 * p) as i32
    }

    /// Integer width of one button; 0 when there are no buttons or no room.
    pub fn button_width(&self, measured_width: i32, button_count: usize) -> i32 {
        if button_count == 0 {
            return 0;
        }
        let count = button_count as i32;
        let total_spacing = (count - 1)
            .saturating_mul(self.spacing)
            .saturating_add(self.side_margin.saturating_mul(2));
        (measured_width.saturating_sub(total_spacing) / count).max(0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RowGeometry {
    pub button_count: usize,
    pub measured_width: i32,
    pub progress: f32,
    pub button_width: i32,
    pub spacing: i32,
    pub side_margin: i32,
    pub row_height: i32,
    pub corner_radius: i32,
    pub edge_padding: i32,
    pub icon_scale: f32,
    pub text_scale: f32,
    pub icon_size: i32,
    pub text_size: i32,
    pub icon_alpha: u8,
    pub text_alpha: u8,
    pub background_alpha: u8,
    pub disabled_content_alpha: f32,
}

impl RowGeometry {
    pub fn compute(
        measured_width: i32,
        button_count: usize,
        progress: f32,
        style: &RowStyle,
    ) -> Self {
        let progress = progress.clamp(0.0, 1.0);
        let m = RowMetrics::resolve(style);

        if button_count == 0 {
            return Self {
                button_count: 0,
                measured_width,
                progress,
                button_width: 0,
                spacing: m.spacing,
                side_margin: m.side_margin,
                row_height: 0,
                corner_radius: m.corner_radius,
                edge_padding: m.edge_padding,
                icon_scale: 0.0,
                text_scale: 0.0,
                icon_size: 0,
                text_size: 0,
                icon_alpha: 0,
                text_alpha: 0,
                background_alpha: 0,
                disabled_content_alpha: style.disabled_content_alpha.clamp(0.0, 1.0),
            };
        }

        let icon_scale = progress;
        let text_scale = progress.sqrt();

        Self {
            button_count,
            measured_width,
            progress,
            button_width: m.button_width(measured_width, button_count),
            spacing: m.spacing,
            side_margin: m.side_margin,
            row_height: m.row_height(progress),
            corner_radius: m.corner_radius,
            edge_padding: m.edge_padding,
            icon_scale,
            text_scale,
            icon_size: (m.icon_size as f32 * icon_scale) as i32,
            text_size: (m.text_size as f32 * text_scale) as i32,
            icon_alpha: alpha_from_fraction(icon_scale),
            text_alpha: alpha_from_fraction(text_scale),
            background_alpha: alpha_from_fraction(style.background_alpha.clamp(0.0, 1.0) * progress),
            disabled_content_alpha: style.disabled_content_alpha.clamp(0.0, 1.0),
        }
    }

    /// Collapsed or empty rows neither draw nor take touches.
    pub fn is_visible(&self) -> bool {
        self.button_count > 0 && self.progress > 0.0 && self.button_width > 0
    }

    /// Left edge of slot `index`; every consumer goes through this one formula.
    pub fn button_x(&self, index: usize) -> i32 {
        let stride = self.button_width.saturating_add(self.spacing);
        self.side_margin.saturating_add((index as i32).saturating_mul(stride))
    }

    pub fn button_rect(&self, index: usize) -> Option<Rect> {
        if index >= self.button_count {
            return None;
        }
        Some(Rect::new(
            self.button_x(index) as f32,
            0.0,
            self.button_width as f32,
            self.row_height as f32,
        ))
    }

    /// Slot rectangles left to right.
    pub fn button_rects(&self) -> impl Iterator<Item = (usize, Rect)> + '_ {
        (0..self.button_count).filter_map(move |i| self.button_rect(i).map(|r| (i, r)))
    }

    /// Icon and text alpha for a slot, dimmed while pressed.
    pub fn content_alpha(&self, pressed: bool) -> (u8, u8) {
        if pressed {
            (
                scale_alpha(self.icon_alpha, self.disabled_content_alpha),
                scale_alpha(self.text_alpha, self.disabled_content_alpha),
            )
        } else {
            (self.icon_alpha, self.text_alpha)
        }
    }

    /// Bounds of the whole row in local coordinates.
    pub fn bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.measured_width as f32, self.row_height as f32)
    }
}

/// Height the row reports for a layout pass: 0 without buttons, else the
/// interpolated row height.
pub fn measured_height(button_count: usize, progress: f32, style: &RowStyle) -> i32 {
    if button_count == 0 {
        return 0;
    }
    RowMetrics::resolve(style).row_height(progress)
}
