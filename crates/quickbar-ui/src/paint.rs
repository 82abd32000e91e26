//! Scene output for the row and for an open sub-menu popup.
//!
//! Painting reads the model and a geometry snapshot and only appends to the
//! scene; it never touches row state.

use quickbar_core::{Host, Rect, Scene, SceneNode, TextAlign, Vec2, dp};

use crate::item::ButtonItem;
use crate::layout::RowGeometry;
use crate::style::{PopupStyle, RowStyle};
use crate::submenu::SubMenu;

/// Draws each visible slot: rounded background, icon at a fixed top inset,
/// and the label on a shared baseline near the bottom edge.
pub fn paint_row(
    scene: &mut Scene,
    geometry: &RowGeometry,
    buttons: &[ButtonItem],
    pressed: Option<usize>,
    style: &RowStyle,
    host: &dyn Host,
) {
    if !geometry.is_visible() {
        return;
    }

    let background = style.background_color.with_alpha(geometry.background_alpha);
    let radius = geometry.corner_radius as f32;
    let text_px = geometry.text_size as f32;
    let baseline = if geometry.text_size > 0 {
        let fm = host.font_metrics(text_px);
        ((geometry.row_height - geometry.edge_padding) as f32 - fm.descent).trunc()
    } else {
        0.0
    };

    for (i, rect) in geometry.button_rects() {
        // placeholder gap
        let Some(item) = buttons.get(i).filter(|b| !b.is_hidden()) else {
            continue;
        };

        scene.push(SceneNode::Rect {
            rect,
            color: background,
            radius,
        });

        let (icon_alpha, text_alpha) = geometry.content_alpha(pressed == Some(i));

        if geometry.icon_size > 0
            && let Some(image) = host.resolve_icon(item.icon())
        {
            let left = geometry.button_x(i) + (geometry.button_width - geometry.icon_size) / 2;
            let size = geometry.icon_size as f32;
            scene.push(SceneNode::Image {
                rect: Rect::new(left as f32, geometry.edge_padding as f32, size, size),
                image,
                alpha: icon_alpha,
            });
        }

        if geometry.text_size > 0
            && let Some(text) = item.text().filter(|t| !t.is_empty())
        {
            scene.push(SceneNode::Text {
                origin: Vec2::new(rect.x + rect.w / 2.0, baseline),
                text: text.to_string(),
                color: style.content_color.with_alpha(text_alpha),
                size: text_px,
                align: TextAlign::Center,
            });
        }
    }
}

/// Draws an open popup's panel and entries in screen coordinates.
pub fn paint_sub_menu(scene: &mut Scene, menu: &SubMenu, style: &PopupStyle, host: &dyn Host) {
    let Some(placement) = menu.placement() else {
        return;
    };

    scene.push(SceneNode::Rect {
        rect: placement.rect(),
        color: style.surface_color,
        radius: dp(style.corner_radius_dp) as f32,
    });

    let pad = dp(style.entry_padding_dp) as f32;
    let icon = dp(style.icon_size_dp) as f32;
    let icon_gap = dp(style.icon_gap_dp) as f32;
    let check = dp(style.check_size_dp) as f32;
    let text_px = dp(style.text_size_dp) as f32;
    let fm = host.font_metrics(text_px);

    for (i, entry) in menu.entries().iter().enumerate() {
        let Some(row) = menu.entry_rect(i, &placement, style) else {
            continue;
        };

        if menu.pressed_entry() == Some(i) {
            scene.push(SceneNode::Rect {
                rect: row,
                color: style.accent_color.with_alpha(0x20),
                radius: 0.0,
            });
        }

        if let Some(image) = host.resolve_icon(entry.icon) {
            scene.push(SceneNode::Image {
                rect: Rect::new(row.x + pad, row.y + (row.h - icon) / 2.0, icon, icon),
                image,
                alpha: 255,
            });
        }

        // vertically center the glyph box
        let baseline = row.y + row.h / 2.0 - (fm.ascent + fm.descent) / 2.0;
        scene.push(SceneNode::Text {
            origin: Vec2::new(row.x + pad + icon + icon_gap, baseline),
            text: entry.label.clone(),
            color: style.content_color,
            size: text_px,
            align: TextAlign::Left,
        });

        if entry.show_check {
            let mark = Rect::new(row.right() - pad - check, row.y + (row.h - check) / 2.0, check, check);
            if entry.checked {
                scene.push(SceneNode::Rect {
                    rect: mark,
                    color: style.accent_color,
                    radius: check / 2.0,
                });
            } else {
                scene.push(SceneNode::Border {
                    rect: mark,
                    color: style.content_color.with_alpha(0x60),
                    width: dp(2.0) as f32,
                    radius: check / 2.0,
                });
            }
        }
    }
}
