//! Headless walkthrough of a quickbar row: builds a five-button row, plays
//! the collapse and expand animations, taps a plain button, opens a sub-menu
//! and picks an entry, then dismisses with the back key. Every scene is
//! logged instead of rendered.
//!
//! `RUST_LOG=debug cargo run -p quickbar_demo` shows the row's own tracing.

use std::rc::Rc;

use anyhow::Context;
use quickbar_core::prelude::*;
use quickbar_devtools::Inspector;
use quickbar_ui::{ButtonsRow, PopupSide};
use web_time::{Duration, Instant};

const SCREEN: Size = Size {
    width: 360.0,
    height: 800.0,
};

struct DemoHost;

impl Host for DemoHost {
    fn resolve_icon(&self, icon: IconId) -> Option<ImageHandle> {
        (icon.0 > 0).then_some(ImageHandle(icon.0 as u64))
    }

    fn font_metrics(&self, size_px: f32) -> FontMetrics {
        FontMetrics {
            ascent: -0.8 * size_px,
            descent: 0.2 * size_px,
        }
    }

    fn text_width(&self, text: &str, size_px: f32) -> f32 {
        text.chars().count() as f32 * size_px * 0.55
    }

    fn screen_size(&self) -> Size {
        SCREEN
    }

    fn perform_haptic(&self, kind: HapticKind) {
        log::info!("haptic: {kind:?}");
    }
}

fn dump(label: &str, scene: &Scene) {
    log::info!("{label}: {} nodes", scene.len());
    for node in &scene.nodes {
        log::debug!("  {node:?}");
    }
}

fn tap(row: &mut ButtonsRow, p: Vec2) {
    row.handle_pointer(&PointerEvent::down(p.x, p.y));
    row.handle_pointer(&PointerEvent::up(p.x, p.y));
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut row = ButtonsRow::new(Rc::new(DemoHost));
    let labels = ["Reply", "Copy", "Forward", "Pin", "More"];
    let mut handles = Vec::new();
    for (i, label) in labels.iter().enumerate() {
        let id = i as i32 + 1;
        let handle = row
            .add_button(id, IconId(100 + id))
            .with_context(|| format!("button {label} rejected"))?;
        row.button_mut(handle)
            .context("button vanished")?
            .set_text(*label);
        handles.push(handle);
    }
    if row.add_button(99, IconId(199)).is_none() {
        log::info!("sixth button rejected, row holds {}", row.len());
    }

    let more = *handles.last().context("no buttons")?;
    {
        let mut b = row.try_button_mut(more)?;
        b.add_sub_item(51, IconId(151), "Select");
        b.add_sub_item(52, IconId(152), "Report");
        let mute = b.add_sub_item_with(53, IconId(153), "Mute", false, true);
        b.set_sub_item_checked(mute, true)?;
    }

    row.set_on_click(|c| log::info!("click id={} at ({}, {})", c.id, c.center.x, c.center.y));
    row.set_on_sub_item_click(|c| log::info!("sub-menu click button={} entry={}", c.button_id, c.entry_id));

    let size = row.measure(SCREEN.width);
    row.set_screen_origin(Vec2::new(0.0, SCREEN.height - size.height));
    log::info!("measured {}x{}", size.width, size.height);

    let mut inspector = Inspector::new();
    inspector.hud.toggle_inspector();

    // collapse then expand, one frame every 16ms
    let spec = AnimationSpec::tween(Duration::from_millis(200), Easing::EaseInOut);
    let mut now = Instant::now();
    for target in [0.0, 1.0] {
        row.animate_expansion(target, spec, now);
        loop {
            now += Duration::from_millis(16);
            let running = row.tick(now);
            if row.needs_layout() {
                let size = row.measure(SCREEN.width);
                row.set_screen_origin(Vec2::new(0.0, SCREEN.height - size.height));
                log::debug!("progress {:.2} height {}", row.expansion_progress(), size.height);
            }
            if !running {
                break;
            }
        }
        log::info!("settled at progress {}", row.expansion_progress());
    }

    let copy = row.geometry().button_rect(1).context("no Copy slot")?.center();
    tap(&mut row, copy);

    let more_center = row
        .geometry()
        .button_rect(more.index())
        .context("no More slot")?
        .center();
    tap(&mut row, more_center);
    let (_, placement) = row
        .open_sub_menu_placement()
        .context("sub-menu did not open")?;
    log::info!(
        "popup at ({}, {}) {}x{} {}",
        placement.origin.x,
        placement.origin.y,
        placement.size.width,
        placement.size.height,
        match placement.side {
            PopupSide::Above => "above",
            PopupSide::Below => "below",
        }
    );

    let mut scene = Scene::new();
    row.paint(&mut scene);
    row.paint_sub_menu(&mut scene);
    inspector.frame(&mut scene, &row, now);
    dump("frame with popup", &scene);

    // "Mute" stays open after a click
    let entry_h = dp(row.popup_style().entry_height_dp) as f32;
    let pad = dp(row.popup_style().vertical_padding_dp) as f32;
    let mute = Vec2::new(
        placement.origin.x + placement.size.width / 2.0,
        placement.origin.y + pad + 2.5 * entry_h,
    );
    row.handle_popup_pointer(&PointerEvent::down(mute.x, mute.y));
    row.handle_popup_pointer(&PointerEvent::up(mute.x, mute.y));
    log::info!("popup still open: {}", row.open_sub_menu_placement().is_some());

    row.handle_key(&KeyEvent::pressed(Key::Back));
    log::info!("popup open after back: {}", row.open_sub_menu_placement().is_some());

    let mut scene = Scene::new();
    row.paint(&mut scene);
    inspector.frame(&mut scene, &row, now + Duration::from_millis(16));
    dump("final frame", &scene);

    for node in row.semantics() {
        log::info!("a11y {:?} {:?}", node.role, node.label);
    }
    Ok(())
}
