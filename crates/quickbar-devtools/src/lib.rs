//! Debug overlay for a `ButtonsRow`: slot outlines, the open popup's frame
//! and a one-line HUD with frame rate and row state.

use quickbar_core::{Color, Scene, SceneNode, TextAlign, Vec2};
use quickbar_ui::ButtonsRow;
use web_time::Instant;

pub struct Hud {
    pub inspector_enabled: bool,
    frame_count: u64,
    last_frame: Option<Instant>,
    fps_smooth: f32,
    pub metrics: Option<Metrics>,
}

impl Default for Hud {
    fn default() -> Self {
        Self::new()
    }
}

impl Hud {
    pub fn new() -> Self {
        Self {
            inspector_enabled: false,
            frame_count: 0,
            last_frame: None,
            fps_smooth: 0.0,
            metrics: None,
        }
    }

    pub fn toggle_inspector(&mut self) {
        self.inspector_enabled = !self.inspector_enabled;
        log::info!(
            "inspector {}",
            if self.inspector_enabled { "on" } else { "off" }
        );
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn fps(&self) -> f32 {
        self.fps_smooth
    }

    /// Counts a frame presented at `now` and folds it into the smoothed rate.
    pub fn record_frame(&mut self, now: Instant) {
        self.frame_count += 1;
        if let Some(prev) = self.last_frame.replace(now) {
            let dt = now.saturating_duration_since(prev).as_secs_f32();
            if dt > 0.0 {
                let fps = 1.0 / dt;
                // EMA
                let a = 0.2;
                self.fps_smooth = if self.fps_smooth == 0.0 {
                    fps
                } else {
                    (1.0 - a) * self.fps_smooth + a * fps
                };
            }
        }
    }

    /// HUD text for the current frame, with any extra `lines` appended.
    pub fn status_line(&self, lines: &[String]) -> String {
        let mut parts = vec![
            format!("frame: {}", self.frame_count),
            format!("fps: {:.1}", self.fps_smooth),
        ];
        if let Some(m) = &self.metrics {
            parts.push(format!("paint: {:.2} ms", m.paint_ms));
            parts.push(format!("nodes: {}", m.scene_nodes));
        }
        parts.extend(lines.iter().cloned());
        parts.join("  |  ")
    }

    pub fn overlay(&mut self, scene: &mut Scene, now: Instant, lines: &[String]) {
        self.record_frame(now);
        scene.push(SceneNode::Text {
            origin: Vec2::new(8.0, 20.0),
            text: self.status_line(lines),
            color: Color::from_hex("#AAAAAA"),
            size: 14.0,
            align: TextAlign::Left,
        });
    }
}

#[derive(Clone, Debug, Default)]
pub struct Metrics {
    pub paint_ms: f32,
    pub scene_nodes: usize,
}

pub struct Inspector {
    pub hud: Hud,
}

impl Default for Inspector {
    fn default() -> Self {
        Self::new()
    }
}

impl Inspector {
    pub fn new() -> Self {
        Self { hud: Hud::new() }
    }

    /// Appends the overlay for `row` to a scene that already holds the row's
    /// own paint output. Row slots are outlined in row-local coordinates,
    /// the popup in screen coordinates. No-op while the inspector is off.
    pub fn frame(&mut self, scene: &mut Scene, row: &ButtonsRow, now: Instant) {
        if !self.hud.inspector_enabled {
            return;
        }

        let geometry = row.geometry();
        let pressed = row.state().pressed;
        if geometry.is_visible() {
            for (i, rect) in geometry.button_rects() {
                let hidden = row.buttons().get(i).is_some_and(|b| b.is_hidden());
                let color = match (pressed == Some(i), hidden) {
                    (true, _) => Color::from_hex("#FF5555"),
                    (false, true) => Color::from_hex("#666666"),
                    (false, false) => Color::from_hex("#55FF88"),
                };
                scene.push(SceneNode::Border {
                    rect,
                    color,
                    width: 1.0,
                    radius: 0.0,
                });
            }
        }

        if let Some((_, placement)) = row.open_sub_menu_placement() {
            scene.push(SceneNode::Border {
                rect: placement.rect(),
                color: Color::from_hex("#FFAA00"),
                width: 1.0,
                radius: 0.0,
            });
        }

        let state = row.state();
        let lines = [
            format!("progress: {:.2}", state.progress),
            format!("height: {}", geometry.row_height),
            format!("buttons: {}", row.len()),
        ];
        self.hud.overlay(scene, now, &lines);
    }
}
