use serde::{Deserialize, Serialize};

use crate::{Color, Rect, Vec2};

/// Caller-assigned icon resource identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IconId(pub i32);

/// A drawable resolved by the host for an `IconId`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ImageHandle(pub u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum TextAlign {
    Left,
    #[default]
    Center,
}

/// Draw list produced by a paint pass; the host replays it on its surface.
#[derive(Clone, Debug, Default)]
pub struct Scene {
    pub nodes: Vec<SceneNode>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum SceneNode {
    Rect {
        rect: Rect,
        color: Color,
        radius: f32,
    },
    Border {
        rect: Rect,
        color: Color,
        width: f32,
        radius: f32,
    },
    Image {
        rect: Rect,
        image: ImageHandle,
        alpha: u8,
    },
    /// `origin` is the baseline anchor; with `TextAlign::Center` its x is the horizontal center.
    Text {
        origin: Vec2,
        text: String,
        color: Color,
        size: f32,
        align: TextAlign,
    },
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
    }

    pub fn push(&mut self, node: SceneNode) {
        self.nodes.push(node);
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }
}
