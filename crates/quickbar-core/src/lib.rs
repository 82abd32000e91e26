//! # quickbar core
//!
//! Shared building blocks for the quickbar button row:
//!
//! - `geometry`: `Vec2`, `Size`, `Rect` in px.
//! - `scene`: the draw list (`Scene` / `SceneNode`) a paint pass produces.
//! - `input`: pointer and key events delivered by the host.
//! - `animation`: `AnimatedValue` and easing for expand/collapse transitions.
//! - `locals`: thread-local `Theme` and `Density`.
//! - `host`: the `Host` trait: icons, font metrics, screen size, haptics.
//!
//! Everything is single-threaded and synchronous: the host calls into widgets
//! from its UI thread in response to layout, draw and input events.
//!
//! ```rust
//! use quickbar_core::*;
//!
//! let mut scene = Scene::new();
//! scene.push(SceneNode::Rect {
//!     rect: Rect::new(0.0, 0.0, 40.0, 20.0),
//!     color: Color::BLACK.with_alpha(alpha_from_fraction(0.1)),
//!     radius: 10.0,
//! });
//! assert_eq!(scene.len(), 1);
//! ```

pub mod animation;
pub mod color;
pub mod error;
pub mod geometry;
pub mod host;
pub mod input;
pub mod locals;
pub mod prelude;
pub mod scene;
pub mod semantics;

pub use color::*;
pub use error::*;
pub use geometry::*;
pub use host::*;
pub use input::*;
pub use locals::*;
pub use scene::*;
pub use semantics::*;
