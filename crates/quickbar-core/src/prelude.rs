pub use crate::animation::{AnimatedValue, AnimationSpec, Easing, Interpolate};
pub use crate::color::{Color, alpha_from_fraction, scale_alpha};
pub use crate::error::RowError;
pub use crate::geometry::{Rect, Size, Vec2};
pub use crate::host::{FontMetrics, HapticKind, Host};
pub use crate::input::*;
pub use crate::locals::{Density, Dp, Theme, density, dp, theme, with_density, with_theme};
pub use crate::scene::{IconId, ImageHandle, Scene, SceneNode, TextAlign};
pub use crate::semantics::{Role, Semantics};
