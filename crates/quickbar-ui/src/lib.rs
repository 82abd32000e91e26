//! # Button row
//!
//! `ButtonsRow` renders up to five icon+label buttons and animates between a
//! collapsed and an expanded state with a single progress value:
//!
//! ```rust
//! use std::rc::Rc;
//! use quickbar_core::*;
//! use quickbar_ui::ButtonsRow;
//!
//! struct NoHost;
//! impl Host for NoHost {
//!     fn resolve_icon(&self, _: IconId) -> Option<ImageHandle> { None }
//!     fn font_metrics(&self, size: f32) -> FontMetrics {
//!         FontMetrics { ascent: -0.8 * size, descent: 0.2 * size }
//!     }
//!     fn text_width(&self, text: &str, size: f32) -> f32 { text.len() as f32 * size * 0.5 }
//!     fn screen_size(&self) -> Size { Size::new(360.0, 800.0) }
//! }
//!
//! let mut row = ButtonsRow::new(Rc::new(NoHost));
//! let share = row.add_button(1, IconId(10)).unwrap();
//! row.button_mut(share).unwrap().set_text("Share");
//! row.set_on_click(|click| println!("clicked {}", click.id));
//!
//! let size = row.measure(360.0);
//! assert_eq!(size.height, 56.0);
//!
//! row.set_expansion_progress(0.5);
//! let mut scene = Scene::new();
//! row.paint(&mut scene);
//! ```
//!
//! Layout, painting and hit-testing all derive from `RowGeometry`, which is
//! recomputed from the current progress and measured width each time it is
//! needed. Buttons that own a non-empty `SubMenu` open a popup instead of
//! firing the click listener; the row computes where the popup goes and the
//! host shows it there.

pub mod anim;
pub mod hit;
pub mod item;
pub mod layout;
pub mod paint;
pub mod popup;
pub mod row;
pub mod style;
pub mod submenu;
mod tests;

pub use anim::ExpansionAnimator;
pub use hit::{PressOutcome, PressTracker, hit_test};
pub use item::{ButtonHandle, ButtonItem, ButtonMut, MAX_BUTTONS, SubItemHandle};
pub use layout::{RowGeometry, RowMetrics, measured_height};
pub use popup::{PopupPlacement, PopupRequest, PopupSide, position_popup};
pub use row::{ButtonClick, ButtonsRow, RowState, SubMenuEntryClick};
pub use style::{MAX_DIMENSION_DP, PopupStyle, RowStyle};
pub use submenu::{SubMenu, SubMenuEntry};
