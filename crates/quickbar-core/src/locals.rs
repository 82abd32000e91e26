//! # Theming and locals
//!
//! quickbar uses thread-local "locals" for global UI parameters:
//!
//! - `Theme`: default colors for row backgrounds, content and popups.
//! - `Density`: dp→px scale factor.
//!
//! Override them for a region of code with `with_theme` / `with_density`:
//!
//! ```rust
//! use quickbar_core::*;
//!
//! let px = with_density(Density { scale: 2.0 }, || dp(8.0));
//! assert_eq!(px, 16);
//! ```
//!
//! Widgets read `theme()` and `density()` when they derive geometry, so the
//! value in effect at paint time and at hit-test time is the same as long as
//! both run inside the same frame.

use std::any::{Any, TypeId};
use std::cell::RefCell;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::Color;

thread_local! {
    static LOCALS_STACK: RefCell<Vec<HashMap<TypeId, Box<dyn Any>>>> = RefCell::new(Vec::new());
}

/// density‑independent pixels (dp)
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Dp(pub f32);

impl Dp {
    /// Physical pixels under the current `Density`, rounded up.
    pub fn to_px(self) -> i32 {
        if self.0 == 0.0 {
            return 0;
        }
        (self.0 * density().scale).ceil() as i32
    }
}

/// Convenience: convert a raw dp scalar into whole px using current Density.
pub fn dp(value: f32) -> i32 {
    Dp(value).to_px()
}

fn with_locals_frame<R>(f: impl FnOnce() -> R) -> R {
    // pops on unwind too
    struct Guard;
    impl Drop for Guard {
        fn drop(&mut self) {
            LOCALS_STACK.with(|st| {
                st.borrow_mut().pop();
            });
        }
    }
    LOCALS_STACK.with(|st| st.borrow_mut().push(HashMap::new()));
    let _guard = Guard;
    f()
}

fn set_local_boxed(t: TypeId, v: Box<dyn Any>) {
    LOCALS_STACK.with(|st| {
        if let Some(top) = st.borrow_mut().last_mut() {
            top.insert(t, v);
        }
    });
}

fn local<T: Any + Copy + Default>() -> T {
    LOCALS_STACK.with(|st| {
        for frame in st.borrow().iter().rev() {
            if let Some(v) = frame.get(&TypeId::of::<T>())
                && let Some(t) = v.downcast_ref::<T>()
            {
                return *t;
            }
        }
        T::default()
    })
}

/// Default colors used by the row and its popups.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    /// Button background tint; its alpha is replaced by the row's animated alpha.
    pub row_background: Color,
    /// Icon tint and label color.
    pub row_content: Color,
    /// Popup panel fill.
    pub popup_surface: Color,
    /// Popup entry label color.
    pub popup_content: Color,
    /// Check mark and pressed-entry highlight.
    pub accent: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            row_background: Color::BLACK,
            row_content: Color::WHITE,
            popup_surface: Color::from_hex("#FFFFFF"),
            popup_content: Color::from_hex("#222222"),
            accent: Color::from_hex("#3390EC"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Density {
    pub scale: f32, // dp→px multiplier
}
impl Default for Density {
    fn default() -> Self {
        Self { scale: 1.0 }
    }
}

pub fn with_theme<R>(theme: Theme, f: impl FnOnce() -> R) -> R {
    with_locals_frame(|| {
        set_local_boxed(TypeId::of::<Theme>(), Box::new(theme));
        f()
    })
}

pub fn with_density<R>(density: Density, f: impl FnOnce() -> R) -> R {
    with_locals_frame(|| {
        set_local_boxed(TypeId::of::<Density>(), Box::new(density));
        f()
    })
}

pub fn theme() -> Theme {
    local::<Theme>()
}

pub fn density() -> Density {
    local::<Density>()
}
