//! Time-based transitions for expand/collapse.
//!
//! There is no global clock: callers pass the frame `Instant` into
//! `AnimatedValue::set_target_at` and `AnimatedValue::update_at`, so a test
//! can step time by hand.

use web_time::{Duration, Instant};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Easing {
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
    /// Damped oscillation; may overshoot 1.0 before settling.
    Spring { damping: f32, stiffness: f32 },
}

impl Easing {
    /// Maps linear progress `t` (clamped to [0, 1]) to eased progress.
    pub fn interpolate(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match *self {
            Easing::Linear => t,
            Easing::EaseIn => t * t,
            Easing::EaseOut => t * (2.0 - t),
            Easing::EaseInOut if t < 0.5 => 2.0 * t * t,
            Easing::EaseInOut => -1.0 + (4.0 - 2.0 * t) * t,
            Easing::Spring { damping, stiffness } => {
                let omega = (stiffness / damping).sqrt();
                let zeta = damping / (2.0 * (stiffness * damping).sqrt());
                if zeta >= 1.0 {
                    return t * (2.0 - t);
                }
                let omega_d = omega * (1.0 - zeta * zeta).sqrt();
                let t = t * 2.0;
                1.0 - (-zeta * omega * t).exp() * (omega_d * t).cos()
            }
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct AnimationSpec {
    pub duration: Duration,
    pub easing: Easing,
    /// Time the value holds still after the target changes.
    pub delay: Duration,
}

impl Default for AnimationSpec {
    fn default() -> Self {
        Self::tween(Duration::from_millis(300), Easing::EaseInOut)
    }
}

impl AnimationSpec {
    pub fn tween(duration: Duration, easing: Easing) -> Self {
        Self {
            duration,
            easing,
            delay: Duration::ZERO,
        }
    }

    pub fn spring() -> Self {
        Self::tween(
            Duration::from_millis(500),
            Easing::Spring {
                damping: 0.8,
                stiffness: 200.0,
            },
        )
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

pub trait Interpolate {
    fn interpolate(&self, other: &Self, t: f32) -> Self;
}

impl Interpolate for f32 {
    fn interpolate(&self, other: &Self, t: f32) -> Self {
        self + (other - self) * t
    }
}

/// A value moving from where it was towards `target` over `spec`.
pub struct AnimatedValue<T: Interpolate + Clone> {
    from: T,
    current: T,
    target: T,
    spec: AnimationSpec,
    started: Option<Instant>,
}

impl<T: Interpolate + Clone> AnimatedValue<T> {
    pub fn new(initial: T, spec: AnimationSpec) -> Self {
        Self {
            from: initial.clone(),
            current: initial.clone(),
            target: initial,
            spec,
            started: None,
        }
    }

    pub fn set_spec(&mut self, spec: AnimationSpec) {
        self.spec = spec;
    }

    /// Starts a transition at `at` from the current value, so retargeting
    /// mid-flight continues from where the value is.
    pub fn set_target_at(&mut self, target: T, at: Instant) {
        self.from = self.current.clone();
        self.target = target;
        self.started = Some(at);
    }

    /// Jumps to `value` and stops any running transition.
    pub fn snap_to(&mut self, value: T) {
        self.from = value.clone();
        self.current = value.clone();
        self.target = value;
        self.started = None;
    }

    /// Advances to `at`; returns true while the transition is still running.
    pub fn update_at(&mut self, at: Instant) -> bool {
        let Some(started) = self.started else {
            return false;
        };
        let Some(elapsed) = at
            .saturating_duration_since(started)
            .checked_sub(self.spec.delay)
        else {
            // still in the delay window
            return true;
        };
        if elapsed >= self.spec.duration {
            self.current = self.target.clone();
            self.started = None;
            return false;
        }
        let t = elapsed.as_secs_f32() / self.spec.duration.as_secs_f32();
        self.current = self
            .from
            .interpolate(&self.target, self.spec.easing.interpolate(t));
        true
    }

    pub fn get(&self) -> &T {
        &self.current
    }

    pub fn target(&self) -> &T {
        &self.target
    }

    pub fn is_animating(&self) -> bool {
        self.started.is_some()
    }
}
