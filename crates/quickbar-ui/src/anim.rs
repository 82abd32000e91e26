use quickbar_core::animation::{AnimatedValue, AnimationSpec};
use web_time::Instant;

/// Drives expansion progress over time. The host calls `tick` from its frame
/// callback and stops scheduling frames once it returns false.
pub struct ExpansionAnimator {
    value: AnimatedValue<f32>,
}

impl ExpansionAnimator {
    pub fn new(initial: f32) -> Self {
        Self {
            value: AnimatedValue::new(initial.clamp(0.0, 1.0), AnimationSpec::default()),
        }
    }

    pub fn value(&self) -> f32 {
        self.value.get().clamp(0.0, 1.0)
    }

    pub fn target(&self) -> f32 {
        *self.value.target()
    }

    pub fn is_running(&self) -> bool {
        self.value.is_animating()
    }

    pub fn animate_to(&mut self, target: f32, spec: AnimationSpec, now: Instant) {
        self.value.set_spec(spec);
        self.value.set_target_at(target.clamp(0.0, 1.0), now);
    }

    pub fn snap_to(&mut self, value: f32) {
        self.value.snap_to(value.clamp(0.0, 1.0));
    }

    /// Advances to `now`; returns true while more frames are needed.
    pub fn tick(&mut self, now: Instant) -> bool {
        self.value.update_at(now)
    }
}
