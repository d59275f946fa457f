use std::time::Duration;

/// Frames in one counter animation.
pub const ANIMATION_STEPS: u32 = 20;
/// Total length of one counter animation.
pub const ANIMATION_DURATION: Duration = Duration::from_millis(300);

/// Delay between two frames when `duration` is split into `steps`.
#[must_use]
pub fn step_interval(duration: Duration, steps: u32) -> Duration {
    duration / steps.max(1)
}

/// Linear interpolation between two displayed values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearTween {
    from: f64,
    to: f64,
    steps: u32,
}

impl LinearTween {
    #[must_use]
    pub fn new(from: f64, to: f64, steps: u32) -> Self {
        Self {
            from,
            to,
            steps: steps.max(1),
        }
    }

    #[must_use]
    pub fn steps(&self) -> u32 {
        self.steps
    }

    #[must_use]
    pub fn target(&self) -> f64 {
        self.to
    }

    /// Value shown at frame `step`. The last frame is exactly the target.
    #[must_use]
    pub fn value_at(&self, step: u32) -> f64 {
        if step >= self.steps {
            return self.to;
        }
        self.from + (self.to - self.from) * f64::from(step) / f64::from(self.steps)
    }
}
