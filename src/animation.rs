//! Eased settle animation run after a release.

/// Fast start, slow finish: `1 - (1 - t)^(2 * factor)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decelerate {
    factor: f32,
}

impl Decelerate {
    pub fn new(factor: f32) -> Self {
        Self { factor }
    }

    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        if self.factor == 1.0 {
            1.0 - (1.0 - t) * (1.0 - t)
        } else {
            1.0 - (1.0 - t).powf(2.0 * self.factor)
        }
    }
}

/// Interpolates the main slot's left edge from its release position back
/// to its rest origin.
#[derive(Debug, Clone, PartialEq)]
pub struct SettleAnimation {
    from: f32,
    to: f32,
    started_ms: u64,
    duration_ms: u64,
    easing: Decelerate,
}

impl SettleAnimation {
    pub fn new(from: i32, to: i32, started_ms: u64, duration_ms: u64, easing: Decelerate) -> Self {
        Self {
            from: from as f32,
            to: to as f32,
            started_ms,
            duration_ms: duration_ms.max(1),
            easing,
        }
    }

    /// Value at `now_ms` and whether the animation has run its course.
    pub fn sample(&self, now_ms: u64) -> (f32, bool) {
        let elapsed = now_ms.saturating_sub(self.started_ms);
        if elapsed >= self.duration_ms {
            return (self.to, true);
        }
        let t = elapsed as f32 / self.duration_ms as f32;
        let eased = self.easing.apply(t);
        (self.from + (self.to - self.from) * eased, false)
    }
}
