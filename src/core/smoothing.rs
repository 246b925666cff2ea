//! Critically Damped Smoothing
//!
//! Moves a value toward a target like a critically damped spring.
//! The spring's velocity ("rate") is state that must survive between
//! frames, so it lives in [`DampedAxis`] rather than inside the function.
//!
//! ## Approximation
//!
//! ```text
//! omega = 2 / smooth_time
//! x     = omega * dt
//! exp   ≈ 1 / (1 + x + 0.48x² + 0.235x³)      (Taylor fit of e^-x)
//! ```
//!
//! The output never crosses the target: if a step would carry it past,
//! it lands exactly on the target and the rate is recomputed.

use serde::{Serialize, Deserialize};

/// Smallest smoothing time accepted; shorter values are raised to this.
pub const MIN_SMOOTH_TIME: f32 = 0.0001;

/// Step `current` toward `target`.
///
/// * `rate` - spring velocity carried between calls
/// * `smooth_time` - approximate time to reach the target
/// * `max_speed` - cap on the rate of change (`f32::INFINITY` for none)
/// * `dt` - elapsed time; a non-positive `dt` returns `current` untouched
pub fn smooth_damp(
    current: f32,
    target: f32,
    rate: &mut f32,
    smooth_time: f32,
    max_speed: f32,
    dt: f32,
) -> f32 {
    if dt <= 0.0 {
        return current;
    }

    let smooth_time = smooth_time.max(MIN_SMOOTH_TIME);
    let omega = 2.0 / smooth_time;

    let x = omega * dt;
    let exp = 1.0 / (1.0 + x + 0.48 * x * x + 0.235 * x * x * x);

    let original_to = target;
    let max_change = max_speed * smooth_time;
    let change = (current - target).max(-max_change).min(max_change);
    let target = current - change;

    let temp = (*rate + omega * change) * dt;
    *rate = (*rate - omega * temp) * exp;
    let mut output = target + (change + temp) * exp;

    // Never overshoot
    if (original_to - current > 0.0) == (output > original_to) {
        output = original_to;
        *rate = (output - original_to) / dt;
    }

    output
}

/// Smoothing accumulator for one axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DampedAxis {
    /// Current spring velocity
    pub rate: f32,
}

impl DampedAxis {
    /// Create an accumulator at rest.
    pub const fn new() -> Self {
        Self { rate: 0.0 }
    }

    /// Advance `current` toward `target` with no speed cap.
    #[inline]
    pub fn step(&mut self, current: f32, target: f32, smooth_time: f32, dt: f32) -> f32 {
        smooth_damp(current, target, &mut self.rate, smooth_time, f32::INFINITY, dt)
    }

    /// Drop any accumulated spring velocity.
    #[inline]
    pub fn reset(&mut self) {
        self.rate = 0.0;
    }
}

// =============================================================================
// TESTS
// =============================================================================
