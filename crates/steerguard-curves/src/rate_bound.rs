//! Rate-bound model: admissible angle windows from a reference and a speed.
//!
//! The model is direction-aware. Moving *away* from zero is bounded by the
//! rate-up table, moving back *toward* zero by the (looser) rate-down table,
//! whichever side of zero the reference sits on:
//!
//! ```text
//! ref >  0:   low = ref - down        high = ref + up
//! ref <= 0:   low = ref - up          high = ref + down
//! ```
//!
//! Every bound is widened by a fixed epsilon so that timing and quantization
//! jitter alone never reads as a violation.

use serde::Serialize;

use crate::lookup::LookupTable;

/// Returns `true` when `value` lies above `high` or below `low`.
///
/// NaN never lies inside a window and is reported as a violation.
#[inline]
#[must_use]
pub fn limit_violated(value: f32, high: f32, low: f32) -> bool {
    value > high || value < low || value.is_nan()
}

/// Closed interval `[low, high]` that the next angle sample must fall in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AngleWindow {
    /// Lowest admissible angle.
    pub low: f32,
    /// Highest admissible angle.
    pub high: f32,
}

impl AngleWindow {
    /// Window `[-limit, +limit]`.
    #[must_use]
    pub const fn symmetric(limit: f32) -> Self {
        Self {
            low: -limit,
            high: limit,
        }
    }

    /// Check whether `value` falls outside the window.
    #[inline]
    #[must_use]
    pub fn is_violated_by(&self, value: f32) -> bool {
        limit_violated(value, self.high, self.low)
    }

    /// Check whether `value` falls inside the window (bounds included).
    #[inline]
    #[must_use]
    pub fn contains(&self, value: f32) -> bool {
        !self.is_violated_by(value)
    }
}

/// Speed-indexed rate and magnitude limits for a steering angle signal.
///
/// # RT Safety
///
/// All evaluation methods are RT-safe: three table lookups at most, no
/// allocation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RateBoundModel<const N: usize> {
    rate_up: LookupTable<N>,
    rate_down: LookupTable<N>,
    max_angle: LookupTable<N>,
    epsilon: f32,
}

impl<const N: usize> RateBoundModel<N> {
    /// Create a model from its three tables and the epsilon margin.
    #[must_use]
    pub const fn new(
        rate_up: LookupTable<N>,
        rate_down: LookupTable<N>,
        max_angle: LookupTable<N>,
        epsilon: f32,
    ) -> Self {
        Self {
            rate_up,
            rate_down,
            max_angle,
            epsilon,
        }
    }

    /// Per-sample allowance for motion away from zero.
    #[must_use]
    pub fn rate_up(&self) -> &LookupTable<N> {
        &self.rate_up
    }

    /// Per-sample allowance for motion toward zero.
    #[must_use]
    pub fn rate_down(&self) -> &LookupTable<N> {
        &self.rate_down
    }

    /// Absolute angle magnitude limit.
    #[must_use]
    pub fn max_angle(&self) -> &LookupTable<N> {
        &self.max_angle
    }

    /// Additive jitter margin applied to every bound.
    #[must_use]
    pub fn epsilon(&self) -> f32 {
        self.epsilon
    }

    /// Allowed `(up, down)` deltas at `speed`, each scaled by `scale` and
    /// widened by epsilon.
    ///
    /// `scale` is `1.0` for a check that runs at the sample rate of the
    /// signal, and the number of sample periods covered otherwise.
    #[inline]
    #[must_use]
    pub fn deltas(&self, speed: f32, scale: f32) -> (f32, f32) {
        let up = self.rate_up.interpolate(speed) * scale + self.epsilon;
        let down = self.rate_down.interpolate(speed) * scale + self.epsilon;
        (up, down)
    }

    /// Admissible window for the sample following `reference`.
    #[inline]
    #[must_use]
    pub fn window(&self, reference: f32, speed: f32, scale: f32) -> AngleWindow {
        let (up, down) = self.deltas(speed, scale);
        if reference > 0.0 {
            AngleWindow {
                low: reference - down,
                high: reference + up,
            }
        } else {
            AngleWindow {
                low: reference - up,
                high: reference + down,
            }
        }
    }

    /// Absolute limit at `speed`, without the epsilon margin.
    #[inline]
    #[must_use]
    pub fn max_angle_at(&self, speed: f32) -> f32 {
        self.max_angle.interpolate(speed)
    }

    /// Symmetric magnitude window at `speed`, widened by epsilon.
    #[inline]
    #[must_use]
    pub fn max_angle_window(&self, speed: f32) -> AngleWindow {
        AngleWindow::symmetric(self.max_angle_at(speed) + self.epsilon)
    }
}
