//! Steering limit tunables.
//!
//! Every tunable is a compile-time constant in [`SteeringLimits::BMW`]. The
//! builder exists for tests and bench scenarios that need a variation; it
//! always validates.

use serde::Serialize;
use steerguard_curves::{LookupTable, RateBoundModel};

use crate::error::{ConfigError, ConfigResult};

/// Number of breakpoints in each limit table.
pub const LIMIT_POINTS: usize = 3;

/// A speed-indexed limit table (speed in m/s).
pub type LimitTable = LookupTable<LIMIT_POINTS>;

/// Complete set of steering limits for one vehicle variant.
///
/// # Real-Time Safety
///
/// Plain `Copy` data; no heap allocation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SteeringLimits {
    /// Rate and magnitude tables plus the epsilon margin.
    pub model: RateBoundModel<LIMIT_POINTS>,
    /// Real-time window re-anchor interval in microseconds.
    pub rt_interval_us: u32,
    /// Rate multiplier for the real-time window.
    ///
    /// The window is checked once per interval while the angle is reported at
    /// about 100 Hz, so it must tolerate this many samples of drift.
    pub rt_rate_multiplier: f32,
}

impl SteeringLimits {
    /// Limits for BMW E-series cars.
    pub const BMW: Self = Self {
        model: RateBoundModel::new(
            LookupTable::from_const([2.0, 7.0, 17.0], [5.0, 0.8, 0.25]),
            LookupTable::from_const([2.0, 7.0, 17.0], [5.0, 3.5, 0.8]),
            LookupTable::from_const([2.0, 29.0, 38.0], [410.0, 92.0, 36.0]),
            1.0,
        ),
        rt_interval_us: 250_000,
        rt_rate_multiplier: 25.0,
    };

    /// Create a limits builder seeded with [`SteeringLimits::BMW`].
    #[must_use]
    pub fn builder() -> SteeringLimitsBuilder {
        SteeringLimitsBuilder::default()
    }

    /// Validate the limits.
    ///
    /// # Errors
    ///
    /// Returns an error if a table is unsorted or non-finite, the interval is
    /// zero, the multiplier is below one, the epsilon is negative, or the
    /// max-angle table increases with speed.
    pub fn validate(&self) -> ConfigResult<()> {
        let tables = [
            ("rate_up", self.model.rate_up()),
            ("rate_down", self.model.rate_down()),
            ("max_angle", self.model.max_angle()),
        ];
        for (table, lookup) in tables {
            LookupTable::try_new(*lookup.breakpoints(), *lookup.values())
                .map_err(|source| ConfigError::InvalidLookup { table, source })?;
        }
        if self.rt_interval_us == 0 {
            return Err(ConfigError::NonPositiveInterval);
        }
        if !(self.rt_rate_multiplier.is_finite() && self.rt_rate_multiplier >= 1.0) {
            return Err(ConfigError::InvalidMultiplier);
        }
        let epsilon = self.model.epsilon();
        if !(epsilon.is_finite() && epsilon >= 0.0) {
            return Err(ConfigError::InvalidEpsilon);
        }
        if !self.model.max_angle().is_non_increasing() {
            return Err(ConfigError::MaxAngleIncreasing);
        }
        Ok(())
    }
}

impl Default for SteeringLimits {
    fn default() -> Self {
        Self::BMW
    }
}

/// Builder for `SteeringLimits`.
#[derive(Debug, Clone, Copy)]
pub struct SteeringLimitsBuilder {
    rate_up: LimitTable,
    rate_down: LimitTable,
    max_angle: LimitTable,
    epsilon: f32,
    rt_interval_us: u32,
    rt_rate_multiplier: f32,
}

impl Default for SteeringLimitsBuilder {
    fn default() -> Self {
        let base = SteeringLimits::BMW;
        Self {
            rate_up: *base.model.rate_up(),
            rate_down: *base.model.rate_down(),
            max_angle: *base.model.max_angle(),
            epsilon: base.model.epsilon(),
            rt_interval_us: base.rt_interval_us,
            rt_rate_multiplier: base.rt_rate_multiplier,
        }
    }
}

impl SteeringLimitsBuilder {
    /// Set the rate-up table.
    #[must_use]
    pub fn rate_up(mut self, table: LimitTable) -> Self {
        self.rate_up = table;
        self
    }

    /// Set the rate-down table.
    #[must_use]
    pub fn rate_down(mut self, table: LimitTable) -> Self {
        self.rate_down = table;
        self
    }

    /// Set the max-angle table.
    #[must_use]
    pub fn max_angle(mut self, table: LimitTable) -> Self {
        self.max_angle = table;
        self
    }

    /// Set the epsilon margin in degrees.
    #[must_use]
    pub fn epsilon(mut self, epsilon: f32) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Set the real-time re-anchor interval in microseconds.
    #[must_use]
    pub fn rt_interval_us(mut self, us: u32) -> Self {
        self.rt_interval_us = us;
        self
    }

    /// Set the real-time rate multiplier.
    #[must_use]
    pub fn rt_rate_multiplier(mut self, multiplier: f32) -> Self {
        self.rt_rate_multiplier = multiplier;
        self
    }

    /// Build the limits.
    ///
    /// # Errors
    ///
    /// Returns an error if the limits are invalid.
    pub fn build(self) -> ConfigResult<SteeringLimits> {
        let limits = SteeringLimits {
            model: RateBoundModel::new(self.rate_up, self.rate_down, self.max_angle, self.epsilon),
            rt_interval_us: self.rt_interval_us,
            rt_rate_multiplier: self.rt_rate_multiplier,
        };
        limits.validate()?;
        Ok(limits)
    }
}
