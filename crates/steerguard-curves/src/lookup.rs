//! Piecewise-linear lookup over a small breakpoint table.

use serde::{Serialize, Serializer};

use crate::error::LookupError;

/// Ordered `(breakpoint, value)` table evaluated by linear interpolation.
///
/// Inputs below the first breakpoint return the first value, inputs above the
/// last breakpoint return the last value, and inputs in between are linearly
/// interpolated within their segment.
///
/// Breakpoints must be strictly increasing. Tables built with
/// [`from_const`](Self::from_const) are not checked at runtime: a malformed
/// constant table is a programming error, not a fault. Use
/// [`try_new`](Self::try_new) for tables that come from anywhere else.
///
/// Interpolation only preserves monotonicity when the values themselves are
/// monotone; that is the caller's responsibility.
///
/// # RT Safety
///
/// `interpolate()` is RT-safe: no allocation, no I/O, at most `N - 1`
/// segment comparisons.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LookupTable<const N: usize> {
    breakpoints: [f32; N],
    values: [f32; N],
}

impl<const N: usize> LookupTable<N> {
    /// Build a table from compile-time constants.
    ///
    /// Fewer than two points is rejected at compile time.
    #[must_use]
    pub const fn from_const(breakpoints: [f32; N], values: [f32; N]) -> Self {
        const { assert!(N >= 2, "a lookup table needs at least two points") };
        Self {
            breakpoints,
            values,
        }
    }

    /// Build a table, checking that every point is finite and that the
    /// breakpoints are strictly increasing.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::NonFiniteValue`] for NaN or infinite entries and
    /// [`LookupError::UnsortedBreakpoints`] for a breakpoint that does not
    /// exceed its predecessor.
    pub fn try_new(breakpoints: [f32; N], values: [f32; N]) -> Result<Self, LookupError> {
        for (index, (x, y)) in breakpoints.iter().zip(values.iter()).enumerate() {
            if !x.is_finite() || !y.is_finite() {
                return Err(LookupError::NonFiniteValue { index });
            }
        }
        for (index, pair) in breakpoints.windows(2).enumerate() {
            if let &[lower, upper] = pair
                && upper <= lower
            {
                return Err(LookupError::UnsortedBreakpoints { index: index + 1 });
            }
        }
        Ok(Self::from_const(breakpoints, values))
    }

    /// Evaluate the table at `x`.
    ///
    /// NaN inputs fall through every comparison and return the last value,
    /// which for speed-indexed limit tables is the tightest bound.
    #[inline]
    #[must_use]
    pub fn interpolate(&self, x: f32) -> f32 {
        if x <= self.first_breakpoint() {
            return self.first_value();
        }
        for (xs, ys) in self.breakpoints.windows(2).zip(self.values.windows(2)) {
            if let (&[x0, x1], &[y0, y1]) = (xs, ys)
                && x < x1
            {
                return y0 + (y1 - y0) * (x - x0) / (x1 - x0);
            }
        }
        self.last_value()
    }

    /// Breakpoints in ascending order.
    #[must_use]
    pub fn breakpoints(&self) -> &[f32; N] {
        &self.breakpoints
    }

    /// Values paired with [`breakpoints`](Self::breakpoints).
    #[must_use]
    pub fn values(&self) -> &[f32; N] {
        &self.values
    }

    /// Iterate over `(breakpoint, value)` pairs.
    pub fn points(&self) -> impl Iterator<Item = (f32, f32)> + '_ {
        self.breakpoints
            .iter()
            .copied()
            .zip(self.values.iter().copied())
    }

    /// Value returned for inputs at or below the first breakpoint.
    #[must_use]
    pub fn first_value(&self) -> f32 {
        self.values.first().copied().unwrap_or_default()
    }

    /// Value returned for inputs at or above the last breakpoint.
    #[must_use]
    pub fn last_value(&self) -> f32 {
        self.values.last().copied().unwrap_or_default()
    }

    fn first_breakpoint(&self) -> f32 {
        self.breakpoints.first().copied().unwrap_or_default()
    }

    /// Check that the values never increase from one breakpoint to the next.
    #[must_use]
    pub fn is_non_increasing(&self) -> bool {
        self.values
            .windows(2)
            .all(|pair| matches!(pair, &[a, b] if b <= a))
    }
}

impl<const N: usize> Serialize for LookupTable<N> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(self.points())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RATE_UP: LookupTable<3> = LookupTable::from_const([2.0, 7.0, 17.0], [5.0, 0.8, 0.25]);

    fn close(a: f32, b: f32) -> bool {
        let diff = a - b;
        diff < 1e-4 && diff > -1e-4
    }

    #[test]
    fn test_clamps_below_first_breakpoint() {
        assert!(close(RATE_UP.interpolate(0.0), 5.0));
        assert!(close(RATE_UP.interpolate(-10.0), 5.0));
        assert!(close(RATE_UP.interpolate(2.0), 5.0));
    }

    #[test]
    fn test_clamps_above_last_breakpoint() {
        assert!(close(RATE_UP.interpolate(17.0), 0.25));
        assert!(close(RATE_UP.interpolate(100.0), 0.25));
    }

    #[test]
    fn test_interpolates_within_segment() {
        // Halfway between (2, 5.0) and (7, 0.8).
        assert!(close(RATE_UP.interpolate(4.5), 2.9));
        // Halfway between (7, 0.8) and (17, 0.25).
        assert!(close(RATE_UP.interpolate(12.0), 0.525));
    }

    #[test]
    fn test_hits_interior_breakpoint_exactly() {
        assert!(close(RATE_UP.interpolate(7.0), 0.8));
    }

    #[test]
    fn test_nan_returns_last_value() {
        assert!(close(RATE_UP.interpolate(f32::NAN), 0.25));
    }

    #[test]
    fn test_try_new_rejects_unsorted() {
        let result = LookupTable::try_new([0.0, 5.0, 5.0], [1.0, 2.0, 3.0]);
        assert_eq!(result, Err(LookupError::UnsortedBreakpoints { index: 2 }));
    }

    #[test]
    fn test_try_new_rejects_non_finite() {
        let result = LookupTable::try_new([0.0, 1.0], [f32::NAN, 2.0]);
        assert_eq!(result, Err(LookupError::NonFiniteValue { index: 0 }));

        let result = LookupTable::try_new([0.0, f32::INFINITY], [1.0, 2.0]);
        assert_eq!(result, Err(LookupError::NonFiniteValue { index: 1 }));
    }

    #[test]
    fn test_try_new_accepts_sorted() {
        let result = LookupTable::try_new([0.0, 1.0], [3.0, 1.0]);
        assert!(result.is_ok());
    }

    #[test]
    fn test_monotonicity() {
        assert!(RATE_UP.is_non_increasing());

        let rising = LookupTable::from_const([0.0, 1.0], [1.0, 2.0]);
        assert!(!rising.is_non_increasing());
    }
}
