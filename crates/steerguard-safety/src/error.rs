//! Error types for safety limit construction.
//!
//! The hook path never returns errors: every failure there is a safety
//! decision. These errors only arise while building [`SteeringLimits`].
//!
//! [`SteeringLimits`]: crate::limits::SteeringLimits

use steerguard_curves::LookupError;

/// Errors from validating a set of steering limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// One of the three tables is malformed.
    #[error("{table} table is invalid: {source}")]
    InvalidLookup {
        /// Which table (`rate_up`, `rate_down` or `max_angle`).
        table: &'static str,
        /// Underlying table error.
        #[source]
        source: LookupError,
    },
    /// The real-time re-anchor interval is zero.
    #[error("real-time interval must be positive")]
    NonPositiveInterval,
    /// The real-time rate multiplier is below one or not finite.
    #[error("real-time rate multiplier must be finite and at least 1")]
    InvalidMultiplier,
    /// The epsilon margin is negative or not finite.
    #[error("epsilon margin must be finite and non-negative")]
    InvalidEpsilon,
    /// The max-angle table grows with speed.
    #[error("max-angle table must not increase with speed")]
    MaxAngleIncreasing,
}

/// A specialized `Result` type for limit construction.
pub type ConfigResult<T> = core::result::Result<T, ConfigError>;
