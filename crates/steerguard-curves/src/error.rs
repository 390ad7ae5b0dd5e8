//! Error types for lookup table construction.

/// Error returned when a breakpoint table fails validation.
///
/// Only [`LookupTable::try_new`](crate::LookupTable::try_new) produces these;
/// evaluation itself is total and never fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    /// A breakpoint is not strictly greater than the one before it.
    #[error("breakpoint {index} is not strictly greater than its predecessor")]
    UnsortedBreakpoints {
        /// Index of the offending breakpoint (always >= 1).
        index: usize,
    },
    /// A breakpoint or value is NaN or infinite.
    #[error("point {index} holds a non-finite breakpoint or value")]
    NonFiniteValue {
        /// Index of the offending point.
        index: usize,
    },
}
