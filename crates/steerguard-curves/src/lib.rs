//! Speed-indexed lookup tables and rate-bound windows for steering limits.
//!
//! This crate holds the arithmetic half of the steering gatekeeper: the
//! piecewise-linear breakpoint table and the model that turns a reference
//! angle plus the current vehicle speed into an admissible `[low, high]`
//! interval for the next angle sample.
//!
//! # RT Safety Guarantees
//!
//! [`LookupTable::interpolate`], [`RateBoundModel::window`] and
//! [`RateBoundModel::max_angle_window`] are RT-safe:
//! - No heap allocations (tables are fixed-size arrays)
//! - No syscalls or I/O
//! - Bounded execution time (one pass over at most `N - 1` segments)
//!
//! # Example
//!
//! ```
//! use steerguard_curves::{LookupTable, RateBoundModel};
//!
//! let rate_up = LookupTable::from_const([2.0, 7.0, 17.0], [5.0, 0.8, 0.25]);
//! let rate_down = LookupTable::from_const([2.0, 7.0, 17.0], [5.0, 3.5, 0.8]);
//! let max_angle = LookupTable::from_const([2.0, 29.0, 38.0], [410.0, 92.0, 36.0]);
//! let model = RateBoundModel::new(rate_up, rate_down, max_angle, 1.0);
//!
//! // Moving away from zero is limited by the "up" table, returning by "down".
//! let window = model.window(10.0, 7.0, 1.0);
//! assert!(window.contains(10.5));
//! assert!(!window.contains(12.0));
//! assert!(window.contains(6.0));
//! ```

#![no_std]
#![deny(
    unsafe_op_in_unsafe_fn,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic
)]
#![warn(missing_docs, missing_debug_implementations)]
#![warn(clippy::pedantic)]

#[cfg(feature = "std")]
extern crate std;

pub mod error;
pub mod lookup;
pub mod prelude;
pub mod rate_bound;

pub use error::LookupError;
pub use lookup::LookupTable;
pub use rate_bound::{AngleWindow, RateBoundModel, limit_violated};
