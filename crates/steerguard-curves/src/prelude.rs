//! Prelude for steerguard-curves.
//!
//! ```
//! use steerguard_curves::prelude::*;
//!
//! let table = LookupTable::try_new([0.0, 10.0], [100.0, 50.0])?;
//! assert!((table.interpolate(5.0) - 75.0).abs() < 1e-4);
//! # Ok::<(), LookupError>(())
//! ```

pub use crate::error::LookupError;
pub use crate::lookup::LookupTable;
pub use crate::rate_bound::{AngleWindow, RateBoundModel, limit_violated};
