//! Prelude for steerguard-safety.
//!
//! Re-exports the hook types together with the frame and command types from
//! the protocol crate, which every caller needs alongside them.

pub use crate::bmw::BmwSafety;
pub use crate::error::{ConfigError, ConfigResult};
pub use crate::events::{RevokeCause, SafetyEvent};
pub use crate::hooks::SafetyHooks;
pub use crate::limits::{SteeringLimits, SteeringLimitsBuilder};
pub use crate::metrics::SafetyMetrics;
pub use crate::rx::{ControlTransition, RxOutcome, RxSignal};
pub use crate::state::SafetyState;
pub use crate::timer::{ManualTimer, TimerSource};
pub use crate::tx::{SuppressReason, TxVerdict};

pub use steerguard_bmw_protocol::{CanFrame, SteeringCommand, addresses};
