//! # steerguard-safety
//!
//! Real-time safety hooks that sit between a driving computer and the
//! steering actuator of a car.
//!
//! On every inbound frame the hooks update a single [`SafetyState`]; before
//! every outbound actuation frame they decide whether it may be sent. The
//! actuation gate (`controls_allowed`) works like this:
//!
//! ```text
//!                cruise 0 -> 1 edge,
//!                angle inside window
//!   ┌────────┐ ───────────────────────► ┌─────────┐
//!   │ Closed │                          │  Open   │
//!   └────────┘ ◄─────────────────────── └─────────┘
//!                cruise 0, brake, angle
//!                window or command
//!                violation
//! ```
//!
//! ## Real-Time Safety
//!
//! - **No heap allocations** on the hook path
//! - **No blocking operations** and no I/O
//! - **Single owner**: state is mutated only through `&mut self` hook calls
//! - **Wrap-safe timing** on a 32-bit microsecond counter
//!
//! ## Example
//!
//! ```rust
//! use steerguard_safety::prelude::*;
//!
//! let mut safety = BmwSafety::new(ManualTimer::new(0));
//! safety.init(0);
//!
//! // Normal cruise engages: the gate opens.
//! let engage = CanFrame::from_array(addresses::CRUISE, [0, 0x20, 0, 0, 0, 0, 0, 0]);
//! assert!(safety.rx(&engage));
//! assert!(safety.controls_allowed());
//!
//! // A small step is sent, a large jump is withheld and closes the gate.
//! assert!(safety.tx(&SteeringCommand::new(3.0, true).to_frame()));
//! assert!(!safety.tx(&SteeringCommand::new(90.0, true).to_frame()));
//! assert!(!safety.controls_allowed());
//! ```

#![no_std]
#![deny(
    unsafe_op_in_unsafe_fn,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    missing_debug_implementations
)]
#![warn(clippy::pedantic)]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(feature = "std")]
extern crate std;

pub mod bmw;
pub mod error;
pub mod events;
pub mod hooks;
pub mod limits;
pub mod metrics;
pub mod prelude;
pub mod rx;
pub mod state;
pub mod timer;
pub mod tx;

pub use bmw::BmwSafety;
pub use error::{ConfigError, ConfigResult};
pub use events::{EventSeverity, RevokeCause, SafetyEvent};
pub use hooks::{SafetyHooks, default_forward, no_output_tx_secondary};
pub use limits::{LIMIT_POINTS, LimitTable, SteeringLimits, SteeringLimitsBuilder};
pub use metrics::SafetyMetrics;
pub use rx::{ControlTransition, IngressValidator, Reanchor, RxOutcome, RxSignal};
pub use state::SafetyState;
pub use timer::{ManualTimer, TimerSource, elapsed_us};
pub use tx::{EgressValidator, SuppressReason, TxOutcome, TxVerdict};
