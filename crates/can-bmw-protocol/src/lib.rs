//! BMW CAN protocol fields consumed by the steering safety hooks.
//!
//! This crate is intentionally I/O-free and allocation-free. It provides a
//! [`CanFrame`] value that owns its payload in an inline 8-byte buffer, and
//! pure, bit-exact decode functions for the handful of fields the gatekeeper
//! needs; it does not attempt to decode the rest of the vehicle protocol.
//!
//! ## Field map
//!
//! | Field | Address | Bits | Transform |
//! |-------|---------|------|-----------|
//! | cruise engaged (dynamic cruise) | `0x193` | byte 5, bit 3 | bool |
//! | cruise engaged (normal cruise) | `0x200` | byte 1, bit 5 | bool |
//! | brake active | `0x168` | byte 7, mask `0x60` | any bit set |
//! | vehicle speed | `0x168` | `(b3 & 0x0F) << 8 \| b2` | `(raw * 0.05 - 25)` mph to m/s |
//! | measured steering angle | `0x00E` | `(b0 & 0x3F) << 8 \| b1` | `raw * 0.1 - 819.2` deg, truncated |
//! | desired steering angle | `0x488` | `(b0 & 0x7F) << 8 \| b1` | `raw * 0.1 - 1638.35` deg |
//! | steering enabled | `0x488` | byte 2, mask `0x40` | bool |
//!
//! The brake bits are documented upstream as "bits 61 and 62", i.e. byte 7 of
//! an 8-byte payload.

#![no_std]
#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::unwrap_used)]
#![warn(missing_docs)]

#[cfg(feature = "std")]
extern crate std;

pub mod frame;
pub mod ids;
pub mod input;
pub mod output;

pub use frame::CanFrame;
pub use ids::{addresses, is_cruise_address};
pub use input::{
    CruiseStatus, CruiseVariant, SpeedBrakeReport, decode_measured_angle, decode_speed_mps,
    parse_cruise_status, parse_speed_brake, parse_steering_angle,
};
pub use output::{
    STEERING_COMMAND_MIN_LEN, SteeringCommand, decode_desired_angle, encode_desired_angle,
};
