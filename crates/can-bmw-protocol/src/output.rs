//! Outbound steering command (`0x488`) decoding and encoding.
//!
//! # Wire format
//! ```text
//! Byte 0: bit 7 reserved, bits 6..0 = desired angle raw, high 7 bits
//! Byte 1: desired angle raw, low 8 bits
//! Byte 2: bit 6 = steering enabled
//! Byte 3-7: not inspected
//! ```
//! `angle_deg = raw * 0.1 - 1638.35`, giving a range of roughly ±1638 degrees
//! at 0.1 degree resolution.

use serde::Serialize;

use crate::frame::CanFrame;
use crate::ids::addresses;

/// Shortest payload that carries both the angle and the enable flag.
pub const STEERING_COMMAND_MIN_LEN: usize = 3;

/// Bit mask of the steering-enabled flag in byte 2.
pub const STEERING_ENABLED_MASK: u8 = 0x40;

const ANGLE_OFFSET_DEG: f32 = 1638.35;
const ANGLE_SCALE_DEG: f32 = 0.1;
const ANGLE_RAW_MAX: u16 = 0x7FFF;

/// A steering actuation command as carried on `0x488`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct SteeringCommand {
    /// Desired steering wheel angle in degrees.
    pub angle_deg: f32,
    /// The command asks the actuator to steer.
    pub enabled: bool,
}

impl SteeringCommand {
    /// Create a command.
    #[must_use]
    pub const fn new(angle_deg: f32, enabled: bool) -> Self {
        Self { angle_deg, enabled }
    }

    /// Parse a command from a frame, checking the address.
    #[must_use]
    pub fn parse(frame: &CanFrame) -> Option<Self> {
        if frame.address() != addresses::STEERING_COMMAND {
            return None;
        }
        Self::decode(frame.payload())
    }

    /// Decode a command payload.
    ///
    /// Returns `None` if `payload` is shorter than [`STEERING_COMMAND_MIN_LEN`].
    #[must_use]
    pub fn decode(payload: &[u8]) -> Option<Self> {
        let &[hi, lo, flags, ..] = payload else {
            return None;
        };
        let raw = (u16::from(hi & 0x7F) << 8) | u16::from(lo);
        Some(Self {
            angle_deg: decode_desired_angle(raw),
            enabled: flags & STEERING_ENABLED_MASK != 0,
        })
    }

    /// Encode into an 8-byte `0x488` payload.
    ///
    /// The angle is rounded to the nearest 0.1 degree and saturates at the
    /// ends of the representable range.
    #[must_use]
    pub fn encode(&self) -> [u8; 8] {
        let [hi, lo] = encode_desired_angle(self.angle_deg).to_be_bytes();
        let flags = if self.enabled {
            STEERING_ENABLED_MASK
        } else {
            0
        };
        [hi, lo, flags, 0, 0, 0, 0, 0]
    }

    /// Encode into a complete frame on the command address.
    #[must_use]
    pub fn to_frame(&self) -> CanFrame {
        CanFrame::from_array(addresses::STEERING_COMMAND, self.encode())
    }
}

/// Convert the 15-bit packed desired angle to degrees.
#[must_use]
pub fn decode_desired_angle(raw: u16) -> f32 {
    f32::from(raw & ANGLE_RAW_MAX) * ANGLE_SCALE_DEG - ANGLE_OFFSET_DEG
}

/// Convert degrees to the 15-bit packed desired angle.
///
/// Out-of-range and NaN inputs saturate (NaN maps to the lowest raw value).
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn encode_desired_angle(angle_deg: f32) -> u16 {
    let scaled = (angle_deg + ANGLE_OFFSET_DEG) * 10.0 + 0.5;
    if scaled.is_nan() || scaled < 0.0 {
        0
    } else if scaled >= f32::from(ANGLE_RAW_MAX) {
        ANGLE_RAW_MAX
    } else {
        scaled as u16
    }
}
