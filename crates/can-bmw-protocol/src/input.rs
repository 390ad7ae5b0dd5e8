//! Inbound frame decoding: cruise status, speed and brake, measured angle.
//!
//! All functions are pure and allocation-free. Each `parse_*` function checks
//! the frame address and returns `None` for frames it does not own or whose
//! payload is too short to hold the field.

use serde::Serialize;

use crate::frame::CanFrame;
use crate::ids::addresses;

/// Which cruise-control option the car is built with.
///
/// Both options report engagement on a different frame; the safety hooks
/// accept either.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CruiseVariant {
    /// Dynamic (radar) cruise control, reported on `0x193`.
    Dynamic,
    /// Normal cruise control, reported on `0x200`.
    Normal,
}

impl CruiseVariant {
    /// Frame address carrying this variant's engagement bit.
    #[must_use]
    pub const fn address(self) -> u32 {
        match self {
            Self::Dynamic => addresses::DYNAMIC_CRUISE,
            Self::Normal => addresses::CRUISE,
        }
    }

    /// Variant reported on `address`, if any.
    #[must_use]
    pub const fn from_address(address: u32) -> Option<Self> {
        match address {
            addresses::DYNAMIC_CRUISE => Some(Self::Dynamic),
            addresses::CRUISE => Some(Self::Normal),
            _ => None,
        }
    }

    /// `(byte index, bit index)` of the engagement flag.
    const fn engaged_bit(self) -> (usize, u8) {
        match self {
            Self::Dynamic => (5, 3),
            Self::Normal => (1, 5),
        }
    }
}

/// Decoded cruise status frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CruiseStatus {
    /// Which frame the status came from.
    pub variant: CruiseVariant,
    /// Cruise control is engaged.
    pub engaged: bool,
}

/// Parse a cruise status frame (`0x193` or `0x200`).
#[must_use]
pub fn parse_cruise_status(frame: &CanFrame) -> Option<CruiseStatus> {
    let variant = CruiseVariant::from_address(frame.address())?;
    let (byte, bit) = variant.engaged_bit();
    let engaged = (frame.byte(byte)? >> bit) & 1 == 1;
    Some(CruiseStatus { variant, engaged })
}

/// Mask over byte 7 of `0x168` holding the two brake bits (bits 61 and 62).
pub const BRAKE_MASK: u8 = 0x60;

/// Byte index of the brake bits in `0x168`.
const BRAKE_BYTE: usize = 7;

/// Decoded wheel speed and brake frame (`0x168`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SpeedBrakeReport {
    /// Either brake bit is set.
    pub brake_pressed: bool,
    /// Vehicle speed in m/s, clamped at zero.
    pub speed_mps: f32,
}

/// Parse a wheel speed and brake frame (`0x168`).
///
/// Needs the full 8-byte payload, since the brake bits live in the last byte.
#[must_use]
pub fn parse_speed_brake(frame: &CanFrame) -> Option<SpeedBrakeReport> {
    if frame.address() != addresses::SPEED_BRAKE {
        return None;
    }
    let brake = frame.byte(BRAKE_BYTE)?;
    let raw = (u16::from(frame.byte(3)? & 0x0F) << 8) | u16::from(frame.byte(2)?);
    Some(SpeedBrakeReport {
        brake_pressed: brake & BRAKE_MASK != 0,
        speed_mps: decode_speed_mps(raw),
    })
}

/// Convert the 12-bit packed speed field to m/s.
///
/// The field is `raw * 0.05 - 25` in mph; negative results clamp to zero.
#[must_use]
pub fn decode_speed_mps(raw: u16) -> f32 {
    let mph = f32::from(raw & 0x0FFF) * 0.05 - 25.0;
    let mps = mph * 1.609 / 3.6;
    if mps > 0.0 { mps } else { 0.0 }
}

/// Parse a steering angle report (`0x00E`) into whole degrees.
#[must_use]
pub fn parse_steering_angle(frame: &CanFrame) -> Option<f32> {
    if frame.address() != addresses::STEERING_ANGLE {
        return None;
    }
    let raw = (u16::from(frame.byte(0)? & 0x3F) << 8) | u16::from(frame.byte(1)?);
    Some(decode_measured_angle(raw))
}

/// Convert the 14-bit packed measured angle to degrees.
///
/// The field is `raw * 0.1 - 819.2`, truncated toward zero to whole degrees.
/// Computed in integer tenths so the truncation is exact.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn decode_measured_angle(raw: u16) -> f32 {
    let tenths = i32::from(raw & 0x3FFF) - 8192;
    (tenths / 10) as f32
}
