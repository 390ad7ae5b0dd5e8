//! Egress validation: the tx hook.
//!
//! Only steering command frames are examined. A command that does not ask
//! the actuator to steer always passes; one that does must fit inside the
//! speed-dependent max-angle window and the per-cycle rate window around the
//! last accepted command.

use serde::Serialize;
use steerguard_bmw_protocol::{CanFrame, SteeringCommand, addresses};

use crate::limits::SteeringLimits;
use crate::state::SafetyState;

/// Why an outbound frame was withheld.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum SuppressReason {
    /// The command asks to steer while controls are not allowed.
    ControlsNotAllowed = 1,
    /// The commanded angle exceeds the max angle for the current speed.
    MaxAngleExceeded = 2,
    /// The commanded angle moved too far from the last accepted command.
    RateLimitExceeded = 3,
    /// A command frame too short to decode.
    MalformedCommand = 4,
}

impl SuppressReason {
    /// Numeric reason code.
    #[must_use]
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Short name for logs.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ControlsNotAllowed => "controls_not_allowed",
            Self::MaxAngleExceeded => "max_angle_exceeded",
            Self::RateLimitExceeded => "rate_limit_exceeded",
            Self::MalformedCommand => "malformed_command",
        }
    }

    /// Whether this suppression also closes the actuation gate.
    #[must_use]
    pub fn revokes_controls(self) -> bool {
        matches!(self, Self::MaxAngleExceeded | Self::RateLimitExceeded)
    }
}

impl core::fmt::Display for SuppressReason {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decision on an outbound frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "verdict", content = "reason", rename_all = "snake_case")]
pub enum TxVerdict {
    /// Transmit the frame.
    Send,
    /// Withhold the frame.
    Suppress(SuppressReason),
}

impl TxVerdict {
    /// `true` if the frame may be transmitted.
    #[must_use]
    pub fn is_send(self) -> bool {
        matches!(self, Self::Send)
    }

    /// Suppression reason, if any.
    #[must_use]
    pub fn reason(self) -> Option<SuppressReason> {
        match self {
            Self::Send => None,
            Self::Suppress(reason) => Some(reason),
        }
    }
}

/// Effect of one outbound frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TxOutcome {
    /// Decision on the frame.
    pub verdict: TxVerdict,
    /// Steering command decoded from the frame, if it carried one.
    pub command: Option<SteeringCommand>,
}

impl TxOutcome {
    const fn pass(verdict: TxVerdict) -> Self {
        Self {
            verdict,
            command: None,
        }
    }

    /// `true` if the frame closed the actuation gate.
    #[must_use]
    pub fn revoked_controls(&self) -> bool {
        self.verdict
            .reason()
            .is_some_and(SuppressReason::revokes_controls)
    }
}

/// Checks outbound actuation commands against the steering limits.
///
/// # Real-Time Safety
///
/// Two table lookups and a handful of comparisons per command frame. No
/// allocation, no blocking.
#[derive(Debug, Clone, Copy)]
pub struct EgressValidator<'a> {
    limits: &'a SteeringLimits,
}

impl<'a> EgressValidator<'a> {
    /// Create a validator over `limits`.
    #[must_use]
    pub const fn new(limits: &'a SteeringLimits) -> Self {
        Self { limits }
    }

    /// Validate one outbound frame.
    ///
    /// Frames on addresses other than the steering command always pass. The
    /// command is decoded once and handed back with the verdict.
    pub fn process(&self, state: &mut SafetyState, frame: &CanFrame) -> TxOutcome {
        if frame.address() != addresses::STEERING_COMMAND {
            return TxOutcome::pass(TxVerdict::Send);
        }
        match SteeringCommand::decode(frame.payload()) {
            Some(command) => TxOutcome {
                verdict: self.check_command(state, command),
                command: Some(command),
            },
            None => TxOutcome::pass(TxVerdict::Suppress(SuppressReason::MalformedCommand)),
        }
    }

    /// Validate a decoded steering command.
    pub fn check_command(&self, state: &mut SafetyState, command: SteeringCommand) -> TxVerdict {
        if !command.enabled {
            state.set_desired_angle_last(command.angle_deg);
            return TxVerdict::Send;
        }
        if !state.controls_allowed() {
            return TxVerdict::Suppress(SuppressReason::ControlsNotAllowed);
        }

        let model = &self.limits.model;
        let speed = state.speed_mps();
        let angle = command.angle_deg;
        let reason = if model.max_angle_window(speed).is_violated_by(angle) {
            Some(SuppressReason::MaxAngleExceeded)
        } else if model
            .window(state.desired_angle_last(), speed, 1.0)
            .is_violated_by(angle)
        {
            Some(SuppressReason::RateLimitExceeded)
        } else {
            None
        };

        match reason {
            Some(reason) => {
                state.revoke();
                TxVerdict::Suppress(reason)
            }
            None => {
                state.set_desired_angle_last(angle);
                TxVerdict::Send
            }
        }
    }
}
