//! Safety events and their log mapping.
//!
//! Events are `Copy` values with numeric codes, so they can be built on the
//! hook path without allocation. They are emitted on state transitions only;
//! steady-state frames produce no log output above trace level.

use serde::Serialize;

use crate::tx::SuppressReason;

/// Why the actuation gate was closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum RevokeCause {
    /// Cruise control reported disengaged.
    CruiseDisengaged = 1,
    /// A brake bit was set.
    BrakePressed = 2,
    /// The measured angle left the real-time window.
    AngleWindow = 3,
    /// An outbound command exceeded the max-angle or rate limit.
    CommandViolation = 4,
}

impl RevokeCause {
    /// Numeric cause code.
    #[must_use]
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Short name for logs.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::CruiseDisengaged => "cruise_disengaged",
            Self::BrakePressed => "brake_pressed",
            Self::AngleWindow => "angle_window",
            Self::CommandViolation => "command_violation",
        }
    }
}

impl core::fmt::Display for RevokeCause {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Log severity of a [`SafetyEvent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EventSeverity {
    /// Expected per-frame outcome.
    Trace,
    /// Routine bookkeeping.
    Debug,
    /// Normal state change.
    Info,
    /// Safety intervention.
    Warning,
}

/// A transition of the safety state worth reporting.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SafetyEvent {
    /// The gate opened.
    ControlsGranted,
    /// The gate closed.
    ControlsRevoked {
        /// Trigger.
        cause: RevokeCause,
    },
    /// An outbound actuation frame was withheld.
    CommandSuppressed {
        /// Why the command was withheld.
        reason: SuppressReason,
        /// Decoded command angle, if the frame could be decoded.
        angle_deg: Option<f32>,
    },
    /// The real-time angle window moved to a new anchor.
    WindowReanchored {
        /// New anchor angle in degrees.
        angle_deg: f32,
        /// Time since the previous anchor in microseconds.
        elapsed_us: u32,
    },
}

impl SafetyEvent {
    /// Numeric event code: the high byte names the event, the low byte the
    /// cause or reason.
    #[must_use]
    pub fn code(&self) -> u16 {
        match self {
            Self::ControlsGranted => 0x0100,
            Self::ControlsRevoked { cause } => 0x0200 | u16::from(cause.code()),
            Self::CommandSuppressed { reason, .. } => 0x0300 | u16::from(reason.code()),
            Self::WindowReanchored { .. } => 0x0400,
        }
    }

    /// Log severity.
    #[must_use]
    pub fn severity(&self) -> EventSeverity {
        match self {
            Self::ControlsRevoked { .. } => EventSeverity::Warning,
            Self::CommandSuppressed {
                reason: SuppressReason::ControlsNotAllowed,
                ..
            } => EventSeverity::Trace,
            Self::CommandSuppressed { .. } => EventSeverity::Warning,
            Self::ControlsGranted => EventSeverity::Info,
            Self::WindowReanchored { .. } => EventSeverity::Debug,
        }
    }

    /// Write the event to the active `tracing` subscriber.
    pub fn emit(&self) {
        let code = self.code();
        match *self {
            Self::ControlsGranted => {
                tracing::info!(code, "controls allowed");
            }
            Self::ControlsRevoked { cause } => {
                tracing::warn!(code, cause = cause.as_str(), "controls revoked");
            }
            Self::CommandSuppressed { reason, angle_deg } => {
                if self.severity() == EventSeverity::Trace {
                    tracing::trace!(code, reason = reason.as_str(), ?angle_deg, "command suppressed");
                } else {
                    tracing::warn!(code, reason = reason.as_str(), ?angle_deg, "command suppressed");
                }
            }
            Self::WindowReanchored {
                angle_deg,
                elapsed_us,
            } => {
                tracing::debug!(code, angle_deg, elapsed_us, "angle window re-anchored");
            }
        }
    }
}
