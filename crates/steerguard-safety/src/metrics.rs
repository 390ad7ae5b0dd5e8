//! Saturating counters for hook activity.

use serde::Serialize;

use crate::events::RevokeCause;
use crate::rx::{ControlTransition, RxOutcome};
use crate::tx::TxVerdict;

/// Hook activity counters.
///
/// All counters saturate at `u32::MAX` instead of wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct SafetyMetrics {
    /// Inbound frames seen.
    pub rx_frames: u32,
    /// Outbound frames checked.
    pub tx_frames: u32,
    /// Outbound frames allowed.
    pub tx_allowed: u32,
    /// Outbound frames suppressed.
    pub tx_suppressed: u32,
    /// Times the gate opened.
    pub grants: u32,
    /// Revocations by cruise disengagement.
    pub revoked_cruise: u32,
    /// Revocations by brake press.
    pub revoked_brake: u32,
    /// Revocations by real-time angle window violation.
    pub revoked_angle_window: u32,
    /// Revocations by command violation.
    pub revoked_command: u32,
    /// Real-time window re-anchors.
    pub reanchors: u32,
}

fn bump(counter: &mut u32) {
    *counter = counter.saturating_add(1);
}

impl SafetyMetrics {
    /// Total revocations of any cause.
    #[must_use]
    pub fn revocations(&self) -> u32 {
        self.revoked_cruise
            .saturating_add(self.revoked_brake)
            .saturating_add(self.revoked_angle_window)
            .saturating_add(self.revoked_command)
    }

    pub(crate) fn record_rx(&mut self, outcome: &RxOutcome) {
        bump(&mut self.rx_frames);
        if let Some(transition) = outcome.transition {
            self.record_transition(transition);
        }
        if outcome.reanchor.is_some() {
            bump(&mut self.reanchors);
        }
    }

    pub(crate) fn record_tx(&mut self, verdict: TxVerdict) {
        bump(&mut self.tx_frames);
        match verdict {
            TxVerdict::Send => bump(&mut self.tx_allowed),
            TxVerdict::Suppress(_) => bump(&mut self.tx_suppressed),
        }
    }

    pub(crate) fn record_transition(&mut self, transition: ControlTransition) {
        let counter = match transition {
            ControlTransition::Granted => &mut self.grants,
            ControlTransition::Revoked(RevokeCause::CruiseDisengaged) => &mut self.revoked_cruise,
            ControlTransition::Revoked(RevokeCause::BrakePressed) => &mut self.revoked_brake,
            ControlTransition::Revoked(RevokeCause::AngleWindow) => &mut self.revoked_angle_window,
            ControlTransition::Revoked(RevokeCause::CommandViolation) => &mut self.revoked_command,
        };
        bump(counter);
    }
}
