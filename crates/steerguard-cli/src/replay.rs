//! Offline replay of a CAN log through the safety hooks.
//!
//! The log timestamps drive a [`ManualTimer`], truncated to the 32-bit
//! microsecond counter the hooks expect. Frames on the steering command
//! address go through the tx hook; everything else through the rx hook.

use serde::Serialize;
use steerguard_bmw_protocol::addresses;
use steerguard_safety::{
    BmwSafety, ControlTransition, ManualTimer, RevokeCause, SafetyMetrics, SafetyState,
    SteeringLimits, SuppressReason, TxVerdict,
};

use crate::candump::LogRecord;
use crate::error::CliError;

/// Replay settings.
#[derive(Debug, Clone, Default)]
pub struct ReplayOptions {
    /// Stop after the first revocation.
    pub stop_on_revoke: bool,
    /// Only replay frames captured on this interface.
    pub interface: Option<String>,
}

/// What changed at one log line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DecisionKind {
    /// The actuation gate opened or closed.
    Gate { transition: ControlTransition },
    /// The tx verdict differs from the previous command's verdict.
    Verdict { verdict: TxVerdict },
}

/// A decision change and where it happened.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Decision {
    pub line: usize,
    pub timestamp_us: u64,
    pub address: u32,
    #[serde(flatten)]
    pub kind: DecisionKind,
}

/// Result of a replay.
#[derive(Debug, Clone, Serialize)]
pub struct ReplayReport {
    pub frames: usize,
    pub stopped_early: bool,
    pub decisions: Vec<Decision>,
    pub metrics: SafetyMetrics,
    pub final_state: SafetyState,
}

/// Replay `records` through fresh BMW hooks built from `limits`.
pub fn run(
    records: &[LogRecord],
    limits: SteeringLimits,
    options: &ReplayOptions,
) -> Result<ReplayReport, CliError> {
    let start = records.first().map_or(0, |r| counter_us(r.timestamp_us));
    let mut safety = BmwSafety::with_limits(limits, ManualTimer::new(start))?;
    let mut decisions = Vec::new();
    let mut last_verdict = None;
    let mut frames = 0;
    let mut stopped_early = false;

    let selected = records.iter().filter(|r| {
        options
            .interface
            .as_deref()
            .is_none_or(|iface| iface == r.interface)
    });
    for record in selected {
        safety.timer().set(counter_us(record.timestamp_us));
        frames += 1;
        let decision = |kind| Decision {
            line: record.line,
            timestamp_us: record.timestamp_us,
            address: record.frame.address(),
            kind,
        };

        let transition = if record.frame.address() == addresses::STEERING_COMMAND {
            let verdict = safety.process_tx(&record.frame);
            if last_verdict != Some(verdict) {
                decisions.push(decision(DecisionKind::Verdict { verdict }));
                last_verdict = Some(verdict);
            }
            verdict
                .reason()
                .is_some_and(SuppressReason::revokes_controls)
                .then_some(ControlTransition::Revoked(RevokeCause::CommandViolation))
        } else {
            safety.process_rx(&record.frame).transition
        };

        if let Some(transition) = transition {
            tracing::debug!(line = record.line, ?transition, "gate changed");
            decisions.push(decision(DecisionKind::Gate { transition }));
            if options.stop_on_revoke && matches!(transition, ControlTransition::Revoked(_)) {
                stopped_early = true;
                break;
            }
        }
    }

    Ok(ReplayReport {
        frames,
        stopped_early,
        decisions,
        metrics: safety.metrics(),
        final_state: *safety.state(),
    })
}

/// Low 32 bits of a microsecond timestamp, as the hardware counter would read.
#[allow(clippy::cast_possible_truncation)]
fn counter_us(timestamp_us: u64) -> u32 {
    timestamp_us as u32
}
