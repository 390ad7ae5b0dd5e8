//! BMW safety hooks.

use steerguard_bmw_protocol::CanFrame;

use crate::error::ConfigResult;
use crate::events::{RevokeCause, SafetyEvent};
use crate::hooks::SafetyHooks;
use crate::limits::SteeringLimits;
use crate::metrics::SafetyMetrics;
use crate::rx::{ControlTransition, IngressValidator, RxOutcome};
use crate::state::SafetyState;
use crate::timer::{ManualTimer, TimerSource};
use crate::tx::{EgressValidator, TxVerdict};

/// Safety hooks for BMW cars with either cruise option.
///
/// Owns the single [`SafetyState`] for the session, the limits it is checked
/// against, the timer read on angle reports, and the activity counters.
#[derive(Debug)]
pub struct BmwSafety<T: TimerSource = ManualTimer> {
    state: SafetyState,
    limits: SteeringLimits,
    timer: T,
    metrics: SafetyMetrics,
}

impl<T: TimerSource> BmwSafety<T> {
    /// Create hooks with [`SteeringLimits::BMW`].
    #[must_use]
    pub fn new(timer: T) -> Self {
        Self {
            state: SafetyState::new(),
            limits: SteeringLimits::BMW,
            timer,
            metrics: SafetyMetrics::default(),
        }
    }

    /// Create hooks with custom limits.
    ///
    /// # Errors
    ///
    /// Returns an error if `limits` fail validation.
    pub fn with_limits(limits: SteeringLimits, timer: T) -> ConfigResult<Self> {
        limits.validate()?;
        Ok(Self {
            limits,
            ..Self::new(timer)
        })
    }

    /// Current safety state.
    #[must_use]
    pub fn state(&self) -> &SafetyState {
        &self.state
    }

    /// Activity counters since construction.
    #[must_use]
    pub fn metrics(&self) -> SafetyMetrics {
        self.metrics
    }

    /// Limits in force.
    #[must_use]
    pub fn limits(&self) -> &SteeringLimits {
        &self.limits
    }

    /// Timer read on steering angle reports.
    #[must_use]
    pub fn timer(&self) -> &T {
        &self.timer
    }

    /// The actuation gate.
    #[must_use]
    pub fn controls_allowed(&self) -> bool {
        self.state.controls_allowed()
    }

    /// Run the rx hook and report what changed.
    pub fn process_rx(&mut self, frame: &CanFrame) -> RxOutcome {
        let outcome =
            IngressValidator::new(&self.limits).process(&mut self.state, frame, &self.timer);
        self.metrics.record_rx(&outcome);
        if let Some(reanchor) = outcome.reanchor {
            SafetyEvent::WindowReanchored {
                angle_deg: reanchor.angle_deg,
                elapsed_us: reanchor.elapsed_us,
            }
            .emit();
        }
        if let Some(transition) = outcome.transition {
            transition_event(transition).emit();
        }
        outcome
    }

    /// Run the tx hook and report the verdict.
    pub fn process_tx(&mut self, frame: &CanFrame) -> TxVerdict {
        let outcome = EgressValidator::new(&self.limits).process(&mut self.state, frame);
        self.metrics.record_tx(outcome.verdict);
        if let TxVerdict::Suppress(reason) = outcome.verdict {
            SafetyEvent::CommandSuppressed {
                reason,
                angle_deg: outcome.command.map(|command| command.angle_deg),
            }
            .emit();
        }
        if outcome.revoked_controls() {
            let transition = ControlTransition::Revoked(RevokeCause::CommandViolation);
            self.metrics.record_transition(transition);
            transition_event(transition).emit();
        }
        outcome.verdict
    }
}

fn transition_event(transition: ControlTransition) -> SafetyEvent {
    match transition {
        ControlTransition::Granted => SafetyEvent::ControlsGranted,
        ControlTransition::Revoked(cause) => SafetyEvent::ControlsRevoked { cause },
    }
}

impl<T: TimerSource> SafetyHooks for BmwSafety<T> {
    fn init(&mut self, param: i16) {
        self.state.reset_controls();
        tracing::info!(param, "BMW safety init");
    }

    fn rx(&mut self, frame: &CanFrame) -> bool {
        self.process_rx(frame).accepted()
    }

    fn tx(&mut self, frame: &CanFrame) -> bool {
        self.process_tx(frame).is_send()
    }
}

impl Default for BmwSafety<ManualTimer> {
    fn default() -> Self {
        Self::new(ManualTimer::default())
    }
}
