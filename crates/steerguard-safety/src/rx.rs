//! Ingress validation: the rx hook.
//!
//! Inbound frames never get dropped here; their only effect is on
//! [`SafetyState`]. The cruise engagement edge arms the actuation gate. Each
//! measured angle then re-decides it: a sample outside the real-time window
//! closes the gate, a sample inside opens it. Brake presses and cruise
//! disengagement close it as well.

use serde::Serialize;
use steerguard_bmw_protocol::{
    CanFrame, CruiseStatus, SpeedBrakeReport, addresses, is_cruise_address, parse_cruise_status,
    parse_speed_brake, parse_steering_angle,
};

use crate::events::RevokeCause;
use crate::limits::SteeringLimits;
use crate::state::SafetyState;
use crate::timer::{TimerSource, elapsed_us};

/// Which inbound signal a frame carried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RxSignal {
    /// Cruise engagement status.
    Cruise,
    /// Wheel speed and brake status.
    SpeedBrake,
    /// Measured steering angle.
    SteeringAngle,
    /// Not a frame the hooks inspect, or too short to decode.
    Ignored,
}

/// Change of the actuation gate caused by one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "transition", content = "cause", rename_all = "snake_case")]
pub enum ControlTransition {
    /// The gate opened.
    Granted,
    /// The gate closed.
    Revoked(RevokeCause),
}

/// Anchor of a freshly re-anchored real-time window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Reanchor {
    /// Measured angle the window is now centred on.
    pub angle_deg: f32,
    /// Time since the previous anchor in microseconds.
    pub elapsed_us: u32,
}

/// Effect of one inbound frame on the safety state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RxOutcome {
    /// Signal decoded from the frame.
    pub signal: RxSignal,
    /// Gate transition, if the gate changed.
    pub transition: Option<ControlTransition>,
    /// Set when the real-time window moved.
    pub reanchor: Option<Reanchor>,
}

impl RxOutcome {
    const fn new(signal: RxSignal) -> Self {
        Self {
            signal,
            transition: None,
            reanchor: None,
        }
    }

    /// Outcome for a frame that changed nothing.
    #[must_use]
    pub const fn ignored() -> Self {
        Self::new(RxSignal::Ignored)
    }

    /// Inbound frames are always accepted for further bus processing.
    #[must_use]
    pub const fn accepted(&self) -> bool {
        true
    }
}

fn revoke(state: &mut SafetyState, cause: RevokeCause) -> Option<ControlTransition> {
    state
        .revoke()
        .then_some(ControlTransition::Revoked(cause))
}

/// Updates the safety state from inbound frames.
///
/// # Real-Time Safety
///
/// At most two table lookups and one timer read per frame. No allocation, no
/// blocking.
#[derive(Debug, Clone, Copy)]
pub struct IngressValidator<'a> {
    limits: &'a SteeringLimits,
}

impl<'a> IngressValidator<'a> {
    /// Create a validator over `limits`.
    #[must_use]
    pub const fn new(limits: &'a SteeringLimits) -> Self {
        Self { limits }
    }

    /// Dispatch one inbound frame by address.
    ///
    /// The timer is read only for steering angle reports.
    pub fn process<T: TimerSource + ?Sized>(
        &self,
        state: &mut SafetyState,
        frame: &CanFrame,
        timer: &T,
    ) -> RxOutcome {
        let outcome = match frame.address() {
            address if is_cruise_address(address) => {
                parse_cruise_status(frame).map(|status| self.on_cruise(state, status))
            }
            addresses::SPEED_BRAKE => {
                parse_speed_brake(frame).map(|report| self.on_speed_brake(state, report))
            }
            addresses::STEERING_ANGLE => parse_steering_angle(frame)
                .map(|angle| self.on_steering_angle(state, angle, timer.now_us())),
            _ => None,
        };
        outcome.unwrap_or_else(RxOutcome::ignored)
    }

    /// Apply a cruise status.
    ///
    /// A disengaged-to-engaged edge opens the gate; any disengaged report
    /// closes it.
    pub fn on_cruise(&self, state: &mut SafetyState, status: CruiseStatus) -> RxOutcome {
        let mut outcome = RxOutcome::new(RxSignal::Cruise);
        if status.engaged && !state.cruise_engaged_prev() && state.grant() {
            outcome.transition = Some(ControlTransition::Granted);
        }
        if !status.engaged {
            outcome.transition = revoke(state, RevokeCause::CruiseDisengaged);
        }
        state.set_cruise_engaged_prev(status.engaged);
        outcome
    }

    /// Apply a speed and brake report.
    pub fn on_speed_brake(&self, state: &mut SafetyState, report: SpeedBrakeReport) -> RxOutcome {
        let mut outcome = RxOutcome::new(RxSignal::SpeedBrake);
        if report.brake_pressed {
            outcome.transition = revoke(state, RevokeCause::BrakePressed);
        }
        state.set_speed_mps(report.speed_mps);
        outcome
    }

    /// Check a measured angle against the real-time window.
    ///
    /// The window is re-anchored on the measured angle when it is older than
    /// the real-time interval, or when the gate opened since the previous
    /// angle report. A sample outside the window closes the gate; a sample
    /// inside opens it.
    pub fn on_steering_angle(&self, state: &mut SafetyState, angle: f32, now_us: u32) -> RxOutcome {
        let mut outcome = RxOutcome::new(RxSignal::SteeringAngle);

        let elapsed = elapsed_us(now_us, state.rt_angle_ts());
        let just_allowed = state.controls_allowed() && !state.controls_allowed_prev();
        if elapsed > self.limits.rt_interval_us || just_allowed {
            state.anchor_rt_window(angle, now_us);
            outcome.reanchor = Some(Reanchor {
                angle_deg: angle,
                elapsed_us: elapsed,
            });
        }

        let window = self.limits.model.window(
            state.rt_angle_ref(),
            state.speed_mps(),
            self.limits.rt_rate_multiplier,
        );
        if window.is_violated_by(angle) {
            outcome.transition = revoke(state, RevokeCause::AngleWindow);
        } else if state.grant() {
            outcome.transition = Some(ControlTransition::Granted);
        }

        state.record_controls_baseline();
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use steerguard_bmw_protocol::CruiseVariant;

    fn cruise(engaged: bool) -> CruiseStatus {
        CruiseStatus {
            variant: CruiseVariant::Dynamic,
            engaged,
        }
    }

    fn brake(pressed: bool) -> SpeedBrakeReport {
        SpeedBrakeReport {
            brake_pressed: pressed,
            speed_mps: 0.0,
        }
    }

    #[test]
    fn test_rising_edge_grants() {
        let limits = SteeringLimits::BMW;
        let rx = IngressValidator::new(&limits);
        let mut state = SafetyState::new();
        let outcome = rx.on_cruise(&mut state, cruise(true));
        assert_eq!(outcome.transition, Some(ControlTransition::Granted));
        assert!(state.controls_allowed());
        assert!(state.cruise_engaged_prev());
    }

    #[test]
    fn test_held_engagement_does_not_regrant() {
        let limits = SteeringLimits::BMW;
        let rx = IngressValidator::new(&limits);
        let mut state = SafetyState::new();
        rx.on_cruise(&mut state, cruise(true));
        rx.on_speed_brake(&mut state, brake(true));
        let outcome = rx.on_cruise(&mut state, cruise(true));
        assert_eq!(outcome.transition, None);
        assert!(!state.controls_allowed());
    }

    #[test]
    fn test_disengaged_revokes() {
        let limits = SteeringLimits::BMW;
        let rx = IngressValidator::new(&limits);
        let mut state = SafetyState::new();
        rx.on_cruise(&mut state, cruise(true));
        let outcome = rx.on_cruise(&mut state, cruise(false));
        assert_eq!(
            outcome.transition,
            Some(ControlTransition::Revoked(RevokeCause::CruiseDisengaged))
        );
        let outcome = rx.on_cruise(&mut state, cruise(false));
        assert_eq!(outcome.transition, None);
    }

    #[test]
    fn test_brake_updates_speed() {
        let limits = SteeringLimits::BMW;
        let rx = IngressValidator::new(&limits);
        let mut state = SafetyState::new();
        let report = SpeedBrakeReport {
            brake_pressed: false,
            speed_mps: 14.0,
        };
        let outcome = rx.on_speed_brake(&mut state, report);
        assert_eq!(outcome.signal, RxSignal::SpeedBrake);
        assert_eq!(state.speed_mps(), 14.0);
    }

    #[test]
    fn test_angle_sample_reanchors_after_interval() {
        let limits = SteeringLimits::BMW;
        let rx = IngressValidator::new(&limits);
        let mut state = SafetyState::new();
        let outcome = rx.on_steering_angle(&mut state, 30.0, 250_001);
        assert_eq!(
            outcome.reanchor,
            Some(Reanchor {
                angle_deg: 30.0,
                elapsed_us: 250_001
            })
        );
        assert_eq!(state.rt_angle_ref(), 30.0);
        assert_eq!(state.rt_angle_ts(), 250_001);
    }

    #[test]
    fn test_angle_sample_within_interval_keeps_anchor() {
        let limits = SteeringLimits::BMW;
        let rx = IngressValidator::new(&limits);
        let mut state = SafetyState::new();
        let outcome = rx.on_steering_angle(&mut state, 30.0, 250_000);
        assert_eq!(outcome.reanchor, None);
        assert_eq!(state.rt_angle_ref(), 0.0);
    }

    #[test]
    fn test_angle_violation_revokes() {
        let limits = SteeringLimits::BMW;
        let rx = IngressValidator::new(&limits);
        let mut state = SafetyState::new();
        rx.on_cruise(&mut state, cruise(true));
        // Grant re-anchors at 0 on the first sample.
        rx.on_steering_angle(&mut state, 0.0, 1_000);
        // 5 * 25 + 1 = 126 degrees either side at standstill
        let outcome = rx.on_steering_angle(&mut state, 127.0, 2_000);
        assert_eq!(
            outcome.transition,
            Some(ControlTransition::Revoked(RevokeCause::AngleWindow))
        );
        assert!(!state.controls_allowed());
        assert!(!state.controls_allowed_prev());
    }

    #[test]
    fn test_in_window_sample_grants() {
        let limits = SteeringLimits::BMW;
        let rx = IngressValidator::new(&limits);
        let mut state = SafetyState::new();
        let outcome = rx.on_steering_angle(&mut state, 0.0, 1_000);
        assert_eq!(outcome.transition, Some(ControlTransition::Granted));
        assert!(state.controls_allowed());
        assert!(state.controls_allowed_prev());

        let outcome = rx.on_steering_angle(&mut state, 0.0, 2_000);
        assert_eq!(outcome.transition, None);
        assert!(state.controls_allowed());
    }

    #[test]
    fn test_in_window_sample_after_violation_regrants() {
        let limits = SteeringLimits::BMW;
        let rx = IngressValidator::new(&limits);
        let mut state = SafetyState::new();
        rx.on_cruise(&mut state, cruise(true));
        rx.on_steering_angle(&mut state, 0.0, 1_000);
        rx.on_steering_angle(&mut state, 130.0, 11_000);
        assert!(!state.controls_allowed());

        let outcome = rx.on_steering_angle(&mut state, 0.0, 21_000);
        assert_eq!(outcome.transition, Some(ControlTransition::Granted));
        assert!(state.controls_allowed());
    }

    #[test]
    fn test_process_dispatch() {
        let limits = SteeringLimits::BMW;
        let rx = IngressValidator::new(&limits);
        let timer = crate::timer::ManualTimer::new(0);
        let mut state = SafetyState::new();
        let unknown = CanFrame::from_array(0x123, [0xFF; 8]);
        let outcome = rx.process(&mut state, &unknown, &timer);
        assert_eq!(outcome, RxOutcome::ignored());
        assert!(outcome.accepted());
        let engage = CanFrame::from_array(0x200, [0, 0x20, 0, 0, 0, 0, 0, 0]);
        assert_eq!(rx.process(&mut state, &engage, &timer).signal, RxSignal::Cruise);
        let dynamic = CanFrame::from_array(0x193, [0, 0, 0, 0, 0, 0x08, 0, 0]);
        assert_eq!(rx.process(&mut state, &dynamic, &timer).signal, RxSignal::Cruise);
        let speed = CanFrame::from_array(0x168, [0, 0, 0xF4, 0x01, 0, 0, 0, 0]);
        assert_eq!(rx.process(&mut state, &speed, &timer).signal, RxSignal::SpeedBrake);
        let angle = CanFrame::from_array(0x00E, [0x20, 0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(rx.process(&mut state, &angle, &timer).signal, RxSignal::SteeringAngle);
        let short_cruise = CanFrame::new(0x193, &[0; 4]).map(|f| rx.process(&mut state, &f, &timer));
        assert_eq!(short_cruise, Some(RxOutcome::ignored()));
    }
}
