//! Mutable safety state.
//!
//! One `SafetyState` lives for the whole power-on session. It is owned by the
//! vehicle safety implementation and mutated only through the validators,
//! which take it by exclusive reference.

use serde::Serialize;

/// Controls gate, angle references, speed, and edge-detection flags.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct SafetyState {
    controls_allowed: bool,
    controls_allowed_prev: bool,
    rt_angle_ref: f32,
    rt_angle_ts: u32,
    desired_angle_last: f32,
    speed_mps: f32,
    cruise_engaged_prev: bool,
}

impl SafetyState {
    /// Power-on state: controls disallowed, all references at zero.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            controls_allowed: false,
            controls_allowed_prev: false,
            rt_angle_ref: 0.0,
            rt_angle_ts: 0,
            desired_angle_last: 0.0,
            speed_mps: 0.0,
            cruise_engaged_prev: false,
        }
    }

    /// The actuation gate.
    #[must_use]
    pub const fn controls_allowed(&self) -> bool {
        self.controls_allowed
    }

    /// Gate value recorded at the previous steering angle report.
    #[must_use]
    pub const fn controls_allowed_prev(&self) -> bool {
        self.controls_allowed_prev
    }

    /// Anchor angle of the real-time window in degrees.
    #[must_use]
    pub const fn rt_angle_ref(&self) -> f32 {
        self.rt_angle_ref
    }

    /// Timer value when the real-time window was anchored.
    #[must_use]
    pub const fn rt_angle_ts(&self) -> u32 {
        self.rt_angle_ts
    }

    /// Last accepted commanded angle in degrees.
    #[must_use]
    pub const fn desired_angle_last(&self) -> f32 {
        self.desired_angle_last
    }

    /// Last decoded vehicle speed in m/s. Never negative.
    #[must_use]
    pub const fn speed_mps(&self) -> f32 {
        self.speed_mps
    }

    /// Cruise engagement seen on the previous cruise frame.
    #[must_use]
    pub const fn cruise_engaged_prev(&self) -> bool {
        self.cruise_engaged_prev
    }

    /// Open the gate. Returns `true` if it was closed.
    pub(crate) fn grant(&mut self) -> bool {
        let changed = !self.controls_allowed;
        self.controls_allowed = true;
        changed
    }

    /// Close the gate. Returns `true` if it was open.
    pub(crate) fn revoke(&mut self) -> bool {
        let changed = self.controls_allowed;
        self.controls_allowed = false;
        changed
    }

    /// Close the gate and forget the edge baseline.
    pub(crate) fn reset_controls(&mut self) {
        self.controls_allowed = false;
        self.controls_allowed_prev = false;
    }

    pub(crate) fn record_controls_baseline(&mut self) {
        self.controls_allowed_prev = self.controls_allowed;
    }

    pub(crate) fn anchor_rt_window(&mut self, angle: f32, ts: u32) {
        self.rt_angle_ref = angle;
        self.rt_angle_ts = ts;
    }

    pub(crate) fn set_desired_angle_last(&mut self, angle: f32) {
        self.desired_angle_last = angle;
    }

    /// Store a decoded speed, clamping negative and NaN values to zero.
    pub(crate) fn set_speed_mps(&mut self, mps: f32) {
        self.speed_mps = if mps > 0.0 { mps } else { 0.0 };
    }

    pub(crate) fn set_cruise_engaged_prev(&mut self, engaged: bool) {
        self.cruise_engaged_prev = engaged;
    }
}
