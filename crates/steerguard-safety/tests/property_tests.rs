//! Property-based tests for the safety hook state machine.

#![cfg(test)]

use proptest::prelude::*;
use steerguard_bmw_protocol::CruiseVariant;
use steerguard_safety::elapsed_us;
use steerguard_safety::prelude::*;

fn angle_frame(deg: i16) -> CanFrame {
    let raw = u16::try_from(i32::from(deg) * 10 + 8192).unwrap_or(8192);
    let [hi, lo] = raw.to_be_bytes();
    CanFrame::from_array(addresses::STEERING_ANGLE, [hi & 0x3F, lo, 0, 0, 0, 0, 0, 0])
}

fn cruise_frame(engaged: bool) -> CanFrame {
    let byte1 = if engaged { 0x20 } else { 0 };
    CanFrame::from_array(CruiseVariant::Normal.address(), [0, byte1, 0, 0, 0, 0, 0, 0])
}

fn speed_brake_frame(speed_raw: u16, brake: bool) -> CanFrame {
    let [hi, lo] = speed_raw.to_be_bytes();
    let brake_bits = if brake { 0x20 } else { 0 };
    CanFrame::from_array(addresses::SPEED_BRAKE, [0, 0, lo, hi & 0x0F, 0, 0, 0, brake_bits])
}

/// One step of host activity.
#[derive(Debug, Clone)]
enum Step {
    Rx(CanFrame),
    Tx(CanFrame),
    AdvanceMs(u32),
}

fn arb_step() -> impl Strategy<Value = Step> {
    prop_oneof![
        any::<bool>().prop_map(|e| Step::Rx(cruise_frame(e))),
        (0u16..4096, any::<bool>()).prop_map(|(s, b)| Step::Rx(speed_brake_frame(s, b))),
        (-819i16..=819).prop_map(|a| Step::Rx(angle_frame(a))),
        (-1638.0f32..1638.0, any::<bool>())
            .prop_map(|(a, e)| Step::Tx(SteeringCommand::new(a, e).to_frame())),
        (0u32..400).prop_map(Step::AdvanceMs),
    ]
}

fn run(safety: &mut BmwSafety, steps: &[Step]) {
    for step in steps {
        match step {
            Step::Rx(frame) => {
                safety.rx(frame);
            }
            Step::Tx(frame) => {
                safety.tx(frame);
            }
            Step::AdvanceMs(ms) => safety.timer().advance_ms(*ms),
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Speed stored in the state is never negative.
    #[test]
    fn prop_speed_never_negative(steps in proptest::collection::vec(arb_step(), 0..40)) {
        let mut safety = BmwSafety::new(ManualTimer::new(0));
        run(&mut safety, &steps);
        prop_assert!(safety.state().speed_mps() >= 0.0);
    }

    /// Commands with the enable flag clear are never suppressed.
    #[test]
    fn prop_disabled_command_never_suppressed(
        steps in proptest::collection::vec(arb_step(), 0..40),
        angle in -1638.0f32..1638.0,
    ) {
        let mut safety = BmwSafety::new(ManualTimer::new(0));
        run(&mut safety, &steps);
        let verdict = safety.process_tx(&SteeringCommand::new(angle, false).to_frame());
        prop_assert_eq!(verdict, TxVerdict::Send);
    }

    /// With the gate closed, an enabled command is suppressed and the state
    /// does not change.
    #[test]
    fn prop_enabled_without_controls_is_inert(
        steps in proptest::collection::vec(arb_step(), 0..40),
        angle in -1638.0f32..1638.0,
    ) {
        let mut safety = BmwSafety::new(ManualTimer::new(0));
        run(&mut safety, &steps);
        safety.init(0);
        let before = *safety.state();
        let verdict = safety.process_tx(&SteeringCommand::new(angle, true).to_frame());
        prop_assert_eq!(verdict, TxVerdict::Suppress(SuppressReason::ControlsNotAllowed));
        prop_assert_eq!(*safety.state(), before);
    }

    /// A rising cruise edge always opens the gate.
    #[test]
    fn prop_cruise_edge_grants(steps in proptest::collection::vec(arb_step(), 0..40)) {
        let mut safety = BmwSafety::new(ManualTimer::new(0));
        run(&mut safety, &steps);
        safety.rx(&cruise_frame(false));
        prop_assert!(!safety.controls_allowed());
        safety.rx(&cruise_frame(true));
        prop_assert!(safety.controls_allowed());
    }

    /// Brake always closes the gate, whatever came before.
    #[test]
    fn prop_brake_always_revokes(
        steps in proptest::collection::vec(arb_step(), 0..40),
        speed in 0u16..4096,
    ) {
        let mut safety = BmwSafety::new(ManualTimer::new(0));
        run(&mut safety, &steps);
        safety.rx(&speed_brake_frame(speed, true));
        prop_assert!(!safety.controls_allowed());
    }

    /// Only a cruise frame or a steering angle report can turn a closed gate
    /// into an open one.
    #[test]
    fn prop_only_cruise_or_angle_grants(
        steps in proptest::collection::vec(arb_step(), 0..40),
        next in arb_step(),
    ) {
        let mut safety = BmwSafety::new(ManualTimer::new(0));
        run(&mut safety, &steps);
        let closed = !safety.controls_allowed();
        let can_grant = matches!(
            &next,
            Step::Rx(frame)
                if frame.address() == CruiseVariant::Normal.address()
                    || frame.address() == addresses::STEERING_ANGLE
        );
        run(&mut safety, core::slice::from_ref(&next));
        if closed && !can_grant {
            prop_assert!(!safety.controls_allowed());
        }
    }

    /// A steering angle report decides the gate by the real-time window alone.
    #[test]
    fn prop_angle_report_follows_window(
        steps in proptest::collection::vec(arb_step(), 0..40),
        angle in -819i16..=819,
    ) {
        let mut safety = BmwSafety::new(ManualTimer::new(0));
        run(&mut safety, &steps);
        let state = *safety.state();
        let limits = *safety.limits();
        let now = safety.timer().now_us();
        let reference = if elapsed_us(now, state.rt_angle_ts()) > limits.rt_interval_us
            || (state.controls_allowed() && !state.controls_allowed_prev())
        {
            f32::from(angle)
        } else {
            state.rt_angle_ref()
        };
        let window = limits
            .model
            .window(reference, state.speed_mps(), limits.rt_rate_multiplier);

        safety.rx(&angle_frame(angle));
        prop_assert_eq!(safety.controls_allowed(), window.contains(f32::from(angle)));
    }

    /// Identical in-bounds samples inside the interval keep the gate open and
    /// leave the anchor alone.
    #[test]
    fn prop_identical_samples_idempotent(
        angle in -400i16..=400,
        gap_ms in 0u32..=120,
    ) {
        let mut safety = BmwSafety::new(ManualTimer::new(10_000_000));
        safety.rx(&cruise_frame(true));
        safety.rx(&angle_frame(angle));
        let anchor = (safety.state().rt_angle_ref(), safety.state().rt_angle_ts());

        safety.timer().advance_ms(gap_ms);
        safety.rx(&angle_frame(angle));
        safety.timer().advance_ms(gap_ms);
        safety.rx(&angle_frame(angle));

        prop_assert!(safety.controls_allowed());
        prop_assert_eq!((safety.state().rt_angle_ref(), safety.state().rt_angle_ts()), anchor);
    }

    /// Accepted enabled commands stay within the max angle for the speed.
    #[test]
    fn prop_sent_commands_within_max_angle(
        speed in 0u16..4096,
        angles in proptest::collection::vec(-600.0f32..600.0, 1..30),
    ) {
        let mut safety = BmwSafety::new(ManualTimer::new(0));
        safety.rx(&speed_brake_frame(speed, false));
        safety.rx(&cruise_frame(true));
        let limit = safety.limits().model.max_angle_window(safety.state().speed_mps());
        for angle in angles {
            let frame = SteeringCommand::new(angle, true).to_frame();
            let decoded = SteeringCommand::parse(&frame).map_or(angle, |c| c.angle_deg);
            if safety.tx(&frame) {
                prop_assert!(limit.contains(decoded));
            }
        }
    }
}
