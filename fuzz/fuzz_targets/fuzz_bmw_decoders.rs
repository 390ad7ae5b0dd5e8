//! Fuzzes the BMW CAN signal decoders and the steering command codec.
//!
//! The first two bytes select the address; the rest is the payload.
//! Must never panic on arbitrary bytes.
//!
//! Run with:
//!   cargo +nightly fuzz run fuzz_bmw_decoders
#![no_main]
use libfuzzer_sys::fuzz_target;
use steerguard_bmw_protocol::{
    CanFrame, SteeringCommand, addresses, encode_desired_angle, parse_cruise_status,
    parse_speed_brake, parse_steering_angle,
};

fuzz_target!(|data: &[u8]| {
    let Some((selector, payload)) = data.split_first() else {
        return;
    };
    let address = match selector % 5 {
        0 => addresses::STEERING_ANGLE,
        1 => addresses::SPEED_BRAKE,
        2 => addresses::DYNAMIC_CRUISE,
        3 => addresses::CRUISE,
        _ => addresses::STEERING_COMMAND,
    };
    let Some(frame) = CanFrame::new(address, payload) else {
        return;
    };

    let _ = parse_cruise_status(&frame);
    if let Some(report) = parse_speed_brake(&frame) {
        assert!(report.speed_mps >= 0.0);
    }
    let _ = parse_steering_angle(&frame);

    if let Some(command) = SteeringCommand::parse(&frame) {
        let _ = command.to_frame();
        let _ = encode_desired_angle(command.angle_deg);
    }
});
