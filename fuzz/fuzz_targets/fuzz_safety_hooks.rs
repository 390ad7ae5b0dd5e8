//! Fuzzes the BMW safety hooks with arbitrary rx/tx frame sequences.
//!
//! Each record is `[op, dt_ms, len, payload...]`: `op` picks the hook and
//! the address, `dt_ms` advances the timer. Must never panic, and the speed
//! in the state must never go negative.
//!
//! Run with:
//!   cargo +nightly fuzz run fuzz_safety_hooks
#![no_main]
use libfuzzer_sys::fuzz_target;
use steerguard_bmw_protocol::{CanFrame, addresses};
use steerguard_safety::{BmwSafety, SafetyHooks};

fuzz_target!(|data: &[u8]| {
    let mut safety = BmwSafety::default();
    safety.init(0);

    let mut rest = data;
    while let [op, dt_ms, len, tail @ ..] = rest {
        let take = usize::from(*len % 9).min(tail.len());
        let (payload, next) = tail.split_at(take);
        rest = next;

        safety.timer().advance_ms(u32::from(*dt_ms));
        let address = addresses::INBOUND
            .get(usize::from(*op % 5))
            .copied()
            .unwrap_or(addresses::STEERING_COMMAND);
        let Some(frame) = CanFrame::new(address, payload) else {
            continue;
        };

        if address == addresses::STEERING_COMMAND {
            let _ = safety.tx(&frame);
        } else {
            let _ = safety.rx(&frame);
        }
        assert!(safety.state().speed_mps() >= 0.0);
    }
});
