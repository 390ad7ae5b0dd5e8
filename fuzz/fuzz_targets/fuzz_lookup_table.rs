//! Fuzzes lookup table construction and interpolation.
//!
//! Run with:
//!   cargo +nightly fuzz run fuzz_lookup_table
#![no_main]
use libfuzzer_sys::fuzz_target;
use steerguard_curves::LookupTable;

fn f32_at(data: &[u8], index: usize) -> Option<f32> {
    let bytes = data.get(index * 4..index * 4 + 4)?;
    Some(f32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
}

fuzz_target!(|data: &[u8]| {
    let mut floats = [0.0f32; 7];
    for (i, slot) in floats.iter_mut().enumerate() {
        match f32_at(data, i) {
            Some(v) => *slot = v,
            None => return,
        }
    }
    let [b0, b1, b2, v0, v1, v2, x] = floats;

    if let Ok(table) = LookupTable::try_new([b0, b1, b2], [v0, v1, v2]) {
        let _ = table.interpolate(x);
        let _ = table.is_non_increasing();
    }
});
