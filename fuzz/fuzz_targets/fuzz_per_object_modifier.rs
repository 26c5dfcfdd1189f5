#![no_main]

use libfuzzer_sys::fuzz_target;
use orca_m600::{HeightRange, add_per_object_modifier};

fuzz_target!(|data: &[u8]| {
    // Only checks for panics; errors on malformed input are expected
    let Ok(xml) = std::str::from_utf8(data) else {
        return;
    };

    let descriptor = HeightRange::filament_change(1.5);
    let _ = add_per_object_modifier(xml, &descriptor);
});
