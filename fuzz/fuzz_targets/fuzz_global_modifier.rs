#![no_main]

use libfuzzer_sys::fuzz_target;
use orca_m600::{HeightRange, set_global_modifier};

fuzz_target!(|data: &[u8]| {
    // Accepted documents gain exactly one entry unless one was replaced
    let Ok(xml) = std::str::from_utf8(data) else {
        return;
    };

    let descriptor = HeightRange::filament_change(1.5);
    if let Ok((patched, replaced)) = set_global_modifier(xml, &descriptor) {
        let before = xml.matches("height_range_modifier").count();
        let after = patched.matches("height_range_modifier").count();
        assert!(after >= 1);
        if !replaced {
            assert_eq!(after, before + 1);
        }
    }
});
