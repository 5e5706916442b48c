#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        if let Ok(duration) = mach::fuzzing::parse_duration_value_input(input) {
            if input.trim().ends_with("ms") {
                debug_assert_eq!(duration.subsec_nanos() % 1_000_000, 0);
            }
        }
    }
});
