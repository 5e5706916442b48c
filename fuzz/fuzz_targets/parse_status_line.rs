#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(status) = mach::fuzzing::parse_status_line_input(data) {
        debug_assert!(status < 1000);
        if let Ok(head) = mach::fuzzing::parse_response_head_input(data) {
            debug_assert_eq!(head.status, status);
        }
    }
});
