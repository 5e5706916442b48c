#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        let mut lines = input.lines();
        let Some(url) = lines.next() else {
            return;
        };
        let headers: Vec<&str> = lines.collect();
        if let Ok(request) = mach::fuzzing::prepare_request_input(url, &headers) {
            let bytes = request.as_bytes();
            debug_assert!(bytes.starts_with(b"GET "));
            debug_assert!(bytes.ends_with(b"\r\n\r\n"));
        }
    }
});
