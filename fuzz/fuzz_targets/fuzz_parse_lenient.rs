#![no_main]
use libfuzzer_sys::fuzz_target;
use toon_loader::{Options, parse_str};

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Err(e) = parse_str(s, &Options::default()) {
            assert!(e.line().is_none(), "lenient parsing raised a syntax error: {e}");
        }
    }
});
