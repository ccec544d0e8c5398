#![no_main]
use libfuzzer_sys::fuzz_target;
use toon_loader::{Options, parse_str};

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let opts = Options {
            strict: true,
            ..Options::default()
        };
        if parse_str(s, &opts).is_ok() {
            // Whatever strict mode accepts, lenient mode reads the same way.
            assert_eq!(parse_str(s, &opts).ok(), parse_str(s, &Options::default()).ok());
        }
    }
});
