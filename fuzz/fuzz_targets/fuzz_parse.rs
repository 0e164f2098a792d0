#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let s = String::from_utf8_lossy(data);

    // Arbitrary input must never panic the parser.
    let _ = formcheck::parse(&s);
});
