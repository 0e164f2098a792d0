#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let s = String::from_utf8_lossy(data);

    let doc = match formcheck::parse(&s) {
        Ok(d) => d,
        Err(_) => return,
    };

    // Structural discovery must reject or accept, never panic.
    let _ = formcheck::build(doc);
});
