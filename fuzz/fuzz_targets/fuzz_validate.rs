#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let s = String::from_utf8_lossy(data);

    let doc = match formcheck::parse(&s) {
        Ok(d) => d,
        Err(_) => return,
    };

    let mut engine = match formcheck::build(doc) {
        Ok(e) => e,
        Err(_) => return,
    };

    // Register a canonical string chain for every discovered field.
    let names: Vec<String> = engine
        .index()
        .controls()
        .iter()
        .map(|control| control.name.clone())
        .collect();
    for name in names {
        if let Ok(builder) = engine.field(&name) {
            if let Ok(chain) = builder.string() {
                chain.required(None).min(None).max(None);
            }
        }
    }

    // With no intervening mutation, validate must reproduce its verdict.
    let first = engine.validate();
    let second = engine.validate();
    assert_eq!(
        first, second,
        "validate() must be idempotent for unchanged live values"
    );
});
