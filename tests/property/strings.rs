use formcheck::{build, parse};
use proptest::prelude::*;
use regex::Regex;

/// Build a single text control document with the given value and minlength.
fn username_form(value: &str, minlength: Option<usize>) -> String {
    let min_line = minlength
        .map(|m| format!("    minlength: {}\n", m))
        .unwrap_or_default();
    format!(
        r#"form:
  - tag: label
    for: username
    text: Username
  - tag: input
    id: username
    name: username
    value: "{value}"
{min_line}  - tag: span
    class: error
"#
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    // min() on a non-required control: empty passes, otherwise char count
    // decides.
    #[test]
    fn min_length_matches_model(value in "[a-z]{0,10}", min in 0usize..8) {
        let doc = parse(&username_form(&value, Some(min))).expect("fixture parses");
        let mut engine = build(doc).expect("fixture builds");
        engine.field("username").unwrap().string().unwrap().min(None);

        let expected = value.is_empty() || value.chars().count() >= min;
        prop_assert_eq!(
            engine.validate(),
            expected,
            "value={:?} min={}", value, min
        );
    }

    // required() judges the trimmed value: padding alone never satisfies it.
    #[test]
    fn required_trims_whitespace(core in "[a-z]{0,3}", pad in "[ ]{0,3}") {
        let value = format!("{}{}", pad, core);
        let doc = parse(&username_form(&value, None)).expect("fixture parses");
        let mut engine = build(doc).expect("fixture builds");
        engine.field("username").unwrap().string().unwrap().required(None);

        prop_assert_eq!(engine.validate(), !core.is_empty(), "value={:?}", value);
    }

    // pattern() never fires on the empty value, whatever the expression.
    #[test]
    fn pattern_on_empty_value_always_passes(
        source in prop_oneof![
            Just("^[0-9]+$"),
            Just("^x{5}$"),
            Just("^$"),
            Just("[A-Z]"),
        ]
    ) {
        let doc = parse(&username_form("", None)).expect("fixture parses");
        let mut engine = build(doc).expect("fixture builds");
        engine
            .field("username").unwrap()
            .string().unwrap()
            .pattern(Regex::new(source).expect("valid pattern"), None);

        prop_assert!(engine.validate(), "pattern {:?} fired on empty value", source);
    }

    // Re-running with unchanged live values yields the same verdict and the
    // same feedback state.
    #[test]
    fn validate_is_idempotent(value in "[a-z ]{0,10}", min in 0usize..8) {
        let doc = parse(&username_form(&value, Some(min))).expect("fixture parses");
        let mut engine = build(doc).expect("fixture builds");
        engine
            .field("username").unwrap()
            .string().unwrap()
            .required(None)
            .min(None);

        let first = engine.validate();
        let first_state = engine.feedback("username").expect("feedback resolves");
        let second = engine.validate();
        let second_state = engine.feedback("username").expect("feedback resolves");

        prop_assert_eq!(first, second);
        prop_assert_eq!(first_state, second_state);
    }
}
