use formcheck::{build, parse};
use proptest::prelude::*;

/// Build a single numeric control document.
fn age_form(value: &str, min: Option<i64>, max: Option<i64>, required: bool) -> String {
    let mut config = String::new();
    if let Some(min) = min {
        config.push_str(&format!("    min: {}\n", min));
    }
    if let Some(max) = max {
        config.push_str(&format!("    max: {}\n", max));
    }
    if required {
        config.push_str("    required: true\n");
    }
    format!(
        r#"form:
  - tag: label
    for: age
    text: Age
  - tag: input
    type: number
    id: age
    name: age
    value: "{value}"
{config}  - tag: span
    class: error
"#
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn min_bound_matches_model(value in -100i64..100, min in -50i64..50) {
        let doc = parse(&age_form(&value.to_string(), Some(min), None, false))
            .expect("fixture parses");
        let mut engine = build(doc).expect("fixture builds");
        engine.field("age").unwrap().number().unwrap().min(None);

        prop_assert_eq!(engine.validate(), value >= min, "value={} min={}", value, min);
    }

    #[test]
    fn max_bound_matches_model(value in -100i64..100, max in -50i64..50) {
        let doc = parse(&age_form(&value.to_string(), None, Some(max), false))
            .expect("fixture parses");
        let mut engine = build(doc).expect("fixture builds");
        engine.field("age").unwrap().number().unwrap().max(None);

        prop_assert_eq!(engine.validate(), value <= max, "value={} max={}", value, max);
    }

    // Empty or unparseable values pass bound rules on optional controls.
    #[test]
    fn garbage_optional_value_passes_bounds(
        value in "[a-z]{1,5}",
        min in -50i64..50,
        max in -50i64..50,
    ) {
        let doc = parse(&age_form(&value, Some(min), Some(max), false))
            .expect("fixture parses");
        let mut engine = build(doc).expect("fixture builds");
        engine
            .field("age").unwrap()
            .number().unwrap()
            .min(None)
            .max(None);

        prop_assert!(engine.validate(), "value={:?}", value);
    }

    // On a required control the same values fail min() with the presence
    // message, whatever the threshold.
    #[test]
    fn garbage_required_value_fails_as_missing(value in "[a-z]{1,5}", min in -50i64..50) {
        let doc = parse(&age_form(&value, Some(min), None, true)).expect("fixture parses");
        let mut engine = build(doc).expect("fixture builds");
        engine.field("age").unwrap().number().unwrap().min(None);

        prop_assert!(!engine.validate(), "value={:?}", value);
        let state = engine.feedback("age").expect("feedback resolves");
        prop_assert_eq!(state.message, "this field is required");
    }
}
