use formcheck::{build, parse};
use proptest::prelude::*;

/// Build a checkbox group with one member per flag; cardinality config goes
/// on the first (canonical) member.
fn skills_form(checked: &[bool], data_min: Option<usize>, data_max: Option<usize>) -> String {
    let mut out = String::from("form:\n");
    for (i, &is_checked) in checked.iter().enumerate() {
        let mut config = String::new();
        if i == 0 {
            if let Some(min) = data_min {
                config.push_str(&format!("        data-min: {}\n", min));
            }
            if let Some(max) = data_max {
                config.push_str(&format!("        data-max: {}\n", max));
            }
        }
        out.push_str(&format!(
            r#"  - tag: label
    text: option-{i}
    children:
      - tag: input
        type: checkbox
        name: skills
        value: "option-{i}"
        checked: {is_checked}
{config}      - tag: span
        class: error
"#
        ));
    }
    out
}

fn selected(checked: &[bool]) -> usize {
    checked.iter().filter(|&&c| c).count()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn required_matches_selection_count(
        checked in proptest::collection::vec(any::<bool>(), 1..5),
    ) {
        let doc = parse(&skills_form(&checked, None, None)).expect("fixture parses");
        let mut engine = build(doc).expect("fixture builds");
        engine.field("skills").unwrap().array().unwrap().required(None);

        prop_assert_eq!(engine.validate(), selected(&checked) > 0, "checked={:?}", checked);
    }

    #[test]
    fn min_matches_cardinality_config(
        checked in proptest::collection::vec(any::<bool>(), 1..5),
        data_min in 0usize..6,
    ) {
        let doc = parse(&skills_form(&checked, Some(data_min), None)).expect("fixture parses");
        let mut engine = build(doc).expect("fixture builds");
        engine.field("skills").unwrap().array().unwrap().min(None);

        prop_assert_eq!(
            engine.validate(),
            selected(&checked) >= data_min,
            "checked={:?} data_min={}", checked, data_min
        );
    }

    #[test]
    fn max_matches_cardinality_config(
        checked in proptest::collection::vec(any::<bool>(), 1..5),
        data_max in 0usize..6,
    ) {
        let doc = parse(&skills_form(&checked, None, Some(data_max))).expect("fixture parses");
        let mut engine = build(doc).expect("fixture builds");
        engine.field("skills").unwrap().array().unwrap().max(None);

        prop_assert_eq!(
            engine.validate(),
            selected(&checked) <= data_max,
            "checked={:?} data_max={}", checked, data_max
        );
    }

    // Without cardinality config and without a required canonical member the
    // effective minimum is zero: min() can never fail.
    #[test]
    fn min_without_config_never_fails(
        checked in proptest::collection::vec(any::<bool>(), 1..5),
    ) {
        let doc = parse(&skills_form(&checked, None, None)).expect("fixture parses");
        let mut engine = build(doc).expect("fixture builds");
        engine.field("skills").unwrap().array().unwrap().min(None);

        prop_assert!(engine.validate(), "checked={:?}", checked);
    }
}
