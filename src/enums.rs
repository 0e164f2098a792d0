//! Closed enumerations used throughout the form model.
//!
//! These are "closed" enums — only the defined variants are valid. The
//! control `type` attribute itself is an open string; classification into a
//! [`ControlKind`] happens once, at discovery time.

use serde::{Deserialize, Serialize};

/// Value interpretation of a discovered control.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlKind {
    /// Free-text controls: `input` without a more specific type, `textarea`,
    /// `select`.
    Text,
    /// `input type="number"`.
    Number,
    /// `input type="checkbox"`. Checkboxes sharing a `name` form one
    /// multi-valued field.
    Checkbox,
    /// `input type="hidden"`. Exempt from label and feedback checks.
    Hidden,
}

impl ControlKind {
    /// Classify a control from its tag and `type` attribute.
    ///
    /// Unrecognized `input` types degrade to [`ControlKind::Text`], matching
    /// how browsers treat unknown type tokens.
    pub fn classify(tag: &str, type_attr: Option<&str>) -> ControlKind {
        match tag {
            "input" => match type_attr.unwrap_or("text") {
                "hidden" => ControlKind::Hidden,
                "checkbox" => ControlKind::Checkbox,
                "number" => ControlKind::Number,
                _ => ControlKind::Text,
            },
            _ => ControlKind::Text,
        }
    }
}

/// Type selector chosen for a registered field's rule pipeline.
///
/// Fixed by the first selector call on a field; a conflicting selector is a
/// registration error, never a silent reinterpretation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    String,
    Number,
    Array,
}

impl FieldKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::String => "string",
            FieldKind::Number => "number",
            FieldKind::Array => "array",
        }
    }
}
