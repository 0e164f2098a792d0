use crate::error::{ParseError, ParseErrorKind};
use crate::types::{FormDocument, NodeSpec};

/// Parse a YAML string into a FormDocument.
///
/// Performs YAML deserialization and arena flattening only. Does NOT check
/// the structural invariants an engine requires — that is `build`'s job.
pub fn parse(input: &str) -> Result<FormDocument, ParseError> {
    if input.trim().is_empty() {
        return Err(ParseError {
            kind: ParseErrorKind::Syntax,
            message: "empty input".to_string(),
            path: None,
        });
    }

    // Deserialize using serde-saphyr via serde_json Value as intermediate:
    // first parse YAML to serde_json::Value, then convert to node specs.
    let value: serde_json::Value = serde_saphyr::from_str(input).map_err(|e| {
        let msg = e.to_string();
        ParseError {
            kind: classify_saphyr_error(&msg),
            message: msg,
            path: None,
        }
    })?;

    // Ensure root is a mapping/object
    let Some(obj) = value.as_object() else {
        return Err(ParseError {
            kind: ParseErrorKind::TypeMismatch,
            message: "document root must be a YAML mapping".to_string(),
            path: None,
        });
    };

    // Validate no unknown top-level keys (only form allowed)
    for key in obj.keys() {
        if key != "form" {
            return Err(ParseError {
                kind: ParseErrorKind::TypeMismatch,
                message: format!("unknown top-level field: {}", key),
                path: Some(key.to_string()),
            });
        }
    }

    let Some(form) = obj.get("form") else {
        return Err(ParseError {
            kind: ParseErrorKind::TypeMismatch,
            message: "missing 'form' key".to_string(),
            path: Some("form".to_string()),
        });
    };

    if !form.is_array() {
        return Err(ParseError {
            kind: ParseErrorKind::TypeMismatch,
            message: "'form' must be a sequence of elements".to_string(),
            path: Some("form".to_string()),
        });
    }

    // Convert serde_json::Value to typed node specs
    let specs: Vec<NodeSpec> = serde_json::from_value(form.clone()).map_err(|e| ParseError {
        kind: ParseErrorKind::TypeMismatch,
        message: e.to_string(),
        path: Some("form".to_string()),
    })?;

    Ok(FormDocument::from_specs(&specs))
}

/// Best-effort classification of serde-saphyr error messages.
fn classify_saphyr_error(msg: &str) -> ParseErrorKind {
    if msg.contains("invalid type") || msg.contains("expected") {
        ParseErrorKind::TypeMismatch
    } else {
        ParseErrorKind::Syntax
    }
}
