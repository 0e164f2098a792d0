//! Rule pipeline semantics.
//!
//! A rule is stored data, not a closure: its kind, the captured optional
//! custom message, and the compiled pattern where one applies. Evaluation
//! reads the backing controls' live state through the document handle and
//! drives the feedback sink before yielding its boolean — the feedback write
//! is an unconditional side effect of every invocation, so re-running always
//! reproduces the current truth.
//!
//! No rule can fail with an error: a numeric parse failure is the
//! "enter a number" outcome, never a panic or a propagated error.

use crate::enums::ControlKind;
use crate::feedback;
use crate::types::{FormDocument, Node, NodeId};
use regex::Regex;

// ─── Default messages ───────────────────────────────────────────────────────

pub(crate) const MSG_REQUIRED: &str = "this field is required";
pub(crate) const MSG_NOT_A_NUMBER: &str = "enter a number";
pub(crate) const MSG_INVALID_FORMAT: &str = "invalid format";
pub(crate) const MSG_SELECT_ONE: &str = "select at least one option";

// ─── Rule data ──────────────────────────────────────────────────────────────

/// One ordered predicate in a field's pipeline.
#[derive(Clone, Debug)]
pub(crate) enum Rule {
    StringRequired { message: Option<String> },
    StringMin { message: Option<String> },
    StringMax { message: Option<String> },
    StringPattern { pattern: Regex, message: Option<String> },
    NumberRequired { message: Option<String> },
    NumberMin { message: Option<String> },
    NumberMax { message: Option<String> },
    ArrayRequired { message: Option<String> },
    ArrayMin { message: Option<String> },
    ArrayMax { message: Option<String> },
}

impl Rule {
    /// Invoke the rule against the field's backing controls.
    ///
    /// Judges the live value, then writes the feedback element of the first
    /// backing control (the canonical member for groups): failure writes the
    /// resolved message and shows the element, success clears and hides it.
    pub(crate) fn invoke(&self, doc: &mut FormDocument, controls: &[NodeId]) -> bool {
        let target = controls[0];
        match self.judge(doc, controls) {
            Ok(()) => {
                feedback::clear(doc, target);
                true
            }
            Err(message) => {
                feedback::report(doc, target, &message);
                false
            }
        }
    }

    /// Pure judgment: `Err` carries the resolved failure message.
    fn judge(&self, doc: &FormDocument, controls: &[NodeId]) -> Result<(), String> {
        let node = doc.node(controls[0]);
        match self {
            Rule::StringRequired { message } => {
                if node.value.trim().is_empty() {
                    return Err(resolve(message, MSG_REQUIRED));
                }
                Ok(())
            }
            Rule::StringMin { message } => {
                // The required check is nested here, not a separate rule: a
                // field using only min() still enforces presence when the
                // control carries the required attribute.
                if node.required && node.value.trim().is_empty() {
                    return Err(resolve(message, MSG_REQUIRED));
                }
                if !node.value.is_empty() {
                    if let Some((min, raw)) = attr_usize(&node.minlength) {
                        if node.value.chars().count() < min {
                            return Err(resolve(
                                message,
                                &format!("minimum {} characters", raw),
                            ));
                        }
                    }
                }
                Ok(())
            }
            Rule::StringMax { message } => {
                if !node.value.is_empty() {
                    if let Some((max, raw)) = attr_usize(&node.maxlength) {
                        if node.value.chars().count() > max {
                            return Err(resolve(
                                message,
                                &format!("maximum {} characters", raw),
                            ));
                        }
                    }
                }
                Ok(())
            }
            Rule::StringPattern { pattern, message } => {
                // Never fires on an empty value; presence must be enforced
                // separately.
                if !node.value.is_empty() && !pattern.is_match(&node.value) {
                    return Err(resolve(message, MSG_INVALID_FORMAT));
                }
                Ok(())
            }
            Rule::NumberRequired { message } => {
                let trimmed = node.value.trim();
                if trimmed.is_empty() {
                    return Err(resolve(message, MSG_REQUIRED));
                }
                if trimmed.parse::<f64>().is_err() {
                    return Err(resolve(message, MSG_NOT_A_NUMBER));
                }
                Ok(())
            }
            Rule::NumberMin { message } => {
                match numeric_value(node) {
                    None => {
                        if node.required {
                            return Err(resolve(message, MSG_REQUIRED));
                        }
                        Ok(())
                    }
                    Some(value) => {
                        if let Some((min, raw)) = attr_f64(&node.min) {
                            if value < min {
                                return Err(resolve(message, &format!("minimum {}", raw)));
                            }
                        }
                        Ok(())
                    }
                }
            }
            Rule::NumberMax { message } => {
                if let Some(value) = numeric_value(node) {
                    if let Some((max, raw)) = attr_f64(&node.max) {
                        if value > max {
                            return Err(resolve(message, &format!("maximum {}", raw)));
                        }
                    }
                }
                Ok(())
            }
            Rule::ArrayRequired { message } => {
                if checked_count(doc, controls) == 0 {
                    return Err(resolve(message, MSG_SELECT_ONE));
                }
                Ok(())
            }
            Rule::ArrayMin { message } => {
                // Effective minimum: group cardinality config on the
                // canonical member, else 1 when it is marked required, else 0.
                let minimum = match attr_usize(&node.data_min) {
                    Some((min, _)) => min,
                    None if node.required => 1,
                    None => 0,
                };
                if checked_count(doc, controls) < minimum {
                    return Err(resolve(message, &format!("select at least {}", minimum)));
                }
                Ok(())
            }
            Rule::ArrayMax { message } => {
                if let Some((maximum, _)) = attr_usize(&node.data_max) {
                    if checked_count(doc, controls) > maximum {
                        return Err(resolve(message, &format!("select at most {}", maximum)));
                    }
                }
                Ok(())
            }
        }
    }
}

/// Custom message if supplied to the rule, else the branch default.
fn resolve(custom: &Option<String>, default_message: &str) -> String {
    custom
        .clone()
        .unwrap_or_else(|| default_message.to_string())
}

/// Parse a length/cardinality threshold attribute. Missing or unparseable
/// attributes impose no constraint.
fn attr_usize(attr: &Option<String>) -> Option<(usize, &str)> {
    let raw = attr.as_deref()?.trim();
    raw.parse::<usize>().ok().map(|n| (n, raw))
}

/// Parse a numeric threshold attribute, keeping the raw text for messages.
fn attr_f64(attr: &Option<String>) -> Option<(f64, &str)> {
    let raw = attr.as_deref()?.trim();
    raw.parse::<f64>().ok().map(|n| (n, raw))
}

/// The control's live value as a number. `None` for empty or unparseable
/// values — those pass numeric bound rules unless presence applies.
fn numeric_value(node: &Node) -> Option<f64> {
    let trimmed = node.value.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok()
}

/// Selected members of a checkbox group.
fn checked_count(doc: &FormDocument, controls: &[NodeId]) -> usize {
    controls
        .iter()
        .filter(|&&id| {
            let node = doc.node(id);
            node.control_kind() == Some(ControlKind::Checkbox) && node.checked
        })
        .count()
}
