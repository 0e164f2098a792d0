//! Engine handle and the fluent registration surface.
//!
//! `build` runs structural discovery once and takes ownership of the
//! document. Rules are then registered through the fluent builder —
//! `field(name)` → type selector → chained rule methods — and evaluated
//! lazily by `validate()`, which walks fields in registration order and each
//! field's rules in append order.

use crate::enums::FieldKind;
use crate::error::{BuildError, RegisterError, RegisterErrorKind};
use crate::feedback::{self, FeedbackState};
use crate::index::FieldIndex;
use crate::rules::Rule;
use crate::types::{FormDocument, NodeId};
use regex::Regex;

/// Construct an engine for one form document.
///
/// Performs the one-time structural validation (control presence, names,
/// labels, feedback elements) and refuses to produce a partially functional
/// instance on any violation.
///
/// # Errors
///
/// Returns a [`BuildError`] naming the violated invariant and, where
/// applicable, the offending control.
pub fn build(doc: FormDocument) -> Result<FormEngine, BuildError> {
    let index = FieldIndex::build(&doc)?;
    Ok(FormEngine {
        doc,
        index,
        fields: Vec::new(),
    })
}

#[derive(Debug)]
struct FieldEntry {
    name: String,
    controls: Vec<NodeId>,
    kind: Option<FieldKind>,
    rules: Vec<Rule>,
}

/// A validation engine bound to one form document.
///
/// The document shape is frozen for the engine's lifetime; the live surface
/// (`value`, `checked`) is expected to be mutated only between `validate`
/// calls.
#[derive(Debug)]
pub struct FormEngine {
    doc: FormDocument,
    index: FieldIndex,
    // Registration order; re-registering a name appends to its entry.
    fields: Vec<FieldEntry>,
}

impl FormEngine {
    /// Begin (or resume) registering rules for the named field.
    ///
    /// # Errors
    ///
    /// [`RegisterErrorKind::FieldNotFound`] if no control carries `name`;
    /// [`RegisterErrorKind::NoFeedbackElement`] if no feedback element
    /// resolves for the field's first control (a defensive re-check — for
    /// non-hidden controls this is already guaranteed by construction).
    pub fn field(&mut self, name: &str) -> Result<FieldBuilder<'_>, RegisterError> {
        let Some(controls) = self.index.controls_for(name) else {
            return Err(RegisterError {
                kind: RegisterErrorKind::FieldNotFound,
                field: name.to_string(),
                message: format!("field \"{}\" not found", name),
            });
        };
        let controls = controls.to_vec();

        if feedback::resolve(&self.doc, controls[0]).is_none() {
            return Err(RegisterError {
                kind: RegisterErrorKind::NoFeedbackElement,
                field: name.to_string(),
                message: format!("field \"{}\" has no feedback element", name),
            });
        }

        let entry = match self.fields.iter().position(|f| f.name == name) {
            Some(position) => position,
            None => {
                self.fields.push(FieldEntry {
                    name: name.to_string(),
                    controls,
                    kind: None,
                    rules: Vec::new(),
                });
                self.fields.len() - 1
            }
        };

        Ok(FieldBuilder { engine: self, entry })
    }

    /// Evaluate every registered rule against current live values.
    ///
    /// Fields run in registration order, rules in append order. A failing
    /// rule short-circuits the rest of its own field (first error wins — its
    /// message stays in the feedback element) but never the other fields.
    /// Returns true iff every invoked rule passed; fields with zero rules are
    /// vacuously true.
    pub fn validate(&mut self) -> bool {
        let mut all_valid = true;
        let Self { doc, fields, .. } = self;
        for entry in fields.iter() {
            for rule in &entry.rules {
                if !rule.invoke(doc, &entry.controls) {
                    all_valid = false;
                    break;
                }
            }
        }
        all_valid
    }

    pub fn document(&self) -> &FormDocument {
        &self.doc
    }

    /// Mutable access to the document's live surface. The tree shape is
    /// assumed frozen; only values, checked state, and text should change.
    pub fn document_mut(&mut self) -> &mut FormDocument {
        &mut self.doc
    }

    pub fn index(&self) -> &FieldIndex {
        &self.index
    }

    /// Set the live value of the named field's first control. Returns false
    /// when the field does not exist.
    pub fn set_value(&mut self, name: &str, value: &str) -> bool {
        match self.index.controls_for(name) {
            Some(controls) => {
                let target = controls[0];
                self.doc.set_value(target, value);
                true
            }
            None => false,
        }
    }

    /// Set the checked state of the group member whose `value` attribute
    /// equals `member_value`. Returns false when no such member exists.
    pub fn set_checked(&mut self, name: &str, member_value: &str, checked: bool) -> bool {
        let Some(controls) = self.index.controls_for(name) else {
            return false;
        };
        let member = controls
            .iter()
            .copied()
            .find(|&id| self.doc.node(id).value == member_value);
        match member {
            Some(id) => {
                self.doc.set_checked(id, checked);
                true
            }
            None => false,
        }
    }

    /// Current state of the named field's feedback element.
    pub fn feedback(&self, name: &str) -> Option<FeedbackState> {
        let controls = self.index.controls_for(name)?;
        feedback::state(&self.doc, controls[0])
    }
}

/// Type selector for a registered field.
///
/// The selector itself appends nothing; it fixes which rule semantics apply.
/// The first selector call decides the field's kind — a conflicting selector
/// on the same name is rejected rather than silently tolerated.
#[derive(Debug)]
pub struct FieldBuilder<'a> {
    engine: &'a mut FormEngine,
    entry: usize,
}

impl<'a> FieldBuilder<'a> {
    pub fn string(self) -> Result<StringRules<'a>, RegisterError> {
        let (engine, entry) = self.select(FieldKind::String)?;
        Ok(StringRules { engine, entry })
    }

    pub fn number(self) -> Result<NumberRules<'a>, RegisterError> {
        let (engine, entry) = self.select(FieldKind::Number)?;
        Ok(NumberRules { engine, entry })
    }

    pub fn array(self) -> Result<ArrayRules<'a>, RegisterError> {
        let (engine, entry) = self.select(FieldKind::Array)?;
        Ok(ArrayRules { engine, entry })
    }

    fn select(self, kind: FieldKind) -> Result<(&'a mut FormEngine, usize), RegisterError> {
        let field = &mut self.engine.fields[self.entry];
        match field.kind {
            None => field.kind = Some(kind),
            Some(chosen) if chosen == kind => {}
            Some(chosen) => {
                return Err(RegisterError {
                    kind: RegisterErrorKind::TypeConflict,
                    field: field.name.clone(),
                    message: format!(
                        "field \"{}\" is already registered as {}, cannot reinterpret as {}",
                        field.name,
                        chosen.as_str(),
                        kind.as_str()
                    ),
                });
            }
        }
        Ok((self.engine, self.entry))
    }
}

/// String rule chain. Every method appends one rule and returns the builder.
pub struct StringRules<'a> {
    engine: &'a mut FormEngine,
    entry: usize,
}

impl StringRules<'_> {
    /// Fail when the trimmed value is empty.
    pub fn required(self, message: Option<&str>) -> Self {
        self.push(Rule::StringRequired {
            message: message.map(str::to_string),
        })
    }

    /// Fail when a non-empty value is shorter than the control's `minlength`.
    /// Enforces presence first when the control carries `required`.
    pub fn min(self, message: Option<&str>) -> Self {
        self.push(Rule::StringMin {
            message: message.map(str::to_string),
        })
    }

    /// Fail when a non-empty value is longer than the control's `maxlength`.
    pub fn max(self, message: Option<&str>) -> Self {
        self.push(Rule::StringMax {
            message: message.map(str::to_string),
        })
    }

    /// Fail when a non-empty value does not match `pattern`. Empty values
    /// always pass.
    pub fn pattern(self, pattern: Regex, message: Option<&str>) -> Self {
        self.push(Rule::StringPattern {
            pattern,
            message: message.map(str::to_string),
        })
    }

    fn push(self, rule: Rule) -> Self {
        self.engine.fields[self.entry].rules.push(rule);
        self
    }
}

/// Numeric rule chain.
#[derive(Debug)]
pub struct NumberRules<'a> {
    engine: &'a mut FormEngine,
    entry: usize,
}

impl NumberRules<'_> {
    /// Fail on an empty value, or on one that does not parse as a number.
    pub fn required(self, message: Option<&str>) -> Self {
        self.push(Rule::NumberRequired {
            message: message.map(str::to_string),
        })
    }

    /// Fail when the parsed value is below the control's `min`.
    pub fn min(self, message: Option<&str>) -> Self {
        self.push(Rule::NumberMin {
            message: message.map(str::to_string),
        })
    }

    /// Fail when the parsed value is above the control's `max`.
    pub fn max(self, message: Option<&str>) -> Self {
        self.push(Rule::NumberMax {
            message: message.map(str::to_string),
        })
    }

    fn push(self, rule: Rule) -> Self {
        self.engine.fields[self.entry].rules.push(rule);
        self
    }
}

/// Checkbox-group rule chain.
pub struct ArrayRules<'a> {
    engine: &'a mut FormEngine,
    entry: usize,
}

impl ArrayRules<'_> {
    /// Fail when no group member is selected.
    pub fn required(self, message: Option<&str>) -> Self {
        self.push(Rule::ArrayRequired {
            message: message.map(str::to_string),
        })
    }

    /// Fail when fewer members are selected than the effective minimum
    /// (`data-min` on the canonical member, else 1 when it is required,
    /// else 0).
    pub fn min(self, message: Option<&str>) -> Self {
        self.push(Rule::ArrayMin {
            message: message.map(str::to_string),
        })
    }

    /// Fail when more members are selected than `data-max` allows.
    pub fn max(self, message: Option<&str>) -> Self {
        self.push(Rule::ArrayMax {
            message: message.map(str::to_string),
        })
    }

    fn push(self, rule: Rule) -> Self {
        self.engine.fields[self.entry].rules.push(rule);
        self
    }
}
