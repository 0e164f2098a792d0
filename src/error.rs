use serde::{Deserialize, Serialize};
use std::fmt;

/// Error kind for parse failures.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParseErrorKind {
    Syntax,
    TypeMismatch,
}

/// Produced by `parse` when YAML deserialization fails or the document root
/// does not have the expected shape.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.path {
            Some(path) => write!(f, "{}: {}", path, self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

impl std::error::Error for ParseError {}

/// Error kind for construction-time structural failures.
///
/// Each kind names one invariant the form document must satisfy before an
/// engine can be built. All four are fatal: construction aborts with no
/// partially usable engine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuildErrorKind {
    /// The subtree contains no controls at all.
    NoInputs,
    /// A control's `name` attribute is absent or blank after trimming.
    MissingName,
    /// A non-hidden control has neither a `for`-bound label nor a label
    /// ancestor.
    NoLabel,
    /// A non-hidden control has no feedback element as its immediate next
    /// sibling.
    NoFeedback,
}

/// Produced by `build` when the form document violates a structural invariant.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildError {
    pub kind: BuildErrorKind,
    /// The offending control, by `name` where one exists, else by `id` or
    /// document-order position.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub control: Option<String>,
    pub message: String,
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for BuildError {}

/// Error kind for field registration failures.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegisterErrorKind {
    /// No control carries the requested name.
    FieldNotFound,
    /// No feedback element resolves for the field's first control.
    NoFeedbackElement,
    /// A type selector conflicts with the kind already chosen for the field.
    TypeConflict,
}

/// Produced by `FormEngine::field` and the type selectors.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterError {
    pub kind: RegisterErrorKind,
    pub field: String,
    pub message: String,
}

impl fmt::Display for RegisterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for RegisterError {}

/// Combined error type for the `load` entry point.
#[derive(Clone, Debug)]
pub enum FormError {
    Parse(ParseError),
    Build(BuildError),
}

impl fmt::Display for FormError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormError::Parse(e) => write!(f, "Parse error: {}", e),
            FormError::Build(e) => write!(f, "Build error: {}", e),
        }
    }
}

impl std::error::Error for FormError {}
