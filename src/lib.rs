//! Declarative, chainable validation for in-memory form documents.
//!
//! A form document is an element tree of controls (`input`, `textarea`,
//! `select`), labels, and feedback elements. This crate provides the full
//! pipeline for binding per-field rule chains to controls and evaluating
//! them on demand:
//!
//! ```text
//! parse(yaml) → FormDocument → build(doc) → FormEngine
//!                                  ├─ field(name) → string()/number()/array() → rule chain
//!                                  └─ validate() → bool  (+ feedback writes)
//! ```
//!
//! Construction validates the document's structure exactly once: every
//! control must carry a name, and every visible control must have an
//! associated label and a feedback element immediately following it.
//! Violations are fatal — there is no partially functional engine. Rules read
//! live control values at evaluation time, never caching them, and write
//! human-readable messages into the feedback elements as they run: within one
//! field the first failing rule wins and the rest are skipped, while every
//! other field is still evaluated.
//!
//! # Quick Start
//!
//! ```rust
//! let yaml = r#"
//! form:
//!   - tag: label
//!     for: username
//!     text: Username
//!   - tag: input
//!     type: text
//!     id: username
//!     name: username
//!     value: ab
//!     minlength: 3
//!   - tag: span
//!     class: error
//! "#;
//!
//! let doc = formcheck::parse(yaml).expect("well-formed document");
//! let mut engine = formcheck::build(doc).expect("structurally valid form");
//!
//! engine
//!     .field("username").expect("control exists")
//!     .string().expect("first selector fixes the kind")
//!     .min(None);
//!
//! assert!(!engine.validate());
//! let state = engine.feedback("username").expect("feedback element");
//! assert_eq!(state.message, "minimum 3 characters");
//! assert!(state.visible);
//! ```

pub mod engine;
pub mod enums;
pub mod error;
pub mod index;
pub mod parse;
pub mod types;

pub(crate) mod feedback;
pub(crate) mod rules;

pub use error::*;
pub use types::{FormDocument, Node, NodeId, NodeSpec};

// Re-export entry-point items at the crate root for convenience.
pub use engine::{ArrayRules, FieldBuilder, FormEngine, NumberRules, StringRules, build};
pub use enums::{ControlKind, FieldKind};
pub use feedback::{FEEDBACK_MARKERS, FeedbackState};
pub use index::{ControlRecord, FieldIndex};
pub use parse::parse;

/// Convenience entry point composing parse → build.
///
/// # Errors
///
/// Returns [`FormError::Parse`] when the YAML is malformed and
/// [`FormError::Build`] when the document violates a structural invariant.
///
/// # Example
///
/// ```rust
/// let yaml = r#"
/// form:
///   - tag: label
///     for: email
///     text: Email
///   - tag: input
///     id: email
///     name: email
///     value: ""
///   - tag: div
///     class: error-message
/// "#;
///
/// let mut engine = formcheck::load(yaml).expect("parses and builds");
/// engine.field("email").unwrap().string().unwrap().required(None);
/// assert!(!engine.validate());
/// ```
pub fn load(input: &str) -> Result<FormEngine, FormError> {
    let doc = parse::parse(input).map_err(FormError::Parse)?;
    engine::build(doc).map_err(FormError::Build)
}
