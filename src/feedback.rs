//! Feedback elements: the document node that displays a field's current
//! error state.
//!
//! A feedback element is addressed structurally — the immediate next sibling
//! of its control, carrying a recognized marker class — and is re-resolved on
//! every write. Nothing is cached by reference, so later class mutation is
//! tolerated but repositioning breaks the binding.

use crate::types::{FormDocument, NodeId};

/// Marker classes recognized on a feedback element. The two names are
/// equivalent.
pub static FEEDBACK_MARKERS: &[&str] = &["error", "error-message"];

/// Snapshot of a feedback element's current state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeedbackState {
    pub message: String,
    pub visible: bool,
}

/// Resolve the feedback element owned by `control`.
pub(crate) fn resolve(doc: &FormDocument, control: NodeId) -> Option<NodeId> {
    let next = doc.next_sibling(control)?;
    FEEDBACK_MARKERS
        .iter()
        .any(|marker| doc.node(next).has_class(marker))
        .then_some(next)
}

/// Write a failure message and make the element visible.
pub(crate) fn report(doc: &mut FormDocument, control: NodeId, message: &str) {
    if let Some(element) = resolve(doc, control) {
        doc.set_text(element, message);
        doc.set_visible(element, true);
    }
}

/// Clear the message and hide the element.
pub(crate) fn clear(doc: &mut FormDocument, control: NodeId) {
    if let Some(element) = resolve(doc, control) {
        doc.set_text(element, "");
        doc.set_visible(element, false);
    }
}

/// Read the current state of `control`'s feedback element.
pub(crate) fn state(doc: &FormDocument, control: NodeId) -> Option<FeedbackState> {
    let element = resolve(doc, control)?;
    let node = doc.node(element);
    Some(FeedbackState {
        message: node.text.clone(),
        visible: node.visible.unwrap_or(false),
    })
}
