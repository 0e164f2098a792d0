//! One-time structural discovery and validation of a form document.
//!
//! Construction collects every control in document order and enforces the
//! naming, label, and feedback-element invariants. All violations are fatal —
//! there is no partially usable index. After construction the snapshot is
//! immutable; only the controls' live values change underneath it.

use crate::enums::ControlKind;
use crate::error::{BuildError, BuildErrorKind};
use crate::feedback;
use crate::types::{FormDocument, NodeId};

/// One discovered control.
#[derive(Clone, Debug)]
pub struct ControlRecord {
    pub node: NodeId,
    pub kind: ControlKind,
    pub name: String,
}

/// Immutable snapshot of every control in a form document, keyed by field
/// name. Controls sharing a name form one checkbox group; the first-seen
/// member is the group's canonical source of cardinality config.
#[derive(Debug)]
pub struct FieldIndex {
    controls: Vec<ControlRecord>,
    // Field name → group members, in first-seen order.
    groups: Vec<(String, Vec<NodeId>)>,
}

impl FieldIndex {
    /// Discover and validate every control under the document.
    ///
    /// Check order is fixed: presence of controls, then names, then labels
    /// for every non-hidden control, then feedback elements for every
    /// non-hidden control. A control missing both its label and its feedback
    /// element is therefore always reported as a label error.
    pub fn build(doc: &FormDocument) -> Result<FieldIndex, BuildError> {
        let collected: Vec<NodeId> = doc
            .descendants()
            .into_iter()
            .filter(|&id| doc.node(id).is_control())
            .collect();

        if collected.is_empty() {
            return Err(BuildError {
                kind: BuildErrorKind::NoInputs,
                control: None,
                message: "form has no inputs".to_string(),
            });
        }

        let mut controls = Vec::with_capacity(collected.len());
        for (position, &id) in collected.iter().enumerate() {
            let node = doc.node(id);
            let name = node.name.as_deref().map(str::trim).unwrap_or("");
            if name.is_empty() {
                return Err(BuildError {
                    kind: BuildErrorKind::MissingName,
                    control: Some(describe(doc, id, position)),
                    message: format!(
                        "control {} has no name attribute",
                        describe(doc, id, position)
                    ),
                });
            }
            let kind = node
                .control_kind()
                .unwrap_or(ControlKind::Text);
            controls.push(ControlRecord {
                node: id,
                kind,
                name: name.to_string(),
            });
        }

        for record in controls.iter().filter(|r| r.kind != ControlKind::Hidden) {
            if !has_label(doc, record.node) {
                return Err(BuildError {
                    kind: BuildErrorKind::NoLabel,
                    control: Some(record.name.clone()),
                    message: format!("control \"{}\" has no associated label", record.name),
                });
            }
        }

        for record in controls.iter().filter(|r| r.kind != ControlKind::Hidden) {
            if feedback::resolve(doc, record.node).is_none() {
                return Err(BuildError {
                    kind: BuildErrorKind::NoFeedback,
                    control: Some(record.name.clone()),
                    message: format!("control \"{}\" has no feedback element", record.name),
                });
            }
        }

        let mut groups: Vec<(String, Vec<NodeId>)> = Vec::new();
        for record in &controls {
            match groups.iter_mut().find(|(name, _)| name == &record.name) {
                Some((_, members)) => members.push(record.node),
                None => groups.push((record.name.clone(), vec![record.node])),
            }
        }

        Ok(FieldIndex { controls, groups })
    }

    /// All backing controls for a field name, in document order. One entry
    /// for singular fields, every group member for checkbox groups.
    pub fn controls_for(&self, name: &str) -> Option<&[NodeId]> {
        self.groups
            .iter()
            .find(|(group, _)| group == name)
            .map(|(_, members)| members.as_slice())
    }

    /// Whether any control carries `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.controls_for(name).is_some()
    }

    /// Number of discovered controls.
    pub fn len(&self) -> usize {
        self.controls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.controls.is_empty()
    }

    /// All discovered controls, in document order.
    pub fn controls(&self) -> &[ControlRecord] {
        &self.controls
    }

    /// Classification of a discovered control.
    pub fn kind_of(&self, node: NodeId) -> Option<ControlKind> {
        self.controls
            .iter()
            .find(|record| record.node == node)
            .map(|record| record.kind)
    }

    /// First discovered control whose `id` attribute equals `id_attr`.
    pub fn control_by_id<'a>(&'a self, doc: &FormDocument, id_attr: &str) -> Option<&'a ControlRecord> {
        self.controls
            .iter()
            .find(|record| doc.node(record.node).id.as_deref() == Some(id_attr))
    }

    /// Discovered controls of one kind, in document order.
    pub fn controls_of_kind(&self, kind: ControlKind) -> Vec<&ControlRecord> {
        self.controls
            .iter()
            .filter(|record| record.kind == kind)
            .collect()
    }

    /// Discovered controls carrying the `required` attribute.
    pub fn required_controls<'a>(&'a self, doc: &FormDocument) -> Vec<&'a ControlRecord> {
        self.controls
            .iter()
            .filter(|record| doc.node(record.node).required)
            .collect()
    }
}

/// Label resolution: a `label` bound via `for` to the control's `id`, else a
/// `label` ancestor.
fn has_label(doc: &FormDocument, control: NodeId) -> bool {
    if let Some(id_attr) = doc.node(control).id.as_deref() {
        if doc.has_label_for(id_attr) {
            return true;
        }
    }
    doc.has_label_ancestor(control)
}

/// Describe a control without a usable name: by `id` when present, else by
/// document-order position.
fn describe(doc: &FormDocument, id: NodeId, position: usize) -> String {
    match doc.node(id).id.as_deref() {
        Some(id_attr) => format!("#{}", id_attr),
        None => format!("[{}]", position),
    }
}
