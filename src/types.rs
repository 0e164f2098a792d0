//! Form document model: an element tree held in an arena.
//!
//! Nodes keep their HTML-ish attributes as raw strings; numeric thresholds
//! (`minlength`, `min`, `data-min`, …) are parsed at evaluation time, the way
//! a live DOM attribute would be read. The only state that mutates after
//! construction is the live surface: `value`, `checked`, `text`, and the
//! feedback visibility flag. The tree shape is frozen for the lifetime of one
//! engine instance.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::HashMap;

use crate::enums::ControlKind;

/// Tags collected as controls during discovery.
pub static CONTROL_TAGS: &[&str] = &["input", "textarea", "select"];

// ─── Node spec (serde surface) ──────────────────────────────────────────────

/// One element as written in a YAML form document. Children carry their own
/// specs; the nested form is flattened into an arena by
/// [`FormDocument::from_specs`].
///
/// Attribute values may be written as YAML strings, integers, floats, or
/// booleans; scalars are canonicalized to strings, mirroring how the same
/// attributes read off a real DOM.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct NodeSpec {
    pub tag: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(
        rename = "type",
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "de_opt_scalar"
    )]
    pub type_attr: Option<String>,
    /// Label binding: the `for` attribute of a `label` element.
    #[serde(
        rename = "for",
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "de_opt_scalar"
    )]
    pub for_attr: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "de_opt_scalar"
    )]
    pub text: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "de_opt_scalar"
    )]
    pub value: Option<String>,
    #[serde(default)]
    pub checked: bool,
    #[serde(default)]
    pub required: bool,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "de_opt_scalar"
    )]
    pub min: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "de_opt_scalar"
    )]
    pub max: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "de_opt_scalar"
    )]
    pub minlength: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "de_opt_scalar"
    )]
    pub maxlength: Option<String>,
    /// Group-cardinality lower bound for multi-valued fields.
    #[serde(
        rename = "data-min",
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "de_opt_scalar"
    )]
    pub data_min: Option<String>,
    /// Group-cardinality upper bound for multi-valued fields.
    #[serde(
        rename = "data-max",
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "de_opt_scalar"
    )]
    pub data_max: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NodeSpec>,
    /// Unrecognized attributes, tolerated and carried through.
    #[serde(flatten)]
    pub extensions: HashMap<String, Value>,
}

/// Accept string, integer, float, or boolean scalars for attribute values and
/// canonicalize to a string.
fn de_opt_scalar<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(Value::Bool(b)) => Ok(Some(b.to_string())),
        Some(other) => Err(serde::de::Error::custom(format!(
            "attribute value must be a scalar, got {}",
            other
        ))),
    }
}

// ─── Arena ──────────────────────────────────────────────────────────────────

/// Arena handle for a node in a [`FormDocument`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(pub(crate) usize);

/// One materialized element.
#[derive(Clone, Debug)]
pub struct Node {
    pub tag: String,
    pub id: Option<String>,
    pub name: Option<String>,
    pub type_attr: Option<String>,
    pub for_attr: Option<String>,
    pub class: Option<String>,
    /// Live text content. Feedback elements are written here by the sink.
    pub text: String,
    /// Live value. Read at evaluation time, never cached.
    pub value: String,
    /// Live checked state.
    pub checked: bool,
    pub required: bool,
    pub min: Option<String>,
    pub max: Option<String>,
    pub minlength: Option<String>,
    pub maxlength: Option<String>,
    pub data_min: Option<String>,
    pub data_max: Option<String>,
    /// Feedback visibility. `None` until the sink writes it; authored state
    /// counts as hidden.
    pub visible: Option<bool>,
    pub extensions: HashMap<String, Value>,
}

impl Node {
    fn from_spec(spec: &NodeSpec) -> Node {
        Node {
            tag: spec.tag.clone(),
            id: spec.id.clone(),
            name: spec.name.clone(),
            type_attr: spec.type_attr.clone(),
            for_attr: spec.for_attr.clone(),
            class: spec.class.clone(),
            text: spec.text.clone().unwrap_or_default(),
            value: spec.value.clone().unwrap_or_default(),
            checked: spec.checked,
            required: spec.required,
            min: spec.min.clone(),
            max: spec.max.clone(),
            minlength: spec.minlength.clone(),
            maxlength: spec.maxlength.clone(),
            data_min: spec.data_min.clone(),
            data_max: spec.data_max.clone(),
            visible: None,
            extensions: spec.extensions.clone(),
        }
    }

    /// Whether this element is a form control.
    pub fn is_control(&self) -> bool {
        CONTROL_TAGS.contains(&self.tag.as_str())
    }

    /// Classification of this control. `None` for non-control elements.
    pub fn control_kind(&self) -> Option<ControlKind> {
        self.is_control()
            .then(|| ControlKind::classify(&self.tag, self.type_attr.as_deref()))
    }

    /// Whitespace-tokenized class test.
    pub fn has_class(&self, class: &str) -> bool {
        self.class
            .as_deref()
            .is_some_and(|c| c.split_whitespace().any(|token| token == class))
    }
}

#[derive(Debug)]
struct Entry {
    node: Node,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// An element tree representing one form, with the traversal primitives the
/// engine consumes and the live mutation surface the caller drives between
/// validation passes.
#[derive(Debug)]
pub struct FormDocument {
    entries: Vec<Entry>,
    roots: Vec<NodeId>,
}

impl FormDocument {
    /// Flatten nested node specs into an arena, preserving document order.
    pub fn from_specs(specs: &[NodeSpec]) -> FormDocument {
        let mut doc = FormDocument {
            entries: Vec::new(),
            roots: Vec::new(),
        };
        for spec in specs {
            let id = doc.push(spec, None);
            doc.roots.push(id);
        }
        doc
    }

    fn push(&mut self, spec: &NodeSpec, parent: Option<NodeId>) -> NodeId {
        let id = NodeId(self.entries.len());
        self.entries.push(Entry {
            node: Node::from_spec(spec),
            parent,
            children: Vec::new(),
        });
        for child_spec in &spec.children {
            let child = self.push(child_spec, Some(id));
            self.entries[id.0].children.push(child);
        }
        id
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.entries[id.0].node
    }

    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.entries[id.0].children
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.entries[id.0].parent
    }

    /// All nodes in document (preorder) order.
    pub fn descendants(&self) -> Vec<NodeId> {
        let mut out = Vec::with_capacity(self.entries.len());
        for &root in &self.roots {
            self.preorder(root, &mut out);
        }
        out
    }

    fn preorder(&self, id: NodeId, out: &mut Vec<NodeId>) {
        out.push(id);
        for &child in self.children(id) {
            self.preorder(child, out);
        }
    }

    /// The element immediately following `id` under the same parent, with no
    /// gap.
    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        let siblings = match self.parent(id) {
            Some(parent) => self.children(parent),
            None => self.roots(),
        };
        let pos = siblings.iter().position(|&s| s == id)?;
        siblings.get(pos + 1).copied()
    }

    /// First element whose `id` attribute equals `id_attr`.
    pub fn find_by_id(&self, id_attr: &str) -> Option<NodeId> {
        self.descendants()
            .into_iter()
            .find(|&n| self.node(n).id.as_deref() == Some(id_attr))
    }

    /// Whether any `label` element binds `target_id` via its `for` attribute.
    pub fn has_label_for(&self, target_id: &str) -> bool {
        self.descendants().into_iter().any(|n| {
            let node = self.node(n);
            node.tag == "label" && node.for_attr.as_deref() == Some(target_id)
        })
    }

    /// Whether any ancestor of `id` is a `label` element.
    pub fn has_label_ancestor(&self, id: NodeId) -> bool {
        let mut current = self.parent(id);
        while let Some(ancestor) = current {
            if self.node(ancestor).tag == "label" {
                return true;
            }
            current = self.parent(ancestor);
        }
        false
    }

    // ─── Live mutation surface ──────────────────────────────────────────────

    pub fn set_value(&mut self, id: NodeId, value: &str) {
        self.entries[id.0].node.value = value.to_string();
    }

    pub fn set_checked(&mut self, id: NodeId, checked: bool) {
        self.entries[id.0].node.checked = checked;
    }

    pub fn set_text(&mut self, id: NodeId, text: &str) {
        self.entries[id.0].node.text = text.to_string();
    }

    pub fn set_visible(&mut self, id: NodeId, visible: bool) {
        self.entries[id.0].node.visible = Some(visible);
    }
}
