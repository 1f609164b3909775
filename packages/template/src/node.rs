//! Page tree data model
//!
//! A page is a tree of `Node` values. Nodes are held behind `Arc` so that
//! edited trees share unchanged subtrees with their predecessors; mutation
//! happens by rebuilding the spine from the changed node up to the root.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Attribute value on a node. Most attributes are strings; boolean
/// attributes (`disabled`, `checked`) are kept as real booleans so they
/// round-trip through JSON unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropValue {
    Bool(bool),
    Text(String),
}

impl PropValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            PropValue::Text(text) => Some(text),
            PropValue::Bool(_) => None,
        }
    }
}

impl From<&str> for PropValue {
    fn from(value: &str) -> Self {
        PropValue::Text(value.to_string())
    }
}

impl From<String> for PropValue {
    fn from(value: String) -> Self {
        PropValue::Text(value)
    }
}

impl From<bool> for PropValue {
    fn from(value: bool) -> Self {
        PropValue::Bool(value)
    }
}

/// Child slot of a node: a text run, a single child node, or a list of
/// child nodes. The three shapes map directly onto the JSON page format
/// (string / object / array).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Children {
    Text(String),
    One(Arc<Node>),
    Many(Vec<Arc<Node>>),
}

/// Editing affordances attached to a node.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Editable {
    #[serde(rename = "contentEditable", default, skip_serializing_if = "is_false")]
    pub content_editable: bool,
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// A single node in the page tree.
///
/// `id` is the stable address used by editing operations; `kind` is the
/// abstract element tag (`div`, `h1`, `tbody`, ...). The optional `if_expr`,
/// `unless` and `show` fields are visibility gates evaluated against the
/// page context during processing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub props: BTreeMap<String, PropValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Children>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub editable: Option<Editable>,
    #[serde(rename = "if", default, skip_serializing_if = "Option::is_none")]
    pub if_expr: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unless: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show: Option<String>,
}

impl Node {
    pub fn new(id: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: kind.into(),
            props: BTreeMap::new(),
            children: None,
            editable: None,
            if_expr: None,
            unless: None,
            show: None,
        }
    }

    pub fn with_prop(mut self, name: impl Into<String>, value: impl Into<PropValue>) -> Self {
        self.props.insert(name.into(), value.into());
        self
    }

    /// Sets the node's children to a single text run, replacing whatever
    /// was there before.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.children = Some(Children::Text(text.into()));
        self
    }

    /// Appends a child node. A first child lands in the single-node slot;
    /// a second promotes the slot to a list. Text children are replaced.
    pub fn with_child(mut self, child: Node) -> Self {
        let child = Arc::new(child);
        self.children = Some(match self.children.take() {
            None | Some(Children::Text(_)) => Children::One(child),
            Some(Children::One(first)) => Children::Many(vec![first, child]),
            Some(Children::Many(mut nodes)) => {
                nodes.push(child);
                Children::Many(nodes)
            }
        });
        self
    }

    pub fn with_children(mut self, children: Vec<Node>) -> Self {
        self.children = Some(Children::Many(children.into_iter().map(Arc::new).collect()));
        self
    }

    pub fn editable(mut self) -> Self {
        self.editable = Some(Editable {
            content_editable: true,
        });
        self
    }

    pub fn with_if(mut self, expr: impl Into<String>) -> Self {
        self.if_expr = Some(expr.into());
        self
    }

    pub fn with_unless(mut self, expr: impl Into<String>) -> Self {
        self.unless = Some(expr.into());
        self
    }

    pub fn with_show(mut self, expr: impl Into<String>) -> Self {
        self.show = Some(expr.into());
        self
    }

    pub fn into_arc(self) -> Arc<Node> {
        Arc::new(self)
    }

    /// The node's direct text run, if its children slot holds one.
    pub fn text_content(&self) -> Option<&str> {
        match &self.children {
            Some(Children::Text(text)) => Some(text),
            _ => None,
        }
    }

    /// Direct child nodes, regardless of whether the slot holds one node
    /// or a list. Text runs yield an empty slice.
    pub fn child_nodes(&self) -> &[Arc<Node>] {
        match &self.children {
            Some(Children::One(node)) => std::slice::from_ref(node),
            Some(Children::Many(nodes)) => nodes,
            _ => &[],
        }
    }

    pub fn prop_text(&self, name: &str) -> Option<&str> {
        self.props.get(name).and_then(PropValue::as_text)
    }

    /// Depth-first search for a node by id, the node itself included.
    pub fn find_by_id(&self, id: &str) -> Option<&Node> {
        if self.id == id {
            return Some(self);
        }
        for child in self.child_nodes() {
            if let Some(found) = child.find_by_id(id) {
                return Some(found);
            }
        }
        None
    }
}
