//! Template document: metadata plus the component tree

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::node::Node;

/// Descriptive header of a template document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TemplateMetadata {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<String>,
    #[serde(
        rename = "templateType",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub template_type: Option<String>,
}

/// A complete template document. `component` is the root of the node tree;
/// a template without a root is structurally invalid and rejected by the
/// processor rather than silently rendered as nothing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Template {
    #[serde(default)]
    pub metadata: TemplateMetadata,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component: Option<Arc<Node>>,
}

impl Template {
    pub fn new(name: impl Into<String>, root: Node) -> Self {
        Self {
            metadata: TemplateMetadata {
                name: name.into(),
                ..TemplateMetadata::default()
            },
            component: Some(Arc::new(root)),
        }
    }

    pub fn from_json(source: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(source)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Root node of the component tree, if present.
    pub fn root(&self) -> Option<&Arc<Node>> {
        self.component.as_ref()
    }

    /// Depth-first lookup across the whole tree.
    pub fn find_by_id(&self, id: &str) -> Option<&Node> {
        self.component.as_ref().and_then(|root| root.find_by_id(id))
    }
}
