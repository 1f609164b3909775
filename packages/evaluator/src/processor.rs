//! Tree processing: template tree in, render-ready tree out
//!
//! One recursive pass per node: visibility gates first (a failing node
//! prunes its whole subtree), then prop interpolation, then children.
//! Sentinel text children become generated node arrays; ordinary text
//! children are interpolated in place. The source tree is never touched;
//! every produced node is a fresh value and untouched subtrees of the
//! source stay shared behind their `Arc`s.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, instrument};

use pagecraft_template::{Children, Context, Node, PropValue, Template, TemplateKind};

use crate::expand::{detect, expand};
use crate::gates::admits;
use crate::interpolate::interpolate;

/// Structural failures that make a template unrenderable. Expression
/// problems never land here; they degrade to empty output locally.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RenderError {
    #[error("template has no component root")]
    MissingRoot,
}

/// Processes template trees against a context for one template family.
pub struct TreeProcessor {
    kind: TemplateKind,
}

impl TreeProcessor {
    pub fn new(kind: TemplateKind) -> Self {
        Self { kind }
    }

    /// Picks the template family from the document's own metadata,
    /// preferring the explicit type over the display name.
    pub fn for_template(template: &Template) -> Self {
        let name = template
            .metadata
            .template_type
            .as_deref()
            .unwrap_or(&template.metadata.name);
        Self::new(TemplateKind::from_name(name))
    }

    /// Processes a whole template. A template without a component root is
    /// structurally invalid; a root removed by its own gates is a valid
    /// empty page (`Ok(None)`).
    #[instrument(skip(self, template, ctx), fields(template = %template.metadata.name))]
    pub fn process_template(
        &self,
        template: &Template,
        ctx: &Context,
    ) -> Result<Option<Arc<Node>>, RenderError> {
        let root = template.component.as_ref().ok_or(RenderError::MissingRoot)?;
        Ok(self.process_node(root, ctx))
    }

    /// Processes one node. `None` means the node was pruned by its gates.
    pub fn process_node(&self, node: &Node, ctx: &Context) -> Option<Arc<Node>> {
        if !admits(node, ctx) {
            debug!(id = %node.id, "node pruned by visibility gate");
            return None;
        }

        let mut out = node.clone();

        for value in out.props.values_mut() {
            if let PropValue::Text(text) = value {
                if text.contains("{{") {
                    *text = interpolate(text, ctx);
                }
            }
        }

        out.children = match &node.children {
            None => None,
            Some(Children::Text(text)) => {
                if let Some(shape) = detect(text) {
                    Some(Children::Many(expand(shape, node, ctx, self.kind)))
                } else if text.contains("{{") {
                    Some(Children::Text(interpolate(text, ctx)))
                } else {
                    Some(Children::Text(text.clone()))
                }
            }
            Some(Children::One(child)) => self.process_node(child, ctx).map(Children::One),
            Some(Children::Many(nodes)) => Some(Children::Many(
                nodes
                    .iter()
                    .filter_map(|child| self.process_node(child, ctx))
                    .collect(),
            )),
        };

        Some(Arc::new(out))
    }
}
