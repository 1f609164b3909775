//! Placeholder expansion: sentinels become generated node arrays
//!
//! A container whose children slot is a sentinel token or a mapping body
//! gets that text replaced with nodes generated from the context. The
//! generated ids follow fixed conventions (`specialty-0`, `spec-row-2-key`)
//! because extraction walks them back by prefix; expansion and extraction
//! are two halves of one contract.
//!
//! Expansion is deterministic: the same context produces the same nodes
//! with the same ids in the same order, which is what makes re-processing
//! a document reproducible.

use std::sync::Arc;

use serde_json::Value as JsonValue;
use tracing::debug;

use pagecraft_template::sentinel::{
    is_mapping_body, ACHIEVEMENTS_MARKER, ACHIEVEMENT_ID_PREFIX, BULLET_PREFIX,
    SPECIALTIES_MARKER, SPECIALTY_ID_PREFIX,
};
use pagecraft_template::{Children, Context, Node, TemplateKind};

use crate::value::Value;

/// The recognized expansion sites.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpansionShape {
    /// Mapping body over `content.features`.
    FeatureList,
    /// Mapping body over `content.specifications`.
    SpecEntries,
    /// `SPECIALTIES_PLACEHOLDER` token.
    Specialties,
    /// `ACHIEVEMENTS_PLACEHOLDER` token.
    Achievements,
    /// A mapping body naming no known collection; expands to nothing.
    UnknownMapping,
}

/// Classifies a children text run as an expansion site, if it is one.
pub fn detect(text: &str) -> Option<ExpansionShape> {
    let trimmed = text.trim();
    if trimmed == SPECIALTIES_MARKER {
        return Some(ExpansionShape::Specialties);
    }
    if trimmed == ACHIEVEMENTS_MARKER {
        return Some(ExpansionShape::Achievements);
    }
    if is_mapping_body(trimmed) {
        if trimmed.contains("content.features") {
            return Some(ExpansionShape::FeatureList);
        }
        if trimmed.contains("content.specifications") {
            return Some(ExpansionShape::SpecEntries);
        }
        return Some(ExpansionShape::UnknownMapping);
    }
    None
}

/// Generates the node array for an expansion site. `parent` is the node
/// whose children slot held the sentinel; its kind decides the table
/// versus block shape for specification rows.
pub fn expand(
    shape: ExpansionShape,
    parent: &Node,
    ctx: &Context,
    kind: TemplateKind,
) -> Vec<Arc<Node>> {
    match shape {
        ExpansionShape::FeatureList => expand_features(ctx),
        ExpansionShape::SpecEntries => expand_specifications(parent, ctx),
        ExpansionShape::Specialties => {
            expand_string_array("specialties", SPECIALTY_ID_PREFIX, ctx, kind)
        }
        ExpansionShape::Achievements => {
            expand_string_array("achievements", ACHIEVEMENT_ID_PREFIX, ctx, kind)
        }
        ExpansionShape::UnknownMapping => {
            debug!(parent = %parent.id, "mapping body names no known collection, expanding to nothing");
            Vec::new()
        }
    }
}

/// One titled block per feature; an explanation paragraph is appended only
/// when `content.featureExplanations` has a non-blank entry keyed by the
/// feature text.
fn expand_features(ctx: &Context) -> Vec<Arc<Node>> {
    let features = match ctx.content.get("features").and_then(JsonValue::as_array) {
        Some(items) => items,
        None => return Vec::new(),
    };
    let explanations = ctx
        .content
        .get("featureExplanations")
        .and_then(JsonValue::as_object);

    features
        .iter()
        .filter_map(JsonValue::as_str)
        .enumerate()
        .map(|(index, text)| {
            let title = Node::new(format!("feature-{index}-title"), "h4")
                .with_prop("className", "feature-title")
                .with_text(text);
            let mut children = vec![Arc::new(title)];

            let explanation = explanations
                .and_then(|map| map.get(text))
                .and_then(JsonValue::as_str)
                .filter(|body| !body.trim().is_empty());
            if let Some(body) = explanation {
                let desc = Node::new(format!("feature-{index}-desc"), "p")
                    .with_prop("className", "feature-explanation")
                    .with_text(body);
                children.push(Arc::new(desc));
            }

            let mut block =
                Node::new(format!("feature-{index}"), "div").with_prop("className", "feature-item");
            block.children = Some(Children::Many(children));
            Arc::new(block)
        })
        .collect()
}

/// One row per specification entry. Inside a `tbody` parent the rows are
/// real table rows with cells; anywhere else they are div/span pairs. Only
/// the immediate parent kind is consulted.
fn expand_specifications(parent: &Node, ctx: &Context) -> Vec<Arc<Node>> {
    let specs = match ctx
        .content
        .get("specifications")
        .and_then(JsonValue::as_object)
    {
        Some(map) => map,
        None => return Vec::new(),
    };
    let in_table = parent.kind == "tbody";

    specs
        .iter()
        .enumerate()
        .map(|(index, (key, value))| {
            let value_text = Value::from_json(value).to_display();
            let row_id = format!("spec-row-{index}");
            let (row_kind, cell_kind) = if in_table { ("tr", "td") } else { ("div", "span") };

            let key_cell = Node::new(format!("{row_id}-key"), cell_kind)
                .with_prop("className", "spec-key")
                .with_text(key.as_str());
            let value_cell = Node::new(format!("{row_id}-value"), cell_kind)
                .with_prop("className", "spec-value")
                .with_text(value_text);

            let mut row = Node::new(row_id, row_kind);
            if !in_table {
                row = row.with_prop("className", "spec-row");
            }
            row.children = Some(Children::Many(vec![Arc::new(key_cell), Arc::new(value_cell)]));
            Arc::new(row)
        })
        .collect()
}

/// One editable leaf per non-blank string in the named content array. The
/// element shape varies by template family; classic entries carry a bullet
/// prefix in their text that extraction strips back off.
fn expand_string_array(
    content_key: &str,
    id_prefix: &str,
    ctx: &Context,
    kind: TemplateKind,
) -> Vec<Arc<Node>> {
    let items = match ctx.content.get(content_key).and_then(JsonValue::as_array) {
        Some(items) => items,
        None => return Vec::new(),
    };

    items
        .iter()
        .filter_map(JsonValue::as_str)
        .filter(|text| !text.trim().is_empty())
        .enumerate()
        .map(|(index, text)| {
            let id = format!("{id_prefix}{index}");
            let node = match kind {
                TemplateKind::Modern => Node::new(id, "span")
                    .with_prop("className", "pill pill--modern")
                    .with_text(text),
                TemplateKind::Classic => Node::new(id, "li")
                    .with_prop("className", "list-entry list-entry--classic")
                    .with_text(format!("{BULLET_PREFIX}{text}")),
                TemplateKind::Minimal => Node::new(id, "p")
                    .with_prop("className", "list-line list-line--minimal")
                    .with_text(text),
                TemplateKind::Bold => Node::new(id, "span")
                    .with_prop("className", "badge badge--bold")
                    .with_text(text),
            };
            Arc::new(node.editable())
        })
        .collect()
}
