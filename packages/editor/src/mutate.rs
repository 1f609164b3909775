//! # Tree Mutations
//!
//! Every mutation is id-addressed and persistent: the input tree is never
//! touched, and the output tree shares every untouched subtree with it.
//! Replacing a node rebuilds only the spine from that node up to the root,
//! so a deep edit costs O(depth) node clones plus refcount bumps on the
//! siblings along the way.
//!
//! Extraction is the inverse of placeholder expansion: it walks a
//! container's generated children back into the plain strings they were
//! grown from, agreeing with the expander on id prefixes, ordering and
//! the classic bullet decoration.

use std::sync::Arc;

use tracing::warn;

use pagecraft_template::sentinel::BULLET_PREFIX;
use pagecraft_template::{Children, Node, Template};

/// Replaces the first node (pre-order) whose id matches, returning the
/// rebuilt tree. `None` means the id is not in this subtree and the caller
/// should leave its tree alone.
pub fn replace_by_id(root: &Arc<Node>, id: &str, replacement: &Arc<Node>) -> Option<Arc<Node>> {
    if root.id == id {
        return Some(Arc::clone(replacement));
    }
    let rebuilt = match root.children.as_ref()? {
        Children::Text(_) => return None,
        Children::One(child) => Children::One(replace_by_id(child, id, replacement)?),
        Children::Many(children) => {
            let mut hit = None;
            for (index, child) in children.iter().enumerate() {
                if let Some(new_child) = replace_by_id(child, id, replacement) {
                    hit = Some((index, new_child));
                    break;
                }
            }
            let (index, new_child) = hit?;
            let mut out = children.clone();
            out[index] = new_child;
            Children::Many(out)
        }
    };

    let mut out = (**root).clone();
    out.children = Some(rebuilt);
    Some(Arc::new(out))
}

/// Template-level replace. A missing target is a logged no-op: templates
/// are edited from stale views sometimes, and losing an edit beats losing
/// the document.
pub fn replace_node(template: &Template, id: &str, replacement: Node) -> Template {
    let root = match &template.component {
        Some(root) => root,
        None => {
            warn!(id, "replace target in a template without a root");
            return template.clone();
        }
    };
    match replace_by_id(root, id, &Arc::new(replacement)) {
        Some(new_root) => Template {
            metadata: template.metadata.clone(),
            component: Some(new_root),
        },
        None => {
            warn!(id, "replace target not found, template unchanged");
            template.clone()
        }
    }
}

/// Reads the strings back out of a generated array: the container's
/// children with the item id prefix, in order, first text child each,
/// bullet decoration stripped, blanks dropped. Returns an empty list when
/// the container is missing rather than failing.
pub fn extract_generated_array(root: &Node, container_id: &str, item_prefix: &str) -> Vec<String> {
    let container = match root.find_by_id(container_id) {
        Some(node) => node,
        None => return Vec::new(),
    };
    container
        .child_nodes()
        .iter()
        .filter(|child| child.id.starts_with(item_prefix))
        .filter_map(|child| first_text(child))
        .map(strip_bullet)
        .filter(|text| !text.trim().is_empty())
        .collect()
}

fn first_text(node: &Node) -> Option<&str> {
    if let Some(text) = node.text_content() {
        return Some(text);
    }
    for child in node.child_nodes() {
        if let Some(text) = first_text(child) {
            return Some(text);
        }
    }
    None
}

/// Strips exactly one leading bullet so stored values round-trip: a value
/// that itself begins with a bullet keeps it.
fn strip_bullet(text: &str) -> String {
    match text.strip_prefix(BULLET_PREFIX) {
        Some(rest) => rest.to_string(),
        None => text.to_string(),
    }
}
