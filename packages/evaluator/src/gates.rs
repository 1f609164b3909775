//! Visibility gates: `if`, `unless`, `show`
//!
//! A node passes when every gate it carries is satisfied; absent gates
//! are satisfied by definition. A failing node is pruned with its whole
//! subtree, so gating a section ancestor hides everything under it.

use pagecraft_template::{Context, Node};

use crate::expression::evaluate;

/// True when the node survives its visibility gates against this context.
pub fn admits(node: &Node, ctx: &Context) -> bool {
    if let Some(expr) = &node.if_expr {
        if !evaluate(expr, ctx, 0).is_truthy() {
            return false;
        }
    }
    if let Some(expr) = &node.unless {
        if evaluate(expr, ctx, 0).is_truthy() {
            return false;
        }
    }
    if let Some(expr) = &node.show {
        if !evaluate(expr, ctx, 0).is_truthy() {
            return false;
        }
    }
    true
}
