//! Contract between the tree model and any renderer
//!
//! The engine does not render; it hands a processed tree to a frontend.
//! This module pins down the pieces of that handoff the engine must agree
//! on with every renderer: which kinds are void (children are never
//! emitted), which props are event handlers rather than attributes, and
//! the closed set of handler actions a page can name.

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Kinds rendered as void elements. Children on these are ignored by
/// renderers, so processing never attaches generated content to them.
pub fn is_void_kind(kind: &str) -> bool {
    matches!(kind, "img" | "image" | "input" | "br" | "hr")
}

/// True for props that name an event handler: `on` followed by an
/// upper-case letter (`onClick`, `onSubmit`). Handler props carry an
/// action name, not an attribute value.
pub fn is_handler_prop(name: &str) -> bool {
    name.strip_prefix("on")
        .and_then(|rest| rest.chars().next())
        .is_some_and(|first| first.is_ascii_uppercase())
}

/// The closed set of actions a handler prop may name. Templates are data
/// from storage, so an unknown action resolves to `NoOp` with a warning
/// instead of failing the render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HandlerKind {
    Click,
    Toggle,
    Submit,
    InputChange,
    NoOp,
}

impl HandlerKind {
    /// Looks an action name up in the closed table. Quiet on a miss; use
    /// `resolve` when the caller wants the logged no-op fallback.
    pub fn from_name(action: &str) -> Option<Self> {
        match action {
            "click" => Some(HandlerKind::Click),
            "toggle" => Some(HandlerKind::Toggle),
            "submit" => Some(HandlerKind::Submit),
            "input-change" => Some(HandlerKind::InputChange),
            _ => None,
        }
    }

    pub fn resolve(action: &str) -> Self {
        match Self::from_name(action) {
            Some(kind) => kind,
            None => {
                warn!(action, "unknown handler action, treating as no-op");
                HandlerKind::NoOp
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            HandlerKind::Click => "click",
            HandlerKind::Toggle => "toggle",
            HandlerKind::Submit => "submit",
            HandlerKind::InputChange => "input-change",
            HandlerKind::NoOp => "no-op",
        }
    }
}
