//! # Edit Session Management
//!
//! Tracks the selection and in-progress field edits for one open document.
//!
//! The state machine is deliberately small:
//!
//! ```text
//! Idle ──select──▶ Selected ──begin_edit──▶ Editing
//!   ▲                 │                        │
//!   └────cancel───────┴────────save────────────┘
//! ```
//!
//! Selecting a different node while editing cancels the edit implicitly,
//! matching how clicking elsewhere on a canvas behaves. Field edits are
//! buffered in the session and only reach the document on save.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use pagecraft_template::{Children, PropValue};

use crate::document::PageDocument;

/// Buffered edits for the node currently being edited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditSession {
    /// Id of the node the edits apply to.
    pub target_node_id: String,
    /// Pending field values. The `text` field maps to the node's text
    /// content; everything else is a prop.
    pub fields: BTreeMap<String, String>,
    /// Whether any field changed since the session opened.
    pub dirty: bool,
}

/// Where the editor is in the select/edit cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditState {
    Idle,
    Selected { node_id: String },
    Editing(EditSession),
}

/// One user's editing surface over a document.
#[derive(Debug)]
pub struct Editor {
    /// Document being edited
    pub document: PageDocument,
    state: EditState,
}

impl Editor {
    pub fn new(document: PageDocument) -> Self {
        Self {
            document,
            state: EditState::Idle,
        }
    }

    pub fn state(&self) -> &EditState {
        &self.state
    }

    /// The in-progress edit, if there is one.
    pub fn session(&self) -> Option<&EditSession> {
        match &self.state {
            EditState::Editing(session) => Some(session),
            _ => None,
        }
    }

    /// Selects a node. Selecting the node already under edit keeps the
    /// edit; selecting anything else discards it.
    pub fn select(&mut self, node_id: impl Into<String>) {
        let node_id = node_id.into();
        if let EditState::Editing(session) = &self.state {
            if session.target_node_id == node_id {
                return;
            }
            debug!(
                abandoned = %session.target_node_id,
                "selection moved, dropping open edit"
            );
        }
        self.state = EditState::Selected { node_id };
    }

    /// Opens an edit session on the selected node, prefilled from the
    /// source template. Returns false when nothing suitable is selected.
    pub fn begin_edit(&mut self) -> bool {
        let node_id = match &self.state {
            EditState::Selected { node_id } => node_id.clone(),
            EditState::Editing(session) => session.target_node_id.clone(),
            EditState::Idle => {
                warn!("begin_edit with no selection");
                return false;
            }
        };
        let node = match self.document.template().find_by_id(&node_id) {
            Some(node) => node,
            None => {
                warn!(node_id, "selected node is not in the template");
                return false;
            }
        };

        let mut fields = BTreeMap::new();
        for (name, value) in &node.props {
            if let PropValue::Text(text) = value {
                fields.insert(name.clone(), text.clone());
            }
        }
        if let Some(text) = node.text_content() {
            fields.insert("text".to_string(), text.to_string());
        }

        self.state = EditState::Editing(EditSession {
            target_node_id: node_id,
            fields,
            dirty: false,
        });
        true
    }

    /// Stages one field value. Returns false outside an edit session.
    pub fn set_field(&mut self, name: impl Into<String>, value: impl Into<String>) -> bool {
        match &mut self.state {
            EditState::Editing(session) => {
                session.fields.insert(name.into(), value.into());
                session.dirty = true;
                true
            }
            _ => false,
        }
    }

    /// Drops any open edit and clears the selection.
    pub fn cancel(&mut self) {
        if let EditState::Editing(session) = &self.state {
            debug!(target = %session.target_node_id, "edit cancelled");
        }
        self.state = EditState::Idle;
    }

    /// Applies the buffered fields to the document as one undoable
    /// replacement. Returns false when there is no edit to save or the
    /// target has vanished from the template.
    pub fn save(&mut self) -> bool {
        let session = match std::mem::replace(&mut self.state, EditState::Idle) {
            EditState::Editing(session) => session,
            other => {
                self.state = other;
                return false;
            }
        };

        let source = match self.document.template().find_by_id(&session.target_node_id) {
            Some(node) => node.clone(),
            None => {
                warn!(
                    node_id = %session.target_node_id,
                    "edit target vanished before save"
                );
                return false;
            }
        };

        let mut replacement = source;
        for (name, value) in session.fields {
            if name == "text" {
                replacement.children = Some(Children::Text(value));
            } else {
                replacement.props.insert(name, PropValue::Text(value));
            }
        }

        self.document
            .replace_node(&session.target_node_id, replacement)
    }
}
