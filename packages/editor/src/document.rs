//! # Document Handle
//!
//! One open page: the source template, the editing context, the derived
//! render, and the undo history that ties edits together.
//!
//! ## Lifecycle
//!
//! ```text
//! Load → Edit → Render → Save
//!   ↓      ↓       ↓       ↓
//! JSON  Template  Tree   JSON
//! ```
//!
//! The source template is the document of record. The rendered tree is a
//! cache derived from it plus the context, rebuilt after every mutation so
//! callers always see a view that matches the source.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};
use tracing::{debug, instrument, warn};

use pagecraft_evaluator::TreeProcessor;
use pagecraft_template::{Context, Node, Template};

use crate::errors::DocumentError;
use crate::history::History;
use crate::mutate;

/// An open page under edit.
#[derive(Debug, Clone)]
pub struct PageDocument {
    template: Template,
    context: Context,

    /// Current version number (increments on each mutation)
    pub version: u64,

    dirty: bool,
    processed: Option<Arc<Node>>,
    history: History,
}

impl PageDocument {
    pub fn new(template: Template, context: Context) -> Self {
        Self {
            template,
            context,
            version: 0,
            dirty: false,
            processed: None,
            history: History::new(),
        }
    }

    /// The source template, placeholders and gates intact.
    pub fn template(&self) -> &Template {
        &self.template
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_saved(&mut self) {
        self.dirty = false;
    }

    /// The rendered tree for the current template and context. Cached
    /// between mutations; a root that prunes itself renders as `None`.
    pub fn render(&mut self) -> Result<Option<Arc<Node>>, DocumentError> {
        if self.processed.is_none() {
            let processor = TreeProcessor::for_template(&self.template);
            self.processed = processor.process_template(&self.template, &self.context)?;
        }
        Ok(self.processed.clone())
    }

    /// Replaces the node with the given id in the source template. Returns
    /// false (and changes nothing) when the id is not present.
    #[instrument(skip(self, replacement), fields(version = self.version))]
    pub fn replace_node(&mut self, id: &str, replacement: Node) -> bool {
        let root = match &self.template.component {
            Some(root) => root,
            None => {
                warn!(id, "edit on a document without a root");
                return false;
            }
        };
        let new_root = match mutate::replace_by_id(root, id, &Arc::new(replacement)) {
            Some(new_root) => new_root,
            None => {
                warn!(id, "edit target not found, document unchanged");
                return false;
            }
        };

        self.history.record(self.template.clone());
        self.template.component = Some(new_root);
        self.version += 1;
        self.dirty = true;
        self.refresh();
        true
    }

    /// Swaps in a new context. Data changes are not undoable edits, so the
    /// version stays put; only the derived render moves.
    pub fn replace_context(&mut self, context: Context) {
        self.context = context;
        self.refresh();
    }

    /// Renders and reads back the strings of one generated array, e.g. the
    /// specialties list. An unrenderable document yields an empty list.
    pub fn sync_generated_array(&mut self, container_id: &str, item_prefix: &str) -> Vec<String> {
        match self.render() {
            Ok(Some(tree)) => mutate::extract_generated_array(&tree, container_id, item_prefix),
            Ok(None) => Vec::new(),
            Err(err) => {
                warn!(error = %err, "cannot sync array from an unrenderable document");
                Vec::new()
            }
        }
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn undo(&mut self) -> bool {
        let current = self.template.clone();
        match self.history.undo(current) {
            Some(previous) => {
                self.template = previous;
                self.version += 1;
                self.dirty = true;
                self.refresh();
                true
            }
            None => false,
        }
    }

    pub fn redo(&mut self) -> bool {
        let current = self.template.clone();
        match self.history.redo(current) {
            Some(next) => {
                self.template = next;
                self.version += 1;
                self.dirty = true;
                self.refresh();
                true
            }
            None => false,
        }
    }

    fn refresh(&mut self) {
        self.processed = None;
        let processor = TreeProcessor::for_template(&self.template);
        match processor.process_template(&self.template, &self.context) {
            Ok(tree) => self.processed = tree,
            Err(err) => {
                warn!(error = %err, "render failed after mutation");
            }
        }
    }

    /// Snapshot for persistence: the source template plus the data that
    /// belongs to the page. Form state and errors are session-local and
    /// stay out.
    pub fn to_saved(&self) -> SavedPage {
        SavedPage {
            template: self.template.clone(),
            content: self.context.content.clone(),
            images: self.context.images.clone(),
        }
    }

    pub fn to_json(&self) -> Result<String, DocumentError> {
        Ok(serde_json::to_string_pretty(&self.to_saved())?)
    }

    pub fn from_json(payload: &str) -> Result<Self, DocumentError> {
        let saved: SavedPage = serde_json::from_str(payload)?;
        debug!(name = %saved.template.metadata.name, "loaded page");
        let context = Context {
            content: saved.content,
            images: saved.images,
            ..Context::default()
        };
        Ok(Self::new(saved.template, context))
    }
}

/// Wire form of a page: what goes to storage and comes back.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedPage {
    pub template: Template,
    #[serde(default)]
    pub content: Map<String, JsonValue>,
    #[serde(default)]
    pub images: Vec<String>,
}
