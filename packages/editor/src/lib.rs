//! # Pagecraft Editor
//!
//! Document editing engine for pagecraft pages.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ template: JSON → persistent node tree       │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: Document lifecycle + mutations      │
//! │  - Load/save page payloads                  │
//! │  - Id-addressed node replacement            │
//! │  - Snapshot undo/redo                       │
//! │  - Select → edit → save session cycle       │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ evaluator: template + context → render tree │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **The template is the source of truth**: the rendered tree is a
//!    derived view, rebuilt after every mutation
//! 2. **Persistent trees**: mutations rebuild a spine and share the rest,
//!    so snapshots and undo are cheap
//! 3. **Structural editing**: node-level replacement by id, not text-level
//!    patching
//! 4. **Lossy-safe failure**: a missed edit target is a logged no-op,
//!    never a corrupted document
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pagecraft_editor::{Editor, PageDocument};
//!
//! // Load a saved page
//! let doc = PageDocument::from_json(&payload)?;
//! let mut editor = Editor::new(doc);
//!
//! // Click a node, type into it, commit
//! editor.select("title");
//! editor.begin_edit();
//! editor.set_field("text", "Hello!");
//! editor.save();
//!
//! // Render the result
//! let tree = editor.document.render()?;
//! ```

mod document;
mod errors;
mod history;
mod mutate;
mod session;

pub use document::{PageDocument, SavedPage};
pub use errors::DocumentError;
pub use history::History;
pub use mutate::{extract_generated_array, replace_by_id, replace_node};
pub use session::{EditSession, EditState, Editor};
