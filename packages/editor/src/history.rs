//! # Edit History
//!
//! Snapshot-based undo/redo over whole templates. Snapshots are cheap
//! because templates share their subtrees: each entry is a metadata clone
//! plus one `Arc` bump, so holding a hundred of them costs roughly a
//! hundred spines, not a hundred trees.

use pagecraft_template::Template;

const DEFAULT_MAX_LEVELS: usize = 100;

/// Undo/redo stacks for one document.
#[derive(Debug, Clone)]
pub struct History {
    undo_stack: Vec<Template>,
    redo_stack: Vec<Template>,
    max_levels: usize,
}

impl History {
    pub fn new() -> Self {
        Self::with_max_levels(DEFAULT_MAX_LEVELS)
    }

    /// 0 = unlimited.
    pub fn with_max_levels(max_levels: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_levels,
        }
    }

    /// Records the state as it was before a mutation. Any redo branch is
    /// abandoned: once the user edits after an undo, the undone future is
    /// unreachable.
    pub fn record(&mut self, before: Template) {
        if self.max_levels > 0 && self.undo_stack.len() >= self.max_levels {
            self.undo_stack.remove(0);
        }
        self.undo_stack.push(before);
        self.redo_stack.clear();
    }

    /// Steps back one snapshot, exchanging it for `current`.
    pub fn undo(&mut self, current: Template) -> Option<Template> {
        let previous = self.undo_stack.pop()?;
        self.redo_stack.push(current);
        Some(previous)
    }

    /// Steps forward again after an undo.
    pub fn redo(&mut self, current: Template) -> Option<Template> {
        let next = self.redo_stack.pop()?;
        self.undo_stack.push(current);
        Some(next)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn levels(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}
