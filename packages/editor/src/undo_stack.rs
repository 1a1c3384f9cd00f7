//! # Undo/Redo Stack
//!
//! Snapshot history for a project document.
//!
//! ## Design
//!
//! - Before a history-recording mutation, the whole prior document is pushed
//! - Undo swaps the current document with the newest snapshot and moves the
//!   replaced document onto the redo stack
//! - Redo is the mirror image
//! - New mutations clear the redo stack (no branching history)
//! - Both stacks keep at most `max_levels` entries, dropping the oldest
//! - Supports batches: several mutations recorded as one undo step
//!
//! Snapshots are owned documents. Moving them between the stacks and the
//! session never shares structure with the live document.
//!
//! ## Example
//!
//! ```rust,ignore
//! let mut stack = UndoStack::new();
//! let previous = doc.clone();
//! Mutation::AddPage { name: "About".into() }.apply(&mut doc)?;
//! stack.record(previous, Some("Add page"));
//!
//! stack.undo(&mut doc);
//! stack.redo(&mut doc);
//! ```

use pagecraft_model::ProjectDocument;
use std::collections::VecDeque;

/// Maximum number of undo (and redo) levels kept by an editing session
pub const MAX_HISTORY: usize = 40;

/// One history entry
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub document: ProjectDocument,

    /// Label of the mutation this entry undoes/redoes
    pub description: Option<String>,
}

#[derive(Debug)]
struct Batch {
    description: Option<String>,
    recorded: bool,
}

/// Undo/redo stack of document snapshots
#[derive(Debug)]
pub struct UndoStack {
    /// Snapshots to return to on undo (most recent last)
    undo_stack: VecDeque<Snapshot>,

    /// Snapshots to return to on redo (most recent last)
    redo_stack: VecDeque<Snapshot>,

    max_levels: usize,

    current_batch: Option<Batch>,
}

impl UndoStack {
    /// Create a new undo stack with the default limit ([`MAX_HISTORY`])
    pub fn new() -> Self {
        Self::with_max_levels(MAX_HISTORY)
    }

    pub fn with_max_levels(max_levels: usize) -> Self {
        Self {
            undo_stack: VecDeque::new(),
            redo_stack: VecDeque::new(),
            max_levels,
            current_batch: None,
        }
    }

    /// Record the document as it was before a history-recording mutation
    ///
    /// Clears the redo stack. Inside a batch only the first call records.
    pub fn record(&mut self, previous: ProjectDocument, description: Option<&str>) {
        let description = match &mut self.current_batch {
            Some(batch) if batch.recorded => return,
            Some(batch) => {
                batch.recorded = true;
                batch.description.clone().or(description.map(str::to_string))
            }
            None => description.map(str::to_string),
        };

        Self::push_bounded(
            &mut self.undo_stack,
            Snapshot {
                document: previous,
                description,
            },
            self.max_levels,
        );
        self.redo_stack.clear();
    }

    /// Start grouping subsequent records into a single undo step
    pub fn begin_batch(&mut self, description: Option<&str>) {
        self.current_batch = Some(Batch {
            description: description.map(str::to_string),
            recorded: false,
        });
    }

    pub fn end_batch(&mut self) {
        self.current_batch = None;
    }

    pub fn in_batch(&self) -> bool {
        self.current_batch.is_some()
    }

    fn push_bounded(stack: &mut VecDeque<Snapshot>, snapshot: Snapshot, max_levels: usize) {
        stack.push_back(snapshot);
        while stack.len() > max_levels {
            stack.pop_front();
        }
    }

    /// Step back one entry. Returns `false` (and changes nothing) if empty.
    pub fn undo(&mut self, current: &mut ProjectDocument) -> bool {
        let Some(snapshot) = self.undo_stack.pop_back() else {
            return false;
        };
        self.current_batch = None;

        let replaced = std::mem::replace(current, snapshot.document);
        Self::push_bounded(
            &mut self.redo_stack,
            Snapshot {
                document: replaced,
                description: snapshot.description,
            },
            self.max_levels,
        );
        true
    }

    /// Step forward one entry. Returns `false` (and changes nothing) if empty.
    pub fn redo(&mut self, current: &mut ProjectDocument) -> bool {
        let Some(snapshot) = self.redo_stack.pop_back() else {
            return false;
        };
        self.current_batch = None;

        let replaced = std::mem::replace(current, snapshot.document);
        Self::push_bounded(
            &mut self.undo_stack,
            Snapshot {
                document: replaced,
                description: snapshot.description,
            },
            self.max_levels,
        );
        true
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_levels(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_levels(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn max_levels(&self) -> usize {
        self.max_levels
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.current_batch = None;
    }

    /// Description of the step `undo` would revert
    pub fn undo_description(&self) -> Option<&str> {
        self.undo_stack
            .back()
            .and_then(|snapshot| snapshot.description.as_deref())
    }

    /// Description of the step `redo` would reapply
    pub fn redo_description(&self) -> Option<&str> {
        self.redo_stack
            .back()
            .and_then(|snapshot| snapshot.description.as_deref())
    }
}

impl Default for UndoStack {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(name: &str) -> ProjectDocument {
        let mut doc = ProjectDocument::new(name);
        doc.pages[0].id = "home".to_string();
        doc.current_page_id = Some("home".to_string());
        doc
    }

    #[test]
    fn test_undo_stack_creation() {
        let stack = UndoStack::new();
        assert_eq!(stack.undo_levels(), 0);
        assert_eq!(stack.redo_levels(), 0);
        assert_eq!(stack.max_levels(), MAX_HISTORY);
        assert!(!stack.can_undo());
        assert!(!stack.can_redo());
    }

    #[test]
    fn test_record_undo_redo() {
        let mut stack = UndoStack::new();
        let mut doc = named("v1");

        stack.record(doc.clone(), Some("Rename project"));
        doc.name = "v2".to_string();

        assert!(stack.undo(&mut doc));
        assert_eq!(doc.name, "v1");
        assert_eq!(stack.redo_levels(), 1);
        assert_eq!(stack.redo_description(), Some("Rename project"));

        assert!(stack.redo(&mut doc));
        assert_eq!(doc.name, "v2");
        assert_eq!(stack.undo_levels(), 1);
        assert_eq!(stack.redo_levels(), 0);
    }

    #[test]
    fn test_empty_stacks_are_noops() {
        let mut stack = UndoStack::new();
        let mut doc = named("v1");
        let before = doc.clone();

        assert!(!stack.undo(&mut doc));
        assert!(!stack.redo(&mut doc));
        assert_eq!(doc, before);
    }

    #[test]
    fn test_new_record_clears_redo() {
        let mut stack = UndoStack::new();
        let mut doc = named("v1");

        stack.record(doc.clone(), None);
        doc.name = "v2".to_string();
        stack.undo(&mut doc);
        assert_eq!(stack.redo_levels(), 1);

        stack.record(doc.clone(), None);
        doc.name = "v3".to_string();
        assert_eq!(stack.redo_levels(), 0);
        assert!(!stack.redo(&mut doc));
        assert_eq!(doc.name, "v3");
    }

    #[test]
    fn test_max_levels_enforced() {
        let mut stack = UndoStack::with_max_levels(2);
        let mut doc = named("v0");

        for i in 1..=3 {
            stack.record(doc.clone(), None);
            doc.name = format!("v{}", i);
        }

        assert_eq!(stack.undo_levels(), 2);
        stack.undo(&mut doc);
        stack.undo(&mut doc);
        assert_eq!(doc.name, "v1");
        assert!(!stack.undo(&mut doc));
    }

    #[test]
    fn test_batched_records() {
        let mut stack = UndoStack::new();
        let mut doc = named("v0");

        stack.begin_batch(Some("Drag color"));
        for i in 1..=5 {
            stack.record(doc.clone(), Some("Edit theme"));
            doc.name = format!("v{}", i);
        }
        stack.end_batch();

        assert_eq!(stack.undo_levels(), 1);
        assert_eq!(stack.undo_description(), Some("Drag color"));

        stack.undo(&mut doc);
        assert_eq!(doc.name, "v0");
    }
}
