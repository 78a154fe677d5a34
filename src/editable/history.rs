//! Edit history (undo/redo) for the tag editing buffer.

use super::buffer::TagBuffer;
use super::cursor::Position;

/// A single edit that can be undone/redone, stored as whole-buffer snapshots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditOperation {
    /// Buffer before the edit
    pub before: TagBuffer,
    /// Buffer after the edit
    pub after: TagBuffer,
    /// Caret position before the edit
    pub position_before: Option<Position>,
    /// Caret position after the edit
    pub position_after: Option<Position>,
}

impl EditOperation {
    pub fn new(
        before: TagBuffer,
        after: TagBuffer,
        position_before: Option<Position>,
        position_after: Option<Position>,
    ) -> Self {
        Self {
            before,
            after,
            position_before,
            position_after,
        }
    }

    /// Get the inverse operation for undo
    pub fn inverse(&self) -> Self {
        Self {
            before: self.after.clone(),
            after: self.before.clone(),
            position_before: self.position_after,
            position_after: self.position_before,
        }
    }
}

/// Edit history with undo/redo stacks.
#[derive(Debug, Clone, Default)]
pub struct EditHistory {
    undo_stack: Vec<EditOperation>,
    redo_stack: Vec<EditOperation>,
    max_size: usize,
}

impl EditHistory {
    /// Create a new edit history with default max size
    pub fn new() -> Self {
        Self::with_max_size(100)
    }

    /// Create a new edit history with specified max size
    pub fn with_max_size(max_size: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_size,
        }
    }

    /// Push an operation onto the undo stack (clears redo stack)
    pub fn push(&mut self, op: EditOperation) {
        self.redo_stack.clear();
        self.undo_stack.push(op);

        while self.undo_stack.len() > self.max_size {
            self.undo_stack.remove(0);
        }
    }

    /// Pop an operation from the undo stack (moves its inverse to the redo stack).
    /// Restore `op.before` to undo.
    pub fn pop_undo(&mut self) -> Option<EditOperation> {
        let op = self.undo_stack.pop()?;
        self.redo_stack.push(op.inverse());
        Some(op)
    }

    /// Pop an operation from the redo stack (moves its inverse to the undo stack).
    /// The returned operation is an inverse, so restoring `op.before` redoes.
    pub fn pop_redo(&mut self) -> Option<EditOperation> {
        let op = self.redo_stack.pop()?;
        self.undo_stack.push(op.inverse());
        Some(op)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    pub fn undo_count(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_count(&self) -> usize {
        self.redo_stack.len()
    }
}
