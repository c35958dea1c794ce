//! Undo/redo history.

use super::ops::EditorOp;
use crate::Move;

/// An inverse command, with the cursor path it was recorded at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    /// Cursor path before the command ran; replayed before the inverse runs.
    pub initial_moves: Vec<Move>,
    pub op: EditorOp,
}

/// Where a command being performed came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpSource {
    /// A user action. Clears the redo stack.
    Fresh,
    /// Popped from the undo stack; its inverse goes to redo.
    Undo,
    /// Popped from the redo stack; its inverse goes back to undo.
    Redo,
}

/// Manages undo/redo stacks. Neither stack is bounded.
#[derive(Debug, Clone, Default)]
pub struct History {
    undo_stack: Vec<HistoryEntry>,
    redo_stack: Vec<HistoryEntry>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the inverse of a performed command.
    pub fn record(&mut self, entry: HistoryEntry, source: OpSource) {
        match source {
            OpSource::Fresh => {
                self.undo_stack.push(entry);
                self.redo_stack.clear();
            }
            OpSource::Undo => self.redo_stack.push(entry),
            OpSource::Redo => self.undo_stack.push(entry),
        }
    }

    pub fn pop_undo(&mut self) -> Option<HistoryEntry> {
        self.undo_stack.pop()
    }

    pub fn pop_redo(&mut self) -> Option<HistoryEntry> {
        self.redo_stack.pop()
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }

    /// Clears all history.
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(comment: &str) -> HistoryEntry {
        HistoryEntry {
            initial_moves: Vec::new(),
            op: EditorOp::SetComment {
                comment: Some(comment.to_string()),
            },
        }
    }

    #[test]
    fn fresh_command_clears_redo() {
        let mut history = History::new();
        history.record(entry("a"), OpSource::Fresh);
        let undone = history.pop_undo().unwrap();
        history.record(undone, OpSource::Undo);
        assert!(history.can_redo());

        history.record(entry("b"), OpSource::Fresh);
        assert!(!history.can_redo());
        assert_eq!(history.undo_len(), 1);
    }

    #[test]
    fn redo_returns_to_undo_stack() {
        let mut history = History::new();
        history.record(entry("a"), OpSource::Fresh);
        let undone = history.pop_undo().unwrap();
        history.record(undone, OpSource::Undo);
        let redone = history.pop_redo().unwrap();
        history.record(redone, OpSource::Redo);
        assert_eq!(history.undo_len(), 1);
        assert_eq!(history.redo_len(), 0);
    }
}
