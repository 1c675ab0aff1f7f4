//! History Manager
//!
//! Linear undo/redo over whole-tree snapshots. Any new edit invalidates
//! the redo stack.

use crate::domain::Tab;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct History {
    undo: Vec<Vec<Tab>>,
    redo: Vec<Vec<Tab>>,
}

impl History {
    /// Snapshot the pre-mutation tree. Called before every structural
    /// commit; clears redo.
    pub fn record(&mut self, current: &[Tab]) {
        self.undo.push(current.to_vec());
        self.redo.clear();
    }

    /// Pop the most recent snapshot into `current`, moving the present
    /// tree onto the redo stack. Returns false on an empty stack.
    pub fn undo(&mut self, current: &mut Vec<Tab>) -> bool {
        match self.undo.pop() {
            Some(prev) => {
                self.redo.push(std::mem::replace(current, prev));
                true
            }
            None => false,
        }
    }

    /// Mirror of [`History::undo`] using the redo stack.
    pub fn redo(&mut self, current: &mut Vec<Tab>) -> bool {
        match self.redo.pop() {
            Some(next) => {
                self.undo.push(std::mem::replace(current, next));
                true
            }
            None => false,
        }
    }

    pub fn undo_available(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn redo_available(&self) -> bool {
        !self.redo.is_empty()
    }
}
