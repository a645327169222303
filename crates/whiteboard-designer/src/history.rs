//! Bounded undo/redo log of [`EditAction`]s.

use std::collections::VecDeque;

use whiteboard_core::constants::MAX_HISTORY_DEPTH;

use crate::commands::EditAction;
use crate::model::Diagram;

/// Manages undo/redo stacks for diagram edits.
///
/// Recording a new action clears the redo stack. When the undo stack grows
/// past `max_depth` the oldest entry is evicted and can no longer be undone.
#[derive(Debug, Clone)]
pub struct UndoRedoManager {
    undo_stack: VecDeque<EditAction>,
    redo_stack: Vec<EditAction>,
    max_depth: usize,
}

impl UndoRedoManager {
    /// Create a new manager with the default depth (50)
    pub fn new() -> Self {
        Self::with_depth(MAX_HISTORY_DEPTH)
    }

    /// Create with a custom maximum undo depth (at least 1)
    pub fn with_depth(max_depth: usize) -> Self {
        let max_depth = max_depth.max(1);
        Self {
            undo_stack: VecDeque::with_capacity(max_depth),
            redo_stack: Vec::new(),
            max_depth,
        }
    }

    /// Record an action that has already been applied
    pub fn record(&mut self, action: EditAction) {
        self.redo_stack.clear();
        self.undo_stack.push_back(action);

        while self.undo_stack.len() > self.max_depth {
            if let Some(evicted) = self.undo_stack.pop_front() {
                tracing::debug!("History full, dropping oldest '{}'", evicted.label());
            }
        }
    }

    /// Revert the most recent action against `diagram`
    ///
    /// Returns the undone action, or `None` if there is nothing to undo.
    pub fn undo(&mut self, diagram: &mut Diagram) -> Option<&EditAction> {
        let action = self.undo_stack.pop_back()?;
        action.revert(diagram);
        self.redo_stack.push(action);
        self.redo_stack.last()
    }

    /// Re-apply the most recently undone action against `diagram`
    pub fn redo(&mut self, diagram: &mut Diagram) -> Option<&EditAction> {
        let action = self.redo_stack.pop()?;
        action.apply(diagram);
        self.undo_stack.push_back(action);
        self.undo_stack.back()
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Label of the action the next undo would revert
    pub fn undo_label(&self) -> Option<&str> {
        self.undo_stack.back().map(EditAction::label)
    }

    /// Label of the action the next redo would apply
    pub fn redo_label(&self) -> Option<&str> {
        self.redo_stack.last().map(EditAction::label)
    }

    /// Clear all undo/redo history
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}

impl Default for UndoRedoManager {
    fn default() -> Self {
        Self::new()
    }
}
