//! Undo/redo operations for editor state.

use super::EditorState;

impl EditorState {
    /// Undo the last edit.
    pub fn undo(&mut self) -> bool {
        if self.gesture_blocks("Undo") {
            return false;
        }
        if !self.document.undo() {
            return false;
        }
        self.is_modified = true;
        self.after_history_step();
        true
    }

    /// Redo the last undone edit.
    pub fn redo(&mut self) -> bool {
        if self.gesture_blocks("Redo") {
            return false;
        }
        if !self.document.redo() {
            return false;
        }
        self.is_modified = true;
        self.after_history_step();
        true
    }

    pub fn can_undo(&self) -> bool {
        self.document.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.document.can_redo()
    }

    /// Clear undo/redo history.
    pub fn clear_history(&mut self) {
        self.document.clear_history();
    }

    /// Drops selection and pending connector state that refer to entities
    /// an undo or redo removed.
    fn after_history_step(&mut self) {
        if self.canvas.selection.prune(self.document.diagram()) {
            self.publish_selection(self.canvas.selection.current());
        }
        if let Some((shape_id, _)) = self.canvas.pending_connector() {
            if self.document.diagram().shape(shape_id).is_none() {
                self.cancel_connector();
            }
        }
    }
}
