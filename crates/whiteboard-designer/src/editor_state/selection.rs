//! Selection operations for editor state.

use super::EditorState;
use crate::model::{ConnectorId, ShapeId};
use crate::selection_manager::Selection;

impl EditorState {
    pub fn selection(&self) -> Selection {
        self.canvas.selection.current()
    }

    /// Select a shape by id. Unknown ids are ignored.
    pub fn select_shape(&mut self, id: ShapeId) -> bool {
        if self.document.diagram().shape(id).is_none() {
            return false;
        }
        let changed = self.canvas.selection.select_shape(id);
        if changed {
            self.publish_selection(self.selection());
        }
        changed
    }

    /// Select a connector by id. Unknown ids are ignored.
    pub fn select_connector(&mut self, id: ConnectorId) -> bool {
        if self.document.diagram().connector(id).is_none() {
            return false;
        }
        let changed = self.canvas.selection.select_connector(id);
        if changed {
            self.publish_selection(self.selection());
        }
        changed
    }

    pub fn clear_selection(&mut self) -> bool {
        let changed = self.canvas.selection.clear();
        if changed {
            self.publish_selection(Selection::None);
        }
        changed
    }

    /// Delete the selected shape (with its connectors) or connector.
    ///
    /// Refused while a gesture is in progress.
    pub fn delete_selected(&mut self) -> bool {
        if self.gesture_blocks("Delete") {
            return false;
        }
        let deleted = match self.selection() {
            Selection::None => return false,
            Selection::Shape(id) => self.document.remove_shape(id),
            Selection::Connector(id) => self.document.remove_connector(id),
        };
        if deleted {
            self.is_modified = true;
        }
        self.clear_selection();
        deleted
    }
}
