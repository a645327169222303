//! Property setters for editor state.
//!
//! Each setter is one undoable edit; setting a value a shape or connector
//! already has records nothing. Setters are refused while a gesture is in
//! progress.

use super::EditorState;
use crate::model::{ArrowHead, Color, ConnectorId, ConnectorStyle, ShapeId};

impl EditorState {
    pub fn set_shape_text(&mut self, id: ShapeId, text: impl Into<String>) -> bool {
        if self.gesture_blocks("Text edit") {
            return false;
        }
        let changed = self.document.update_shape_text(id, text);
        self.is_modified |= changed;
        changed
    }

    /// Set the fill and stroke colors of a shape.
    pub fn set_shape_colors(&mut self, id: ShapeId, fill: Color, stroke: Color) -> bool {
        if self.gesture_blocks("Color edit") {
            return false;
        }
        let changed = self
            .document
            .update_shape_colors(id, Some(fill), Some(stroke), None);
        self.is_modified |= changed;
        changed
    }

    pub fn set_shape_text_color(&mut self, id: ShapeId, color: Color) -> bool {
        if self.gesture_blocks("Text color edit") {
            return false;
        }
        let changed = self.document.update_shape_colors(id, None, None, Some(color));
        self.is_modified |= changed;
        changed
    }

    pub fn set_connector_style(&mut self, id: ConnectorId, style: ConnectorStyle) -> bool {
        if self.gesture_blocks("Connector style edit") {
            return false;
        }
        let changed = self.document.update_connector_style(id, style);
        self.is_modified |= changed;
        changed
    }

    pub fn set_connector_arrow_head(&mut self, id: ConnectorId, arrow_head: ArrowHead) -> bool {
        if self.gesture_blocks("Arrow edit") {
            return false;
        }
        let changed = self.document.update_connector_arrow_head(id, arrow_head);
        self.is_modified |= changed;
        changed
    }

    /// Rename the diagram. Not undoable.
    pub fn rename(&mut self, name: impl Into<String>) -> bool {
        let changed = self.document.rename(name);
        self.is_modified |= changed;
        changed
    }
}
