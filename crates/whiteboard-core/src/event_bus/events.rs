//! Event type definitions for the event bus.
//!
//! This module defines all editor events organized by category.
//! Events are designed to be cloneable and serializable for logging/replay.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Root event enum for all editor events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EditorEvent {
    /// Diagram content changes
    Document(DocumentEvent),
    /// Selection changes
    Selection(SelectionEvent),
    /// Pan, zoom and grid changes
    View(ViewEvent),
    /// Edit mode and gesture progress
    Interaction(InteractionEvent),
    /// Undo/redo log changes
    History(HistoryEvent),
    /// Persistence results
    Storage(StorageEvent),
}

impl EditorEvent {
    /// Get the category of this event
    pub fn category(&self) -> EventCategory {
        match self {
            EditorEvent::Document(_) => EventCategory::Document,
            EditorEvent::Selection(_) => EventCategory::Selection,
            EditorEvent::View(_) => EventCategory::View,
            EditorEvent::Interaction(_) => EventCategory::Interaction,
            EditorEvent::History(_) => EventCategory::History,
            EditorEvent::Storage(_) => EventCategory::Storage,
        }
    }

    /// Get a short description of this event for logging
    pub fn description(&self) -> String {
        match self {
            EditorEvent::Document(e) => e.description(),
            EditorEvent::Selection(e) => e.description(),
            EditorEvent::View(e) => e.description(),
            EditorEvent::Interaction(e) => e.description(),
            EditorEvent::History(e) => e.description(),
            EditorEvent::Storage(e) => e.description(),
        }
    }
}

/// Event category for filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventCategory {
    /// Diagram content events.
    Document,
    /// Selection events.
    Selection,
    /// View transform events.
    View,
    /// Mode and gesture events.
    Interaction,
    /// Undo/redo events.
    History,
    /// Persistence events.
    Storage,
}

impl std::fmt::Display for EventCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventCategory::Document => write!(f, "Document"),
            EventCategory::Selection => write!(f, "Selection"),
            EventCategory::View => write!(f, "View"),
            EventCategory::Interaction => write!(f, "Interaction"),
            EventCategory::History => write!(f, "History"),
            EventCategory::Storage => write!(f, "Storage"),
        }
    }
}

/// Diagram content events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DocumentEvent {
    /// A shape was added.
    ShapeAdded {
        /// Identifier of the new shape.
        shape_id: Uuid,
    },
    /// A shape was removed together with its attached connectors.
    ShapeRemoved {
        /// Identifier of the removed shape.
        shape_id: Uuid,
        /// Number of connectors removed with it.
        connectors_removed: usize,
    },
    /// A shape's geometry or style changed.
    ShapeModified {
        /// Identifier of the modified shape.
        shape_id: Uuid,
    },
    /// A connector was added.
    ConnectorAdded {
        /// Identifier of the new connector.
        connector_id: Uuid,
    },
    /// A connector was removed.
    ConnectorRemoved {
        /// Identifier of the removed connector.
        connector_id: Uuid,
    },
    /// A connector's endpoints or style changed.
    ConnectorModified {
        /// Identifier of the modified connector.
        connector_id: Uuid,
    },
    /// The diagram was renamed.
    Renamed {
        /// New display name.
        name: String,
    },
    /// The whole diagram was replaced (load, switch, undo or redo).
    Replaced {
        /// Identifier of the diagram now being edited.
        diagram_id: Uuid,
    },
}

impl DocumentEvent {
    fn description(&self) -> String {
        match self {
            DocumentEvent::ShapeAdded { shape_id } => format!("Shape added: {}", shape_id),
            DocumentEvent::ShapeRemoved {
                shape_id,
                connectors_removed,
            } => format!(
                "Shape removed: {} ({} connectors)",
                shape_id, connectors_removed
            ),
            DocumentEvent::ShapeModified { shape_id } => format!("Shape modified: {}", shape_id),
            DocumentEvent::ConnectorAdded { connector_id } => {
                format!("Connector added: {}", connector_id)
            }
            DocumentEvent::ConnectorRemoved { connector_id } => {
                format!("Connector removed: {}", connector_id)
            }
            DocumentEvent::ConnectorModified { connector_id } => {
                format!("Connector modified: {}", connector_id)
            }
            DocumentEvent::Renamed { name } => format!("Diagram renamed to '{}'", name),
            DocumentEvent::Replaced { diagram_id } => format!("Diagram replaced: {}", diagram_id),
        }
    }
}

/// Selection events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SelectionEvent {
    /// A shape became the selection.
    ShapeSelected {
        /// Identifier of the selected shape.
        shape_id: Uuid,
    },
    /// A connector became the selection.
    ConnectorSelected {
        /// Identifier of the selected connector.
        connector_id: Uuid,
    },
    /// Nothing is selected.
    Cleared,
}

impl SelectionEvent {
    fn description(&self) -> String {
        match self {
            SelectionEvent::ShapeSelected { shape_id } => format!("Selected shape {}", shape_id),
            SelectionEvent::ConnectorSelected { connector_id } => {
                format!("Selected connector {}", connector_id)
            }
            SelectionEvent::Cleared => "Selection cleared".to_string(),
        }
    }
}

/// View transform events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ViewEvent {
    /// Scale and offset changed.
    TransformChanged {
        /// Current scale.
        scale: f64,
        /// Horizontal screen offset.
        offset_x: f64,
        /// Vertical screen offset.
        offset_y: f64,
    },
    /// Grid display or snapping changed.
    GridChanged {
        /// Whether the grid is drawn.
        show_grid: bool,
        /// Whether edits snap to the grid.
        snap_to_grid: bool,
    },
}

impl ViewEvent {
    fn description(&self) -> String {
        match self {
            ViewEvent::TransformChanged {
                scale,
                offset_x,
                offset_y,
            } => format!(
                "View: {:.2}x at ({:.1}, {:.1})",
                scale, offset_x, offset_y
            ),
            ViewEvent::GridChanged {
                show_grid,
                snap_to_grid,
            } => format!("Grid: show={} snap={}", show_grid, snap_to_grid),
        }
    }
}

/// Edit mode and gesture events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InteractionEvent {
    /// The active edit mode changed.
    ModeChanged {
        /// Name of the new mode.
        mode: String,
    },
    /// A connector was started from a shape and awaits its end.
    ConnectorPending {
        /// Shape the connector starts from.
        shape_id: Uuid,
        /// Name of the start anchor.
        anchor: String,
    },
    /// A pending connector was dropped without being created.
    ConnectorCancelled,
    /// A connector was refused because both ends were on the same shape.
    SelfLoopRejected {
        /// Shape that was tapped twice.
        shape_id: Uuid,
    },
    /// A drag gesture committed to an interpretation.
    DragStarted {
        /// Name of the drag kind (move, resize, pan, connector preview).
        kind: String,
    },
    /// A drag gesture finished.
    DragFinished {
        /// Whether the document was changed by the drag.
        changed: bool,
    },
}

impl InteractionEvent {
    fn description(&self) -> String {
        match self {
            InteractionEvent::ModeChanged { mode } => format!("Mode: {}", mode),
            InteractionEvent::ConnectorPending { shape_id, anchor } => {
                format!("Connector pending from {} ({})", shape_id, anchor)
            }
            InteractionEvent::ConnectorCancelled => "Connector cancelled".to_string(),
            InteractionEvent::SelfLoopRejected { shape_id } => {
                format!("Self-loop rejected on {}", shape_id)
            }
            InteractionEvent::DragStarted { kind } => format!("Drag started: {}", kind),
            InteractionEvent::DragFinished { changed } => {
                format!("Drag finished (changed: {})", changed)
            }
        }
    }
}

/// Undo/redo events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum HistoryEvent {
    /// An action was recorded.
    Recorded {
        /// Label of the recorded action.
        label: String,
        /// Undo stack depth after recording.
        undo_depth: usize,
    },
    /// An action was undone.
    Undone {
        /// Label of the undone action.
        label: String,
    },
    /// An action was redone.
    Redone {
        /// Label of the redone action.
        label: String,
    },
    /// History was discarded.
    Cleared,
}

impl HistoryEvent {
    fn description(&self) -> String {
        match self {
            HistoryEvent::Recorded { label, undo_depth } => {
                format!("Recorded '{}' (depth {})", label, undo_depth)
            }
            HistoryEvent::Undone { label } => format!("Undo '{}'", label),
            HistoryEvent::Redone { label } => format!("Redo '{}'", label),
            HistoryEvent::Cleared => "History cleared".to_string(),
        }
    }
}

/// Persistence events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StorageEvent {
    /// A diagram was loaded into the editor.
    Loaded {
        /// Identifier of the loaded diagram.
        diagram_id: Uuid,
    },
    /// A diagram was saved.
    Saved {
        /// Identifier of the saved diagram.
        diagram_id: Uuid,
    },
    /// A diagram was deleted from storage.
    Deleted {
        /// Identifier of the deleted diagram.
        diagram_id: Uuid,
    },
    /// A storage operation failed.
    Failed {
        /// Failure description.
        reason: String,
    },
}

impl StorageEvent {
    fn description(&self) -> String {
        match self {
            StorageEvent::Loaded { diagram_id } => format!("Loaded diagram {}", diagram_id),
            StorageEvent::Saved { diagram_id } => format!("Saved diagram {}", diagram_id),
            StorageEvent::Deleted { diagram_id } => format!("Deleted diagram {}", diagram_id),
            StorageEvent::Failed { reason } => format!("Storage failure: {}", reason),
        }
    }
}
