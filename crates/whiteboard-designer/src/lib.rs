//! # Whiteboard Designer
//!
//! The editing engine behind the whiteboard: a diagram of shapes and
//! connectors, a pannable and zoomable view of it, pointer gestures that
//! move, resize and connect shapes, and undo/redo over every edit.
//!
//! ## Core Components
//!
//! ### Model
//! - **Shapes**: Rectangles, rounded rectangles, ellipses, diamonds and parallelograms
//! - **Connectors**: Straight, orthogonal or curved links between shape anchors
//! - **Diagrams**: Ordered shapes and connectors plus grid metadata
//!
//! ### Editing
//! - **Viewport**: Screen/canvas transform with clamped zoom about a pivot
//! - **Grid**: Snapping of positions and sizes to grid lines
//! - **Router**: Connector paths, arrowheads and hit-testing
//! - **Gestures**: Tap, drag, resize, pan and pinch recognition
//! - **History/Undo-Redo**: Reversible edit actions with bounded depth
//!
//! ### Persistence
//! - **Serialization**: Versioned JSON diagram files
//! - **Stores**: In-memory and directory-backed diagram stores
//!
//! ## Architecture
//!
//! ```text
//! EditorState (UI facade, publishes EditorEvents)
//!   ├── Document (Diagram + UndoRedoManager)
//!   ├── CanvasState (Viewport, Grid, SelectionManager, EditMode)
//!   └── GestureController (PointerEvent -> edits)
//!         └── ConnectorRouter
//!
//! DiagramStore (MemoryStore, JsonFileStore)
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use whiteboard_designer::{EditMode, EditorState, PointerEvent, Point, ShapeKind};
//!
//! let mut editor = EditorState::new();
//! editor.set_mode(EditMode::AddShape(ShapeKind::Rectangle));
//!
//! editor.handle_pointer(PointerEvent::down(1, Point::new(105.0, 47.0)));
//! editor.handle_pointer(PointerEvent::up(1, Point::new(105.0, 47.0)));
//!
//! let shape = &editor.diagram().shapes[0];
//! assert_eq!(shape.position, Point::new(100.0, 40.0));
//! assert_eq!(editor.mode(), EditMode::Select);
//! assert!(editor.undo());
//! assert!(editor.diagram().shapes.is_empty());
//! ```

pub mod canvas_state;
pub mod commands;
pub mod document;
pub mod editor_state;
pub mod geometry;
pub mod history;
pub mod interaction;
pub mod model;
pub mod router;
pub mod selection_manager;
pub mod serialization;
pub mod store;
pub mod viewport;

pub use canvas_state::{CanvasState, EditMode};
pub use commands::EditAction;
pub use document::Document;
pub use editor_state::EditorState;
pub use geometry::{distance_to_polyline, distance_to_segment};
pub use history::UndoRedoManager;
pub use interaction::{
    resize_shape, DragKind, GestureController, GestureFeedback, PointerEvent, PointerPhase,
};
pub use model::{
    AnchorPoint, ArrowHead, Color, Connector, ConnectorId, ConnectorStyle, Diagram, DiagramId,
    Endpoint, Point, Rect, ResizeHandle, Shape, ShapeId, ShapeKind,
};
pub use router::{Arrowhead, ConnectorPath, ConnectorRouter, RoutedConnector};
pub use selection_manager::{Selection, SelectionManager};
pub use serialization::{DiagramFile, FILE_EXTENSION, FILE_FORMAT_VERSION};
pub use store::{DiagramStore, JsonFileStore, MemoryStore};
pub use viewport::{Grid, Viewport};
