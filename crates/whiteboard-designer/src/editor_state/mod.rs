//! Editor state manager for UI integration.
//!
//! [`EditorState`] bundles the document, the canvas state and the gesture
//! controller behind one API and publishes an [`EditorEvent`] for every
//! change. This module is split into submodules:
//! - `history`: Undo/redo
//! - `viewport`: Zoom, pan, grid controls
//! - `selection`: Selection and deletion
//! - `properties`: Text, color and connector style setters
//! - `file_io`: Loading, saving and switching diagrams

mod file_io;
mod history;
mod properties;
mod selection;
mod viewport;

use std::sync::Arc;

use whiteboard_core::{EditorEvent, EventBus, InteractionEvent, SelectionEvent, ViewEvent};
use whiteboard_settings::EditorConfig;

use crate::canvas_state::{CanvasState, EditMode};
use crate::document::Document;
use crate::interaction::{GestureController, GestureFeedback, PointerEvent};
use crate::model::{Connector, ConnectorId, Diagram, Endpoint, Point};
use crate::router::{ConnectorRouter, RoutedConnector};
use crate::selection_manager::Selection;

/// Editor state for UI integration
#[derive(Debug)]
pub struct EditorState {
    config: EditorConfig,
    document: Document,
    canvas: CanvasState,
    controller: GestureController,
    events: Arc<EventBus>,
    is_modified: bool,
}

impl EditorState {
    /// Creates an editor on an empty diagram with the default configuration.
    pub fn new() -> Self {
        Self::with_config(EditorConfig::default(), Arc::new(EventBus::new()))
    }

    /// Creates an editor on an empty diagram, publishing on `events`.
    ///
    /// An invalid configuration is logged; the viewport falls back to safe
    /// scale limits for it.
    pub fn with_config(config: EditorConfig, events: Arc<EventBus>) -> Self {
        if let Err(e) = config.validate() {
            tracing::warn!("Editor configuration is invalid: {}", e);
        }
        let mut diagram = Diagram::default();
        diagram.grid_size = config.grid.size;
        diagram.snap_to_grid = config.grid.snap_enabled;

        let document = Document::with_history_depth(diagram, config.history.max_depth)
            .with_event_bus(events.clone());
        Self {
            canvas: CanvasState::from_config(&config),
            controller: GestureController::from_config(&config),
            document,
            events,
            config,
            is_modified: false,
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn diagram(&self) -> &Diagram {
        self.document.diagram()
    }

    pub fn canvas(&self) -> &CanvasState {
        &self.canvas
    }

    pub fn events(&self) -> &Arc<EventBus> {
        &self.events
    }

    pub fn router(&self) -> &ConnectorRouter {
        self.controller.router()
    }

    /// True if the diagram changed since it was loaded or saved.
    pub fn is_modified(&self) -> bool {
        self.is_modified
    }

    pub fn mode(&self) -> EditMode {
        self.canvas.mode()
    }

    /// Switches the edit mode, dropping any pending connector.
    pub fn set_mode(&mut self, mode: EditMode) {
        let had_pending = self.canvas.pending_connector().is_some();
        let changed = self.canvas.set_mode(mode);
        if had_pending {
            self.publish(EditorEvent::Interaction(InteractionEvent::ConnectorCancelled));
        }
        if changed {
            self.publish(EditorEvent::Interaction(InteractionEvent::ModeChanged {
                mode: mode.to_string(),
            }));
        }
    }

    /// Drops the pending connector start, if any.
    pub fn cancel_connector(&mut self) -> bool {
        let cancelled = self.canvas.clear_pending_connector();
        if cancelled {
            self.publish(EditorEvent::Interaction(InteractionEvent::ConnectorCancelled));
        }
        cancelled
    }

    /// Feeds one pointer event through the gesture controller.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> Vec<GestureFeedback> {
        let revision = self.document.revision();
        let feedback = self
            .controller
            .handle_event(event, &mut self.document, &mut self.canvas);
        self.note_revision(revision);
        for item in &feedback {
            self.publish_feedback(item);
        }
        feedback
    }

    /// Abandons the gesture in progress without recording anything.
    pub fn abort_gesture(&mut self) -> bool {
        let aborted = self.controller.abort(&mut self.document, &mut self.canvas);
        if aborted {
            self.publish_transform();
            self.publish_selection(self.canvas.selection.current());
        }
        aborted
    }

    pub fn is_gesture_active(&self) -> bool {
        self.controller.is_active()
    }

    /// Screen-space routes of every connector whose endpoints resolve.
    pub fn routed_connectors(&self) -> Vec<(ConnectorId, RoutedConnector)> {
        let diagram = self.document.diagram();
        diagram
            .connectors
            .iter()
            .filter_map(|c| {
                self.router()
                    .route_connector(c, diagram, &self.canvas.viewport)
                    .map(|routed| (c.id, routed))
            })
            .collect()
    }

    /// Screen-space route of the connector currently being drawn.
    pub fn connector_preview(&self) -> Option<RoutedConnector> {
        let template = Connector::with_defaults(
            Endpoint::floating(Point::ZERO),
            Endpoint::floating(Point::ZERO),
            &self.config.connector_defaults,
        );
        self.canvas
            .connector_preview_route(self.document.diagram(), self.router(), &template)
    }

    /// True while a pointer gesture owns the document; edits from outside
    /// the gesture are refused until it ends.
    fn gesture_blocks(&self, operation: &str) -> bool {
        let active = self.controller.is_active();
        if active {
            tracing::debug!("{} ignored during a gesture", operation);
        }
        active
    }

    fn note_revision(&mut self, before: u64) {
        if self.document.revision() != before {
            self.is_modified = true;
        }
    }

    fn publish_feedback(&self, feedback: &GestureFeedback) {
        let event = match feedback {
            GestureFeedback::DragStarted(kind) => InteractionEvent::DragStarted {
                kind: kind.to_string(),
            },
            GestureFeedback::DragFinished { changed, .. } => {
                InteractionEvent::DragFinished { changed: *changed }
            }
            GestureFeedback::ConnectorPending { shape_id, anchor } => {
                InteractionEvent::ConnectorPending {
                    shape_id: shape_id.as_uuid(),
                    anchor: anchor.to_string(),
                }
            }
            GestureFeedback::ConnectorCancelled => InteractionEvent::ConnectorCancelled,
            GestureFeedback::SelfLoopRejected(shape_id) => InteractionEvent::SelfLoopRejected {
                shape_id: shape_id.as_uuid(),
            },
            GestureFeedback::ModeChanged(mode) => InteractionEvent::ModeChanged {
                mode: mode.to_string(),
            },
            GestureFeedback::ViewChanged => {
                self.publish_transform();
                return;
            }
            GestureFeedback::SelectionChanged(selection) => {
                self.publish_selection(*selection);
                return;
            }
            // Reported by the document itself.
            GestureFeedback::ShapeCreated(_) | GestureFeedback::ConnectorCreated(_) => return,
        };
        self.publish(EditorEvent::Interaction(event));
    }

    fn publish_transform(&self) {
        let viewport = &self.canvas.viewport;
        self.publish(EditorEvent::View(ViewEvent::TransformChanged {
            scale: viewport.scale(),
            offset_x: viewport.offset().x,
            offset_y: viewport.offset().y,
        }));
    }

    fn publish_grid(&self) {
        self.publish(EditorEvent::View(ViewEvent::GridChanged {
            show_grid: self.canvas.show_grid,
            snap_to_grid: self.canvas.grid.snap_enabled,
        }));
    }

    fn publish_selection(&self, selection: Selection) {
        let event = match selection {
            Selection::None => SelectionEvent::Cleared,
            Selection::Shape(id) => SelectionEvent::ShapeSelected {
                shape_id: id.as_uuid(),
            },
            Selection::Connector(id) => SelectionEvent::ConnectorSelected {
                connector_id: id.as_uuid(),
            },
        };
        self.publish(EditorEvent::Selection(event));
    }

    fn publish(&self, event: EditorEvent) {
        if let Err(e) = self.events.publish(event) {
            tracing::trace!("Event not delivered: {}", e);
        }
    }
}

impl Default for EditorState {
    fn default() -> Self {
        Self::new()
    }
}
