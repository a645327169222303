//! The editable diagram document.
//!
//! [`Document`] owns the current [`Diagram`] and its [`UndoRedoManager`].
//! It is the only place a diagram is mutated: every structural change is
//! expressed as an [`EditAction`], applied forward and recorded, so the
//! whole editing session can be walked back and forth. Operations on
//! unknown ids or that would not change anything are no-ops and return
//! `false`.

use std::sync::Arc;

use whiteboard_core::{DocumentEvent, EditorEvent, EventBus, HistoryEvent};

use crate::commands::EditAction;
use crate::history::UndoRedoManager;
use crate::model::{
    ArrowHead, Color, Connector, ConnectorId, ConnectorStyle, Diagram, Shape, ShapeId,
};

/// A diagram under edit plus its undo/redo log.
#[derive(Debug)]
pub struct Document {
    diagram: Diagram,
    history: UndoRedoManager,
    events: Option<Arc<EventBus>>,
    revision: u64,
}

impl Document {
    pub fn new(diagram: Diagram) -> Self {
        Self {
            diagram,
            history: UndoRedoManager::new(),
            events: None,
            revision: 0,
        }
    }

    /// Creates a document whose history keeps at most `max_depth` actions.
    pub fn with_history_depth(diagram: Diagram, max_depth: usize) -> Self {
        Self {
            diagram,
            history: UndoRedoManager::with_depth(max_depth),
            events: None,
            revision: 0,
        }
    }

    /// Publishes document and history events on `bus`.
    pub fn with_event_bus(mut self, bus: Arc<EventBus>) -> Self {
        self.events = Some(bus);
        self
    }

    pub fn diagram(&self) -> &Diagram {
        &self.diagram
    }

    /// Owned copy of the current diagram.
    pub fn snapshot(&self) -> Diagram {
        self.diagram.clone()
    }

    pub fn history(&self) -> &UndoRedoManager {
        &self.history
    }

    /// Counter bumped by every committed change, undo, redo and rename.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Applies `action` forward and records it, clearing the redo stack.
    pub fn apply(&mut self, action: EditAction) {
        action.apply(&mut self.diagram);
        self.record(action);
    }

    /// Records an action whose effect is already present in the diagram.
    fn record(&mut self, action: EditAction) {
        tracing::debug!("Recording '{}' ({} edits)", action.label(), action.len());
        let events = document_events(&action);
        let label = action.label().to_string();
        self.history.record(action);
        self.revision += 1;

        for event in events {
            self.publish(EditorEvent::Document(event));
        }
        self.publish(EditorEvent::History(HistoryEvent::Recorded {
            label,
            undo_depth: self.history.undo_depth(),
        }));
    }

    /// Appends a shape to the diagram.
    ///
    /// Rejected if a shape with the same id exists or the geometry is
    /// degenerate.
    pub fn add_shape(&mut self, shape: Shape) -> bool {
        if self.diagram.shape(shape.id).is_some() {
            tracing::warn!("Shape {} already exists", shape.id);
            return false;
        }
        if !is_valid_shape(&shape) {
            tracing::warn!("Rejected shape {} with degenerate geometry", shape.id);
            return false;
        }
        let index = self.diagram.shapes.len();
        self.apply(EditAction::AddShape { shape, index });
        true
    }

    /// Removes a shape and every connector attached to it as one undoable
    /// step.
    pub fn remove_shape(&mut self, id: ShapeId) -> bool {
        let Some(index) = self.diagram.shape_index(id) else {
            return false;
        };
        let shape = self.diagram.shapes[index].clone();

        let mut attached: Vec<(usize, Connector)> = self
            .diagram
            .connectors
            .iter()
            .enumerate()
            .filter(|(_, c)| c.references(id))
            .map(|(i, c)| (i, c.clone()))
            .collect();

        if attached.is_empty() {
            self.apply(EditAction::RemoveShape { shape, index });
            return true;
        }

        // Highest index first: each recorded index stays valid on revert.
        attached.sort_by(|a, b| b.0.cmp(&a.0));
        let mut actions: Vec<EditAction> = attached
            .into_iter()
            .map(|(index, connector)| EditAction::RemoveConnector { connector, index })
            .collect();
        actions.push(EditAction::RemoveShape { shape, index });

        self.apply(EditAction::Batch {
            label: "Delete Shape".to_string(),
            actions,
        });
        true
    }

    /// Replaces the shape with the same id as `shape`.
    pub fn modify_shape(&mut self, shape: Shape) -> bool {
        let Some(old) = self.diagram.shape(shape.id) else {
            return false;
        };
        if *old == shape {
            return false;
        }
        if !is_valid_shape(&shape) {
            tracing::warn!("Rejected edit of shape {} with degenerate geometry", shape.id);
            return false;
        }
        let old = old.clone();
        self.apply(EditAction::ModifyShape { old, new: shape });
        true
    }

    /// Edits a copy of a shape with `edit` and commits it if it changed.
    pub fn update_shape<F>(&mut self, id: ShapeId, edit: F) -> bool
    where
        F: FnOnce(&mut Shape),
    {
        let Some(mut shape) = self.diagram.shape(id).cloned() else {
            return false;
        };
        edit(&mut shape);
        shape.id = id;
        self.modify_shape(shape)
    }

    pub fn update_shape_text(&mut self, id: ShapeId, text: impl Into<String>) -> bool {
        let text = text.into();
        self.update_shape(id, |shape| shape.text = text)
    }

    /// Sets any of the fill, stroke and text colors.
    pub fn update_shape_colors(
        &mut self,
        id: ShapeId,
        fill: Option<Color>,
        stroke: Option<Color>,
        text: Option<Color>,
    ) -> bool {
        self.update_shape(id, |shape| {
            if let Some(fill) = fill {
                shape.fill_color = fill;
            }
            if let Some(stroke) = stroke {
                shape.stroke_color = stroke;
            }
            if let Some(text) = text {
                shape.text_color = text;
            }
        })
    }

    /// Replaces a shape in place without recording history.
    ///
    /// Used while a gesture is in flight; the gesture finishes with
    /// [`Document::commit_shape_change`].
    pub fn preview_shape(&mut self, shape: Shape) -> bool {
        match self.diagram.shape_mut(shape.id) {
            Some(existing) => {
                *existing = shape;
                true
            }
            None => false,
        }
    }

    /// Records the difference between `before` and the current state of the
    /// same shape as one edit. Nothing is recorded if they are equal.
    pub fn commit_shape_change(&mut self, before: Shape) -> bool {
        let Some(current) = self.diagram.shape(before.id) else {
            return false;
        };
        if *current == before {
            return false;
        }
        let new = current.clone();
        self.record(EditAction::ModifyShape { old: before, new });
        true
    }

    /// Appends a connector.
    ///
    /// Rejected if an attached endpoint references a missing shape, both
    /// ends attach to the same shape, or the id is already in use.
    pub fn add_connector(&mut self, connector: Connector) -> bool {
        if self.diagram.connector(connector.id).is_some() {
            tracing::warn!("Connector {} already exists", connector.id);
            return false;
        }
        if !self.endpoints_resolve(&connector) {
            tracing::warn!("Rejected connector {} with a dangling endpoint", connector.id);
            return false;
        }
        if connector.is_self_loop() {
            tracing::warn!("Rejected self-loop connector {}", connector.id);
            return false;
        }
        let index = self.diagram.connectors.len();
        self.apply(EditAction::AddConnector { connector, index });
        true
    }

    pub fn remove_connector(&mut self, id: ConnectorId) -> bool {
        let Some(index) = self.diagram.connector_index(id) else {
            return false;
        };
        let connector = self.diagram.connectors[index].clone();
        self.apply(EditAction::RemoveConnector { connector, index });
        true
    }

    /// Replaces the connector with the same id as `connector`. The same
    /// endpoint rules as [`Document::add_connector`] apply.
    pub fn modify_connector(&mut self, connector: Connector) -> bool {
        let Some(old) = self.diagram.connector(connector.id) else {
            return false;
        };
        if *old == connector {
            return false;
        }
        if !self.endpoints_resolve(&connector) || connector.is_self_loop() {
            tracing::warn!("Rejected edit of connector {}", connector.id);
            return false;
        }
        let old = old.clone();
        self.apply(EditAction::ModifyConnector {
            old,
            new: connector,
        });
        true
    }

    pub fn update_connector_style(&mut self, id: ConnectorId, style: ConnectorStyle) -> bool {
        let Some(mut connector) = self.diagram.connector(id).cloned() else {
            return false;
        };
        connector.style = style;
        self.modify_connector(connector)
    }

    pub fn update_connector_arrow_head(&mut self, id: ConnectorId, arrow_head: ArrowHead) -> bool {
        let Some(mut connector) = self.diagram.connector(id).cloned() else {
            return false;
        };
        connector.arrow_head = arrow_head;
        self.modify_connector(connector)
    }

    /// Renames the diagram. Not recorded in history.
    pub fn rename(&mut self, name: impl Into<String>) -> bool {
        let name = name.into();
        if self.diagram.name == name {
            return false;
        }
        self.diagram.name = name.clone();
        self.revision += 1;
        self.publish(EditorEvent::Document(DocumentEvent::Renamed { name }));
        true
    }

    /// Updates the grid metadata stored with the diagram. Not recorded in
    /// history. Non-positive or non-finite sizes are ignored.
    pub fn set_grid(&mut self, size: f64, snap_to_grid: bool) {
        if size.is_finite() && size > 0.0 {
            self.diagram.grid_size = size;
        }
        self.diagram.snap_to_grid = snap_to_grid;
    }

    /// Reverts the newest action. Returns false if there was nothing to undo.
    pub fn undo(&mut self) -> bool {
        let Some(label) = self
            .history
            .undo(&mut self.diagram)
            .map(|a| a.label().to_string())
        else {
            return false;
        };
        tracing::debug!("Undo '{}'", label);
        self.revision += 1;
        self.publish_replaced();
        self.publish(EditorEvent::History(HistoryEvent::Undone { label }));
        true
    }

    /// Re-applies the newest undone action.
    pub fn redo(&mut self) -> bool {
        let Some(label) = self
            .history
            .redo(&mut self.diagram)
            .map(|a| a.label().to_string())
        else {
            return false;
        };
        tracing::debug!("Redo '{}'", label);
        self.revision += 1;
        self.publish_replaced();
        self.publish(EditorEvent::History(HistoryEvent::Redone { label }));
        true
    }

    /// Swaps in another diagram and starts a fresh history.
    pub fn replace_diagram(&mut self, diagram: Diagram) {
        tracing::info!("Editing diagram '{}' ({})", diagram.name, diagram.id);
        self.diagram = diagram;
        self.clear_history();
        self.publish_replaced();
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
        self.publish(EditorEvent::History(HistoryEvent::Cleared));
    }

    fn endpoints_resolve(&self, connector: &Connector) -> bool {
        connector.start_position(&self.diagram).is_some()
            && connector.end_position(&self.diagram).is_some()
    }

    fn publish_replaced(&self) {
        self.publish(EditorEvent::Document(DocumentEvent::Replaced {
            diagram_id: self.diagram.id.as_uuid(),
        }));
    }

    fn publish(&self, event: EditorEvent) {
        if let Some(bus) = &self.events {
            if let Err(e) = bus.publish(event) {
                tracing::trace!("Event not delivered: {}", e);
            }
        }
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new(Diagram::default())
    }
}

fn is_valid_shape(shape: &Shape) -> bool {
    shape.position.is_finite()
        && shape.width.is_finite()
        && shape.height.is_finite()
        && shape.width > 0.0
        && shape.height > 0.0
}

/// Notifications for a freshly recorded action. A cascading shape delete
/// is reported as one `ShapeRemoved` carrying the connector count.
fn document_events(action: &EditAction) -> Vec<DocumentEvent> {
    match action {
        EditAction::AddShape { shape, .. } => vec![DocumentEvent::ShapeAdded {
            shape_id: shape.id.as_uuid(),
        }],
        EditAction::RemoveShape { shape, .. } => vec![DocumentEvent::ShapeRemoved {
            shape_id: shape.id.as_uuid(),
            connectors_removed: 0,
        }],
        EditAction::ModifyShape { new, .. } => vec![DocumentEvent::ShapeModified {
            shape_id: new.id.as_uuid(),
        }],
        EditAction::AddConnector { connector, .. } => vec![DocumentEvent::ConnectorAdded {
            connector_id: connector.id.as_uuid(),
        }],
        EditAction::RemoveConnector { connector, .. } => vec![DocumentEvent::ConnectorRemoved {
            connector_id: connector.id.as_uuid(),
        }],
        EditAction::ModifyConnector { new, .. } => vec![DocumentEvent::ConnectorModified {
            connector_id: new.id.as_uuid(),
        }],
        EditAction::Batch { actions, .. } => {
            let removed_shapes: Vec<ShapeId> = actions
                .iter()
                .filter_map(|a| match a {
                    EditAction::RemoveShape { shape, .. } => Some(shape.id),
                    _ => None,
                })
                .collect();
            let cascades = |connector: &Connector| {
                removed_shapes.iter().any(|id| connector.references(*id))
            };

            actions
                .iter()
                .flat_map(|a| match a {
                    EditAction::RemoveConnector { connector, .. } if cascades(connector) => {
                        Vec::new()
                    }
                    EditAction::RemoveShape { shape, .. } => {
                        let connectors_removed = actions
                            .iter()
                            .filter(|b| {
                                matches!(b, EditAction::RemoveConnector { connector, .. }
                                    if connector.references(shape.id))
                            })
                            .count();
                        vec![DocumentEvent::ShapeRemoved {
                            shape_id: shape.id.as_uuid(),
                            connectors_removed,
                        }]
                    }
                    other => document_events(other),
                })
                .collect()
        }
    }
}
