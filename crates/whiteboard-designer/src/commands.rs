//! Reversible edit actions.
//!
//! Every change to a [`Diagram`] that can be undone is expressed as an
//! [`EditAction`]. Actions carry full snapshots of the affected entities
//! and the list position they occupy, so reverting an action restores the
//! diagram exactly, including paint order.

use serde::{Deserialize, Serialize};

use crate::model::{Connector, Diagram, Shape};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[allow(clippy::large_enum_variant)]
pub enum EditAction {
    AddShape { shape: Shape, index: usize },
    RemoveShape { shape: Shape, index: usize },
    ModifyShape { old: Shape, new: Shape },
    AddConnector { connector: Connector, index: usize },
    RemoveConnector { connector: Connector, index: usize },
    ModifyConnector { old: Connector, new: Connector },
    /// Sub-actions applied in order and reverted in reverse order.
    Batch { label: String, actions: Vec<EditAction> },
}

impl EditAction {
    /// Human readable name used in logs and history events.
    pub fn label(&self) -> &str {
        match self {
            EditAction::AddShape { .. } => "Add Shape",
            EditAction::RemoveShape { .. } => "Delete Shape",
            EditAction::ModifyShape { .. } => "Edit Shape",
            EditAction::AddConnector { .. } => "Add Connector",
            EditAction::RemoveConnector { .. } => "Delete Connector",
            EditAction::ModifyConnector { .. } => "Edit Connector",
            EditAction::Batch { label, .. } => label,
        }
    }

    /// Number of leaf actions, counting batch members individually.
    pub fn len(&self) -> usize {
        match self {
            EditAction::Batch { actions, .. } => actions.iter().map(EditAction::len).sum(),
            _ => 1,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Applies the forward transform.
    pub fn apply(&self, diagram: &mut Diagram) {
        match self {
            EditAction::AddShape { shape, index } => insert_shape(diagram, shape, *index),
            EditAction::RemoveShape { shape, .. } => {
                diagram.shapes.retain(|s| s.id != shape.id);
            }
            EditAction::ModifyShape { new, .. } => replace_shape(diagram, new),
            EditAction::AddConnector { connector, index } => {
                insert_connector(diagram, connector, *index)
            }
            EditAction::RemoveConnector { connector, .. } => {
                diagram.connectors.retain(|c| c.id != connector.id);
            }
            EditAction::ModifyConnector { new, .. } => replace_connector(diagram, new),
            EditAction::Batch { actions, .. } => {
                for action in actions {
                    action.apply(diagram);
                }
            }
        }
    }

    /// Applies the inverse transform.
    pub fn revert(&self, diagram: &mut Diagram) {
        match self {
            EditAction::AddShape { shape, .. } => {
                diagram.shapes.retain(|s| s.id != shape.id);
            }
            EditAction::RemoveShape { shape, index } => insert_shape(diagram, shape, *index),
            EditAction::ModifyShape { old, .. } => replace_shape(diagram, old),
            EditAction::AddConnector { connector, .. } => {
                diagram.connectors.retain(|c| c.id != connector.id);
            }
            EditAction::RemoveConnector { connector, index } => {
                insert_connector(diagram, connector, *index)
            }
            EditAction::ModifyConnector { old, .. } => replace_connector(diagram, old),
            EditAction::Batch { actions, .. } => {
                for action in actions.iter().rev() {
                    action.revert(diagram);
                }
            }
        }
    }
}

fn insert_shape(diagram: &mut Diagram, shape: &Shape, index: usize) {
    if diagram.shape(shape.id).is_some() {
        return;
    }
    let index = index.min(diagram.shapes.len());
    diagram.shapes.insert(index, shape.clone());
}

fn replace_shape(diagram: &mut Diagram, shape: &Shape) {
    if let Some(existing) = diagram.shape_mut(shape.id) {
        *existing = shape.clone();
    }
}

fn insert_connector(diagram: &mut Diagram, connector: &Connector, index: usize) {
    if diagram.connector(connector.id).is_some() {
        return;
    }
    let index = index.min(diagram.connectors.len());
    diagram.connectors.insert(index, connector.clone());
}

fn replace_connector(diagram: &mut Diagram, connector: &Connector) {
    if let Some(existing) = diagram.connector_mut(connector.id) {
        *existing = connector.clone();
    }
}
