use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use whiteboard_core::constants::{DEFAULT_DIAGRAM_NAME, DEFAULT_GRID_SIZE};

use super::{Connector, ConnectorId, DiagramId, Endpoint, Point, Shape, ShapeId};

/// A complete diagram: ordered shapes and connectors plus grid metadata.
///
/// List order is paint order among equal z-indices, so it is preserved
/// across undo and redo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagram {
    pub id: DiagramId,
    pub name: String,
    pub shapes: Vec<Shape>,
    pub connectors: Vec<Connector>,
    pub grid_size: f64,
    pub snap_to_grid: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Diagram {
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: DiagramId::new(),
            name: name.into(),
            shapes: Vec::new(),
            connectors: Vec::new(),
            grid_size: DEFAULT_GRID_SIZE,
            snap_to_grid: true,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty() && self.connectors.is_empty()
    }

    pub fn shape(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.iter().find(|s| s.id == id)
    }

    pub fn shape_mut(&mut self, id: ShapeId) -> Option<&mut Shape> {
        self.shapes.iter_mut().find(|s| s.id == id)
    }

    pub fn shape_index(&self, id: ShapeId) -> Option<usize> {
        self.shapes.iter().position(|s| s.id == id)
    }

    pub fn connector(&self, id: ConnectorId) -> Option<&Connector> {
        self.connectors.iter().find(|c| c.id == id)
    }

    pub fn connector_mut(&mut self, id: ConnectorId) -> Option<&mut Connector> {
        self.connectors.iter_mut().find(|c| c.id == id)
    }

    pub fn connector_index(&self, id: ConnectorId) -> Option<usize> {
        self.connectors.iter().position(|c| c.id == id)
    }

    /// Connectors with at least one endpoint attached to `shape_id`, in list order.
    pub fn connectors_attached_to(&self, shape_id: ShapeId) -> impl Iterator<Item = &Connector> {
        self.connectors
            .iter()
            .filter(move |c| c.references(shape_id))
    }

    pub fn max_z_index(&self) -> Option<i32> {
        self.shapes.iter().map(|s| s.z_index).max()
    }

    /// z-index that places a new shape above every existing one.
    pub fn next_z_index(&self) -> i32 {
        self.max_z_index().map_or(0, |z| z.saturating_add(1))
    }

    /// Canvas position of an endpoint, or `None` if its shape is missing.
    pub fn endpoint_position(&self, endpoint: &Endpoint) -> Option<Point> {
        match endpoint {
            Endpoint::Attached { shape_id, anchor } => {
                self.shape(*shape_id).map(|s| s.anchor_position(*anchor))
            }
            Endpoint::Floating { point } => Some(*point),
        }
    }

    /// Topmost shape containing `point`: highest z-index, ties going to the
    /// shape painted last.
    pub fn shape_at(&self, point: Point) -> Option<&Shape> {
        self.shapes
            .iter()
            .enumerate()
            .filter(|(_, s)| s.contains_point(point))
            .max_by_key(|(index, s)| (s.z_index, *index))
            .map(|(_, s)| s)
    }

    /// True if every attached endpoint references a shape of this diagram.
    pub fn is_consistent(&self) -> bool {
        self.connectors.iter().all(|c| {
            [c.start, c.end]
                .iter()
                .filter_map(Endpoint::shape_id)
                .all(|id| self.shape(id).is_some())
        })
    }

    /// Marks the diagram as modified now.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl Default for Diagram {
    fn default() -> Self {
        Self::new(DEFAULT_DIAGRAM_NAME)
    }
}
