use crate::model::{ConnectorId, Diagram, Point, ShapeId};
use crate::router::ConnectorRouter;
use crate::viewport::Viewport;

/// What is currently selected. At most one shape or one connector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    None,
    Shape(ShapeId),
    Connector(ConnectorId),
}

/// Manages selection state and tap-to-select.
///
/// # Selection Model
///
/// - **Shape XOR connector**: selecting one kind clears the other
/// - **Shapes win**: a tap inside a shape selects the topmost shape even if
///   a connector passes underneath
/// - **Connectors**: picked by distance to their routed path in screen
///   space, so the pick radius does not change with zoom
#[derive(Debug, Clone, Default)]
pub struct SelectionManager {
    current: Selection,
}

impl SelectionManager {
    /// Creates a new `SelectionManager` with no selection.
    ///
    /// # Examples
    ///
    /// ```
    /// use whiteboard_designer::selection_manager::{Selection, SelectionManager};
    ///
    /// let manager = SelectionManager::new();
    /// assert_eq!(manager.current(), Selection::None);
    /// ```
    pub fn new() -> Self {
        Self {
            current: Selection::None,
        }
    }

    pub fn current(&self) -> Selection {
        self.current
    }

    /// Returns the selected shape id, if a shape is selected.
    pub fn selected_shape(&self) -> Option<ShapeId> {
        match self.current {
            Selection::Shape(id) => Some(id),
            _ => None,
        }
    }

    /// Returns the selected connector id, if a connector is selected.
    pub fn selected_connector(&self) -> Option<ConnectorId> {
        match self.current {
            Selection::Connector(id) => Some(id),
            _ => None,
        }
    }

    pub fn has_selection(&self) -> bool {
        self.current != Selection::None
    }

    /// Selects a shape, clearing any connector selection.
    ///
    /// # Returns
    ///
    /// `true` if the selection changed.
    pub fn select_shape(&mut self, id: ShapeId) -> bool {
        self.set_selection(Selection::Shape(id))
    }

    /// Selects a connector, clearing any shape selection.
    ///
    /// # Returns
    ///
    /// `true` if the selection changed.
    pub fn select_connector(&mut self, id: ConnectorId) -> bool {
        self.set_selection(Selection::Connector(id))
    }

    /// Clears the selection. Returns `true` if something was selected.
    pub fn clear(&mut self) -> bool {
        self.set_selection(Selection::None)
    }

    /// Replaces the selection wholesale. Returns `true` if it changed.
    pub fn set_selection(&mut self, selection: Selection) -> bool {
        let changed = self.current != selection;
        self.current = selection;
        changed
    }

    /// Selects whatever lies under a screen point.
    ///
    /// Shapes are tested first (topmost wins); otherwise the connector
    /// whose routed path is closest to the point, if within `threshold`
    /// screen units, is selected. A miss clears the selection.
    ///
    /// # Arguments
    ///
    /// * `diagram` - The diagram to hit-test
    /// * `viewport` - Current view transform
    /// * `router` - Router used to compute connector paths
    /// * `screen_point` - The tap position in screen coordinates
    /// * `threshold` - Maximum connector pick distance in screen units
    ///
    /// # Returns
    ///
    /// The new selection.
    pub fn select_at(
        &mut self,
        diagram: &Diagram,
        viewport: &Viewport,
        router: &ConnectorRouter,
        screen_point: Point,
        threshold: f64,
    ) -> Selection {
        let canvas_point = viewport.screen_to_canvas(screen_point);
        let selection = if let Some(shape) = diagram.shape_at(canvas_point) {
            Selection::Shape(shape.id)
        } else if let Some(id) =
            Self::connector_at(diagram, viewport, router, screen_point, threshold)
        {
            Selection::Connector(id)
        } else {
            Selection::None
        };

        self.current = selection;
        selection
    }

    /// Finds the connector nearest to `screen_point` within `threshold`.
    ///
    /// Connectors with dangling endpoints are skipped. Ties go to the
    /// connector listed first.
    pub fn connector_at(
        diagram: &Diagram,
        viewport: &Viewport,
        router: &ConnectorRouter,
        screen_point: Point,
        threshold: f64,
    ) -> Option<ConnectorId> {
        let mut best: Option<(ConnectorId, f64)> = None;
        for connector in &diagram.connectors {
            let Some(routed) = router.route_connector(connector, diagram, viewport) else {
                continue;
            };
            let distance = routed.path.distance_to(screen_point);
            if distance > threshold {
                continue;
            }
            let closer = match best {
                Some((_, best_distance)) => distance < best_distance,
                None => true,
            };
            if closer {
                best = Some((connector.id, distance));
            }
        }
        best.map(|(id, _)| id)
    }

    /// Drops a selection that no longer exists in `diagram`.
    ///
    /// Returns `true` if the selection was cleared.
    pub fn prune(&mut self, diagram: &Diagram) -> bool {
        let exists = match self.current {
            Selection::None => true,
            Selection::Shape(id) => diagram.shape(id).is_some(),
            Selection::Connector(id) => diagram.connector(id).is_some(),
        };
        if exists {
            false
        } else {
            self.clear()
        }
    }
}
