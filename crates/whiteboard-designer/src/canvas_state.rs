//! Ephemeral view and interaction state: EditMode, CanvasState.
//!
//! Nothing here is part of the document or its history. A renderer reads
//! this alongside the [`Diagram`] to draw selection outlines, handles, the
//! grid and the rubber-band line of a connector being drawn.

use std::fmt;

use whiteboard_settings::EditorConfig;

use crate::model::{AnchorPoint, Connector, Diagram, Point, ResizeHandle, ShapeId, ShapeKind};
use crate::router::{ConnectorRouter, RoutedConnector};
use crate::selection_manager::SelectionManager;
use crate::viewport::{Grid, Viewport};

/// Editing modes. Set externally by the tool palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditMode {
    #[default]
    Select,
    Pan,
    AddShape(ShapeKind),
    AddConnector,
}

impl fmt::Display for EditMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditMode::Select => write!(f, "Select"),
            EditMode::Pan => write!(f, "Pan"),
            EditMode::AddShape(kind) => write!(f, "Add {}", kind),
            EditMode::AddConnector => write!(f, "Add Connector"),
        }
    }
}

/// View, selection and gesture flags for one editor.
#[derive(Debug, Clone)]
pub struct CanvasState {
    pub viewport: Viewport,
    pub grid: Grid,
    pub show_grid: bool,
    pub selection: SelectionManager,
    mode: EditMode,
    pub is_dragging: bool,
    pub is_resizing: bool,
    pub active_handle: Option<ResizeHandle>,
    pending_connector: Option<(ShapeId, AnchorPoint)>,
    /// Canvas point the pending connector's rubber band follows.
    pub connector_preview: Option<Point>,
}

impl CanvasState {
    pub fn new() -> Self {
        Self::from_config(&EditorConfig::default())
    }

    pub fn from_config(config: &EditorConfig) -> Self {
        Self {
            viewport: Viewport::from_settings(&config.view),
            grid: Grid::from_settings(&config.grid),
            show_grid: config.grid.show_grid,
            selection: SelectionManager::new(),
            mode: EditMode::Select,
            is_dragging: false,
            is_resizing: false,
            active_handle: None,
            pending_connector: None,
            connector_preview: None,
        }
    }

    pub fn mode(&self) -> EditMode {
        self.mode
    }

    /// Switches mode. Any pending connector is dropped.
    ///
    /// Returns true if the mode changed.
    pub fn set_mode(&mut self, mode: EditMode) -> bool {
        self.clear_pending_connector();
        if self.mode == mode {
            return false;
        }
        tracing::debug!("Mode {} -> {}", self.mode, mode);
        self.mode = mode;
        true
    }

    pub fn pending_connector(&self) -> Option<(ShapeId, AnchorPoint)> {
        self.pending_connector
    }

    pub fn set_pending_connector(&mut self, shape_id: ShapeId, anchor: AnchorPoint) {
        self.pending_connector = Some((shape_id, anchor));
        self.connector_preview = None;
    }

    /// Returns true if a connector was pending.
    pub fn clear_pending_connector(&mut self) -> bool {
        self.connector_preview = None;
        self.pending_connector.take().is_some()
    }

    /// Resets the per-gesture flags.
    pub fn end_gesture(&mut self) {
        self.is_dragging = false;
        self.is_resizing = false;
        self.active_handle = None;
    }

    /// Adopts the grid stored with `diagram`.
    pub fn apply_diagram_grid(&mut self, diagram: &Diagram) {
        self.grid = Grid::new(diagram.grid_size, diagram.snap_to_grid);
    }

    /// Screen-space route of the pending connector's rubber band, if one is
    /// being drawn and its start shape still exists.
    pub fn connector_preview_route(
        &self,
        diagram: &Diagram,
        router: &ConnectorRouter,
        template: &Connector,
    ) -> Option<RoutedConnector> {
        let (shape_id, anchor) = self.pending_connector?;
        let target = self.connector_preview?;
        let shape = diagram.shape(shape_id)?;
        Some(router.route_preview(shape, anchor, target, template, &self.viewport))
    }
}

impl Default for CanvasState {
    fn default() -> Self {
        Self::new()
    }
}
