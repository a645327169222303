//! Editor policy constants.
//!
//! Distances suffixed `_SCREEN` are measured in screen units and must be
//! divided by the current scale before comparing against canvas geometry.

/// Smallest allowed view scale.
pub const MIN_SCALE: f64 = 0.25;
/// Largest allowed view scale.
pub const MAX_SCALE: f64 = 3.0;
/// Multiplicative step used by the zoom-in command.
pub const ZOOM_IN_FACTOR: f64 = 1.25;
/// Multiplicative step used by the zoom-out command.
pub const ZOOM_OUT_FACTOR: f64 = 0.8;

/// Name given to new diagrams.
pub const DEFAULT_DIAGRAM_NAME: &str = "Untitled";

/// Default grid spacing in canvas units.
pub const DEFAULT_GRID_SIZE: f64 = 20.0;
/// Smallest length produced by size snapping when the grid is disabled.
pub const MIN_SNAPPED_SIZE: f64 = 20.0;

/// Pointer travel that turns a tap into a drag.
pub const TAP_THRESHOLD_SCREEN: f64 = 10.0;
/// Touch tolerance around resize handles.
pub const HANDLE_TOLERANCE_SCREEN: f64 = 50.0;
/// Maximum distance for a tap to select a connector.
pub const CONNECTOR_HIT_THRESHOLD_SCREEN: f64 = 20.0;
/// Smallest width or height a shape can be resized to, in canvas units.
pub const MIN_SHAPE_SIZE: f64 = 40.0;

/// Number of undo entries kept before the oldest is evicted.
pub const MAX_HISTORY_DEPTH: usize = 50;

/// Minimum run away from an anchor before an orthogonal connector turns.
pub const CONNECTOR_STANDOFF: f64 = 30.0;
/// Arrowhead length as a multiple of the connector stroke width.
pub const ARROW_SIZE_FACTOR: f64 = 5.0;
/// Control point offset for curved connectors, as a fraction of the
/// distance between the endpoints.
pub const CURVE_CONTROL_RATIO: f64 = 0.4;

/// Default shape width in canvas units.
pub const DEFAULT_SHAPE_WIDTH: f64 = 150.0;
/// Default shape height in canvas units.
pub const DEFAULT_SHAPE_HEIGHT: f64 = 80.0;
