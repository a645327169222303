//! Viewport operations (zoom, pan, grid) for editor state.

use super::EditorState;
use crate::model::Point;

impl EditorState {
    /// Zoom in one step about the canvas origin.
    pub fn zoom_in(&mut self) -> bool {
        let changed = self.canvas.viewport.zoom_in();
        if changed {
            self.publish_transform();
        }
        changed
    }

    /// Zoom out one step about the canvas origin.
    pub fn zoom_out(&mut self) -> bool {
        let changed = self.canvas.viewport.zoom_out();
        if changed {
            self.publish_transform();
        }
        changed
    }

    /// Zoom by `factor` keeping the canvas point `pivot` fixed on screen.
    pub fn zoom_about(&mut self, factor: f64, pivot: Point) -> bool {
        let changed = self.canvas.viewport.zoom(factor, pivot);
        if changed {
            self.publish_transform();
        }
        changed
    }

    /// Pan by a screen-space delta.
    pub fn pan_by(&mut self, delta: Point) {
        self.canvas.viewport.pan(delta);
        self.publish_transform();
    }

    /// Reset to 100% with no pan.
    pub fn reset_view(&mut self) {
        self.canvas.viewport.reset();
        self.publish_transform();
    }

    /// Show or hide the grid.
    pub fn toggle_grid(&mut self) -> bool {
        self.canvas.show_grid = !self.canvas.show_grid;
        self.publish_grid();
        self.canvas.show_grid
    }

    /// Turn grid snapping on or off. The setting is stored with the diagram.
    pub fn toggle_snap(&mut self) -> bool {
        let snap = !self.canvas.grid.snap_enabled;
        self.canvas.grid.snap_enabled = snap;
        let size = self.canvas.grid.size;
        self.document.set_grid(size, snap);
        self.is_modified = true;
        self.publish_grid();
        snap
    }

    /// Set the grid spacing in canvas units. Non-positive sizes are ignored.
    pub fn set_grid_size(&mut self, size: f64) -> bool {
        if !(size.is_finite() && size > 0.0) {
            tracing::warn!("Ignoring invalid grid size {}", size);
            return false;
        }
        self.canvas.grid.size = size;
        let snap = self.canvas.grid.snap_enabled;
        self.document.set_grid(size, snap);
        self.is_modified = true;
        self.publish_grid();
        true
    }
}
