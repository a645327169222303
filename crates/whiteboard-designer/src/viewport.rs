//! Viewport and coordinate transformation for canvas rendering.
//!
//! Handles conversion between screen coordinates and canvas coordinates
//! (design space). Manages zoom and pan, plus the grid snapping rules
//! applied to canvas positions and sizes.

use std::fmt;

use whiteboard_core::constants::{DEFAULT_GRID_SIZE, MAX_SCALE, MIN_SCALE, MIN_SNAPPED_SIZE};
use whiteboard_settings::{GridSettings, ViewSettings};

use crate::model::Point;

/// Represents the view transformation state (scale and pan offset).
///
/// ```text
/// screen = canvas * scale + offset
/// canvas = (screen - offset) / scale
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    scale: f64,
    offset: Point,
    min_scale: f64,
    max_scale: f64,
    zoom_in_factor: f64,
    zoom_out_factor: f64,
}

impl Viewport {
    /// Creates a viewport at scale 1 with no offset.
    pub fn new() -> Self {
        Self::from_settings(&ViewSettings::default())
    }

    /// Creates a viewport from view settings.
    ///
    /// Limits that are not positive and finite fall back to the defaults,
    /// and reversed limits are swapped.
    pub fn from_settings(settings: &ViewSettings) -> Self {
        let usable = |v: f64, fallback: f64| if v.is_finite() && v > 0.0 { v } else { fallback };
        let a = usable(settings.min_scale, MIN_SCALE);
        let b = usable(settings.max_scale, MAX_SCALE);
        let mut viewport = Self {
            scale: 1.0,
            offset: Point::ZERO,
            min_scale: a.min(b),
            max_scale: a.max(b),
            zoom_in_factor: settings.zoom_in_factor,
            zoom_out_factor: settings.zoom_out_factor,
        };
        viewport.scale = viewport.clamp_scale(1.0);
        viewport
    }

    fn clamp_scale(&self, scale: f64) -> f64 {
        scale.max(self.min_scale).min(self.max_scale)
    }

    /// Gets the current scale (1.0 = 100%).
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Gets the screen-space offset of the canvas origin.
    pub fn offset(&self) -> Point {
        self.offset
    }

    pub fn scale_limits(&self) -> (f64, f64) {
        (self.min_scale, self.max_scale)
    }

    /// Sets the scale, clamped to the allowed range. Non-finite values are ignored.
    pub fn set_scale(&mut self, scale: f64) {
        if scale.is_finite() {
            self.scale = self.clamp_scale(scale);
        }
    }

    pub fn set_offset(&mut self, offset: Point) {
        if offset.is_finite() {
            self.offset = offset;
        }
    }

    /// Converts a screen position to canvas coordinates.
    pub fn screen_to_canvas(&self, screen: Point) -> Point {
        (screen - self.offset) / self.scale
    }

    /// Converts a canvas position to screen coordinates.
    pub fn canvas_to_screen(&self, canvas: Point) -> Point {
        canvas * self.scale + self.offset
    }

    /// Converts a screen-space displacement to a canvas-space displacement.
    pub fn screen_delta_to_canvas(&self, delta: Point) -> Point {
        delta / self.scale
    }

    /// Converts a screen-space length to canvas units.
    pub fn screen_length_to_canvas(&self, length: f64) -> f64 {
        length / self.scale
    }

    /// Multiplies the scale by `factor`, keeping `pivot` (a canvas point)
    /// fixed on screen.
    ///
    /// Returns true if the scale changed. When the scale is already at a
    /// limit the offset is left untouched.
    pub fn zoom(&mut self, factor: f64, pivot: Point) -> bool {
        if !factor.is_finite() || factor <= 0.0 || !pivot.is_finite() {
            return false;
        }
        let new_scale = self.clamp_scale(self.scale * factor);
        if new_scale == self.scale {
            return false;
        }
        // pivot * scale + offset == pivot * new_scale + new_offset
        self.offset -= pivot * (new_scale - self.scale);
        self.scale = new_scale;
        true
    }

    /// Zooms in by one step about the canvas origin.
    pub fn zoom_in(&mut self) -> bool {
        self.zoom(self.zoom_in_factor, Point::ZERO)
    }

    /// Zooms out by one step about the canvas origin.
    pub fn zoom_out(&mut self) -> bool {
        self.zoom(self.zoom_out_factor, Point::ZERO)
    }

    /// Pans by a screen-space delta.
    pub fn pan(&mut self, delta: Point) {
        if delta.is_finite() {
            self.offset += delta;
        }
    }

    /// Resets to scale 1 with no offset.
    pub fn reset(&mut self) {
        self.scale = self.clamp_scale(1.0);
        self.offset = Point::ZERO;
    }
}

impl fmt::Display for Viewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Zoom: {:.2}x | Pan: ({:.1}, {:.1})",
            self.scale, self.offset.x, self.offset.y
        )
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new()
    }
}

/// Grid spacing and snapping rules in canvas units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Grid {
    pub size: f64,
    pub snap_enabled: bool,
}

impl Grid {
    pub fn new(size: f64, snap_enabled: bool) -> Self {
        Self { size, snap_enabled }
    }

    pub fn from_settings(settings: &GridSettings) -> Self {
        Self::new(settings.size, settings.snap_enabled)
    }

    fn is_active(&self) -> bool {
        self.snap_enabled && self.size > 0.0 && self.size.is_finite()
    }

    /// Snaps a coordinate to a grid line by truncating toward zero, so
    /// negative coordinates land on the line nearer the origin.
    pub fn snap_value(&self, value: f64) -> f64 {
        if self.is_active() {
            (value / self.size).trunc() * self.size
        } else {
            value
        }
    }

    /// Snaps both coordinates of a canvas point.
    pub fn snap_point(&self, point: Point) -> Point {
        Point::new(self.snap_value(point.x), self.snap_value(point.y))
    }

    /// Snaps a length down to the grid, never below one grid unit.
    ///
    /// With snapping off (or a zero grid) the length is only clamped to
    /// [`MIN_SNAPPED_SIZE`].
    pub fn snap_size(&self, size: f64) -> f64 {
        if self.is_active() {
            ((size / self.size).floor() * self.size).max(self.size)
        } else if size.is_finite() {
            size.max(MIN_SNAPPED_SIZE)
        } else {
            MIN_SNAPPED_SIZE
        }
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new(DEFAULT_GRID_SIZE, true)
    }
}
