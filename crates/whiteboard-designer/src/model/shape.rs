use serde::{Deserialize, Serialize};
use std::fmt;
use whiteboard_settings::ShapeDefaults;

use super::{Color, Point, ShapeId};

/// Visual kind of a shape. Hit-testing treats every kind as its bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeKind {
    Rectangle,
    #[default]
    RoundedRectangle,
    Ellipse,
    Diamond,
    Parallelogram,
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ShapeKind::Rectangle => "Rectangle",
            ShapeKind::RoundedRectangle => "Rounded Rectangle",
            ShapeKind::Ellipse => "Ellipse",
            ShapeKind::Diamond => "Diamond",
            ShapeKind::Parallelogram => "Parallelogram",
        };
        write!(f, "{}", name)
    }
}

/// Symbolic attachment side of a shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnchorPoint {
    Top,
    Bottom,
    Left,
    Right,
    Center,
}

impl AnchorPoint {
    /// The four edge anchors, in tie-breaking order.
    pub const SIDES: [AnchorPoint; 4] = [
        AnchorPoint::Top,
        AnchorPoint::Bottom,
        AnchorPoint::Left,
        AnchorPoint::Right,
    ];

    pub fn is_horizontal(&self) -> bool {
        matches!(self, AnchorPoint::Left | AnchorPoint::Right)
    }

    pub fn is_vertical(&self) -> bool {
        matches!(self, AnchorPoint::Top | AnchorPoint::Bottom)
    }

    /// Unit vector pointing away from the shape (y grows downwards).
    /// `Center` has no direction and returns the zero vector.
    pub fn outward_normal(&self) -> Point {
        match self {
            AnchorPoint::Top => Point::new(0.0, -1.0),
            AnchorPoint::Bottom => Point::new(0.0, 1.0),
            AnchorPoint::Left => Point::new(-1.0, 0.0),
            AnchorPoint::Right => Point::new(1.0, 0.0),
            AnchorPoint::Center => Point::ZERO,
        }
    }
}

impl fmt::Display for AnchorPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AnchorPoint::Top => "top",
            AnchorPoint::Bottom => "bottom",
            AnchorPoint::Left => "left",
            AnchorPoint::Right => "right",
            AnchorPoint::Center => "center",
        };
        write!(f, "{}", name)
    }
}

/// One of the eight resize handles around a selected shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResizeHandle {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    Top,
    Bottom,
    Left,
    Right,
}

impl ResizeHandle {
    /// Hit-test order: corners first, then edge midpoints.
    pub const ALL: [ResizeHandle; 8] = [
        ResizeHandle::TopLeft,
        ResizeHandle::TopRight,
        ResizeHandle::BottomLeft,
        ResizeHandle::BottomRight,
        ResizeHandle::Top,
        ResizeHandle::Bottom,
        ResizeHandle::Left,
        ResizeHandle::Right,
    ];

    pub fn moves_left(&self) -> bool {
        matches!(
            self,
            ResizeHandle::TopLeft | ResizeHandle::BottomLeft | ResizeHandle::Left
        )
    }

    pub fn moves_right(&self) -> bool {
        matches!(
            self,
            ResizeHandle::TopRight | ResizeHandle::BottomRight | ResizeHandle::Right
        )
    }

    pub fn moves_top(&self) -> bool {
        matches!(
            self,
            ResizeHandle::TopLeft | ResizeHandle::TopRight | ResizeHandle::Top
        )
    }

    pub fn moves_bottom(&self) -> bool {
        matches!(
            self,
            ResizeHandle::BottomLeft | ResizeHandle::BottomRight | ResizeHandle::Bottom
        )
    }
}

/// A node on the diagram canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    pub id: ShapeId,
    pub kind: ShapeKind,
    /// Top-left corner in canvas space.
    pub position: Point,
    pub width: f64,
    pub height: f64,
    pub text: String,
    pub fill_color: Color,
    pub stroke_color: Color,
    pub text_color: Color,
    pub stroke_width: f64,
    /// Only drawn for [`ShapeKind::RoundedRectangle`].
    pub corner_radius: f64,
    pub z_index: i32,
}

impl Shape {
    /// Creates a shape of `kind` at `position` using the default style.
    pub fn new(kind: ShapeKind, position: Point) -> Self {
        Self::with_defaults(kind, position, &ShapeDefaults::default())
    }

    /// Creates a shape of `kind` at `position` using a configured style.
    pub fn with_defaults(kind: ShapeKind, position: Point, defaults: &ShapeDefaults) -> Self {
        Self {
            id: ShapeId::new(),
            kind,
            position,
            width: defaults.width,
            height: defaults.height,
            text: String::new(),
            fill_color: Color(defaults.fill_color),
            stroke_color: Color(defaults.stroke_color),
            text_color: Color(defaults.text_color),
            stroke_width: defaults.stroke_width,
            corner_radius: defaults.corner_radius,
            z_index: 0,
        }
    }

    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    /// Copy of this shape moved by `delta`, keeping its identity.
    pub fn translated(&self, delta: Point) -> Shape {
        let mut moved = self.clone();
        moved.position += delta;
        moved
    }
}
