use serde::{Deserialize, Serialize};
use std::fmt;
use whiteboard_settings::ConnectorDefaults;

use super::{AnchorPoint, Color, ConnectorId, Diagram, Point, ShapeId};

/// One end of a connector: attached to a shape side, or free on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Endpoint {
    Attached { shape_id: ShapeId, anchor: AnchorPoint },
    Floating { point: Point },
}

impl Endpoint {
    pub fn attached(shape_id: ShapeId, anchor: AnchorPoint) -> Self {
        Endpoint::Attached { shape_id, anchor }
    }

    pub fn floating(point: Point) -> Self {
        Endpoint::Floating { point }
    }

    pub fn shape_id(&self) -> Option<ShapeId> {
        match self {
            Endpoint::Attached { shape_id, .. } => Some(*shape_id),
            Endpoint::Floating { .. } => None,
        }
    }

    /// Anchor used for routing. Floating endpoints route as `Center`.
    pub fn anchor(&self) -> AnchorPoint {
        match self {
            Endpoint::Attached { anchor, .. } => *anchor,
            Endpoint::Floating { .. } => AnchorPoint::Center,
        }
    }
}

/// How the connector path is routed between its endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectorStyle {
    Straight,
    #[default]
    Orthogonal,
    Curved,
}

impl fmt::Display for ConnectorStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectorStyle::Straight => write!(f, "Straight"),
            ConnectorStyle::Orthogonal => write!(f, "Orthogonal"),
            ConnectorStyle::Curved => write!(f, "Curved"),
        }
    }
}

/// Which ends of a connector carry an arrowhead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArrowHead {
    None,
    #[default]
    End,
    Both,
}

/// A routed link between two endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Connector {
    pub id: ConnectorId,
    pub start: Endpoint,
    pub end: Endpoint,
    pub style: ConnectorStyle,
    pub arrow_head: ArrowHead,
    pub color: Color,
    pub stroke_width: f64,
    pub z_index: i32,
}

impl Connector {
    pub fn new(start: Endpoint, end: Endpoint) -> Self {
        Self::with_defaults(start, end, &ConnectorDefaults::default())
    }

    pub fn with_defaults(start: Endpoint, end: Endpoint, defaults: &ConnectorDefaults) -> Self {
        Self {
            id: ConnectorId::new(),
            start,
            end,
            style: ConnectorStyle::default(),
            arrow_head: ArrowHead::default(),
            color: Color(defaults.color),
            stroke_width: defaults.stroke_width,
            z_index: -1,
        }
    }

    /// Connector from one shape side to another.
    pub fn between(
        from: ShapeId,
        from_anchor: AnchorPoint,
        to: ShapeId,
        to_anchor: AnchorPoint,
    ) -> Self {
        Self::new(
            Endpoint::attached(from, from_anchor),
            Endpoint::attached(to, to_anchor),
        )
    }

    pub fn with_style(mut self, style: ConnectorStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_arrow_head(mut self, arrow_head: ArrowHead) -> Self {
        self.arrow_head = arrow_head;
        self
    }

    /// Canvas position of the start endpoint, `None` if its shape is missing.
    pub fn start_position(&self, diagram: &Diagram) -> Option<Point> {
        diagram.endpoint_position(&self.start)
    }

    /// Canvas position of the end endpoint, `None` if its shape is missing.
    pub fn end_position(&self, diagram: &Diagram) -> Option<Point> {
        diagram.endpoint_position(&self.end)
    }

    /// True if either endpoint is attached to `shape_id`.
    pub fn references(&self, shape_id: ShapeId) -> bool {
        self.start.shape_id() == Some(shape_id) || self.end.shape_id() == Some(shape_id)
    }

    /// True if both endpoints are attached to the same shape.
    pub fn is_self_loop(&self) -> bool {
        match (self.start.shape_id(), self.end.shape_id()) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }
}
