//! Connector routing.
//!
//! Computes the path and arrowheads of a connector from its two endpoint
//! positions and anchor sides. Routing happens in whatever space the points
//! are given in; [`ConnectorRouter::route_connector`] routes in screen space
//! so the stand-off distance and arrow size are independent of zoom.
//!
//! Directions reported by a [`RoutedConnector`] are travel directions: the
//! end direction points into the end tip, the start direction points into
//! the start tip. They are not normalized.

use whiteboard_core::constants::{ARROW_SIZE_FACTOR, CONNECTOR_STANDOFF, CURVE_CONTROL_RATIO};
use whiteboard_settings::RoutingSettings;

use crate::geometry::distance_to_polyline;
use crate::model::{AnchorPoint, ArrowHead, Connector, ConnectorStyle, Diagram, Point, Shape};
use crate::viewport::Viewport;

const ARROW_HALF_ANGLE: f64 = std::f64::consts::PI / 6.0;
const END_TANGENT_T: f64 = 0.95;
const START_TANGENT_T: f64 = 0.05;
const CURVE_HIT_SEGMENTS: usize = 32;

/// Geometry of a routed connector path.
#[derive(Debug, Clone, PartialEq)]
pub enum ConnectorPath {
    /// Straight or orthogonal route through the listed points.
    Polyline(Vec<Point>),
    /// A single cubic Bézier segment.
    Cubic {
        start: Point,
        control1: Point,
        control2: Point,
        end: Point,
    },
}

impl ConnectorPath {
    pub fn start(&self) -> Point {
        match self {
            ConnectorPath::Polyline(points) => points.first().copied().unwrap_or_default(),
            ConnectorPath::Cubic { start, .. } => *start,
        }
    }

    pub fn end(&self) -> Point {
        match self {
            ConnectorPath::Polyline(points) => points.last().copied().unwrap_or_default(),
            ConnectorPath::Cubic { end, .. } => *end,
        }
    }

    /// Approximates the path by a polyline. Curves are sampled at
    /// `segments + 1` evenly spaced parameters.
    pub fn flatten(&self, segments: usize) -> Vec<Point> {
        match self {
            ConnectorPath::Polyline(points) => points.clone(),
            ConnectorPath::Cubic {
                start,
                control1,
                control2,
                end,
            } => {
                let segments = segments.max(1);
                (0..=segments)
                    .map(|i| {
                        let t = i as f64 / segments as f64;
                        cubic_point(*start, *control1, *control2, *end, t)
                    })
                    .collect()
            }
        }
    }

    /// Shortest distance from `point` to the path.
    pub fn distance_to(&self, point: Point) -> f64 {
        distance_to_polyline(point, &self.flatten(CURVE_HIT_SEGMENTS))
    }

    /// Travel direction arriving at the end point.
    pub fn end_direction(&self) -> Point {
        match self {
            ConnectorPath::Polyline(points) => {
                let Some(&last) = points.last() else {
                    return Point::ZERO;
                };
                points
                    .iter()
                    .rev()
                    .skip(1)
                    .map(|&p| last - p)
                    .find(|d| d.normalized().is_some())
                    .unwrap_or(Point::ZERO)
            }
            ConnectorPath::Cubic {
                start,
                control1,
                control2,
                end,
            } => {
                let tangent = cubic_tangent(*start, *control1, *control2, *end, END_TANGENT_T);
                if tangent.normalized().is_some() {
                    tangent
                } else {
                    *end - *start
                }
            }
        }
    }

    /// Travel direction arriving at the start point when walking the path
    /// backwards (from the second path point toward the start).
    pub fn start_direction(&self) -> Point {
        match self {
            ConnectorPath::Polyline(points) => {
                let Some(&first) = points.first() else {
                    return Point::ZERO;
                };
                points
                    .iter()
                    .skip(1)
                    .map(|&p| first - p)
                    .find(|d| d.normalized().is_some())
                    .unwrap_or(Point::ZERO)
            }
            ConnectorPath::Cubic {
                start,
                control1,
                control2,
                end,
            } => {
                let tangent = -cubic_tangent(*start, *control1, *control2, *end, START_TANGENT_T);
                if tangent.normalized().is_some() {
                    tangent
                } else {
                    *start - *end
                }
            }
        }
    }
}

/// Filled triangle drawn at a connector end.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arrowhead {
    pub tip: Point,
    pub left: Point,
    pub right: Point,
}

/// Everything a renderer needs to draw one connector.
#[derive(Debug, Clone, PartialEq)]
pub struct RoutedConnector {
    pub path: ConnectorPath,
    pub start_direction: Point,
    pub end_direction: Point,
    pub start_arrow: Option<Arrowhead>,
    pub end_arrow: Option<Arrowhead>,
    /// Stroke width in the same space as the path.
    pub stroke_width: f64,
}

/// Routes connectors for the three connector styles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConnectorRouter {
    pub min_standoff: f64,
    pub arrow_size_factor: f64,
}

impl ConnectorRouter {
    pub fn new() -> Self {
        Self {
            min_standoff: CONNECTOR_STANDOFF,
            arrow_size_factor: ARROW_SIZE_FACTOR,
        }
    }

    pub fn from_settings(settings: &RoutingSettings) -> Self {
        Self {
            min_standoff: settings.min_standoff,
            arrow_size_factor: settings.arrow_size_factor,
        }
    }

    /// Path between two points leaving/entering through the given anchors.
    pub fn route_path(
        &self,
        start: Point,
        start_anchor: AnchorPoint,
        end: Point,
        end_anchor: AnchorPoint,
        style: ConnectorStyle,
    ) -> ConnectorPath {
        match style {
            ConnectorStyle::Straight => ConnectorPath::Polyline(vec![start, end]),
            ConnectorStyle::Orthogonal => {
                ConnectorPath::Polyline(self.orthogonal_points(start, start_anchor, end, end_anchor))
            }
            ConnectorStyle::Curved => {
                let (control1, control2) = curve_controls(start, start_anchor, end, end_anchor);
                ConnectorPath::Cubic {
                    start,
                    control1,
                    control2,
                    end,
                }
            }
        }
    }

    /// Four-point route made of horizontal and vertical segments.
    ///
    /// - both anchors horizontal: turn on the vertical midline
    /// - both anchors vertical: turn on the horizontal midline
    /// - horizontal start: run out at least the stand-off distance, then
    ///   drop to the end's row
    /// - otherwise: the same with a vertical run out
    pub fn orthogonal_points(
        &self,
        start: Point,
        start_anchor: AnchorPoint,
        end: Point,
        end_anchor: AnchorPoint,
    ) -> Vec<Point> {
        let (a, b) = if start_anchor.is_horizontal() && end_anchor.is_horizontal() {
            let mid_x = (start.x + end.x) / 2.0;
            (Point::new(mid_x, start.y), Point::new(mid_x, end.y))
        } else if start_anchor.is_vertical() && end_anchor.is_vertical() {
            let mid_y = (start.y + end.y) / 2.0;
            (Point::new(start.x, mid_y), Point::new(end.x, mid_y))
        } else if start_anchor.is_horizontal() {
            let x = if start_anchor == AnchorPoint::Right {
                (start.x + self.min_standoff).max(end.x)
            } else {
                (start.x - self.min_standoff).min(end.x)
            };
            (Point::new(x, start.y), Point::new(x, end.y))
        } else {
            let y = if start_anchor == AnchorPoint::Bottom {
                (start.y + self.min_standoff).max(end.y)
            } else {
                (start.y - self.min_standoff).min(end.y)
            };
            (Point::new(start.x, y), Point::new(end.x, y))
        };
        vec![start, a, b, end]
    }

    /// Arrowhead with its apex at `tip` for a path travelling along
    /// `direction`. Returns `None` for a zero direction or a zero-size arrow.
    pub fn arrowhead(&self, tip: Point, direction: Point, stroke_width: f64) -> Option<Arrowhead> {
        let size = self.arrow_size_factor * stroke_width;
        if !(size > 0.0) {
            return None;
        }
        let back = -direction.normalized()?;
        Some(Arrowhead {
            tip,
            left: tip + back.rotated(ARROW_HALF_ANGLE) * size,
            right: tip + back.rotated(-ARROW_HALF_ANGLE) * size,
        })
    }

    /// Full route including arrowheads for the given policy.
    #[allow(clippy::too_many_arguments)]
    pub fn route(
        &self,
        start: Point,
        start_anchor: AnchorPoint,
        end: Point,
        end_anchor: AnchorPoint,
        style: ConnectorStyle,
        arrow_head: ArrowHead,
        stroke_width: f64,
    ) -> RoutedConnector {
        let path = self.route_path(start, start_anchor, end, end_anchor, style);
        let start_direction = path.start_direction();
        let end_direction = path.end_direction();

        let end_arrow = match arrow_head {
            ArrowHead::None => None,
            ArrowHead::End | ArrowHead::Both => {
                self.arrowhead(path.end(), end_direction, stroke_width)
            }
        };
        let start_arrow = match arrow_head {
            ArrowHead::Both => self.arrowhead(path.start(), start_direction, stroke_width),
            ArrowHead::None | ArrowHead::End => None,
        };

        RoutedConnector {
            path,
            start_direction,
            end_direction,
            start_arrow,
            end_arrow,
            stroke_width,
        }
    }

    /// Routes a connector of `diagram` in screen space.
    ///
    /// Returns `None` if an attached endpoint references a missing shape.
    pub fn route_connector(
        &self,
        connector: &Connector,
        diagram: &Diagram,
        viewport: &Viewport,
    ) -> Option<RoutedConnector> {
        let start = connector.start_position(diagram)?;
        let end = connector.end_position(diagram)?;
        Some(self.route(
            viewport.canvas_to_screen(start),
            connector.start.anchor(),
            viewport.canvas_to_screen(end),
            connector.end.anchor(),
            connector.style,
            connector.arrow_head,
            connector.stroke_width * viewport.scale(),
        ))
    }

    /// Routes the rubber-band line of a connector being drawn from an
    /// anchor of `shape` toward a free canvas point, in screen space.
    /// Style, arrow policy and stroke come from `template`.
    pub fn route_preview(
        &self,
        shape: &Shape,
        anchor: AnchorPoint,
        target: Point,
        template: &Connector,
        viewport: &Viewport,
    ) -> RoutedConnector {
        self.route(
            viewport.canvas_to_screen(shape.anchor_position(anchor)),
            anchor,
            viewport.canvas_to_screen(target),
            AnchorPoint::Center,
            template.style,
            template.arrow_head,
            template.stroke_width * viewport.scale(),
        )
    }
}

impl Default for ConnectorRouter {
    fn default() -> Self {
        Self::new()
    }
}

/// Control points offset from each endpoint along its anchor's outward
/// normal by a fixed fraction of the endpoint distance. `Center` anchors
/// keep the control point on the endpoint.
pub fn curve_controls(
    start: Point,
    start_anchor: AnchorPoint,
    end: Point,
    end_anchor: AnchorPoint,
) -> (Point, Point) {
    let distance = start.distance_to(&end) * CURVE_CONTROL_RATIO;
    (
        start + start_anchor.outward_normal() * distance,
        end + end_anchor.outward_normal() * distance,
    )
}

/// Point on a cubic Bézier at parameter `t`.
pub fn cubic_point(p0: Point, c1: Point, c2: Point, p1: Point, t: f64) -> Point {
    let u = 1.0 - t;
    p0 * (u * u * u) + c1 * (3.0 * u * u * t) + c2 * (3.0 * u * t * t) + p1 * (t * t * t)
}

/// Derivative of a cubic Bézier at parameter `t`.
pub fn cubic_tangent(p0: Point, c1: Point, c2: Point, p1: Point, t: f64) -> Point {
    let u = 1.0 - t;
    (c1 - p0) * (3.0 * u * u) + (c2 - c1) * (6.0 * u * t) + (p1 - c2) * (3.0 * t * t)
}
