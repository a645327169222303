//! Pure geometric queries over shapes.
//!
//! All queries work in canvas space and never mutate. Hit-testing uses the
//! bounding box for every [`ShapeKind`](crate::model::ShapeKind), including
//! ellipses and diamonds.

use crate::model::{AnchorPoint, Point, Rect, ResizeHandle, Shape};

impl Shape {
    /// Axis-aligned bounds derived from position and size.
    pub fn bounds(&self) -> Rect {
        Rect::from_origin_size(self.position, self.width, self.height)
    }

    pub fn center(&self) -> Point {
        self.bounds().center()
    }

    /// Canvas coordinate of an anchor: the midpoint of the matching edge,
    /// or the center.
    pub fn anchor_position(&self, anchor: AnchorPoint) -> Point {
        let b = self.bounds();
        let c = b.center();
        match anchor {
            AnchorPoint::Top => Point::new(c.x, b.min.y),
            AnchorPoint::Bottom => Point::new(c.x, b.max.y),
            AnchorPoint::Left => Point::new(b.min.x, c.y),
            AnchorPoint::Right => Point::new(b.max.x, c.y),
            AnchorPoint::Center => c,
        }
    }

    /// Bounding-box containment, edges inclusive.
    pub fn contains_point(&self, point: Point) -> bool {
        self.bounds().contains(point)
    }

    /// Canvas coordinate of a resize handle.
    pub fn handle_position(&self, handle: ResizeHandle) -> Point {
        let b = self.bounds();
        let c = b.center();
        match handle {
            ResizeHandle::TopLeft => b.min,
            ResizeHandle::TopRight => Point::new(b.max.x, b.min.y),
            ResizeHandle::BottomLeft => Point::new(b.min.x, b.max.y),
            ResizeHandle::BottomRight => b.max,
            ResizeHandle::Top => Point::new(c.x, b.min.y),
            ResizeHandle::Bottom => Point::new(c.x, b.max.y),
            ResizeHandle::Left => Point::new(b.min.x, c.y),
            ResizeHandle::Right => Point::new(b.max.x, c.y),
        }
    }

    /// First handle in [`ResizeHandle::ALL`] order within `tolerance` of
    /// `point`.
    pub fn resize_handle_at(&self, point: Point, tolerance: f64) -> Option<ResizeHandle> {
        ResizeHandle::ALL
            .into_iter()
            .find(|&handle| self.handle_position(handle).distance_to(&point) <= tolerance)
    }

    /// Edge anchor closest to `point`; ties resolve in
    /// [`AnchorPoint::SIDES`] order.
    pub fn nearest_anchor(&self, point: Point) -> AnchorPoint {
        let mut best = AnchorPoint::Top;
        let mut best_distance = f64::INFINITY;
        for anchor in AnchorPoint::SIDES {
            let distance = self.anchor_position(anchor).distance_to(&point);
            if distance < best_distance {
                best = anchor;
                best_distance = distance;
            }
        }
        best
    }
}

impl ResizeHandle {
    /// Canvas coordinate of this handle on `shape`.
    pub fn position(self, shape: &Shape) -> Point {
        shape.handle_position(self)
    }
}

/// Distance from `point` to the segment `a`-`b`.
///
/// A degenerate segment (`a == b`) yields the distance to `a`.
pub fn distance_to_segment(point: Point, a: Point, b: Point) -> f64 {
    let ab = b - a;
    let len_sq = ab.dot(&ab);
    if len_sq <= f64::EPSILON {
        return point.distance_to(&a);
    }
    let t = ((point - a).dot(&ab) / len_sq).clamp(0.0, 1.0);
    point.distance_to(&(a + ab * t))
}

/// Distance from `point` to the closest segment of a polyline.
///
/// Returns infinity for an empty polyline.
pub fn distance_to_polyline(point: Point, points: &[Point]) -> f64 {
    match points {
        [] => f64::INFINITY,
        [only] => point.distance_to(only),
        _ => points
            .windows(2)
            .map(|w| distance_to_segment(point, w[0], w[1]))
            .fold(f64::INFINITY, f64::min),
    }
}
