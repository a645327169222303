use whiteboard_designer::{
    AnchorPoint, ArrowHead, Connector, ConnectorPath, ConnectorRouter, ConnectorStyle, Diagram,
    Point, Shape, ShapeKind, Viewport,
};

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

fn polyline(path: &ConnectorPath) -> &[Point] {
    match path {
        ConnectorPath::Polyline(points) => points,
        other => panic!("expected a polyline, got {:?}", other),
    }
}

#[test]
fn test_orthogonal_both_horizontal_uses_vertical_midline() {
    let router = ConnectorRouter::new();
    let points = router.orthogonal_points(
        Point::new(100.0, 50.0),
        AnchorPoint::Right,
        Point::new(300.0, 150.0),
        AnchorPoint::Left,
    );
    assert_eq!(
        points,
        vec![
            Point::new(100.0, 50.0),
            Point::new(200.0, 50.0),
            Point::new(200.0, 150.0),
            Point::new(300.0, 150.0),
        ]
    );
}

#[test]
fn test_orthogonal_both_vertical_uses_horizontal_midline() {
    let router = ConnectorRouter::new();
    let points = router.orthogonal_points(
        Point::new(50.0, 100.0),
        AnchorPoint::Bottom,
        Point::new(150.0, 300.0),
        AnchorPoint::Top,
    );
    assert_eq!(
        points,
        vec![
            Point::new(50.0, 100.0),
            Point::new(50.0, 200.0),
            Point::new(150.0, 200.0),
            Point::new(150.0, 300.0),
        ]
    );
}

#[test]
fn test_orthogonal_mixed_runs_out_by_standoff() {
    let router = ConnectorRouter::new();
    let points = router.orthogonal_points(
        Point::new(100.0, 50.0),
        AnchorPoint::Right,
        Point::new(120.0, 200.0),
        AnchorPoint::Top,
    );
    assert_eq!(points[1], Point::new(130.0, 50.0));
    assert_eq!(points[2], Point::new(130.0, 200.0));

    // Far target: run straight to the target column.
    let points = router.orthogonal_points(
        Point::new(100.0, 50.0),
        AnchorPoint::Right,
        Point::new(400.0, 200.0),
        AnchorPoint::Top,
    );
    assert_eq!(points[1], Point::new(400.0, 50.0));

    let points = router.orthogonal_points(
        Point::new(100.0, 50.0),
        AnchorPoint::Top,
        Point::new(200.0, 40.0),
        AnchorPoint::Left,
    );
    assert_eq!(points[1], Point::new(100.0, 20.0));
    assert_eq!(points[2], Point::new(200.0, 20.0));
}

#[test]
fn test_orthogonal_segments_are_axis_aligned() {
    let router = ConnectorRouter::new();
    let anchors = [
        AnchorPoint::Top,
        AnchorPoint::Bottom,
        AnchorPoint::Left,
        AnchorPoint::Right,
    ];
    for &a in &anchors {
        for &b in &anchors {
            let points =
                router.orthogonal_points(Point::new(10.0, 20.0), a, Point::new(250.0, -80.0), b);
            for w in points.windows(2) {
                assert!(w[0].x == w[1].x || w[0].y == w[1].y, "{:?} -> {:?}", a, b);
            }
        }
    }
}

#[test]
fn test_straight_route_end_arrow() {
    let router = ConnectorRouter::new();
    let start = Point::new(0.0, 0.0);
    let end = Point::new(100.0, 0.0);
    let routed = router.route(
        start,
        AnchorPoint::Right,
        end,
        AnchorPoint::Left,
        ConnectorStyle::Straight,
        ArrowHead::End,
        2.0,
    );

    assert_eq!(polyline(&routed.path), &[start, end]);
    assert!(routed.start_arrow.is_none());
    let arrow = routed.end_arrow.expect("end arrow");
    assert_eq!(arrow.tip, end);
    // Arrow length is 5x the stroke width, wings mirror across the path.
    assert!(close(arrow.tip.distance_to(&arrow.left), 10.0));
    assert!(close(arrow.tip.distance_to(&arrow.right), 10.0));
    assert!(arrow.left.x < end.x && arrow.right.x < end.x);
    assert!(close(arrow.left.y, -arrow.right.y));
}

#[test]
fn test_arrow_policies() {
    let router = ConnectorRouter::new();
    let route = |policy| {
        router.route(
            Point::new(0.0, 0.0),
            AnchorPoint::Bottom,
            Point::new(0.0, 100.0),
            AnchorPoint::Top,
            ConnectorStyle::Straight,
            policy,
            2.0,
        )
    };

    let none = route(ArrowHead::None);
    assert!(none.start_arrow.is_none() && none.end_arrow.is_none());

    let both = route(ArrowHead::Both);
    let start_arrow = both.start_arrow.expect("start arrow");
    assert_eq!(start_arrow.tip, Point::new(0.0, 0.0));
    // Start arrow points back toward the start tip.
    assert!(start_arrow.left.y > 0.0);
    assert!(both.end_arrow.is_some());
}

#[test]
fn test_curved_route_controls_and_directions() {
    let router = ConnectorRouter::new();
    let routed = router.route(
        Point::new(0.0, 0.0),
        AnchorPoint::Right,
        Point::new(100.0, 0.0),
        AnchorPoint::Left,
        ConnectorStyle::Curved,
        ArrowHead::Both,
        2.0,
    );

    match routed.path {
        ConnectorPath::Cubic {
            control1, control2, ..
        } => {
            assert_eq!(control1, Point::new(40.0, 0.0));
            assert_eq!(control2, Point::new(60.0, 0.0));
        }
        ref other => panic!("expected a cubic, got {:?}", other),
    }
    assert!(routed.end_direction.x > 0.0);
    assert!(routed.start_direction.x < 0.0);
    assert!(routed.start_arrow.is_some());
}

#[test]
fn test_curve_distance_uses_sampled_path() {
    let router = ConnectorRouter::new();
    let path = router.route_path(
        Point::new(0.0, 0.0),
        AnchorPoint::Bottom,
        Point::new(200.0, 0.0),
        AnchorPoint::Bottom,
        ConnectorStyle::Curved,
    );
    // The curve bows downwards; its midpoint is at y = 0.75 * 80.
    assert!(path.distance_to(Point::new(100.0, 60.0)) < 1.0);
    assert!(path.distance_to(Point::new(100.0, 0.0)) > 50.0);
}

#[test]
fn test_route_connector_in_screen_space() {
    let mut diagram = Diagram::default();
    let a = Shape::new(ShapeKind::Rectangle, Point::new(0.0, 0.0)).with_size(100.0, 100.0);
    let b = Shape::new(ShapeKind::Rectangle, Point::new(300.0, 0.0)).with_size(100.0, 100.0);
    let connector = Connector::between(a.id, AnchorPoint::Right, b.id, AnchorPoint::Left)
        .with_style(ConnectorStyle::Straight);
    diagram.shapes.push(a);
    diagram.shapes.push(b);

    let mut viewport = Viewport::new();
    viewport.set_scale(2.0);
    viewport.set_offset(Point::new(10.0, 0.0));

    let router = ConnectorRouter::new();
    let routed = router
        .route_connector(&connector, &diagram, &viewport)
        .expect("both shapes exist");
    assert_eq!(routed.path.start(), Point::new(210.0, 100.0));
    assert_eq!(routed.path.end(), Point::new(610.0, 100.0));
    assert_eq!(routed.stroke_width, 4.0);
}

#[test]
fn test_route_connector_dangling_endpoint() {
    let mut diagram = Diagram::default();
    let a = Shape::new(ShapeKind::Rectangle, Point::ZERO);
    let ghost = Shape::new(ShapeKind::Rectangle, Point::ZERO);
    let connector = Connector::between(a.id, AnchorPoint::Right, ghost.id, AnchorPoint::Left);
    diagram.shapes.push(a);

    let router = ConnectorRouter::new();
    assert!(router
        .route_connector(&connector, &diagram, &Viewport::new())
        .is_none());
}
