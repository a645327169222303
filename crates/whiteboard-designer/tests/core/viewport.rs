use proptest::prelude::*;
use whiteboard_designer::{Grid, Point, Viewport};
use whiteboard_settings::ViewSettings;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9 * (1.0 + a.abs().max(b.abs()))
}

#[test]
fn test_viewport_defaults() {
    let viewport = Viewport::new();
    assert_eq!(viewport.scale(), 1.0);
    assert_eq!(viewport.offset(), Point::ZERO);
    assert_eq!(viewport.scale_limits(), (0.25, 3.0));
}

#[test]
fn test_coordinate_conversion() {
    let mut viewport = Viewport::new();
    viewport.set_scale(2.0);
    viewport.set_offset(Point::new(10.0, 20.0));

    assert_eq!(viewport.canvas_to_screen(Point::new(5.0, 5.0)), Point::new(20.0, 30.0));
    assert_eq!(viewport.screen_to_canvas(Point::new(20.0, 30.0)), Point::new(5.0, 5.0));
    assert_eq!(
        viewport.screen_delta_to_canvas(Point::new(10.0, -4.0)),
        Point::new(5.0, -2.0)
    );
    assert_eq!(viewport.screen_length_to_canvas(50.0), 25.0);
}

#[test]
fn test_zoom_keeps_pivot_fixed() {
    let mut viewport = Viewport::new();
    let pivot = Point::new(100.0, 50.0);
    let before = viewport.canvas_to_screen(pivot);

    assert!(viewport.zoom(1.5, pivot));
    assert_eq!(viewport.scale(), 1.5);
    assert_eq!(viewport.canvas_to_screen(pivot), before);
    assert_eq!(viewport.offset(), Point::new(-50.0, -25.0));
}

#[test]
fn test_zoom_clamps_to_limits() {
    let mut viewport = Viewport::new();
    assert!(viewport.zoom(100.0, Point::new(10.0, 10.0)));
    assert_eq!(viewport.scale(), 3.0);

    let offset = viewport.offset();
    assert!(!viewport.zoom(2.0, Point::new(500.0, 500.0)));
    assert_eq!(viewport.offset(), offset);

    assert!(viewport.zoom(0.001, Point::ZERO));
    assert_eq!(viewport.scale(), 0.25);
}

#[test]
fn test_reversed_scale_limits_are_swapped() {
    let settings = ViewSettings {
        min_scale: 3.0,
        max_scale: 0.25,
        ..ViewSettings::default()
    };
    let mut viewport = Viewport::from_settings(&settings);
    assert_eq!(viewport.scale_limits(), (0.25, 3.0));
    assert_eq!(viewport.scale(), 1.0);
    assert!(viewport.zoom(10.0, Point::ZERO));
    assert_eq!(viewport.scale(), 3.0);

    let broken = ViewSettings {
        min_scale: f64::NAN,
        max_scale: -1.0,
        ..ViewSettings::default()
    };
    assert_eq!(Viewport::from_settings(&broken).scale_limits(), (0.25, 3.0));
}

#[test]
fn test_zoom_rejects_bad_factor() {
    let mut viewport = Viewport::new();
    assert!(!viewport.zoom(0.0, Point::ZERO));
    assert!(!viewport.zoom(-2.0, Point::ZERO));
    assert!(!viewport.zoom(f64::NAN, Point::ZERO));
    assert_eq!(viewport.scale(), 1.0);
}

#[test]
fn test_zoom_steps() {
    let mut viewport = Viewport::new();
    assert!(viewport.zoom_in());
    assert_eq!(viewport.scale(), 1.25);
    assert!(viewport.zoom_out());
    assert!(approx_eq(viewport.scale(), 1.0));
}

#[test]
fn test_pan_and_reset() {
    let mut viewport = Viewport::new();
    viewport.pan(Point::new(30.0, -10.0));
    viewport.pan(Point::new(f64::INFINITY, 0.0));
    assert_eq!(viewport.offset(), Point::new(30.0, -10.0));

    viewport.zoom_in();
    viewport.reset();
    assert_eq!(viewport.scale(), 1.0);
    assert_eq!(viewport.offset(), Point::ZERO);
}

#[test]
fn test_grid_snaps_toward_zero() {
    let grid = Grid::new(20.0, true);
    assert_eq!(grid.snap_value(39.9), 20.0);
    assert_eq!(grid.snap_value(40.0), 40.0);
    assert_eq!(grid.snap_value(-5.0), 0.0);
    assert_eq!(grid.snap_value(-45.0), -40.0);
    assert_eq!(grid.snap_point(Point::new(105.0, 47.0)), Point::new(100.0, 40.0));
}

#[test]
fn test_grid_snap_size_minimum() {
    let grid = Grid::new(20.0, true);
    assert_eq!(grid.snap_size(10.0), 20.0);
    assert_eq!(grid.snap_size(59.0), 40.0);
}

#[test]
fn test_grid_disabled() {
    let grid = Grid::new(20.0, false);
    assert_eq!(grid.snap_value(13.7), 13.7);
    assert_eq!(grid.snap_size(5.0), 20.0);
    assert_eq!(grid.snap_size(33.0), 33.0);

    let zero = Grid::new(0.0, true);
    assert_eq!(zero.snap_value(13.7), 13.7);
}

proptest! {
    #[test]
    fn prop_screen_canvas_round_trip(
        scale in 0.25f64..3.0,
        ox in -1000.0f64..1000.0,
        oy in -1000.0f64..1000.0,
        x in -5000.0f64..5000.0,
        y in -5000.0f64..5000.0,
    ) {
        let mut viewport = Viewport::new();
        viewport.set_scale(scale);
        viewport.set_offset(Point::new(ox, oy));

        let p = Point::new(x, y);
        let back = viewport.screen_to_canvas(viewport.canvas_to_screen(p));
        prop_assert!((back.x - p.x).abs() < 1e-6);
        prop_assert!((back.y - p.y).abs() < 1e-6);
    }

    #[test]
    fn prop_zoom_stays_in_limits(factors in proptest::collection::vec(0.01f64..10.0, 1..20)) {
        let mut viewport = Viewport::new();
        for factor in factors {
            viewport.zoom(factor, Point::new(123.0, 45.0));
            prop_assert!(viewport.scale() >= 0.25 && viewport.scale() <= 3.0);
        }
    }
}
