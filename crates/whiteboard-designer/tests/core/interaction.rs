use proptest::prelude::*;
use whiteboard_designer::{
    resize_shape, AnchorPoint, CanvasState, Connector, ConnectorStyle, Document, DragKind,
    EditMode, GestureController, GestureFeedback, Point, PointerEvent, ResizeHandle, Selection,
    Shape, ShapeId, ShapeKind,
};

struct Harness {
    controller: GestureController,
    document: Document,
    canvas: CanvasState,
}

impl Harness {
    fn new() -> Self {
        Self {
            controller: GestureController::new(),
            document: Document::default(),
            canvas: CanvasState::new(),
        }
    }

    fn with_shape(x: f64, y: f64, width: f64, height: f64) -> (Self, ShapeId) {
        let mut harness = Self::new();
        let shape = Shape::new(ShapeKind::Rectangle, Point::new(x, y)).with_size(width, height);
        let id = shape.id;
        assert!(harness.document.add_shape(shape));
        (harness, id)
    }

    fn send(&mut self, event: PointerEvent) -> Vec<GestureFeedback> {
        self.controller
            .handle_event(event, &mut self.document, &mut self.canvas)
    }

    fn tap(&mut self, x: f64, y: f64) -> Vec<GestureFeedback> {
        let p = Point::new(x, y);
        let mut feedback = self.send(PointerEvent::down(1, p));
        feedback.extend(self.send(PointerEvent::up(1, p)));
        feedback
    }

    fn drag(&mut self, from: Point, to: Point) -> Vec<GestureFeedback> {
        let mut feedback = self.send(PointerEvent::down(1, from));
        feedback.extend(self.send(PointerEvent::moved(1, to)));
        feedback.extend(self.send(PointerEvent::up(1, to)));
        feedback
    }

    fn shape(&self, id: ShapeId) -> Shape {
        self.document.diagram().shape(id).cloned().expect("shape exists")
    }
}

#[test]
fn test_tap_adds_snapped_shape_and_returns_to_select() {
    let mut h = Harness::new();
    h.canvas.set_mode(EditMode::AddShape(ShapeKind::Diamond));

    let feedback = h.tap(105.0, 47.0);

    let shapes = &h.document.diagram().shapes;
    assert_eq!(shapes.len(), 1);
    let shape = &shapes[0];
    assert_eq!(shape.kind, ShapeKind::Diamond);
    assert_eq!(shape.position, Point::new(100.0, 40.0));
    assert_eq!((shape.width, shape.height), (150.0, 80.0));
    assert_eq!(h.canvas.mode(), EditMode::Select);
    assert_eq!(h.canvas.selection.selected_shape(), Some(shape.id));
    assert!(feedback.contains(&GestureFeedback::ShapeCreated(shape.id)));
    assert!(feedback.contains(&GestureFeedback::ModeChanged(EditMode::Select)));
}

#[test]
fn test_new_shape_goes_on_top() {
    let (mut h, first) = Harness::with_shape(0.0, 0.0, 100.0, 100.0);
    h.document.update_shape(first, |s| s.z_index = 7);
    h.canvas.set_mode(EditMode::AddShape(ShapeKind::Rectangle));
    h.tap(40.0, 40.0);

    let added = h.document.diagram().shapes.last().expect("added");
    assert_eq!(added.z_index, 8);
    // The new shape overlaps the old one and is hit first.
    let hit = h.document.diagram().shape_at(Point::new(50.0, 50.0));
    assert_eq!(hit.map(|s| s.id), Some(added.id));
}

#[test]
fn test_tap_uses_view_transform() {
    let mut h = Harness::new();
    h.canvas.viewport.set_scale(2.0);
    h.canvas.viewport.set_offset(Point::new(100.0, 0.0));
    h.canvas.set_mode(EditMode::AddShape(ShapeKind::Rectangle));

    // screen (300, 90) -> canvas (100, 45) -> snapped (100, 40)
    h.tap(300.0, 90.0);
    assert_eq!(h.document.diagram().shapes[0].position, Point::new(100.0, 40.0));
}

#[test]
fn test_tap_left_of_origin_snaps_toward_zero() {
    let mut h = Harness::new();
    h.canvas.set_mode(EditMode::AddShape(ShapeKind::Rectangle));
    h.tap(-5.0, -5.0);
    assert_eq!(h.document.diagram().shapes[0].position, Point::new(0.0, 0.0));

    h.canvas.set_mode(EditMode::AddShape(ShapeKind::Rectangle));
    h.tap(-45.0, -25.0);
    assert_eq!(h.document.diagram().shapes[1].position, Point::new(-40.0, -20.0));
}

#[test]
fn test_tap_selects_and_clears() {
    let (mut h, id) = Harness::with_shape(0.0, 0.0, 100.0, 60.0);

    let feedback = h.tap(50.0, 30.0);
    assert_eq!(h.canvas.selection.current(), Selection::Shape(id));
    assert_eq!(feedback, vec![GestureFeedback::SelectionChanged(Selection::Shape(id))]);

    // Small jitter is still a tap.
    let p = Point::new(500.0, 500.0);
    h.send(PointerEvent::down(1, p));
    h.send(PointerEvent::moved(1, Point::new(506.0, 505.0)));
    h.send(PointerEvent::up(1, Point::new(506.0, 505.0)));
    assert_eq!(h.canvas.selection.current(), Selection::None);
}

#[test]
fn test_tap_selects_connector_near_path() {
    let mut h = Harness::new();
    let a = Shape::new(ShapeKind::Rectangle, Point::new(0.0, 0.0)).with_size(100.0, 100.0);
    let b = Shape::new(ShapeKind::Rectangle, Point::new(300.0, 0.0)).with_size(100.0, 100.0);
    let connector = Connector::between(a.id, AnchorPoint::Right, b.id, AnchorPoint::Left)
        .with_style(ConnectorStyle::Straight);
    let connector_id = connector.id;
    h.document.add_shape(a);
    h.document.add_shape(b);
    h.document.add_connector(connector);

    h.tap(200.0, 62.0);
    assert_eq!(h.canvas.selection.current(), Selection::Connector(connector_id));

    h.tap(200.0, 90.0);
    assert_eq!(h.canvas.selection.current(), Selection::None);
}

#[test]
fn test_move_drag_previews_then_snaps_once() {
    let (mut h, id) = Harness::with_shape(0.0, 0.0, 100.0, 60.0);
    let depth = h.document.history().undo_depth();

    h.send(PointerEvent::down(1, Point::new(50.0, 30.0)));
    // Within the threshold nothing moves.
    h.send(PointerEvent::moved(1, Point::new(55.0, 30.0)));
    assert_eq!(h.shape(id).position, Point::ZERO);

    let feedback = h.send(PointerEvent::moved(1, Point::new(83.0, 47.0)));
    assert!(feedback.contains(&GestureFeedback::DragStarted(DragKind::Move)));
    assert!(h.canvas.is_dragging);
    assert_eq!(h.shape(id).position, Point::new(33.0, 17.0));
    assert_eq!(h.canvas.selection.selected_shape(), Some(id));

    let feedback = h.send(PointerEvent::up(1, Point::new(83.0, 47.0)));
    assert_eq!(
        feedback,
        vec![GestureFeedback::DragFinished {
            kind: DragKind::Move,
            changed: true
        }]
    );
    assert_eq!(h.shape(id).position, Point::new(20.0, 0.0));
    assert!(!h.canvas.is_dragging);
    assert_eq!(h.document.history().undo_depth(), depth + 1);

    assert!(h.document.undo());
    assert_eq!(h.shape(id).position, Point::ZERO);
}

#[test]
fn test_move_drag_is_absolute_at_zoom() {
    let (mut h, id) = Harness::with_shape(0.0, 0.0, 100.0, 60.0);
    h.canvas.viewport.set_scale(2.0);

    h.send(PointerEvent::down(1, Point::new(100.0, 60.0)));
    h.send(PointerEvent::moved(1, Point::new(140.0, 60.0)));
    h.send(PointerEvent::moved(1, Point::new(180.0, 100.0)));
    assert_eq!(h.shape(id).position, Point::new(40.0, 20.0));
    h.send(PointerEvent::up(1, Point::new(180.0, 100.0)));
    assert_eq!(h.shape(id).position, Point::new(40.0, 20.0));
}

#[test]
fn test_move_back_to_start_records_nothing() {
    let (mut h, id) = Harness::with_shape(0.0, 0.0, 100.0, 60.0);
    let depth = h.document.history().undo_depth();

    h.send(PointerEvent::down(1, Point::new(50.0, 30.0)));
    h.send(PointerEvent::moved(1, Point::new(90.0, 30.0)));
    h.send(PointerEvent::moved(1, Point::new(55.0, 35.0)));
    let feedback = h.send(PointerEvent::up(1, Point::new(55.0, 35.0)));

    assert_eq!(h.shape(id).position, Point::ZERO);
    assert_eq!(h.document.history().undo_depth(), depth);
    assert!(feedback.contains(&GestureFeedback::DragFinished {
        kind: DragKind::Move,
        changed: false
    }));
}

#[test]
fn test_resize_from_handle_snaps_size() {
    let (mut h, id) = Harness::with_shape(0.0, 0.0, 100.0, 60.0);
    h.tap(50.0, 30.0);

    let feedback = h.send(PointerEvent::down(1, Point::new(100.0, 60.0)));
    assert!(feedback.is_empty());
    let feedback = h.send(PointerEvent::moved(1, Point::new(130.0, 80.0)));
    assert!(feedback.contains(&GestureFeedback::DragStarted(DragKind::Resize(
        ResizeHandle::BottomRight
    ))));
    assert!(h.canvas.is_resizing);
    assert_eq!(h.canvas.active_handle, Some(ResizeHandle::BottomRight));
    let preview = h.shape(id);
    assert_eq!((preview.width, preview.height), (130.0, 80.0));

    h.send(PointerEvent::up(1, Point::new(130.0, 80.0)));
    let shape = h.shape(id);
    assert_eq!(shape.position, Point::ZERO);
    assert_eq!((shape.width, shape.height), (120.0, 80.0));
    assert!(!h.canvas.is_resizing);
    assert_eq!(h.canvas.active_handle, None);

    h.document.undo();
    let shape = h.shape(id);
    assert_eq!((shape.width, shape.height), (100.0, 60.0));
}

#[test]
fn test_resize_cannot_shrink_below_minimum() {
    let (mut h, id) = Harness::with_shape(100.0, 100.0, 200.0, 200.0);
    h.tap(200.0, 200.0);

    let feedback = h.drag(Point::new(100.0, 200.0), Point::new(400.0, 200.0));
    assert!(feedback.contains(&GestureFeedback::DragStarted(DragKind::Resize(
        ResizeHandle::Left
    ))));
    let shape = h.shape(id);
    assert_eq!(shape.width, 40.0);
    assert_eq!(shape.position.x, 260.0);
    assert_eq!(shape.height, 200.0);
}

#[test]
fn test_handles_only_grab_selected_shape() {
    let (mut h, id) = Harness::with_shape(0.0, 0.0, 100.0, 60.0);
    // Not selected: pressing on the corner moves the shape instead.
    let feedback = h.drag(Point::new(100.0, 60.0), Point::new(140.0, 60.0));
    assert!(feedback.contains(&GestureFeedback::DragStarted(DragKind::Move)));
    let shape = h.shape(id);
    assert_eq!((shape.width, shape.height), (100.0, 60.0));
    assert_eq!(shape.position, Point::new(40.0, 0.0));
}

#[test]
fn test_pan_mode_drag_moves_view() {
    let mut h = Harness::new();
    h.canvas.set_mode(EditMode::Pan);

    h.send(PointerEvent::down(1, Point::ZERO));
    let feedback = h.send(PointerEvent::moved(1, Point::new(20.0, 0.0)));
    assert!(feedback.contains(&GestureFeedback::DragStarted(DragKind::Pan)));
    assert!(feedback.contains(&GestureFeedback::ViewChanged));
    h.send(PointerEvent::moved(1, Point::new(50.0, 10.0)));
    let feedback = h.send(PointerEvent::up(1, Point::new(50.0, 10.0)));

    assert_eq!(h.canvas.viewport.offset(), Point::new(50.0, 10.0));
    assert_eq!(
        feedback,
        vec![GestureFeedback::DragFinished {
            kind: DragKind::Pan,
            changed: true
        }]
    );
    assert!(!h.document.can_undo());
}

#[test]
fn test_select_drag_on_empty_canvas_is_inert() {
    let (mut h, id) = Harness::with_shape(0.0, 0.0, 100.0, 60.0);
    h.tap(50.0, 30.0);

    let feedback = h.drag(Point::new(400.0, 400.0), Point::new(500.0, 450.0));
    assert!(feedback.is_empty());
    assert_eq!(h.canvas.viewport.offset(), Point::ZERO);
    assert_eq!(h.canvas.selection.selected_shape(), Some(id));
}

#[test]
fn test_pinch_zooms_about_centroid() {
    let mut h = Harness::new();
    h.canvas.set_mode(EditMode::AddShape(ShapeKind::Rectangle));

    h.send(PointerEvent::down(1, Point::new(100.0, 100.0)));
    let feedback = h.send(PointerEvent::down(2, Point::new(200.0, 100.0)));
    assert_eq!(feedback, vec![GestureFeedback::DragStarted(DragKind::Pinch)]);
    assert_eq!(h.controller.active_pointers(), 2);

    let feedback = h.send(PointerEvent::moved(2, Point::new(300.0, 100.0)));
    assert_eq!(feedback, vec![GestureFeedback::ViewChanged]);
    assert_eq!(h.canvas.viewport.scale(), 2.0);
    assert_eq!(h.canvas.viewport.offset(), Point::new(-150.0, -100.0));

    assert!(h.send(PointerEvent::up(2, Point::new(300.0, 100.0))).is_empty());
    let feedback = h.send(PointerEvent::up(1, Point::new(100.0, 100.0)));
    assert_eq!(
        feedback,
        vec![GestureFeedback::DragFinished {
            kind: DragKind::Pinch,
            changed: true
        }]
    );

    // A pinch never ends as a tap.
    assert!(h.document.diagram().shapes.is_empty());
    assert!(!h.controller.is_active());
}

#[test]
fn test_second_pointer_rolls_back_move() {
    let (mut h, id) = Harness::with_shape(0.0, 0.0, 100.0, 60.0);

    h.send(PointerEvent::down(1, Point::new(50.0, 30.0)));
    h.send(PointerEvent::moved(1, Point::new(90.0, 30.0)));
    assert_eq!(h.shape(id).position, Point::new(40.0, 0.0));

    h.send(PointerEvent::down(2, Point::new(200.0, 200.0)));
    assert_eq!(h.shape(id).position, Point::ZERO);
    assert!(!h.canvas.is_dragging);

    h.send(PointerEvent::up(1, Point::new(90.0, 30.0)));
    h.send(PointerEvent::up(2, Point::new(200.0, 200.0)));
    assert_eq!(h.shape(id).position, Point::ZERO);
    assert_eq!(h.document.history().undo_depth(), 1);
}

#[test]
fn test_connector_two_taps() {
    let mut h = Harness::new();
    let a = Shape::new(ShapeKind::Rectangle, Point::new(0.0, 0.0)).with_size(100.0, 100.0);
    let b = Shape::new(ShapeKind::Rectangle, Point::new(300.0, 0.0)).with_size(100.0, 100.0);
    let (a_id, b_id) = (a.id, b.id);
    h.document.add_shape(a);
    h.document.add_shape(b);
    h.canvas.set_mode(EditMode::AddConnector);

    let feedback = h.tap(95.0, 50.0);
    assert_eq!(
        feedback,
        vec![GestureFeedback::ConnectorPending {
            shape_id: a_id,
            anchor: AnchorPoint::Right
        }]
    );
    assert_eq!(h.canvas.pending_connector(), Some((a_id, AnchorPoint::Right)));

    let feedback = h.tap(305.0, 50.0);
    let connector = h.document.diagram().connectors[0].clone();
    assert_eq!(feedback, vec![GestureFeedback::ConnectorCreated(connector.id)]);
    assert_eq!(connector.start.shape_id(), Some(a_id));
    assert_eq!(connector.start.anchor(), AnchorPoint::Right);
    assert_eq!(connector.end.shape_id(), Some(b_id));
    assert_eq!(connector.end.anchor(), AnchorPoint::Left);
    assert_eq!(h.canvas.pending_connector(), None);
    assert_eq!(h.canvas.mode(), EditMode::AddConnector);
}

#[test]
fn test_connector_to_same_shape_rejected() {
    let (mut h, id) = Harness::with_shape(0.0, 0.0, 100.0, 100.0);
    h.canvas.set_mode(EditMode::AddConnector);

    h.tap(95.0, 50.0);
    let feedback = h.tap(5.0, 50.0);
    assert_eq!(feedback, vec![GestureFeedback::SelfLoopRejected(id)]);
    assert!(h.document.diagram().connectors.is_empty());
    assert_eq!(h.canvas.pending_connector(), None);
}

#[test]
fn test_connector_tap_on_empty_canvas_does_nothing() {
    let (mut h, id) = Harness::with_shape(0.0, 0.0, 100.0, 100.0);
    h.canvas.set_mode(EditMode::AddConnector);

    assert!(h.tap(500.0, 500.0).is_empty());
    h.tap(50.0, 2.0);
    assert!(h.tap(500.0, 500.0).is_empty());
    assert_eq!(h.canvas.pending_connector(), Some((id, AnchorPoint::Top)));
}

#[test]
fn test_connector_preview_follows_drag() {
    let (mut h, _) = Harness::with_shape(0.0, 0.0, 100.0, 100.0);
    h.canvas.set_mode(EditMode::AddConnector);
    h.tap(95.0, 50.0);

    h.send(PointerEvent::down(1, Point::new(150.0, 200.0)));
    let feedback = h.send(PointerEvent::moved(1, Point::new(200.0, 250.0)));
    assert!(feedback.contains(&GestureFeedback::DragStarted(DragKind::ConnectorPreview)));
    assert_eq!(h.canvas.connector_preview, Some(Point::new(200.0, 250.0)));

    let template = Connector::between(
        ShapeId::new(),
        AnchorPoint::Top,
        ShapeId::new(),
        AnchorPoint::Top,
    );
    let routed = h
        .canvas
        .connector_preview_route(h.document.diagram(), h.controller.router(), &template)
        .expect("preview route");
    assert_eq!(routed.path.start(), Point::new(100.0, 50.0));
    assert_eq!(routed.path.end(), Point::new(200.0, 250.0));

    h.send(PointerEvent::up(1, Point::new(200.0, 250.0)));
    assert_eq!(h.canvas.connector_preview, None);
    assert!(h.document.diagram().connectors.is_empty());
    assert!(h.canvas.pending_connector().is_some());
}

#[test]
fn test_mode_change_drops_pending_connector() {
    let (mut h, _) = Harness::with_shape(0.0, 0.0, 100.0, 100.0);
    h.canvas.set_mode(EditMode::AddConnector);
    h.tap(95.0, 50.0);
    assert!(h.canvas.pending_connector().is_some());

    h.canvas.set_mode(EditMode::Select);
    assert_eq!(h.canvas.pending_connector(), None);
}

#[test]
fn test_abort_restores_state() {
    let (mut h, id) = Harness::with_shape(0.0, 0.0, 100.0, 60.0);
    let depth = h.document.history().undo_depth();

    h.send(PointerEvent::down(1, Point::new(50.0, 30.0)));
    h.send(PointerEvent::moved(1, Point::new(150.0, 130.0)));
    assert_eq!(h.canvas.selection.selected_shape(), Some(id));

    assert!(h.controller.abort(&mut h.document, &mut h.canvas));
    assert_eq!(h.shape(id).position, Point::ZERO);
    assert_eq!(h.canvas.selection.current(), Selection::None);
    assert!(!h.canvas.is_dragging);
    assert_eq!(h.document.history().undo_depth(), depth);

    // The rest of the aborted gesture is ignored.
    assert!(h.send(PointerEvent::up(1, Point::new(150.0, 130.0))).is_empty());
    assert!(!h.controller.abort(&mut h.document, &mut h.canvas));
}

#[test]
fn test_cancel_finishes_like_release() {
    let (mut h, id) = Harness::with_shape(0.0, 0.0, 100.0, 60.0);
    h.send(PointerEvent::down(1, Point::new(50.0, 30.0)));
    h.send(PointerEvent::moved(1, Point::new(90.0, 30.0)));
    h.send(PointerEvent::cancel(1, Point::new(90.0, 30.0)));

    assert!(!h.controller.is_active());
    assert_eq!(h.shape(id).position, Point::new(40.0, 0.0));
}

#[test]
fn test_stray_events_are_ignored() {
    let mut h = Harness::new();
    assert!(h.send(PointerEvent::moved(3, Point::new(10.0, 10.0))).is_empty());
    assert!(h.send(PointerEvent::up(3, Point::new(10.0, 10.0))).is_empty());
    assert!(!h.controller.is_active());
}

proptest! {
    #[test]
    fn prop_resize_respects_minimum(
        handle_index in 0usize..8,
        dx in -2000.0f64..2000.0,
        dy in -2000.0f64..2000.0,
        width in 40.0f64..400.0,
        height in 40.0f64..400.0,
    ) {
        let handle = ResizeHandle::ALL[handle_index];
        let shape = Shape::new(ShapeKind::Rectangle, Point::new(10.0, 20.0)).with_size(width, height);
        let resized = resize_shape(&shape, handle, Point::new(dx, dy), 40.0);

        prop_assert!(resized.width >= 40.0 - 1e-9);
        prop_assert!(resized.height >= 40.0 - 1e-9);
        if !handle.moves_left() && !handle.moves_right() {
            prop_assert!((resized.width - width).abs() < 1e-9);
            prop_assert_eq!(resized.position.x, 10.0);
        }
        if !handle.moves_top() && !handle.moves_bottom() {
            prop_assert!((resized.height - height).abs() < 1e-9);
            prop_assert_eq!(resized.position.y, 20.0);
        }
    }

    #[test]
    fn prop_released_resize_is_at_least_minimum(
        dx in -600.0f64..600.0,
        dy in -600.0f64..600.0,
    ) {
        let (mut h, id) = Harness::with_shape(100.0, 100.0, 100.0, 100.0);
        h.tap(150.0, 150.0);
        let start = Point::new(100.0, 100.0);
        h.drag(start, start + Point::new(dx, dy));

        let shape = h.shape(id);
        prop_assert!(shape.width >= 40.0);
        prop_assert!(shape.height >= 40.0);
    }
}
