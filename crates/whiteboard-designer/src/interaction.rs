//! Pointer gesture interpretation.
//!
//! [`GestureController`] turns a stream of [`PointerEvent`]s into edits on a
//! [`Document`] and changes to a [`CanvasState`]. One gesture runs from the
//! first pointer going down until the last pointer is released.
//!
//! A single pointer that stays within the tap threshold is a tap and acts
//! on release according to the edit mode. Once it moves further it becomes
//! a drag of exactly one kind, fixed at that moment. A second pointer turns
//! the gesture into a pinch until every pointer is up.
//!
//! Move and resize follow the finger absolutely: every update recomputes
//! the shape from its pre-gesture snapshot and the canvas displacement since
//! the pointer went down. Intermediate states are previewed on the document
//! without touching history; release snaps to the grid and records at most
//! one edit.

use std::collections::BTreeMap;
use std::fmt;

use whiteboard_settings::{ConnectorDefaults, EditorConfig, InteractionSettings, ShapeDefaults};

use crate::canvas_state::{CanvasState, EditMode};
use crate::document::Document;
use crate::model::{
    AnchorPoint, Connector, ConnectorId, Endpoint, Point, ResizeHandle, Shape, ShapeId,
};
use crate::router::ConnectorRouter;
use crate::selection_manager::Selection;
use crate::viewport::{Grid, Viewport};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerPhase {
    Down,
    Move,
    Up,
    /// The platform took the pointer away. Handled like `Up`.
    Cancel,
}

/// One pointer sample in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub pointer: u64,
    pub position: Point,
    pub phase: PointerPhase,
}

impl PointerEvent {
    pub fn new(pointer: u64, position: Point, phase: PointerPhase) -> Self {
        Self {
            pointer,
            position,
            phase,
        }
    }

    pub fn down(pointer: u64, position: Point) -> Self {
        Self::new(pointer, position, PointerPhase::Down)
    }

    pub fn moved(pointer: u64, position: Point) -> Self {
        Self::new(pointer, position, PointerPhase::Move)
    }

    pub fn up(pointer: u64, position: Point) -> Self {
        Self::new(pointer, position, PointerPhase::Up)
    }

    pub fn cancel(pointer: u64, position: Point) -> Self {
        Self::new(pointer, position, PointerPhase::Cancel)
    }
}

/// What a drag does. Decided once per gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragKind {
    Move,
    Resize(ResizeHandle),
    Pan,
    Pinch,
    ConnectorPreview,
}

impl fmt::Display for DragKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DragKind::Move => write!(f, "move"),
            DragKind::Resize(_) => write!(f, "resize"),
            DragKind::Pan => write!(f, "pan"),
            DragKind::Pinch => write!(f, "pinch"),
            DragKind::ConnectorPreview => write!(f, "connector"),
        }
    }
}

/// Observable results of handling an event, for notification.
#[derive(Debug, Clone, PartialEq)]
pub enum GestureFeedback {
    DragStarted(DragKind),
    DragFinished { kind: DragKind, changed: bool },
    ViewChanged,
    SelectionChanged(Selection),
    ShapeCreated(ShapeId),
    ConnectorPending { shape_id: ShapeId, anchor: AnchorPoint },
    ConnectorCreated(ConnectorId),
    /// The pending connector could not be completed.
    ConnectorCancelled,
    SelfLoopRejected(ShapeId),
    ModeChanged(EditMode),
}

/// What was under the first pointer when the gesture began.
#[derive(Debug, Clone)]
enum Target {
    Handle { snapshot: Shape, handle: ResizeHandle },
    Shape(Shape),
    Empty,
}

impl Target {
    fn snapshot(&self) -> Option<&Shape> {
        match self {
            Target::Handle { snapshot, .. } | Target::Shape(snapshot) => Some(snapshot),
            Target::Empty => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Phase {
    /// Still a potential tap.
    Pending,
    Dragging(DragKind),
    /// Moved past the threshold with nothing to drag.
    Inert,
    Pinching,
}

#[derive(Debug, Clone, Copy)]
struct PinchBaseline {
    centroid: Point,
    spread: f64,
}

#[derive(Debug, Clone)]
struct Gesture {
    pointers: BTreeMap<u64, Point>,
    primary: u64,
    down_screen: Point,
    last_screen: Point,
    target: Target,
    phase: Phase,
    pinch: Option<PinchBaseline>,
    viewport_before: Viewport,
    selection_before: Selection,
}

impl Gesture {
    fn baseline(&self) -> Option<PinchBaseline> {
        if self.pointers.len() < 2 {
            return None;
        }
        let count = self.pointers.len() as f64;
        let centroid = self
            .pointers
            .values()
            .fold(Point::ZERO, |acc, &p| acc + p)
            / count;
        let spread = self
            .pointers
            .values()
            .map(|p| p.distance_to(&centroid))
            .sum::<f64>()
            / count;
        Some(PinchBaseline { centroid, spread })
    }
}

/// Interprets pointer gestures under the active [`EditMode`].
#[derive(Debug, Clone)]
pub struct GestureController {
    settings: InteractionSettings,
    router: ConnectorRouter,
    shape_defaults: ShapeDefaults,
    connector_defaults: ConnectorDefaults,
    gesture: Option<Gesture>,
}

impl GestureController {
    pub fn new() -> Self {
        Self::from_config(&EditorConfig::default())
    }

    pub fn from_config(config: &EditorConfig) -> Self {
        Self {
            settings: config.interaction.clone(),
            router: ConnectorRouter::from_settings(&config.routing),
            shape_defaults: config.shape_defaults.clone(),
            connector_defaults: config.connector_defaults.clone(),
            gesture: None,
        }
    }

    pub fn router(&self) -> &ConnectorRouter {
        &self.router
    }

    pub fn settings(&self) -> &InteractionSettings {
        &self.settings
    }

    /// True while at least one pointer of the current gesture is down.
    pub fn is_active(&self) -> bool {
        self.gesture.is_some()
    }

    pub fn active_pointers(&self) -> usize {
        self.gesture.as_ref().map_or(0, |g| g.pointers.len())
    }

    /// Processes one pointer event.
    pub fn handle_event(
        &mut self,
        event: PointerEvent,
        document: &mut Document,
        canvas: &mut CanvasState,
    ) -> Vec<GestureFeedback> {
        let mut feedback = Vec::new();
        if !event.position.is_finite() {
            tracing::debug!("Ignoring pointer {} with non-finite position", event.pointer);
            return feedback;
        }

        match event.phase {
            PointerPhase::Down => self.pointer_down(event, document, canvas, &mut feedback),
            PointerPhase::Move => self.pointer_move(event, document, canvas, &mut feedback),
            PointerPhase::Up | PointerPhase::Cancel => {
                self.pointer_up(event, document, canvas, &mut feedback)
            }
        }
        feedback
    }

    /// Abandons the current gesture, restoring the shape, view and
    /// selection it started from. Nothing is recorded.
    ///
    /// Returns false if no gesture was in progress.
    pub fn abort(&mut self, document: &mut Document, canvas: &mut CanvasState) -> bool {
        let Some(gesture) = self.gesture.take() else {
            return false;
        };
        tracing::debug!("Gesture aborted in phase {:?}", gesture.phase);

        if let Some(snapshot) = gesture.target.snapshot() {
            document.preview_shape(snapshot.clone());
        }
        canvas.viewport = gesture.viewport_before;
        canvas.selection.set_selection(gesture.selection_before);
        canvas.connector_preview = None;
        canvas.end_gesture();
        true
    }

    fn pointer_down(
        &mut self,
        event: PointerEvent,
        document: &mut Document,
        canvas: &mut CanvasState,
        feedback: &mut Vec<GestureFeedback>,
    ) {
        let Some(mut gesture) = self.gesture.take() else {
            self.gesture = Some(self.begin(event, document, canvas));
            return;
        };

        if gesture.pointers.contains_key(&event.pointer) {
            self.gesture = Some(gesture);
            return;
        }
        gesture.pointers.insert(event.pointer, event.position);

        if gesture.phase != Phase::Pinching {
            // A drag in flight is rolled back; the gesture is a pinch from now on.
            if let Phase::Dragging(DragKind::Move | DragKind::Resize(_)) = gesture.phase {
                if let Some(snapshot) = gesture.target.snapshot() {
                    document.preview_shape(snapshot.clone());
                }
            }
            canvas.connector_preview = None;
            canvas.end_gesture();
            gesture.phase = Phase::Pinching;
            tracing::debug!("Pinch started with {} pointers", gesture.pointers.len());
            feedback.push(GestureFeedback::DragStarted(DragKind::Pinch));
        }
        gesture.pinch = gesture.baseline();
        self.gesture = Some(gesture);
    }

    fn begin(&self, event: PointerEvent, document: &Document, canvas: &CanvasState) -> Gesture {
        let canvas_point = canvas.viewport.screen_to_canvas(event.position);
        let diagram = document.diagram();

        let handle_target = if canvas.mode() == EditMode::Select {
            let tolerance = canvas
                .viewport
                .screen_length_to_canvas(self.settings.handle_tolerance);
            canvas
                .selection
                .selected_shape()
                .and_then(|id| diagram.shape(id))
                .and_then(|shape| {
                    shape
                        .resize_handle_at(canvas_point, tolerance)
                        .map(|handle| Target::Handle {
                            snapshot: shape.clone(),
                            handle,
                        })
                })
        } else {
            None
        };

        let target = handle_target.unwrap_or_else(|| match diagram.shape_at(canvas_point) {
            Some(shape) => Target::Shape(shape.clone()),
            None => Target::Empty,
        });
        tracing::debug!("Gesture began on {}", target_name(&target));

        let mut pointers = BTreeMap::new();
        pointers.insert(event.pointer, event.position);
        Gesture {
            pointers,
            primary: event.pointer,
            down_screen: event.position,
            last_screen: event.position,
            target,
            phase: Phase::Pending,
            pinch: None,
            viewport_before: canvas.viewport.clone(),
            selection_before: canvas.selection.current(),
        }
    }

    fn pointer_move(
        &mut self,
        event: PointerEvent,
        document: &mut Document,
        canvas: &mut CanvasState,
        feedback: &mut Vec<GestureFeedback>,
    ) {
        let Some(mut gesture) = self.gesture.take() else {
            return;
        };
        if !gesture.pointers.contains_key(&event.pointer) {
            self.gesture = Some(gesture);
            return;
        }
        gesture.pointers.insert(event.pointer, event.position);

        if gesture.phase == Phase::Pinching {
            self.update_pinch(&mut gesture, canvas, feedback);
        } else if event.pointer == gesture.primary {
            if gesture.phase == Phase::Pending {
                let displacement = event.position - gesture.down_screen;
                if displacement.length() > self.settings.tap_threshold {
                    self.start_drag(&mut gesture, document, canvas, feedback);
                }
            }
            if let Phase::Dragging(kind) = gesture.phase {
                self.update_drag(kind, &gesture, event.position, document, canvas, feedback);
            }
            gesture.last_screen = event.position;
        }
        self.gesture = Some(gesture);
    }

    fn start_drag(
        &self,
        gesture: &mut Gesture,
        document: &Document,
        canvas: &mut CanvasState,
        feedback: &mut Vec<GestureFeedback>,
    ) {
        let kind = match (&gesture.target, canvas.mode()) {
            (Target::Handle { handle, .. }, _) => Some(DragKind::Resize(*handle)),
            (Target::Shape(_), EditMode::Select) => Some(DragKind::Move),
            (_, EditMode::Pan) => Some(DragKind::Pan),
            (_, EditMode::AddConnector) if canvas.pending_connector().is_some() => {
                Some(DragKind::ConnectorPreview)
            }
            _ => None,
        };

        let Some(kind) = kind else {
            gesture.phase = Phase::Inert;
            return;
        };
        tracing::debug!("Drag started: {}", kind);

        match kind {
            DragKind::Resize(handle) => {
                canvas.is_resizing = true;
                canvas.active_handle = Some(handle);
            }
            DragKind::Move => {
                canvas.is_dragging = true;
                if let Some(shape) = gesture.target.snapshot() {
                    if document.diagram().shape(shape.id).is_some()
                        && canvas.selection.select_shape(shape.id)
                    {
                        feedback.push(GestureFeedback::SelectionChanged(
                            canvas.selection.current(),
                        ));
                    }
                }
            }
            DragKind::Pan => canvas.is_dragging = true,
            DragKind::Pinch | DragKind::ConnectorPreview => {}
        }
        gesture.phase = Phase::Dragging(kind);
        feedback.push(GestureFeedback::DragStarted(kind));
    }

    fn update_drag(
        &self,
        kind: DragKind,
        gesture: &Gesture,
        position: Point,
        document: &mut Document,
        canvas: &mut CanvasState,
        feedback: &mut Vec<GestureFeedback>,
    ) {
        let delta = canvas
            .viewport
            .screen_delta_to_canvas(position - gesture.down_screen);

        match kind {
            DragKind::Move => {
                if let Some(snapshot) = gesture.target.snapshot() {
                    document.preview_shape(snapshot.translated(delta));
                }
            }
            DragKind::Resize(handle) => {
                if let Some(snapshot) = gesture.target.snapshot() {
                    document.preview_shape(resize_shape(
                        snapshot,
                        handle,
                        delta,
                        self.settings.min_shape_size,
                    ));
                }
            }
            DragKind::Pan => {
                canvas.viewport.pan(position - gesture.last_screen);
                feedback.push(GestureFeedback::ViewChanged);
            }
            DragKind::ConnectorPreview => {
                canvas.connector_preview = Some(canvas.viewport.screen_to_canvas(position));
            }
            DragKind::Pinch => {}
        }
    }

    fn update_pinch(
        &self,
        gesture: &mut Gesture,
        canvas: &mut CanvasState,
        feedback: &mut Vec<GestureFeedback>,
    ) {
        let (Some(previous), Some(current)) = (gesture.pinch, gesture.baseline()) else {
            return;
        };

        if previous.spread > 0.0 && current.spread > 0.0 {
            let factor = current.spread / previous.spread;
            if factor != 1.0 {
                let pivot = canvas.viewport.screen_to_canvas(current.centroid);
                canvas.viewport.zoom(factor, pivot);
            }
        }
        canvas.viewport.pan(current.centroid - previous.centroid);
        gesture.pinch = Some(current);
        feedback.push(GestureFeedback::ViewChanged);
    }

    fn pointer_up(
        &mut self,
        event: PointerEvent,
        document: &mut Document,
        canvas: &mut CanvasState,
        feedback: &mut Vec<GestureFeedback>,
    ) {
        let Some(mut gesture) = self.gesture.take() else {
            return;
        };
        if gesture.pointers.remove(&event.pointer).is_none() {
            self.gesture = Some(gesture);
            return;
        }

        if !gesture.pointers.is_empty() {
            if gesture.phase == Phase::Pinching {
                gesture.pinch = gesture.baseline();
            }
            self.gesture = Some(gesture);
            return;
        }

        match gesture.phase {
            Phase::Pending => self.tap(event.position, document, canvas, feedback),
            Phase::Dragging(kind) => self.finish_drag(kind, &gesture, document, canvas, feedback),
            Phase::Pinching => feedback.push(GestureFeedback::DragFinished {
                kind: DragKind::Pinch,
                changed: canvas.viewport != gesture.viewport_before,
            }),
            Phase::Inert => {}
        }
        canvas.end_gesture();
    }

    fn finish_drag(
        &self,
        kind: DragKind,
        gesture: &Gesture,
        document: &mut Document,
        canvas: &mut CanvasState,
        feedback: &mut Vec<GestureFeedback>,
    ) {
        let changed = match kind {
            DragKind::Move | DragKind::Resize(_) => {
                let Some(snapshot) = gesture.target.snapshot() else {
                    return;
                };
                match document.diagram().shape(snapshot.id).cloned() {
                    Some(current) => {
                        let snapped = match kind {
                            DragKind::Resize(_) => {
                                snap_bounds(&current, &canvas.grid, self.settings.min_shape_size)
                            }
                            _ => snap_position(&current, &canvas.grid),
                        };
                        document.preview_shape(snapped);
                        document.commit_shape_change(snapshot.clone())
                    }
                    None => false,
                }
            }
            DragKind::Pan | DragKind::Pinch => canvas.viewport != gesture.viewport_before,
            DragKind::ConnectorPreview => {
                canvas.connector_preview = None;
                false
            }
        };
        tracing::debug!("Drag finished: {} (changed: {})", kind, changed);
        feedback.push(GestureFeedback::DragFinished { kind, changed });
    }

    fn tap(
        &self,
        screen_point: Point,
        document: &mut Document,
        canvas: &mut CanvasState,
        feedback: &mut Vec<GestureFeedback>,
    ) {
        let canvas_point = canvas.viewport.screen_to_canvas(screen_point);

        match canvas.mode() {
            EditMode::AddShape(kind) => {
                let position = canvas.grid.snap_point(canvas_point);
                let shape = Shape::with_defaults(kind, position, &self.shape_defaults)
                    .with_z_index(document.diagram().next_z_index());
                let id = shape.id;
                if !document.add_shape(shape) {
                    return;
                }
                feedback.push(GestureFeedback::ShapeCreated(id));
                if canvas.selection.select_shape(id) {
                    feedback.push(GestureFeedback::SelectionChanged(canvas.selection.current()));
                }
                if canvas.set_mode(EditMode::Select) {
                    feedback.push(GestureFeedback::ModeChanged(EditMode::Select));
                }
            }
            EditMode::Select | EditMode::Pan => {
                let before = canvas.selection.current();
                let after = canvas.selection.select_at(
                    document.diagram(),
                    &canvas.viewport,
                    &self.router,
                    screen_point,
                    self.settings.connector_hit_threshold,
                );
                if after != before {
                    feedback.push(GestureFeedback::SelectionChanged(after));
                }
            }
            EditMode::AddConnector => {
                let Some(shape) = document.diagram().shape_at(canvas_point) else {
                    return;
                };
                let (shape_id, anchor) = (shape.id, shape.nearest_anchor(canvas_point));

                match canvas.pending_connector() {
                    None => {
                        canvas.set_pending_connector(shape_id, anchor);
                        feedback.push(GestureFeedback::ConnectorPending { shape_id, anchor });
                    }
                    Some((start_id, start_anchor)) => {
                        canvas.clear_pending_connector();
                        if start_id == shape_id {
                            tracing::warn!("Connector from shape {} to itself rejected", shape_id);
                            feedback.push(GestureFeedback::SelfLoopRejected(shape_id));
                            return;
                        }
                        let connector = Connector::with_defaults(
                            Endpoint::attached(start_id, start_anchor),
                            Endpoint::attached(shape_id, anchor),
                            &self.connector_defaults,
                        );
                        let id = connector.id;
                        if document.add_connector(connector) {
                            feedback.push(GestureFeedback::ConnectorCreated(id));
                        } else {
                            feedback.push(GestureFeedback::ConnectorCancelled);
                        }
                    }
                }
            }
        }
    }
}

impl Default for GestureController {
    fn default() -> Self {
        Self::new()
    }
}

fn target_name(target: &Target) -> &'static str {
    match target {
        Target::Handle { .. } => "resize handle",
        Target::Shape(_) => "shape",
        Target::Empty => "empty canvas",
    }
}

/// Resizes `snapshot` by dragging `handle` by a canvas-space `delta`.
///
/// Only the edges the handle controls move. A moving edge stops
/// `min_size` short of the opposite edge, so the shape never gets smaller
/// than `min_size` and never flips.
pub fn resize_shape(snapshot: &Shape, handle: ResizeHandle, delta: Point, min_size: f64) -> Shape {
    let bounds = snapshot.bounds();
    let (mut left, mut top) = (bounds.min.x, bounds.min.y);
    let (mut right, mut bottom) = (bounds.max.x, bounds.max.y);

    if handle.moves_left() {
        left = (left + delta.x).min(right - min_size);
    }
    if handle.moves_right() {
        right = (right + delta.x).max(left + min_size);
    }
    if handle.moves_top() {
        top = (top + delta.y).min(bottom - min_size);
    }
    if handle.moves_bottom() {
        bottom = (bottom + delta.y).max(top + min_size);
    }

    let mut resized = snapshot.clone();
    resized.position = Point::new(left, top);
    resized.width = right - left;
    resized.height = bottom - top;
    resized
}

fn snap_position(shape: &Shape, grid: &Grid) -> Shape {
    let mut snapped = shape.clone();
    snapped.position = grid.snap_point(shape.position);
    snapped
}

fn snap_bounds(shape: &Shape, grid: &Grid, min_size: f64) -> Shape {
    let mut snapped = snap_position(shape, grid);
    snapped.width = grid.snap_size(shape.width).max(min_size);
    snapped.height = grid.snap_size(shape.height).max(min_size);
    snapped
}
