use whiteboard_designer::{Diagram, EditAction, Point, Shape, ShapeKind, UndoRedoManager};

fn add(diagram: &mut Diagram, history: &mut UndoRedoManager, x: f64) -> Shape {
    let shape = Shape::new(ShapeKind::Rectangle, Point::new(x, 0.0));
    let action = EditAction::AddShape {
        shape: shape.clone(),
        index: diagram.shapes.len(),
    };
    action.apply(diagram);
    history.record(action);
    shape
}

#[test]
fn test_undo_redo_cycle() {
    let mut diagram = Diagram::default();
    let mut history = UndoRedoManager::new();
    let shape = add(&mut diagram, &mut history, 0.0);

    assert!(history.can_undo());
    assert!(!history.can_redo());
    assert_eq!(history.undo_label(), Some("Add Shape"));

    let undone = history.undo(&mut diagram).map(EditAction::label).map(str::to_string);
    assert_eq!(undone.as_deref(), Some("Add Shape"));
    assert!(diagram.shapes.is_empty());
    assert!(history.can_redo());

    assert!(history.redo(&mut diagram).is_some());
    assert_eq!(diagram.shapes, vec![shape]);
    assert!(history.redo(&mut diagram).is_none());
}

#[test]
fn test_record_clears_redo() {
    let mut diagram = Diagram::default();
    let mut history = UndoRedoManager::new();
    add(&mut diagram, &mut history, 0.0);
    history.undo(&mut diagram);
    assert_eq!(history.redo_depth(), 1);

    add(&mut diagram, &mut history, 50.0);
    assert_eq!(history.redo_depth(), 0);
    assert!(!history.can_redo());
}

#[test]
fn test_depth_limit_evicts_oldest() {
    let mut diagram = Diagram::default();
    let mut history = UndoRedoManager::with_depth(2);
    let first = add(&mut diagram, &mut history, 0.0);
    add(&mut diagram, &mut history, 50.0);
    add(&mut diagram, &mut history, 100.0);

    assert_eq!(history.undo_depth(), 2);
    assert!(history.undo(&mut diagram).is_some());
    assert!(history.undo(&mut diagram).is_some());
    assert!(history.undo(&mut diagram).is_none());
    // The first edit fell off the stack and stays applied.
    assert_eq!(diagram.shapes, vec![first]);
}

#[test]
fn test_zero_depth_keeps_one_entry() {
    let history = UndoRedoManager::with_depth(0);
    assert_eq!(history.max_depth(), 1);
}

#[test]
fn test_undo_on_empty_history() {
    let mut diagram = Diagram::default();
    let mut history = UndoRedoManager::default();
    assert!(history.undo(&mut diagram).is_none());
    assert!(history.redo(&mut diagram).is_none());
    assert_eq!(history.undo_label(), None);
}

#[test]
fn test_clear() {
    let mut diagram = Diagram::default();
    let mut history = UndoRedoManager::new();
    add(&mut diagram, &mut history, 0.0);
    add(&mut diagram, &mut history, 50.0);
    history.undo(&mut diagram);

    history.clear();
    assert!(!history.can_undo());
    assert!(!history.can_redo());
    assert_eq!(diagram.shapes.len(), 1);
}

#[test]
fn test_batch_reverts_in_reverse_order() {
    let mut diagram = Diagram::default();
    let a = Shape::new(ShapeKind::Rectangle, Point::ZERO);
    let b = Shape::new(ShapeKind::Ellipse, Point::new(10.0, 0.0));
    let batch = EditAction::Batch {
        label: "Paste".to_string(),
        actions: vec![
            EditAction::AddShape {
                shape: a.clone(),
                index: 0,
            },
            EditAction::AddShape {
                shape: b.clone(),
                index: 0,
            },
        ],
    };
    assert_eq!(batch.len(), 2);
    assert_eq!(batch.label(), "Paste");

    batch.apply(&mut diagram);
    assert_eq!(diagram.shapes, vec![b.clone(), a.clone()]);
    batch.revert(&mut diagram);
    assert!(diagram.shapes.is_empty());
}
