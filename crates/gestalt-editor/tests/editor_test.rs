//! Pointer sessions driven through the editor

use std::cell::RefCell;
use std::rc::Rc;

use gestalt_ast::{HoleRole, LoopTemplate, NodeId, NodeKind, Tree, Ty};
use gestalt_edit::Payload;
use gestalt_editor::{Editor, EditorConfig, EditorError, Point, Pressed, Released};

fn editor() -> Editor {
    Editor::new(EditorConfig::default()).unwrap()
}

fn last_statement_hole(editor: &Editor) -> NodeId {
    *editor.tree().holes_with_role(HoleRole::Statement).last().unwrap()
}

fn find(tree: &Tree, pred: impl Fn(&NodeKind) -> bool) -> NodeId {
    tree.preorder().into_iter().find(|id| tree.kind(*id).is_ok_and(&pred)).unwrap()
}

fn commit_counter(editor: &mut Editor) -> Rc<RefCell<usize>> {
    let count = Rc::new(RefCell::new(0));
    let sink = Rc::clone(&count);
    editor.subscribe(move |_| *sink.borrow_mut() += 1);
    count
}

#[test]
fn test_numeric_scrub_is_live_and_commits_on_release() {
    let mut editor = editor();
    let hole = last_statement_hole(&editor);
    editor.apply(hole, &Payload::DeclareVariable { ty: Ty::Float }).unwrap();
    let literal = find(editor.tree(), |kind| matches!(kind, NodeKind::Literal(_)));
    let commits = commit_counter(&mut editor);

    assert_eq!(editor.pointer_down(literal, Point::new(100.0, 100.0)), Pressed::Gesture("numeric"));
    let preview = editor.pointer_move(Point::new(100.0, 80.0));
    assert_eq!(preview.label.as_deref(), Some("-1.0"));
    assert!(editor.output().contains("float x1 = -1.0;"));
    assert_eq!(*commits.borrow(), 0);

    assert_eq!(editor.pointer_up(Point::new(100.0, 80.0)), Released::Committed);
    assert_eq!(*commits.borrow(), 1);
    assert!(editor.output().contains("float x1 = -1.0;"));
}

#[test]
fn test_cancelled_scrub_keeps_the_value() {
    let mut editor = editor();
    let hole = last_statement_hole(&editor);
    editor.apply(hole, &Payload::DeclareVariable { ty: Ty::Float }).unwrap();
    let literal = find(editor.tree(), |kind| matches!(kind, NodeKind::Literal(_)));
    let commits = commit_counter(&mut editor);

    editor.pointer_down(literal, Point::default());
    editor.pointer_move(Point::new(0.0, -20.0));
    editor.cancel();
    assert!(!editor.has_session());
    assert_eq!(*commits.borrow(), 1);
    assert!(editor.output().contains("float x1 = -1.0;"));
}

#[test]
fn test_scrub_back_to_start_commits_nothing() {
    let mut editor = editor();
    let hole = last_statement_hole(&editor);
    editor.apply(hole, &Payload::DeclareVariable { ty: Ty::Float }).unwrap();
    let before = editor.output().to_string();
    let literal = find(editor.tree(), |kind| matches!(kind, NodeKind::Literal(_)));
    let commits = commit_counter(&mut editor);

    editor.pointer_down(literal, Point::default());
    editor.pointer_move(Point::new(0.0, -40.0));
    assert_ne!(editor.output(), before);
    assert_eq!(editor.pointer_up(Point::default()), Released::Nothing);
    assert_eq!(editor.output(), before);
    assert_eq!(*commits.borrow(), 0);
}

#[test]
fn test_operator_drag_swaps_comparison() {
    let mut editor = editor();
    let hole = last_statement_hole(&editor);
    editor.apply(hole, &Payload::If).unwrap();
    let condition = editor.tree().holes_with_role(HoleRole::Expression)[0];
    editor.apply(condition, &Payload::Compare { operand: Ty::Float }).unwrap();
    assert!(editor.output().contains("if (0.0 < 0.0) {"));

    let op = find(editor.tree(), |kind| matches!(kind, NodeKind::Operator(_)));
    assert_eq!(editor.pointer_down(op, Point::default()), Pressed::Gesture("operator"));
    assert_eq!(editor.pointer_move(Point::new(45.0, 0.0)).label.as_deref(), Some(">"));
    assert_eq!(editor.pointer_up(Point::new(45.0, 0.0)), Released::Committed);
    assert!(editor.output().contains("if (0.0 > 0.0) {"));
}

#[test]
fn test_parameter_drag_down_adds_first_type() {
    let mut editor = editor();
    let slot = editor.tree().holes_with_role(HoleRole::Parameter)[0];
    assert_eq!(editor.pointer_down(slot, Point::default()), Pressed::Gesture("parameter"));
    assert_eq!(editor.pointer_move(Point::new(0.0, 5.0)).label.as_deref(), Some("int param, ..."));
    assert_eq!(editor.pointer_up(Point::new(0.0, 5.0)), Released::Committed);
    assert_eq!(editor.output(), "void main(int n1) {\n}\n");
    // the list stays open
    assert_eq!(editor.tree().holes_with_role(HoleRole::Parameter).len(), 1);
}

#[test]
fn test_click_on_expression_hole_opens_picker() {
    let mut editor = editor();
    let hole = last_statement_hole(&editor);
    editor.apply(hole, &Payload::DeclareFunction { returns: Ty::Float }).unwrap();
    let body = editor.tree().holes_with_role(HoleRole::Statement)[0];
    editor.apply(body, &Payload::Return).unwrap();
    let value = editor.tree().holes_with_role(HoleRole::Expression)[0];
    assert!(!editor.is_gesture_only(value));

    assert_eq!(editor.pointer_down(value, Point::new(10.0, 10.0)), Pressed::Gesture("expression"));
    assert_eq!(editor.pointer_up(Point::new(12.0, 11.0)), Released::PickerOpened);

    let choices = editor.choices().unwrap();
    let number = choices
        .iter()
        .position(|choice| choice.payload == Some(Payload::Number { ty: Ty::Float }))
        .unwrap();
    editor.select(&[number]).unwrap();
    assert!(editor.output().contains("    return 0.0;\n"));
}

#[test]
fn test_long_drag_without_candidate_opens_nothing() {
    let mut editor = editor();
    let hole = last_statement_hole(&editor);
    editor.apply(hole, &Payload::DeclareFunction { returns: Ty::Float }).unwrap();
    let body = editor.tree().holes_with_role(HoleRole::Statement)[0];
    editor.apply(body, &Payload::Return).unwrap();
    let value = editor.tree().holes_with_role(HoleRole::Expression)[0];

    editor.pointer_down(value, Point::default());
    // out and back: no candidate at release, but too far for a click
    editor.pointer_move(Point::new(80.0, 0.0));
    assert_eq!(editor.pointer_up(Point::default()), Released::Nothing);
    assert!(editor.picker().is_none());
}

#[test]
fn test_profile_switch_notifies_and_reformats() {
    let mut editor = editor();
    let hole = last_statement_hole(&editor);
    editor.apply(hole, &Payload::DeclareVariable { ty: Ty::Vec3 }).unwrap();
    let outputs = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&outputs);
    editor.subscribe(move |event| sink.borrow_mut().push((event.profile.to_string(), event.output.to_string())));

    editor.set_profile("hlsl").unwrap();
    let seen = outputs.borrow();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].0, "hlsl");
    assert!(seen[0].1.contains("float3 color1 = float3(0.0f, 0.0f, 0.0f);"));
}

#[test]
fn test_scope_snapshot_follows_commits() {
    let mut editor = editor();
    for _ in 0..2 {
        let hole = last_statement_hole(&editor);
        editor.apply(hole, &Payload::DeclareVariable { ty: Ty::Int }).unwrap();
    }
    let hole = last_statement_hole(&editor);
    let names: Vec<_> = editor.scope_at(hole).unwrap().variables.iter().map(|v| v.name.clone()).collect();
    assert_eq!(names, vec!["n1", "n2"]);
}

/// The iterator initializer hole of a fresh custom loop
fn custom_loop_start(editor: &mut Editor) -> NodeId {
    let hole = last_statement_hole(editor);
    editor.apply(hole, &Payload::ForLoop { template: LoopTemplate::Custom }).unwrap();
    let decl = find(editor.tree(), |kind| matches!(kind, NodeKind::VarDecl { .. }));
    match editor.tree().kind(decl).unwrap() {
        NodeKind::VarDecl { init, .. } => *init,
        _ => unreachable!(),
    }
}

#[test]
fn test_jittery_tap_on_statement_hole_commits_nothing() {
    let mut editor = editor();
    let hole = last_statement_hole(&editor);
    let commits = commit_counter(&mut editor);

    assert_eq!(editor.pointer_down(hole, Point::default()), Pressed::Gesture("statement"));
    editor.pointer_move(Point::new(1.0, 0.0));
    assert_eq!(editor.pointer_up(Point::new(1.0, 0.0)), Released::Nothing);
    assert_eq!(editor.output(), "void main() {\n}\n");
    assert!(editor.picker().is_none());
    assert_eq!(*commits.borrow(), 0);
}

#[test]
fn test_tap_within_slop_on_any_hole_opens_picker() {
    let mut editor = editor();
    let start = custom_loop_start(&mut editor);
    let before = editor.output().to_string();

    assert_eq!(editor.pointer_down(start, Point::default()), Pressed::Gesture("expression"));
    assert_eq!(editor.pointer_up(Point::new(2.0, 0.0)), Released::PickerOpened);
    assert_eq!(editor.output(), before);
    let choices = editor.choices().unwrap();
    assert!(choices.iter().any(|choice| choice.payload == Some(Payload::Bool { value: true })));
}

#[test]
fn test_tap_on_typed_int_initializer_is_gesture_only() {
    let mut editor = editor();
    let start = custom_loop_start(&mut editor);
    let ty = editor.tree().holes_with_role(HoleRole::Type)[0];
    editor.apply(ty, &Payload::Type { ty: Ty::Int }).unwrap();
    assert!(editor.is_gesture_only(start));
    assert!(matches!(editor.apply(start, &Payload::Bool { value: true }), Err(EditorError::Edit(_))));

    editor.pointer_down(start, Point::default());
    assert_eq!(editor.pointer_up(Point::new(1.0, 1.0)), Released::Nothing);
    assert!(editor.picker().is_none());
}

#[test]
fn test_click_slop_is_configurable() {
    let mut editor = Editor::new(EditorConfig { click_slop: 0.0, ..EditorConfig::default() }).unwrap();
    let hole = last_statement_hole(&editor);
    editor.pointer_down(hole, Point::default());
    // one pixel east is already a drag into the variable band
    assert_eq!(editor.pointer_up(Point::new(1.0, 0.0)), Released::Committed);
    assert_eq!(editor.output(), "void main() {\n    int n1 = 0;\n}\n");
}
