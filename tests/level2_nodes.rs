//! Level 2: Node Tests
//!
//! Tests node creation, numbering, placement, and dragging nodes on the
//! canvas.

mod common;

use common::harness::EditorHarness;
use macro_graph_editor::{
    EditorConfig, GraphStore, NodeEditorController, NodeId, PlacementConfig, Rejection,
    TemplateCatalog,
};
use slint::Model;

fn seeded_config(seed: u64) -> EditorConfig {
    EditorConfig {
        placement: PlacementConfig {
            seed: Some(seed),
            ..PlacementConfig::default()
        },
        ..EditorConfig::default()
    }
}

// ============================================================================
// Creation and numbering
// ============================================================================

#[test]
fn test_ids_are_sequential() {
    let harness = EditorHarness::new();
    let a = harness.ctrl.add_node("input", "Key Trigger", None).unwrap();
    let b = harness.ctrl.add_node("logic", "Condition", None).unwrap();
    let c = harness.ctrl.add_node("output", "Block Input", None).unwrap();
    assert_eq!(
        [a.to_string(), b.to_string(), c.to_string()],
        ["node-1", "node-2", "node-3"]
    );
}

#[test]
fn test_node_instance_copies_template() {
    let harness = EditorHarness::new();
    let id = harness.ctrl.add_node("input", "Key Trigger", None).unwrap();
    harness.ctrl.with_graph(|g| {
        let node = g.node(id).unwrap();
        assert_eq!(node.template, "Key Trigger");
        assert_eq!(node.category, "input");
        assert_eq!(node.icon, "fas fa-keyboard");
        assert!(node.inputs.is_empty());
        let outputs: Vec<&str> = node.outputs.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(outputs, vec!["key", "device", "action"]);
        assert_eq!(node.outputs[2].global_id, "node-1-out-2");
    });
}

#[test]
fn test_unknown_template_is_a_no_op() {
    let harness = EditorHarness::new();
    let result = harness.ctrl.add_node("input", "Foo", None);
    assert_eq!(result, Err(Rejection::UnknownTemplate("Foo".into())));
    assert_eq!(harness.ctrl.with_graph(|g| g.node_count()), 0);

    // The counter did not advance
    let id = harness.ctrl.add_node("input", "Key Trigger", None).unwrap();
    assert_eq!(id, NodeId::new(1));
}

// ============================================================================
// Placement
// ============================================================================

#[test]
fn test_default_position_without_jitter() {
    let harness = EditorHarness::new();
    let id = harness.ctrl.add_node("logic", "Math", None).unwrap();
    assert_eq!(harness.node_position(id), (200.0, 200.0));
}

#[test]
fn test_jitter_stays_in_range() {
    let ctrl = NodeEditorController::new(seeded_config(42), TemplateCatalog::builtin()).unwrap();
    for _ in 0..50 {
        let id = ctrl.add_node("logic", "Math", None).unwrap();
        let (x, y) = ctrl.with_graph(|g| g.node(id).map(|n| (n.x, n.y))).unwrap();
        assert!((200.0..300.0).contains(&x), "x = {}", x);
        assert!((200.0..300.0).contains(&y), "y = {}", y);
    }
}

#[test]
fn test_seeded_placement_is_reproducible() {
    let place = |seed| {
        let mut graph = GraphStore::new(TemplateCatalog::builtin(), seeded_config(seed).placement);
        let id = graph.add_node("logic", "Math", Some((0.0, 0.0))).unwrap();
        let node = graph.node(id).unwrap();
        (node.x, node.y)
    };
    assert_eq!(place(7), place(7));
}

#[test]
fn test_add_at_screen_point_uses_canvas_space() {
    let harness = EditorHarness::new();
    harness.ctrl.wheel(-1.0, 0.0, 0.0); // scale 1.1 around origin
    harness.ctrl.pointer_down(macro_graph_editor::PointerButton::Middle, 0.0, 0.0);
    harness.ctrl.pointer_move(55.0, 11.0);
    harness.ctrl.pointer_up(55.0, 11.0);

    let id = harness
        .ctrl
        .add_node_at_screen("logic", "Math", 165.0, 121.0)
        .unwrap();
    let (x, y) = harness.node_position(id);
    assert!((x - 100.0).abs() < 1e-3, "x = {}", x);
    assert!((y - 100.0).abs() < 1e-3, "y = {}", y);
}

// ============================================================================
// Dragging
// ============================================================================

#[test]
fn test_drag_node_by_header() {
    let harness = EditorHarness::new();
    let id = harness.add("logic", "Math", 100.0, 100.0);
    harness.drag_node(id, 50.0, -20.0, 5);
    let (x, y) = harness.node_position(id);
    assert!((x - 150.0).abs() < 1e-3);
    assert!((y - 80.0).abs() < 1e-3);
    assert_eq!(harness.ctrl.dragged_node(), None);
}

#[test]
fn test_drag_is_scaled_to_canvas() {
    let harness = EditorHarness::new();
    let id = harness.add("logic", "Math", 0.0, 0.0);
    for _ in 0..4 {
        harness.ctrl.wheel(1.0, 0.0, 0.0);
    }
    let scale = harness.ctrl.viewport().scale();
    harness.drag_node(id, 60.0, 0.0, 3);
    let (x, _) = harness.node_position(id);
    assert!((x - 60.0 / scale).abs() < 1e-2, "x = {} scale = {}", x, scale);
}

#[test]
fn test_drag_moves_top_most_node() {
    let harness = EditorHarness::new();
    let below = harness.add("logic", "Math", 0.0, 0.0);
    let above = harness.add("logic", "Compare", 10.0, 0.0);
    harness.drag_node(above, 0.0, 30.0, 1);
    assert_eq!(harness.node_position(below), (0.0, 0.0));
    assert_eq!(harness.node_position(above), (10.0, 30.0));
}

#[test]
fn test_press_on_empty_canvas_drags_nothing() {
    let harness = EditorHarness::new();
    let id = harness.add("logic", "Math", 0.0, 0.0);
    harness
        .ctrl
        .pointer_down(macro_graph_editor::PointerButton::Primary, 500.0, 500.0);
    assert_eq!(harness.ctrl.dragged_node(), None);
    harness.ctrl.pointer_move(520.0, 520.0);
    harness.ctrl.pointer_up(520.0, 520.0);
    assert_eq!(harness.node_position(id), (0.0, 0.0));
}

// ============================================================================
// Bound node model
// ============================================================================

#[test]
fn test_node_model_follows_add_drag_and_clear() {
    let harness = EditorHarness::new();
    assert_eq!(harness.node_rows.row_count(), 0);

    let key = harness.add("input", "Key Trigger", 0.0, 0.0);
    let math = harness.add("logic", "Math", 300.0, 100.0);
    assert_eq!(harness.node_rows.row_count(), 2);
    let row = harness.node_row(key).expect("row for Key Trigger");
    assert_eq!(row.template.as_str(), "Key Trigger");
    assert_eq!(row.icon.as_str(), "fas fa-keyboard");
    assert_eq!((row.x, row.y), (0.0, 0.0));

    harness.drag_node(math, 40.0, 20.0, 4);
    let row = harness.node_row(math).expect("row for Math");
    assert_eq!((row.x, row.y), (340.0, 120.0));
    assert_eq!(harness.ctrl.node_views().len(), 2);

    harness.ctrl.clear();
    assert_eq!(harness.node_rows.row_count(), 0);
    assert!(harness.ctrl.node_views().is_empty());
}

#[test]
fn test_node_model_ignores_rejected_add() {
    let harness = EditorHarness::new();
    assert!(harness.ctrl.add_node("input", "Foo", None).is_err());
    assert_eq!(harness.node_rows.row_count(), 0);
}

#[test]
fn test_node_model_gets_context_menu_placement() {
    let harness = EditorHarness::new();
    harness.ctrl.pointer_down(macro_graph_editor::PointerButton::Middle, 0.0, 0.0);
    harness.ctrl.pointer_move(50.0, 50.0);
    harness.ctrl.pointer_up(50.0, 50.0);

    let id = harness
        .ctrl
        .add_node_at_screen("output", "Block Input", 150.0, 250.0)
        .unwrap();
    let row = harness.node_row(id).expect("row for Block Input");
    assert_eq!((row.x, row.y), (100.0, 200.0));
}
