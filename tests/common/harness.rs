//! Test harness for the editor controller.
//!
//! Wires a [`NodeEditorController`] the way a host window would: a frame
//! scheduler, bound connection and node models, and helpers that simulate pointer
//! input on pins and nodes in screen coordinates.

#![allow(dead_code)]

use super::{init_logging, FrameTracker};
use macro_graph_editor::{
    ConnectionId, EditorConfig, GraphResult, NodeEditorController, NodeId, PinDirection, PinRef,
    PlacementConfig, PointerButton, TemplateCatalog,
};
use slint::{Color, Model, SharedString, VecModel};
use std::rc::Rc;

/// Row type of the bound connection model.
#[derive(Clone, Debug, PartialEq)]
pub struct ConnectionRow {
    pub id: SharedString,
    pub path: SharedString,
    pub color: Color,
}

/// Row type of the bound node model.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeRow {
    pub id: SharedString,
    pub template: SharedString,
    pub icon: SharedString,
    pub x: f32,
    pub y: f32,
}

pub struct EditorHarness {
    pub ctrl: NodeEditorController,
    pub rows: Rc<VecModel<ConnectionRow>>,
    pub node_rows: Rc<VecModel<NodeRow>>,
    pub frames: FrameTracker,
}

impl EditorHarness {
    /// Builtin catalog, deterministic placement (no jitter).
    pub fn new() -> Self {
        Self::with_config(EditorConfig {
            placement: PlacementConfig {
                jitter: 0.0,
                seed: Some(1),
                ..PlacementConfig::default()
            },
            ..EditorConfig::default()
        })
    }

    pub fn with_config(config: EditorConfig) -> Self {
        init_logging();
        let ctrl = NodeEditorController::new(config, TemplateCatalog::builtin())
            .expect("harness config is valid");

        let frames = FrameTracker::new();
        ctrl.set_frame_scheduler({
            let requested = frames.requested.clone();
            move || *requested.borrow_mut() += 1
        });

        let rows = Rc::new(VecModel::<ConnectionRow>::default());
        ctrl.bind_connection_model(rows.clone(), |id, path, color| ConnectionRow {
            id,
            path,
            color,
        });

        let node_rows = Rc::new(VecModel::<NodeRow>::default());
        ctrl.bind_node_model(node_rows.clone(), |id, template, icon, x, y| NodeRow {
            id,
            template,
            icon,
            x,
            y,
        });

        Self {
            ctrl,
            rows,
            node_rows,
            frames,
        }
    }

    /// Add a node at an exact canvas position.
    pub fn add(&self, category: &str, template: &str, x: f32, y: f32) -> NodeId {
        self.ctrl
            .add_node(category, template, Some((x, y)))
            .expect("template exists")
    }

    pub fn output(&self, node: NodeId, name: &str) -> PinRef {
        self.pin(node, PinDirection::Output, name)
    }

    pub fn input(&self, node: NodeId, name: &str) -> PinRef {
        self.pin(node, PinDirection::Input, name)
    }

    fn pin(&self, node: NodeId, direction: PinDirection, name: &str) -> PinRef {
        self.ctrl
            .with_graph(|g| g.node(node).and_then(|n| n.pin_named(direction, name)))
            .unwrap_or_else(|| panic!("{} has no {:?} pin '{}'", node, direction, name))
    }

    /// Screen position of a pin centre under the current viewport.
    pub fn pin_screen(&self, pin: &PinRef) -> (f32, f32) {
        let layout = self.ctrl.config().layout;
        let (x, y) = self
            .ctrl
            .with_graph(|g| layout.anchor_of(g, pin))
            .expect("pin has an anchor");
        self.ctrl.viewport().canvas_to_screen(x, y)
    }

    /// Screen position of a point inside a node's header.
    pub fn header_screen(&self, node: NodeId) -> (f32, f32) {
        let (x, y) = self
            .ctrl
            .with_graph(|g| g.node(node).map(|n| (n.x, n.y)))
            .expect("node exists");
        self.ctrl.viewport().canvas_to_screen(x + 90.0, y + 20.0)
    }

    pub fn node_position(&self, node: NodeId) -> (f32, f32) {
        self.ctrl
            .with_graph(|g| g.node(node).map(|n| (n.x, n.y)))
            .expect("node exists")
    }

    /// Press on `from`, move to `to`, release there.
    pub fn drag_pin(&self, from: &PinRef, to: &PinRef) -> Option<GraphResult<ConnectionId>> {
        let (sx, sy) = self.pin_screen(from);
        let (ex, ey) = self.pin_screen(to);
        self.ctrl.pointer_down(PointerButton::Primary, sx, sy);
        self.ctrl.pointer_move((sx + ex) / 2.0, (sy + ey) / 2.0);
        self.ctrl.pointer_move(ex, ey);
        self.ctrl.pointer_up(ex, ey)
    }

    /// Press and release on a pin without moving.
    pub fn click_pin(&self, pin: &PinRef) -> Option<GraphResult<ConnectionId>> {
        let (x, y) = self.pin_screen(pin);
        self.ctrl.pointer_down(PointerButton::Primary, x, y);
        self.ctrl.pointer_up(x, y)
    }

    /// Drag a node by its header by a screen-space delta, in `steps` moves.
    pub fn drag_node(&self, node: NodeId, dx: f32, dy: f32, steps: usize) {
        let (x, y) = self.header_screen(node);
        self.ctrl.pointer_down(PointerButton::Primary, x, y);
        for i in 1..=steps {
            let t = i as f32 / steps as f32;
            self.ctrl.pointer_move(x + dx * t, y + dy * t);
        }
        self.ctrl.pointer_up(x + dx, y + dy);
    }

    /// Run the pending animation frame, if any.
    pub fn frame(&self) -> bool {
        self.ctrl.animation_frame()
    }

    pub fn row_ids(&self) -> Vec<String> {
        self.rows.iter().map(|r| r.id.to_string()).collect()
    }

    /// Bound node row for `node`, if present.
    pub fn node_row(&self, node: NodeId) -> Option<NodeRow> {
        let id = node.to_string();
        self.node_rows.iter().find(|r| r.id.as_str() == id)
    }

    pub fn row_path(&self, id: &ConnectionId) -> Option<String> {
        self.rows
            .iter()
            .find(|r| r.id.as_str() == id.as_str())
            .map(|r| r.path.to_string())
    }
}
