//! High-level controller for the macro graph editor.
//!
//! The [`NodeEditorController`] is the editor's application context: it owns
//! the graph store, viewport, connection gesture, connection renderer and node
//! rows for one mounted editor, and translates raw pointer input into graph
//! operations. Create one when the editor is mounted, hand clones to the UI
//! callbacks, and call [`dispose`](NodeEditorController::dispose) on unmount.
//!
//! # Example
//!
//! ```ignore
//! use macro_graph_editor::{EditorConfig, NodeEditorController, PointerButton, TemplateCatalog};
//!
//! let ctrl = NodeEditorController::new(EditorConfig::default(), TemplateCatalog::builtin())?;
//!
//! // Animation frames
//! ctrl.set_frame_scheduler({
//!     let ctrl = ctrl.clone();
//!     move || {
//!         let ctrl = ctrl.clone();
//!         slint::Timer::single_shot(std::time::Duration::from_millis(16), move || {
//!             ctrl.animation_frame();
//!         });
//!     }
//! });
//!
//! // Input
//! window.on_wheel(ctrl.wheel_callback());
//! window.on_pointer_down({
//!     let ctrl = ctrl.clone();
//!     move |x, y| { ctrl.pointer_down(PointerButton::Primary, x, y); }
//! });
//!
//! // Sidebar
//! ctrl.add_node("input", "Key Trigger", None)?;
//! ```

use crate::catalog::TemplateCatalog;
use crate::config::EditorConfig;
use crate::error::{ConfigError, GraphResult};
use crate::gesture::{GestureOutcome, PinGesture};
use crate::graph::{ConnectionId, GraphStore, NodeId, PinRef};
use crate::hit_test::{find_node_at, find_pin_at};
use crate::links::{ConnectionPath, ConnectionRenderer};
use crate::nodes::{NodeRows, NodeView};
use crate::viewport::Viewport;
use slint::{Color, SharedString, VecModel};
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Middle,
    Secondary,
}

/// Pointer interaction other than the pin gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Interaction {
    Idle,
    /// Screen-space position of the last pan event
    Panning { last: (f32, f32) },
    /// Canvas-space position of the last drag event
    Dragging { node: NodeId, last: (f32, f32) },
}

struct EditorState {
    config: EditorConfig,
    graph: GraphStore,
    viewport: Viewport,
    gesture: PinGesture,
    renderer: ConnectionRenderer,
    nodes: NodeRows,
    interaction: Interaction,
}

impl EditorState {
    fn add_node(
        &mut self,
        category: &str,
        template_name: &str,
        at: Option<(f32, f32)>,
    ) -> GraphResult<NodeId> {
        let id = self.graph.add_node(category, template_name, at)?;
        self.nodes.refresh(&self.graph);
        Ok(id)
    }

    fn clear(&mut self) {
        self.graph.clear();
        self.gesture.cancel();
        self.renderer.clear();
        self.nodes.refresh(&self.graph);
        self.interaction = Interaction::Idle;
    }

    fn pin_at(&self, canvas_x: f32, canvas_y: f32) -> Option<PinRef> {
        let layout = &self.config.layout;
        find_pin_at(
            canvas_x,
            canvas_y,
            layout.pin_geometries(&self.graph),
            layout.pin_hit_radius(),
        )
    }
}

/// Editor context shared by all UI callbacks.
///
/// Clone this controller to share it across callbacks.
#[derive(Clone)]
pub struct NodeEditorController {
    state: Rc<RefCell<EditorState>>,
    frame_scheduler: Rc<RefCell<Option<Box<dyn Fn()>>>>,
}

impl Default for NodeEditorController {
    fn default() -> Self {
        Self::build(EditorConfig::default(), TemplateCatalog::builtin())
    }
}

impl NodeEditorController {
    /// Create an editor session.
    pub fn new(config: EditorConfig, catalog: TemplateCatalog) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config, catalog))
    }

    fn build(config: EditorConfig, catalog: TemplateCatalog) -> Self {
        let state = EditorState {
            graph: GraphStore::new(catalog, config.placement),
            viewport: Viewport::new(config.viewport),
            gesture: PinGesture::new(),
            renderer: ConnectionRenderer::new(config.layout, config.connection.min_control_offset),
            nodes: NodeRows::new(),
            interaction: Interaction::Idle,
            config,
        };
        log::debug!(
            "editor mounted with {} templates",
            state.graph.catalog().len()
        );
        Self {
            state: Rc::new(RefCell::new(state)),
            frame_scheduler: Rc::new(RefCell::new(None)),
        }
    }

    /// Tear the session down: empty the graph, drop UI bindings.
    pub fn dispose(&self) {
        {
            let mut state = self.state.borrow_mut();
            state.clear();
            state.renderer.unbind_model();
            state.nodes.unbind_model();
        }
        *self.frame_scheduler.borrow_mut() = None;
        log::debug!("editor disposed");
    }

    /// Install the hook that requests an animation frame.
    ///
    /// It is invoked at most once between two [`animation_frame`](Self::animation_frame)
    /// calls, no matter how many geometry changes happen in between.
    pub fn set_frame_scheduler(&self, scheduler: impl Fn() + 'static) {
        *self.frame_scheduler.borrow_mut() = Some(Box::new(scheduler));
    }

    /// Bind the connection paths to a Slint model.
    pub fn bind_connection_model<P, F>(&self, model: Rc<VecModel<P>>, constructor: F)
    where
        P: Clone + 'static,
        F: Fn(SharedString, SharedString, Color) -> P + 'static,
    {
        self.state.borrow_mut().renderer.bind_model(model, constructor);
    }

    /// Bind the node cards to a Slint model.
    ///
    /// Rows follow every add, drag and clear immediately.
    pub fn bind_node_model<P, F>(&self, model: Rc<VecModel<P>>, constructor: F)
    where
        P: Clone + 'static,
        F: Fn(SharedString, SharedString, SharedString, f32, f32) -> P + 'static,
    {
        self.state.borrow_mut().nodes.bind_model(model, constructor);
    }

    // === State access ===

    pub fn config(&self) -> EditorConfig {
        self.state.borrow().config
    }

    pub fn viewport(&self) -> Viewport {
        self.state.borrow().viewport
    }

    /// Run `f` against the graph store.
    pub fn with_graph<R>(&self, f: impl FnOnce(&GraphStore) -> R) -> R {
        f(&self.state.borrow().graph)
    }

    pub fn selected_pin(&self) -> Option<PinRef> {
        self.state.borrow().gesture.selected()
    }

    /// The node currently being dragged, if any.
    pub fn dragged_node(&self) -> Option<NodeId> {
        match self.state.borrow().interaction {
            Interaction::Dragging { node, .. } => Some(node),
            _ => None,
        }
    }

    pub fn is_panning(&self) -> bool {
        matches!(self.state.borrow().interaction, Interaction::Panning { .. })
    }

    /// SVG transform for the node and connection layers.
    pub fn transform(&self) -> String {
        self.state.borrow().viewport.transform()
    }

    /// Temporary curve of an in-progress connection gesture.
    pub fn preview_path(&self) -> Option<String> {
        let state = self.state.borrow();
        state
            .gesture
            .preview_path(state.config.connection.min_control_offset)
    }

    pub fn connection_paths(&self) -> Vec<ConnectionPath> {
        self.state.borrow().renderer.paths().to_vec()
    }

    pub fn node_views(&self) -> Vec<NodeView> {
        self.state.borrow().nodes.views().to_vec()
    }

    pub fn needs_frame(&self) -> bool {
        self.state.borrow().renderer.is_dirty()
    }

    // === Graph operations ===

    /// Add a node at a canvas position (or the default position).
    pub fn add_node(
        &self,
        category: &str,
        template_name: &str,
        at: Option<(f32, f32)>,
    ) -> GraphResult<NodeId> {
        self.state
            .borrow_mut()
            .add_node(category, template_name, at)
    }

    /// Add a node where the context menu was opened.
    pub fn add_node_at_screen(
        &self,
        category: &str,
        template_name: &str,
        screen_x: f32,
        screen_y: f32,
    ) -> GraphResult<NodeId> {
        let mut state = self.state.borrow_mut();
        let at = state.viewport.screen_to_canvas(screen_x, screen_y);
        state.add_node(category, template_name, Some(at))
    }

    /// Connect two pins directly, bypassing the pointer gesture.
    pub fn connect(&self, a: &PinRef, b: &PinRef) -> GraphResult<ConnectionId> {
        let (result, schedule) = {
            let mut state = self.state.borrow_mut();
            let result = state.graph.create_connection(a, b);
            let schedule = result.is_ok() && state.renderer.request_relayout();
            (result, schedule)
        };
        if schedule {
            self.schedule_frame();
        }
        result
    }

    /// Remove everything and reset numbering and any pending gesture.
    pub fn clear(&self) {
        self.state.borrow_mut().clear();
    }

    /// Frame callback: flush a pending connection relayout.
    ///
    /// Returns whether a recompute pass ran.
    pub fn animation_frame(&self) -> bool {
        let mut state = self.state.borrow_mut();
        let EditorState {
            graph, renderer, ..
        } = &mut *state;
        renderer.flush_frame(graph)
    }

    fn schedule_frame(&self) {
        if let Some(scheduler) = &*self.frame_scheduler.borrow() {
            scheduler();
        }
    }

    // === Pointer input (screen coordinates) ===

    /// Wheel step; positive `delta` zooms out. Returns whether the view changed.
    pub fn wheel(&self, delta: f32, screen_x: f32, screen_y: f32) -> bool {
        self.state
            .borrow_mut()
            .viewport
            .zoom(delta, screen_x, screen_y)
    }

    pub fn pointer_down(&self, button: PointerButton, screen_x: f32, screen_y: f32) -> GestureOutcome {
        let mut state = self.state.borrow_mut();
        match button {
            PointerButton::Middle => {
                state.interaction = Interaction::Panning {
                    last: (screen_x, screen_y),
                };
                GestureOutcome::Ignored
            }
            PointerButton::Secondary => GestureOutcome::Ignored,
            PointerButton::Primary => {
                let (x, y) = state.viewport.screen_to_canvas(screen_x, screen_y);

                if let Some(pin) = state.pin_at(x, y) {
                    let anchor = state
                        .config
                        .layout
                        .anchor_of(&state.graph, &pin)
                        .unwrap_or((x, y));
                    return state.gesture.press_pin(pin, anchor);
                }

                let node = find_node_at(x, y, state.config.layout.node_geometries(&state.graph));
                if let Some(node) = node {
                    log::trace!("drag started on {}", node);
                    state.interaction = Interaction::Dragging { node, last: (x, y) };
                }
                GestureOutcome::Ignored
            }
        }
    }

    pub fn pointer_move(&self, screen_x: f32, screen_y: f32) {
        let schedule = {
            let mut state = self.state.borrow_mut();
            let mut schedule = false;
            match state.interaction {
                Interaction::Panning { last } => {
                    state.viewport.pan(screen_x - last.0, screen_y - last.1);
                    state.interaction = Interaction::Panning {
                        last: (screen_x, screen_y),
                    };
                    return;
                }
                Interaction::Dragging { node, last } => {
                    let (x, y) = state.viewport.screen_to_canvas(screen_x, screen_y);
                    match state.graph.move_node(node, x - last.0, y - last.1) {
                        Ok(()) => {
                            let EditorState { graph, nodes, .. } = &mut *state;
                            nodes.refresh(graph);
                            state.interaction = Interaction::Dragging { node, last: (x, y) };
                            schedule = state.renderer.request_relayout();
                        }
                        Err(reason) => {
                            log::warn!("drag aborted: {}", reason);
                            state.interaction = Interaction::Idle;
                        }
                    }
                }
                Interaction::Idle => {}
            }

            let (x, y) = state.viewport.screen_to_canvas(screen_x, screen_y);
            state.gesture.move_pointer(x, y);
            schedule
        };
        if schedule {
            self.schedule_frame();
        }
    }

    /// Pointer released. Returns the connection attempt if the release
    /// completed a pin gesture.
    pub fn pointer_up(&self, screen_x: f32, screen_y: f32) -> Option<GraphResult<ConnectionId>> {
        let outcome = {
            let mut state = self.state.borrow_mut();
            state.interaction = Interaction::Idle;
            if state.gesture.is_idle() {
                return None;
            }
            let (x, y) = state.viewport.screen_to_canvas(screen_x, screen_y);
            let target = state.pin_at(x, y);
            state.gesture.release(target)
        };

        match outcome {
            GestureOutcome::Connect { from, to } => Some(self.connect(&from, &to)),
            _ => None,
        }
    }

    // === Callback factories ===

    /// Returns a callback for wheel events: `(delta, x, y)`.
    pub fn wheel_callback(&self) -> impl Fn(f32, f32, f32) {
        let ctrl = self.clone();
        move |delta, x, y| {
            ctrl.wheel(delta, x, y);
        }
    }

    /// Returns a callback to run on every animation frame.
    pub fn animation_frame_callback(&self) -> impl Fn() {
        let ctrl = self.clone();
        move || {
            ctrl.animation_frame();
        }
    }
}
