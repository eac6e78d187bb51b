//! Connection path rendering.
//!
//! [`ConnectionRenderer`] turns the graph's connections into SVG path
//! commands. Geometry changes (a node drag, a new connection) only mark the
//! renderer dirty; the actual recompute happens once per animation frame in
//! [`ConnectionRenderer::flush_frame`], so a burst of pointer moves costs a
//! single pass.
//!
//! # Example
//!
//! ```ignore
//! use macro_graph_editor::{ConnectionRenderer, NodeLayout};
//!
//! let mut renderer = ConnectionRenderer::new(NodeLayout::default(), 50.0);
//!
//! // Bind once - every pass syncs the Slint model
//! let model = Rc::new(VecModel::<ConnectionPathRow>::default());
//! renderer.bind_model(model.clone(), |id, path, color| ConnectionPathRow { id, path, color });
//! window.set_connection_paths(ModelRc::from(model));
//!
//! // While dragging
//! if renderer.request_relayout() {
//!     schedule_frame();
//! }
//!
//! // In the frame callback
//! renderer.flush_frame(&graph);
//! ```

use crate::catalog::DataType;
use crate::geometry::NodeLayout;
use crate::graph::{ConnectionId, GraphStore};
use crate::path::CubicBezier;
use crate::model_sync::{ConcreteModelSyncer, ModelSyncer};
use slint::{Color, SharedString, VecModel};
use std::rc::Rc;

/// Rendered form of one connection.
#[derive(Clone, Debug, PartialEq)]
pub struct ConnectionPath {
    pub id: ConnectionId,
    pub path_commands: String,
    pub data_type: DataType,
    pub color: Color,
}

/// Computes and caches connection paths with per-frame batching.
pub struct ConnectionRenderer {
    layout: NodeLayout,
    min_offset: f32,
    paths: Vec<ConnectionPath>,
    dirty: bool,
    passes: usize,
    syncer: Option<Box<dyn ModelSyncer<ConnectionPath>>>,
}

impl ConnectionRenderer {
    pub fn new(layout: NodeLayout, min_offset: f32) -> Self {
        Self {
            layout,
            min_offset,
            paths: Vec::new(),
            dirty: false,
            passes: 0,
            syncer: None,
        }
    }

    /// Bind to a Slint model for automatic synchronization.
    ///
    /// The constructor receives (connection id, path commands, color).
    pub fn bind_model<P, F>(&mut self, model: Rc<VecModel<P>>, constructor: F)
    where
        P: Clone + 'static,
        F: Fn(SharedString, SharedString, Color) -> P + 'static,
    {
        let syncer = ConcreteModelSyncer::new(model, move |path: &ConnectionPath| {
            constructor(
                SharedString::from(path.id.as_str()),
                SharedString::from(path.path_commands.as_str()),
                path.color,
            )
        });
        syncer.sync(self.paths.as_slice());
        self.syncer = Some(Box::new(syncer));
    }

    pub fn unbind_model(&mut self) {
        self.syncer = None;
    }

    /// Mark geometry as changed.
    ///
    /// Returns `true` only for the first request since the last flush, i.e.
    /// when the caller has to schedule an animation frame.
    pub fn request_relayout(&mut self) -> bool {
        let schedule = !self.dirty;
        self.dirty = true;
        schedule
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Frame callback: recompute everything once if anything changed.
    ///
    /// Returns whether a pass ran.
    pub fn flush_frame(&mut self, graph: &GraphStore) -> bool {
        if !self.dirty {
            return false;
        }
        self.relayout(graph);
        true
    }

    /// Recompute every connection path now.
    ///
    /// Connections whose pins no longer resolve are skipped.
    pub fn relayout(&mut self, graph: &GraphStore) {
        self.paths.clear();
        for connection in graph.connections() {
            let (Some(start), Some(end)) = (
                self.layout.anchor_of(graph, &connection.from),
                self.layout.anchor_of(graph, &connection.to),
            ) else {
                log::debug!("skipping {}: pin anchor missing", connection.id);
                continue;
            };
            self.paths.push(ConnectionPath {
                id: connection.id.clone(),
                path_commands: CubicBezier::horizontal(start, end, self.min_offset).to_svg(),
                data_type: connection.data_type,
                color: connection.data_type.color(),
            });
        }
        self.dirty = false;
        self.passes += 1;

        // Auto-sync to bound model if present
        if let Some(syncer) = &self.syncer {
            syncer.sync(&self.paths);
        }
    }

    /// Drop all paths (graph cleared).
    pub fn clear(&mut self) {
        self.paths.clear();
        self.dirty = false;
        if let Some(syncer) = &self.syncer {
            syncer.sync(&self.paths);
        }
    }

    pub fn paths(&self) -> &[ConnectionPath] {
        &self.paths
    }

    pub fn path_for(&self, id: &ConnectionId) -> Option<&ConnectionPath> {
        self.paths.iter().find(|p| &p.id == id)
    }

    /// Number of recompute passes run so far.
    pub fn pass_count(&self) -> usize {
        self.passes
    }

    pub fn min_offset(&self) -> f32 {
        self.min_offset
    }
}
