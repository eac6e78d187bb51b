//! Node rows for the UI layer.
//!
//! [`NodeRows`] mirrors the graph's nodes as flat [`NodeView`] rows and keeps
//! a bound Slint model in step with them. Unlike connection paths, node rows
//! are refreshed immediately: a new or dragged node has to show up on the
//! same frame.

use crate::graph::{GraphStore, NodeId};
use crate::model_sync::{ConcreteModelSyncer, ModelSyncer};
use slint::{SharedString, VecModel};
use std::rc::Rc;

/// What the UI needs to draw one node card.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeView {
    pub id: NodeId,
    pub template: String,
    pub category: String,
    pub icon: String,
    pub x: f32,
    pub y: f32,
}

#[derive(Default)]
pub struct NodeRows {
    views: Vec<NodeView>,
    syncer: Option<Box<dyn ModelSyncer<NodeView>>>,
}

impl NodeRows {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind to a Slint model for automatic synchronization.
    ///
    /// The constructor receives (node id, template name, icon, x, y).
    pub fn bind_model<P, F>(&mut self, model: Rc<VecModel<P>>, constructor: F)
    where
        P: Clone + 'static,
        F: Fn(SharedString, SharedString, SharedString, f32, f32) -> P + 'static,
    {
        let syncer = ConcreteModelSyncer::new(model, move |view: &NodeView| {
            constructor(
                SharedString::from(view.id.to_string()),
                SharedString::from(view.template.as_str()),
                SharedString::from(view.icon.as_str()),
                view.x,
                view.y,
            )
        });
        syncer.sync(self.views.as_slice());
        self.syncer = Some(Box::new(syncer));
    }

    pub fn unbind_model(&mut self) {
        self.syncer = None;
    }

    /// Rebuild every row from the graph.
    pub fn refresh(&mut self, graph: &GraphStore) {
        self.views = graph
            .nodes()
            .map(|node| NodeView {
                id: node.id,
                template: node.template.clone(),
                category: node.category.clone(),
                icon: node.icon.clone(),
                x: node.x,
                y: node.y,
            })
            .collect();

        if let Some(syncer) = &self.syncer {
            syncer.sync(&self.views);
        }
    }

    pub fn views(&self) -> &[NodeView] {
        &self.views
    }

    pub fn view(&self, id: NodeId) -> Option<&NodeView> {
        self.views.iter().find(|v| v.id == id)
    }
}
