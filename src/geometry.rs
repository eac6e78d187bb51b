//! Node card geometry in canvas space.
//!
//! Nodes are drawn as fixed-width cards: a header strip, then one row per
//! pin pair. Inputs sit on the left edge, outputs on the right edge, so a
//! pin anchor is fully determined by the node position and the pin index.

use crate::graph::{GraphStore, NodeInstance, PinDirection, PinId, PinRef};
use crate::hit_test::{SimpleNodeGeometry, SimplePinGeometry};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeLayout {
    pub width: f32,
    pub header_height: f32,
    /// Height of a node without any pin rows
    pub base_height: f32,
    /// Gap between the header and the first pin row
    pub pin_top_padding: f32,
    pub pin_spacing: f32,
    pub pin_radius: f32,
    /// Extra radius accepted around a pin when hit testing
    pub pin_hit_slack: f32,
}

impl Default for NodeLayout {
    fn default() -> Self {
        Self {
            width: 180.0,
            header_height: 40.0,
            base_height: 80.0,
            pin_top_padding: 20.0,
            pin_spacing: 25.0,
            pin_radius: 6.0,
            pin_hit_slack: 4.0,
        }
    }
}

impl NodeLayout {
    /// Card size for a node with `rows` pin rows.
    pub fn node_size(&self, rows: usize) -> (f32, f32) {
        (self.width, self.base_height + rows as f32 * self.pin_spacing)
    }

    /// x, y, width, height
    pub fn node_rect(&self, node: &NodeInstance) -> (f32, f32, f32, f32) {
        let (w, h) = self.node_size(node.pin_rows());
        (node.x, node.y, w, h)
    }

    /// Pin centre relative to the node's top-left corner.
    pub fn pin_offset(&self, pin: &PinId) -> (f32, f32) {
        let x = match pin.direction {
            PinDirection::Input => 0.0,
            PinDirection::Output => self.width,
        };
        let y = self.header_height + self.pin_top_padding + pin.index as f32 * self.pin_spacing;
        (x, y)
    }

    /// Absolute pin centre, or `None` if the pin does not exist on the node.
    pub fn pin_anchor(&self, node: &NodeInstance, pin: &PinId) -> Option<(f32, f32)> {
        node.pin(pin)?;
        let (dx, dy) = self.pin_offset(pin);
        Some((node.x + dx, node.y + dy))
    }

    /// Absolute pin centre looked up through the graph.
    pub fn anchor_of(&self, graph: &GraphStore, pin: &PinRef) -> Option<(f32, f32)> {
        self.pin_anchor(graph.node(pin.node)?, &pin.pin)
    }

    /// Radius used for pointer hit tests on pins.
    pub fn pin_hit_radius(&self) -> f32 {
        self.pin_radius + self.pin_hit_slack
    }

    /// Every pin of the graph with its absolute position.
    pub fn pin_geometries<'a>(
        &'a self,
        graph: &'a GraphStore,
    ) -> impl Iterator<Item = SimplePinGeometry> + 'a {
        graph.nodes().flat_map(move |node| {
            node.inputs
                .iter()
                .chain(node.outputs.iter())
                .map(move |pin| {
                    let (dx, dy) = self.pin_offset(&pin.local_id);
                    SimplePinGeometry {
                        pin: PinRef::new(node.id, pin.local_id),
                        x: node.x + dx,
                        y: node.y + dy,
                    }
                })
        })
    }

    /// Every node rect, in drawing order.
    pub fn node_geometries<'a>(
        &'a self,
        graph: &'a GraphStore,
    ) -> impl Iterator<Item = SimpleNodeGeometry> + 'a {
        graph.nodes().map(move |node| {
            let (x, y, width, height) = self.node_rect(node);
            SimpleNodeGeometry {
                id: node.id,
                x,
                y,
                width,
                height,
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::TemplateCatalog;
    use crate::config::PlacementConfig;

    fn graph_without_jitter() -> GraphStore {
        GraphStore::new(
            TemplateCatalog::builtin(),
            PlacementConfig {
                jitter: 0.0,
                ..PlacementConfig::default()
            },
        )
    }

    #[test]
    fn test_node_size_grows_with_rows() {
        let layout = NodeLayout::default();
        assert_eq!(layout.node_size(0), (180.0, 80.0));
        assert_eq!(layout.node_size(3), (180.0, 155.0));
    }

    #[test]
    fn test_pin_offsets() {
        let layout = NodeLayout::default();
        assert_eq!(layout.pin_offset(&PinId::input(0)), (0.0, 60.0));
        assert_eq!(layout.pin_offset(&PinId::input(2)), (0.0, 110.0));
        assert_eq!(layout.pin_offset(&PinId::output(1)), (180.0, 85.0));
    }

    #[test]
    fn test_pin_anchor_absolute() {
        let layout = NodeLayout::default();
        let mut graph = graph_without_jitter();
        let id = graph.add_node("logic", "Condition", Some((100.0, 50.0))).unwrap();
        let node = graph.node(id).unwrap();

        assert_eq!(layout.pin_anchor(node, &PinId::output(1)), Some((280.0, 135.0)));
        assert_eq!(layout.pin_anchor(node, &PinId::output(2)), None);
        assert_eq!(
            layout.anchor_of(&graph, &PinRef::input(id, 0)),
            Some((100.0, 110.0))
        );
    }

    #[test]
    fn test_node_rect_uses_widest_side() {
        let layout = NodeLayout::default();
        let mut graph = graph_without_jitter();
        // Switch/Case: 2 inputs, 3 outputs
        let id = graph.add_node("logic", "Switch/Case", Some((0.0, 0.0))).unwrap();
        let rect = layout.node_rect(graph.node(id).unwrap());
        assert_eq!(rect, (0.0, 0.0, 180.0, 155.0));
    }

    #[test]
    fn test_pin_geometries_cover_all_pins() {
        let layout = NodeLayout::default();
        let mut graph = graph_without_jitter();
        graph.add_node("logic", "Condition", None).unwrap();
        graph.add_node("input", "Key Trigger", None).unwrap();

        let pins: Vec<SimplePinGeometry> = layout.pin_geometries(&graph).collect();
        assert_eq!(pins.len(), 4 + 3);
    }

    #[test]
    fn test_node_geometries_in_creation_order() {
        let layout = NodeLayout::default();
        let mut graph = graph_without_jitter();
        let a = graph.add_node("logic", "Math", Some((0.0, 0.0))).unwrap();
        let b = graph.add_node("logic", "Math", Some((300.0, 0.0))).unwrap();

        let ids: Vec<_> = layout.node_geometries(&graph).map(|n| n.id).collect();
        assert_eq!(ids, vec![a, b]);
    }
}
