//! Projection of a laid-out tree back onto the snapshot model.

use relayout_core::semantic::{Diagram, Edge, Label, Node};

use super::data::{EdgeLabelSlot, Element, LayoutData, LayoutLabel};

/// Builds the output snapshot of a layout run.
///
/// Walks the input snapshot and copies positions, sizes, label bounds and
/// routing points from the tree; every other attribute comes from the input
/// unchanged. Elements the tree does not know about, such as edges left
/// unresolved by the converter, are copied through as they are.
#[derive(Debug, Default)]
pub struct LayoutedDiagramProvider;

impl LayoutedDiagramProvider {
    pub fn apply(&self, diagram: &Diagram, data: &LayoutData) -> Diagram {
        let root = data.root();
        Diagram::new(diagram.id())
            .with_position(root.position())
            .with_size(root.size())
            .with_nodes(
                diagram
                    .nodes()
                    .iter()
                    .map(|node| self.rebuild_node(node, data))
                    .collect(),
            )
            .with_edges(
                diagram
                    .edges()
                    .iter()
                    .map(|edge| self.rebuild_edge(edge, data))
                    .collect(),
            )
    }

    fn rebuild_node(&self, node: &Node, data: &LayoutData) -> Node {
        let Some(index) = data.node_index(node.id()) else {
            return node.clone();
        };
        let layout_node = data.node(index);

        Node::new(node.id(), node.style().clone())
            .with_position(layout_node.position())
            .with_size(layout_node.size())
            .with_border_nodes(
                node.border_nodes()
                    .iter()
                    .map(|child| self.rebuild_node(child, data))
                    .collect(),
            )
            .with_child_nodes(
                node.child_nodes()
                    .iter()
                    .map(|child| self.rebuild_node(child, data))
                    .collect(),
            )
            .with_label(
                node.label()
                    .map(|label| rebuild_label(label, layout_node.label())),
            )
    }

    fn rebuild_edge(&self, edge: &Edge, data: &LayoutData) -> Edge {
        let Some(Element::Edge(index)) = data.lookup(edge.id()) else {
            return edge.clone();
        };
        let layout_edge = data.edge(index);
        let label = |label: Option<&Label>, slot| {
            label.map(|label| rebuild_label(label, layout_edge.label(slot)))
        };

        Edge::new(edge.id(), edge.source_id(), edge.target_id())
            .with_begin_label(label(edge.begin_label(), EdgeLabelSlot::Begin))
            .with_center_label(label(edge.center_label(), EdgeLabelSlot::Center))
            .with_end_label(label(edge.end_label(), EdgeLabelSlot::End))
            .with_routing_points(layout_edge.routing_points().to_vec())
    }
}

fn rebuild_label(label: &Label, layout_label: Option<&LayoutLabel>) -> Label {
    let Some(layout_label) = layout_label else {
        return label.clone();
    };
    Label::new(label.id(), label.text(), label.style().clone())
        .with_position(layout_label.position())
        .with_alignment(layout_label.alignment())
        .with_size(layout_label.size())
}
