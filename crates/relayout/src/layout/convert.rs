//! Snapshot to layout-tree conversion.

use log::{debug, warn};
use thiserror::Error;

use relayout_core::{
    identifier::Id,
    metrics::TextMeasure,
    semantic::{Diagram, Edge, Label, Node},
};

use super::data::{
    Container, EdgeLabelSlot, Element, LayoutData, LayoutEdge, LayoutLabel, LayoutNode,
};

/// Errors raised while building a [`LayoutData`] tree from a snapshot.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("Duplicate element id `{0}` in diagram snapshot")]
    DuplicateId(Id),
}

/// A converted snapshot: the mutable layout tree plus the snapshot edges
/// that could not be attached to it.
#[derive(Debug)]
pub struct ConvertedDiagram {
    data: LayoutData,
    unresolved_edges: Vec<Edge>,
}

impl ConvertedDiagram {
    pub fn data(&self) -> &LayoutData {
        &self.data
    }

    /// Edges whose source or target id does not name a node in the snapshot.
    pub fn unresolved_edges(&self) -> &[Edge] {
        &self.unresolved_edges
    }

    pub fn into_parts(self) -> (LayoutData, Vec<Edge>) {
        (self.data, self.unresolved_edges)
    }
}

/// Builds the mutable layout tree for one snapshot.
///
/// Every node is registered in the id index before its border nodes and
/// child nodes are converted; the node's label is attached afterwards.
/// Edges are converted once all nodes exist so their endpoints resolve
/// regardless of where the nodes sit in the tree.
pub struct DiagramConverter<'a> {
    text_measure: &'a dyn TextMeasure,
}

impl<'a> DiagramConverter<'a> {
    pub fn new(text_measure: &'a dyn TextMeasure) -> Self {
        Self { text_measure }
    }

    /// Converts `diagram` into a [`ConvertedDiagram`].
    ///
    /// # Errors
    ///
    /// Returns [`ConvertError::DuplicateId`] if two elements of the snapshot
    /// share an id.
    pub fn convert(&self, diagram: &Diagram) -> Result<ConvertedDiagram, ConvertError> {
        let mut data = LayoutData::new(diagram.id(), diagram.position(), diagram.size());

        for node in diagram.nodes() {
            self.convert_node(&mut data, node, Container::Root, false)?;
        }

        let mut unresolved_edges = Vec::new();
        for edge in diagram.edges() {
            self.convert_edge(&mut data, edge, &mut unresolved_edges)?;
        }

        debug!(
            nodes = data.nodes().count(),
            edges = data.edge_count(),
            unresolved = unresolved_edges.len();
            "Converted diagram snapshot",
        );

        Ok(ConvertedDiagram {
            data,
            unresolved_edges,
        })
    }

    fn convert_node(
        &self,
        data: &mut LayoutData,
        node: &Node,
        parent: Container,
        border: bool,
    ) -> Result<(), ConvertError> {
        let index = data.next_node_index();
        if data.register(node.id(), Element::Node(index)).is_some() {
            return Err(ConvertError::DuplicateId(node.id()));
        }

        let layout_node = LayoutNode::new(node.id(), parent, node.style().clone())
            .with_geometry(node.position(), node.size());
        let index = data.push_node(layout_node, border);

        for border_node in node.border_nodes() {
            self.convert_node(data, border_node, Container::Node(index), true)?;
        }
        for child_node in node.child_nodes() {
            self.convert_node(data, child_node, Container::Node(index), false)?;
        }

        if let Some(label) = node.label() {
            if data.register(label.id(), Element::NodeLabel(index)).is_some() {
                return Err(ConvertError::DuplicateId(label.id()));
            }
            let layout_label = self.convert_label(label);
            data.node_mut(index).set_label(layout_label);
        }

        Ok(())
    }

    fn convert_edge(
        &self,
        data: &mut LayoutData,
        edge: &Edge,
        unresolved_edges: &mut Vec<Edge>,
    ) -> Result<(), ConvertError> {
        let (Some(source), Some(target)) = (
            data.node_index(edge.source_id()),
            data.node_index(edge.target_id()),
        ) else {
            warn!(
                edge = edge.id().to_string(),
                source = edge.source_id().to_string(),
                target = edge.target_id().to_string();
                "Edge endpoint does not resolve to a node, leaving edge untouched",
            );
            if data.register(edge.id(), Element::UnresolvedEdge).is_some() {
                return Err(ConvertError::DuplicateId(edge.id()));
            }
            unresolved_edges.push(edge.clone());
            return Ok(());
        };

        let index = data.next_edge_index();
        if data.register(edge.id(), Element::Edge(index)).is_some() {
            return Err(ConvertError::DuplicateId(edge.id()));
        }

        let mut layout_edge =
            LayoutEdge::new(edge.id(), source, target, edge.routing_points().to_vec());

        let slots = [
            (EdgeLabelSlot::Begin, edge.begin_label()),
            (EdgeLabelSlot::Center, edge.center_label()),
            (EdgeLabelSlot::End, edge.end_label()),
        ];
        for (slot, label) in slots {
            let Some(label) = label else {
                continue;
            };
            if data.register(label.id(), Element::EdgeLabel(index, slot)).is_some() {
                return Err(ConvertError::DuplicateId(label.id()));
            }
            layout_edge.set_label(slot, self.convert_label(label));
        }

        data.push_edge(layout_edge);
        Ok(())
    }

    fn convert_label(&self, label: &Label) -> LayoutLabel {
        let text_bounds = self.text_measure.text_bounds(label.style(), label.text());
        LayoutLabel::new(label.id(), text_bounds).with_previous_bounds(
            label.position(),
            label.alignment(),
            label.size(),
        )
    }
}
