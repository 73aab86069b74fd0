//! Shared fixtures for the layout unit tests.

use relayout_core::{
    geometry::{Point, Size},
    identifier::Id,
    metrics::TextBounds,
    semantic::{Diagram, Edge, LabelStyle, Node, NodeStyle, RectangleStyle},
};

use super::{
    convert::DiagramConverter,
    data::{LayoutData, NodeIndex},
};

/// Measures every character as 7 × 18 with a baseline at 14.
pub(crate) fn fixed_text_measure(_: &LabelStyle, text: &str) -> TextBounds {
    if text.is_empty() {
        return TextBounds::default();
    }
    let width = text.chars().count() as f64 * 7.0;
    TextBounds::new(Size::new(width, 18.0), Point::new(0.0, 14.0))
}

pub(crate) fn rect_style() -> NodeStyle {
    NodeStyle::Rectangle(RectangleStyle::default())
}

/// A rectangle node with no geometry yet.
pub(crate) fn unplaced(id: &str) -> Node {
    Node::new(Id::new(id), rect_style())
}

/// A rectangle node at `position` with `size`.
pub(crate) fn placed(id: &str, position: Point, size: Size) -> Node {
    Node::new(Id::new(id), rect_style())
        .with_position(position)
        .with_size(size)
}

/// Builds a [`LayoutData`] through the converter.
pub(crate) struct DataBuilder {
    diagram: Diagram,
}

impl DataBuilder {
    pub(crate) fn new() -> Self {
        Self {
            diagram: Diagram::new(Id::new("diagram")),
        }
    }

    pub(crate) fn root_size(mut self, size: Size) -> Self {
        self.diagram = self.diagram.with_size(size);
        self
    }

    pub(crate) fn root_children(mut self, nodes: Vec<Node>) -> Self {
        self.diagram = self.diagram.with_nodes(nodes);
        self
    }

    pub(crate) fn edges(mut self, edges: Vec<Edge>) -> Self {
        self.diagram = self.diagram.with_edges(edges);
        self
    }

    pub(crate) fn diagram(&self) -> &Diagram {
        &self.diagram
    }

    /// Returns the tree and the indices of the root's children.
    pub(crate) fn build(&self) -> (LayoutData, Vec<NodeIndex>) {
        let converter = DiagramConverter::new(&fixed_text_measure);
        let (data, _) = converter
            .convert(&self.diagram)
            .expect("fixture diagram converts")
            .into_parts();
        let roots = data.root().child_nodes().to_vec();
        (data, roots)
    }
}

/// Looks a node up by id, panicking if it is missing.
pub(crate) fn node_of(data: &LayoutData, id: &str) -> NodeIndex {
    data.node_index(Id::new(id))
        .unwrap_or_else(|| panic!("node `{id}` exists"))
}
