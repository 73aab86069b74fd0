//! Straight-line edge routing.

use relayout_core::geometry::Point;

use super::data::{EdgeIndex, LayoutData, NodeIndex};

/// Routes an edge as a straight segment between the absolute centers of
/// its source and target nodes.
#[derive(Debug, Default)]
pub struct EdgeRoutingProvider;

impl EdgeRoutingProvider {
    pub fn route(&self, data: &LayoutData, edge: EdgeIndex) -> Vec<Point> {
        let edge = data.edge(edge);
        vec![
            absolute_center(data, edge.source()),
            absolute_center(data, edge.target()),
        ]
    }
}

fn absolute_center(data: &LayoutData, node: NodeIndex) -> Point {
    data.absolute_position(node)
        .add_point(data.node(node).size().half())
}
