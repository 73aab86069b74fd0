//! The diagram root and its edges.

use serde::{Deserialize, Serialize};

use crate::{
    geometry::{Point, Size},
    identifier::Id,
    semantic::{Label, Node},
};

/// An edge between two nodes, referenced by id.
///
/// Routing points are absolute: the first point anchors on the source, the
/// last one on the target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Edge {
    id: Id,
    source_id: Id,
    target_id: Id,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    begin_label: Option<Label>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    center_label: Option<Label>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    end_label: Option<Label>,
    #[serde(default)]
    routing_points: Vec<Point>,
}

impl Edge {
    /// Creates an unrouted edge without labels.
    pub fn new(id: Id, source_id: Id, target_id: Id) -> Self {
        Self {
            id,
            source_id,
            target_id,
            begin_label: None,
            center_label: None,
            end_label: None,
            routing_points: Vec::new(),
        }
    }

    pub fn with_begin_label(mut self, label: Option<Label>) -> Self {
        self.begin_label = label;
        self
    }

    pub fn with_center_label(mut self, label: Option<Label>) -> Self {
        self.center_label = label;
        self
    }

    pub fn with_end_label(mut self, label: Option<Label>) -> Self {
        self.end_label = label;
        self
    }

    pub fn with_routing_points(mut self, routing_points: Vec<Point>) -> Self {
        self.routing_points = routing_points;
        self
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn source_id(&self) -> Id {
        self.source_id
    }

    pub fn target_id(&self) -> Id {
        self.target_id
    }

    pub fn begin_label(&self) -> Option<&Label> {
        self.begin_label.as_ref()
    }

    pub fn center_label(&self) -> Option<&Label> {
        self.center_label.as_ref()
    }

    pub fn end_label(&self) -> Option<&Label> {
        self.end_label.as_ref()
    }

    pub fn routing_points(&self) -> &[Point] {
        &self.routing_points
    }
}

/// A diagram snapshot: top-level nodes and every edge of the diagram.
///
/// The diagram itself is a container positioned at its own origin; layout
/// may grow its size but never moves it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagram {
    id: Id,
    #[serde(default)]
    position: Point,
    #[serde(default)]
    size: Size,
    #[serde(default)]
    nodes: Vec<Node>,
    #[serde(default)]
    edges: Vec<Edge>,
}

impl Diagram {
    /// Creates an empty diagram at the origin.
    pub fn new(id: Id) -> Self {
        Self {
            id,
            position: Point::default(),
            size: Size::default(),
            nodes: Vec::new(),
            edges: Vec::new(),
        }
    }

    pub fn with_position(mut self, position: Point) -> Self {
        self.position = position;
        self
    }

    pub fn with_size(mut self, size: Size) -> Self {
        self.size = size;
        self
    }

    pub fn with_nodes(mut self, nodes: Vec<Node>) -> Self {
        self.nodes = nodes;
        self
    }

    pub fn with_edges(mut self, edges: Vec<Edge>) -> Self {
        self.edges = edges;
        self
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }
}
