//! The incremental layout pass.

use std::collections::HashMap;

use log::{debug, trace, warn};
use serde::Deserialize;

use relayout_core::{
    geometry::{Point, Size},
    identifier::Id,
    metrics::ImageMeasure,
};

use crate::config::LayoutConfig;

use super::{
    containment::ContainmentResolver,
    data::{Container, LayoutData, NodeIndex},
    label::{EdgeLabelPositionProvider, NodeLabelPositionProvider},
    overlap::OverlapResolver,
    position::{NodePositionProvider, PlacementCursor},
    routing::EdgeRoutingProvider,
    size::NodeSizeProvider,
};

/// External changes applied by one layout run.
///
/// Deserializes from `{"moved": {...}, "resized": {...}, "startingPosition": {...}}`
/// with every field optional.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutRequest {
    moved: HashMap<Id, Point>,
    resized: HashMap<Id, Size>,
    starting_position: Option<Point>,
}

impl LayoutRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests `id` to be moved to `position`, relative to its parent.
    pub fn with_moved(mut self, id: Id, position: Point) -> Self {
        self.moved.insert(id, position);
        self
    }

    /// Requests `id` to be resized to `size`.
    pub fn with_resized(mut self, id: Id, size: Size) -> Self {
        self.resized.insert(id, size);
        self
    }

    /// Sets where the first newly created node of the run should be placed.
    pub fn with_starting_position(mut self, position: Point) -> Self {
        self.starting_position = Some(position);
        self
    }

    pub fn moved(&self) -> &HashMap<Id, Point> {
        &self.moved
    }

    pub fn resized(&self) -> &HashMap<Id, Size> {
        &self.resized
    }

    pub fn starting_position(&self) -> Option<Point> {
        self.starting_position
    }
}

/// Summary of what a layout run touched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LayoutReport {
    /// Nodes whose geometry changed.
    pub nodes_changed: usize,
    /// Nodes that received a computed default size.
    pub nodes_sized: usize,
    /// Nodes that received a computed position.
    pub nodes_placed: usize,
    /// Nodes moved apart by overlap resolution.
    pub nodes_separated: usize,
    /// Edges whose routing points were recomputed.
    pub edges_rerouted: usize,
    /// Node and edge labels whose bounds were recomputed.
    pub labels_updated: usize,
}

/// Lays out a [`LayoutData`] tree incrementally.
///
/// Only nodes without geometry, nodes named by the request and containers
/// whose children spill over are touched; everything else keeps the
/// geometry of the previous run. A run over an unchanged tree with an empty
/// request is a no-op.
///
/// # Traversal
///
/// Nodes are visited bottom-up, border nodes before child nodes, so a
/// container is resolved only after all of its descendants. For each node:
///
/// 1. size: requested size, else a default size if unset, else kept;
/// 2. position: requested position, else a computed position if unset,
///    else kept (both of the former pin the node);
/// 3. overlap then containment resolution over its child nodes;
/// 4. its label.
///
/// The root's children are then resolved the same way, and finally every
/// edge with a changed endpoint, or no route yet, is rerouted.
pub struct IncrementalLayoutEngine<'a> {
    config: &'a LayoutConfig,
    image_measure: &'a dyn ImageMeasure,
}

impl<'a> IncrementalLayoutEngine<'a> {
    pub fn new(config: &'a LayoutConfig, image_measure: &'a dyn ImageMeasure) -> Self {
        Self {
            config,
            image_measure,
        }
    }

    /// Runs one incremental layout pass over `data`.
    pub fn layout(&self, data: &mut LayoutData, request: &LayoutRequest) -> LayoutReport {
        for id in request.moved().keys().chain(request.resized().keys()) {
            if data.node_index(*id).is_none() {
                warn!(id = id.to_string(); "Requested change does not name a node, ignoring it");
            }
        }

        let mut report = LayoutReport::default();
        let mut cursor = PlacementCursor::new(request.starting_position());

        for node in data.post_order() {
            self.layout_node(data, node, request, &mut cursor, &mut report);
        }

        let overlap = OverlapResolver::new(self.config);
        report.nodes_separated += overlap.resolve(data, Container::Root);
        ContainmentResolver.resolve(data, Container::Root);

        self.layout_edges(data, &mut report);

        report.nodes_changed = data.nodes().filter(|(_, node)| node.is_changed()).count();
        debug!(
            nodes_changed = report.nodes_changed,
            nodes_sized = report.nodes_sized,
            nodes_placed = report.nodes_placed,
            nodes_separated = report.nodes_separated,
            edges_rerouted = report.edges_rerouted,
            labels_updated = report.labels_updated;
            "Incremental layout finished",
        );
        report
    }

    fn layout_node(
        &self,
        data: &mut LayoutData,
        index: NodeIndex,
        request: &LayoutRequest,
        cursor: &mut PlacementCursor,
        report: &mut LayoutReport,
    ) {
        let id = data.node(index).id();

        if let Some(&size) = request.resized().get(&id) {
            let node = data.node_mut(index);
            node.set_size(size);
            node.set_changed(true);
            trace!(node_id = id.to_string(), size:?; "Applied requested size");
        } else if data.node(index).size().is_unset() {
            let provider = NodeSizeProvider::new(self.config, self.image_measure);
            let size = provider.size_for(data.node(index).style());
            let node = data.node_mut(index);
            node.set_size(size);
            node.set_changed(true);
            report.nodes_sized += 1;
        }

        if let Some(&position) = request.moved().get(&id) {
            let node = data.node_mut(index);
            node.set_position(position);
            node.set_changed(true);
            node.set_pinned(true);
            trace!(node_id = id.to_string(), position:?; "Applied requested position");
        } else if data.node(index).position().is_unset() {
            let provider = NodePositionProvider::new(self.config);
            let position = provider.position_for(data, index, cursor);
            let node = data.node_mut(index);
            node.set_position(position);
            node.set_changed(true);
            node.set_pinned(true);
            report.nodes_placed += 1;
        }

        let overlap = OverlapResolver::new(self.config);
        report.nodes_separated += overlap.resolve(data, Container::Node(index));
        ContainmentResolver.resolve(data, Container::Node(index));

        let forced = data.node(index).is_changed();
        if NodeLabelPositionProvider::new(self.config).update(data, index, forced) {
            report.labels_updated += 1;
        }
    }

    fn layout_edges(&self, data: &mut LayoutData, report: &mut LayoutReport) {
        let edges: Vec<_> = data.edges().map(|(index, _)| index).collect();
        for index in edges {
            let edge = data.edge(index);
            let reroute = edge.routing_points().len() < 2
                || data.has_changed(edge.source())
                || data.has_changed(edge.target());

            if reroute {
                let points = EdgeRoutingProvider.route(data, index);
                trace!(edge_id = edge.id().to_string(), points:?; "Rerouted edge");
                data.edge_mut(index).set_routing_points(points);
                report.edges_rerouted += 1;
            }

            if EdgeLabelPositionProvider.update(data, index, reroute) {
                report.labels_updated += 1;
            }
        }
    }
}
