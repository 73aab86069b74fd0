//! Incremental layout of a diagram snapshot.
//!
//! A layout run goes through three stages:
//!
//! 1. [`DiagramConverter`] builds a mutable [`LayoutData`] tree from the
//!    snapshot and measures every label.
//! 2. [`IncrementalLayoutEngine`] sizes and places new nodes, applies the
//!    requested moves and resizes, separates overlapping siblings, grows
//!    containers around their children and reroutes affected edges.
//! 3. [`LayoutedDiagramProvider`] projects the tree back onto a new snapshot.
//!
//! The individual policies ([`NodeSizeProvider`], [`NodePositionProvider`],
//! [`OverlapResolver`], [`ContainmentResolver`], [`EdgeRoutingProvider`] and
//! the label providers) are public so they can be driven on their own.

mod containment;
mod convert;
mod data;
mod engine;
mod label;
mod overlap;
mod position;
mod rebuild;
mod routing;
mod size;

#[cfg(test)]
mod testing;

pub use containment::ContainmentResolver;
pub use convert::{ConvertError, ConvertedDiagram, DiagramConverter};
pub use data::{
    Container, DiagramLayoutData, EdgeIndex, EdgeLabelSlot, Element, LayoutData, LayoutEdge,
    LayoutLabel, LayoutNode, NodeIndex,
};
pub use engine::{IncrementalLayoutEngine, LayoutReport, LayoutRequest};
pub use label::{EdgeLabelPositionProvider, NodeLabelPositionProvider};
pub use overlap::OverlapResolver;
pub use position::{NodePositionProvider, PlacementCursor};
pub use rebuild::LayoutedDiagramProvider;
pub use routing::EdgeRoutingProvider;
pub use size::NodeSizeProvider;
