//! Immutable diagram snapshot model.
//!
//! A [`Diagram`] is the read-only picture of a diagram as the rest of the
//! system knows it: a tree of [`Node`]s (each with border nodes, child nodes
//! and an optional [`Label`]) plus a flat list of [`Edge`]s connecting nodes
//! by [`Id`](crate::identifier::Id). Geometry that was never computed is
//! carried as [`Point::UNSET`](crate::geometry::Point::UNSET) /
//! [`Size::UNSET`](crate::geometry::Size::UNSET).
//!
//! Snapshots serialize to and from JSON with camelCase field names. Missing
//! node and label geometry deserializes to the unset sentinels, so a freshly
//! created node can simply omit its position and size.

mod diagram;
mod label;
mod node;

pub use diagram::{Diagram, Edge};
pub use label::{Label, LabelStyle};
pub use node::{ImageStyle, Node, NodeKind, NodeStyle, OtherStyle, RectangleStyle};

use crate::geometry::{Point, Size};

fn unset_point() -> Point {
    Point::UNSET
}

fn unset_size() -> Size {
    Size::UNSET
}
