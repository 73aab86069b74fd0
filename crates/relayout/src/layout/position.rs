//! Placement of nodes created without a position.
//!
//! New nodes are placed in traversal order and cascade diagonally from the
//! first one:
//!
//! ```text
//!   (x, y)
//!     ┌──────┐
//!     │  #1  │ (x+gap, y+gap)
//!     └──┌──────┐
//!        │  #2  │ (x+2gap, y+2gap)
//!        └──┌──────┐
//!           │  #3  │
//!           └──────┘
//! ```
//!
//! The first node lands on the starting position hint when one is given,
//! otherwise in the empty spot beneath the positioned children of its
//! container.

use log::{debug, trace};

use relayout_core::geometry::Point;

use crate::config::LayoutConfig;

use super::data::{LayoutData, NodeIndex};

/// Placement state of one layout run.
///
/// Created fresh for every run and threaded through the position provider;
/// it remembers where the previous node of the run was placed.
#[derive(Debug, Clone, Default)]
pub struct PlacementCursor {
    starting_position: Option<Point>,
    last: Option<Point>,
}

impl PlacementCursor {
    pub fn new(starting_position: Option<Point>) -> Self {
        Self {
            starting_position,
            last: None,
        }
    }

    /// Position given to the most recently placed node, if any.
    pub fn last(&self) -> Option<Point> {
        self.last
    }
}

/// Computes positions for nodes whose position is unset.
pub struct NodePositionProvider<'a> {
    config: &'a LayoutConfig,
}

impl<'a> NodePositionProvider<'a> {
    pub fn new(config: &'a LayoutConfig) -> Self {
        Self { config }
    }

    /// Returns the position for `node` and advances the cursor.
    pub fn position_for(
        &self,
        data: &LayoutData,
        node: NodeIndex,
        cursor: &mut PlacementCursor,
    ) -> Point {
        let gap = self.config.node_gap();
        let candidate = match cursor.last {
            Some(last) => last.add_point(Point::new(gap, gap)),
            None => match cursor.starting_position {
                Some(hint) => hint,
                None => self.empty_spot(data, node),
            },
        };

        let position = self.free_position(data, node, candidate);
        trace!(node_id = data.node(node).id().to_string(), position:?; "Placed new node");

        cursor.last = Some(position);
        position
    }

    /// Spot at the left edge just beneath the lowest positioned sibling.
    fn empty_spot(&self, data: &LayoutData, node: NodeIndex) -> Point {
        let gap = self.config.node_gap();
        let container = data.node(node).parent();

        let y = data
            .children(container)
            .iter()
            .filter(|&&sibling| sibling != node)
            .map(|&sibling| data.node(sibling))
            .filter(|sibling| !sibling.position().is_unset() && !sibling.size().is_unset())
            .map(|sibling| sibling.position().y() + sibling.size().height() + gap)
            .fold(gap, f64::max);

        Point::new(0.0, y)
    }

    /// Shifts `candidate` diagonally until no sibling sits exactly on it.
    fn free_position(&self, data: &LayoutData, node: NodeIndex, candidate: Point) -> Point {
        let gap = self.config.node_gap();
        let container = data.node(node).parent();
        let occupied: Vec<Point> = data
            .children(container)
            .iter()
            .filter(|&&sibling| sibling != node)
            .map(|&sibling| data.node(sibling).position())
            .filter(|position| !position.is_unset())
            .collect();

        let mut position = candidate;
        // Each shift moves past at least one occupied spot.
        for _ in 0..=occupied.len() {
            if !occupied.contains(&position) {
                break;
            }
            debug!(position:?; "Position already occupied, shifting diagonally");
            position = position.add_point(Point::new(gap, gap));
        }
        position
    }
}
