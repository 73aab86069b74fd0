//! Separation of overlapping siblings.

use log::debug;

use super::data::{Container, LayoutData, NodeIndex};
use crate::config::LayoutConfig;

/// Pushes overlapping children of a container apart.
///
/// Children are settled one at a time: pinned children first, then the
/// rest, each group in sibling order. A child that overlaps an already
/// settled sibling is moved straight down below that sibling, leaving
/// `overlap_margin` between them, and checked again. Children only ever
/// move down, so each one is pushed at most once per settled sibling.
pub struct OverlapResolver<'a> {
    config: &'a LayoutConfig,
}

impl<'a> OverlapResolver<'a> {
    pub fn new(config: &'a LayoutConfig) -> Self {
        Self { config }
    }

    /// Resolves overlaps among the children of `container` and returns the
    /// number of children moved.
    pub fn resolve(&self, data: &mut LayoutData, container: Container) -> usize {
        let margin = self.config.overlap_margin().max(0.0);

        let (pinned, unpinned): (Vec<NodeIndex>, Vec<NodeIndex>) = data
            .children(container)
            .iter()
            .copied()
            .filter(|&child| {
                let node = data.node(child);
                !node.position().is_unset() && !node.size().is_unset()
            })
            .partition(|&child| data.node(child).is_pinned());

        let mut settled: Vec<NodeIndex> = Vec::with_capacity(pinned.len() + unpinned.len());
        let mut moved = 0;

        for child in pinned.into_iter().chain(unpinned) {
            let original = data.node(child).position();

            while let Some(obstacle) = settled.iter().copied().find(|&other| {
                data.node(child)
                    .bounds()
                    .intersects(&data.node(other).bounds())
            }) {
                let below = data.node(obstacle).bounds().max_y() + margin;
                let node = data.node_mut(child);
                node.set_position(node.position().with_y(below));
            }

            let node = data.node_mut(child);
            if node.position() != original {
                node.set_changed(true);
                moved += 1;
                debug!(
                    node_id = node.id().to_string(),
                    from:? = original,
                    to:? = node.position();
                    "Moved node out of sibling overlap",
                );
            }

            settled.push(child);
        }

        moved
    }
}
