//! Growing containers around their children.

use log::debug;

use relayout_core::geometry::{Point, Size};

use super::data::{Container, LayoutData};

/// Keeps a container's children inside it.
///
/// The top-left pass moves a node container up and left by however far its
/// children reach into negative coordinates, shifts the children back by the
/// same amount so they keep their absolute position, and grows the container
/// so its bottom-right corner stays put. The diagram root is never moved.
///
/// The bottom-right pass grows the container until it covers the far edge
/// of every child.
#[derive(Debug, Default)]
pub struct ContainmentResolver;

impl ContainmentResolver {
    /// Resolves containment for `container`, returning true if its geometry changed.
    pub fn resolve(&self, data: &mut LayoutData, container: Container) -> bool {
        let children: Vec<_> = data
            .children(container)
            .iter()
            .copied()
            .filter(|&child| {
                let node = data.node(child);
                !node.position().is_unset() && !node.size().is_unset()
            })
            .collect();
        if children.is_empty() {
            return false;
        }

        let mut changed = false;

        if container != Container::Root {
            let (min_x, min_y) = children
                .iter()
                .map(|&child| data.node(child).position())
                .fold((0.0f64, 0.0f64), |(x, y), p| (x.min(p.x()), y.min(p.y())));

            if min_x < 0.0 || min_y < 0.0 {
                let shift = Point::new(-min_x, -min_y);
                let position = data.container_position(container);
                let size = data.container_size(container);

                data.set_container_position(container, position.sub_point(shift));
                data.set_container_size(container, size.grow(shift.x(), shift.y()));
                for &child in &children {
                    let node = data.node_mut(child);
                    node.set_position(node.position().add_point(shift));
                }

                debug!(shift:?; "Shifted container to cover negative child coordinates");
                changed = true;
            }
        }

        let extent = children
            .iter()
            .map(|&child| data.node(child).bounds())
            .fold(Size::default(), |extent, bounds| {
                extent.max(Size::new(bounds.max_x(), bounds.max_y()))
            });
        let size = data.container_size(container);
        let grown = size.max(extent);
        if grown != size {
            data.set_container_size(container, grown);
            debug!(from:? = size, to:? = grown; "Grew container to cover its children");
            changed = true;
        }

        if changed {
            data.mark_changed(container);
        }
        changed
    }
}
