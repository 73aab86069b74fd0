//! Label placement for nodes and edges.
//!
//! Both providers reuse the bounds left by the previous layout unless the
//! caller forces a recomputation, the label has no previous bounds, or its
//! measured text no longer matches the stored size.

use log::trace;

use relayout_core::{geometry::Point, semantic::NodeKind};

use crate::config::LayoutConfig;

use super::data::{EdgeIndex, EdgeLabelSlot, LayoutData, LayoutLabel, NodeIndex};

fn needs_update(label: &LayoutLabel, forced: bool) -> bool {
    forced || !label.has_previous_bounds() || label.is_text_resized()
}

/// Places a node's label relative to the node's top-left corner.
///
/// Labels are centered horizontally. Image labels sit above the image,
/// rectangle labels just inside the top edge, anything else on the top edge.
pub struct NodeLabelPositionProvider<'a> {
    config: &'a LayoutConfig,
}

impl<'a> NodeLabelPositionProvider<'a> {
    pub fn new(config: &'a LayoutConfig) -> Self {
        Self { config }
    }

    /// Updates the label of `node`, returning true if its bounds were recomputed.
    pub fn update(&self, data: &mut LayoutData, node: NodeIndex, forced: bool) -> bool {
        let spacing = self.config.label_spacing();
        let owner = data.node_mut(node);
        let owner_size = owner.size();
        let kind = owner.kind();
        let owner_id = owner.id();

        let Some(label) = owner.label_mut() else {
            return false;
        };
        if !needs_update(label, forced) {
            return false;
        }

        let text = label.text_bounds();
        let x = (owner_size.width() - text.size().width()) / 2.0;
        let y = match kind {
            NodeKind::Image => -(text.size().height() + spacing),
            NodeKind::Rectangle => spacing,
            NodeKind::Other => 0.0,
        };
        let position = Point::new(x, y);
        label.set_bounds(position, text.alignment(), text.size());

        trace!(node_id = owner_id.to_string(), position:?; "Placed node label");
        true
    }
}

/// Places an edge's center label on the midpoint of its first and last
/// routing points.
pub struct EdgeLabelPositionProvider;

impl EdgeLabelPositionProvider {
    /// Updates the center label of `edge`, returning true if its bounds were
    /// recomputed.
    pub fn update(&self, data: &mut LayoutData, edge: EdgeIndex, forced: bool) -> bool {
        let layout_edge = data.edge_mut(edge);
        let route = match layout_edge.routing_points() {
            [first, .., last] => Some((*first, *last)),
            _ => None,
        };
        let edge_id = layout_edge.id();

        let Some(label) = layout_edge.label_mut(EdgeLabelSlot::Center) else {
            return false;
        };
        if !needs_update(label, forced) {
            return false;
        }

        let text = label.text_bounds();
        let position = match route {
            Some((first, last)) => first.midpoint(last),
            None => Point::UNSET,
        };
        label.set_bounds(position, text.alignment(), text.size());

        trace!(edge_id = edge_id.to_string(), position:?; "Placed edge center label");
        true
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use relayout_core::{
        geometry::Size,
        identifier::Id,
        metrics::TextBounds,
        semantic::{Edge, ImageStyle, Label, LabelStyle, Node, NodeStyle, OtherStyle},
    };

    use super::*;
    use crate::layout::testing::{DataBuilder, node_of, placed};

    fn labelled(node: Node, text: &str) -> Node {
        let label = Label::new(
            Id::new(&format!("{}-label", node.id())),
            text,
            LabelStyle::default(),
        );
        node.with_label(Some(label))
    }

    fn label_position(data: &LayoutData, node: NodeIndex) -> Point {
        data.node(node).label().map(|l| l.position()).unwrap_or(Point::UNSET)
    }

    #[test]
    fn test_image_label_sits_above() {
        let image = Node::new(
            Id::new("img"),
            NodeStyle::Image(ImageStyle::new("logo.png", -1)),
        )
        .with_position(Point::new(0.0, 0.0))
        .with_size(Size::new(150.0, 70.0));
        let (mut data, _) = DataBuilder::new()
            .root_children(vec![labelled(image, "x")])
            .build();
        let node = node_of(&data, "img");

        // Replace the fixture measurement with the documented text bounds.
        let text = TextBounds::new(Size::new(64.92, 18.40), Point::new(0.0, 14.0));
        let label_id = Id::new("img-label");
        data.node_mut(node).set_label(LayoutLabel::new(label_id, text));

        let config = LayoutConfig::default();
        assert!(NodeLabelPositionProvider::new(&config).update(&mut data, node, false));

        let position = label_position(&data, node);
        assert_approx_eq!(f64, position.x(), 42.54, epsilon = 1e-9);
        assert_approx_eq!(f64, position.y(), -23.40, epsilon = 1e-9);
    }

    #[test]
    fn test_rectangle_label_sits_inside() {
        let node = labelled(
            placed("r", Point::new(0.0, 0.0), Size::new(150.0, 70.0)),
            "Hello",
        );
        let (mut data, _) = DataBuilder::new().root_children(vec![node]).build();
        let node = node_of(&data, "r");

        let config = LayoutConfig::default();
        NodeLabelPositionProvider::new(&config).update(&mut data, node, false);

        // "Hello" measures 35 × 18.
        let label = data.node(node).label().expect("label");
        assert_approx_eq!(f64, label.position().x(), 57.5);
        assert_approx_eq!(f64, label.position().y(), 5.0);
        assert_eq!(label.size(), Size::new(35.0, 18.0));
        assert_eq!(label.alignment(), Point::new(0.0, 14.0));
    }

    #[test]
    fn test_other_label_on_top_edge() {
        let node = Node::new(Id::new("o"), NodeStyle::Other(OtherStyle::new("note")))
            .with_position(Point::new(0.0, 0.0))
            .with_size(Size::new(100.0, 40.0));
        let (mut data, _) = DataBuilder::new()
            .root_children(vec![labelled(node, "ab")])
            .build();
        let node = node_of(&data, "o");

        let config = LayoutConfig::default();
        NodeLabelPositionProvider::new(&config).update(&mut data, node, false);

        assert_eq!(label_position(&data, node), Point::new(43.0, 0.0));
    }

    #[test]
    fn test_previous_bounds_reused_unless_forced() {
        let label = Label::new(Id::new("r-label"), "Hello", LabelStyle::default())
            .with_position(Point::new(1.0, 2.0))
            .with_alignment(Point::new(0.0, 14.0))
            .with_size(Size::new(35.0, 18.0));
        let node = placed("r", Point::new(0.0, 0.0), Size::new(150.0, 70.0))
            .with_label(Some(label));
        let (mut data, _) = DataBuilder::new().root_children(vec![node]).build();
        let node = node_of(&data, "r");
        let config = LayoutConfig::default();
        let provider = NodeLabelPositionProvider::new(&config);

        assert!(!provider.update(&mut data, node, false));
        assert_eq!(label_position(&data, node), Point::new(1.0, 2.0));

        assert!(provider.update(&mut data, node, true));
        assert_eq!(label_position(&data, node), Point::new(57.5, 5.0));
    }

    #[test]
    fn test_changed_text_forces_update() {
        let label = Label::new(Id::new("r-label"), "Hello world", LabelStyle::default())
            .with_position(Point::new(1.0, 2.0))
            .with_alignment(Point::new(0.0, 14.0))
            .with_size(Size::new(35.0, 18.0));
        let node = placed("r", Point::new(0.0, 0.0), Size::new(150.0, 70.0))
            .with_label(Some(label));
        let (mut data, _) = DataBuilder::new().root_children(vec![node]).build();
        let node = node_of(&data, "r");

        let config = LayoutConfig::default();
        assert!(NodeLabelPositionProvider::new(&config).update(&mut data, node, false));
        assert_eq!(data.node(node).label().expect("label").size(), Size::new(77.0, 18.0));
    }

    #[test]
    fn test_node_without_label() {
        let (mut data, nodes) = DataBuilder::new()
            .root_children(vec![placed("r", Point::new(0.0, 0.0), Size::new(10.0, 10.0))])
            .build();

        let config = LayoutConfig::default();
        assert!(!NodeLabelPositionProvider::new(&config).update(&mut data, nodes[0], true));
    }

    fn edge_fixture(routing_points: Vec<Point>, text: &str) -> (LayoutData, EdgeIndex) {
        let edge = Edge::new(Id::new("e"), Id::new("a"), Id::new("b"))
            .with_routing_points(routing_points)
            .with_center_label(Some(Label::new(
                Id::new("e-label"),
                text,
                LabelStyle::default(),
            )));
        let (data, _) = DataBuilder::new()
            .root_children(vec![
                placed("a", Point::new(0.0, 0.0), Size::new(10.0, 10.0)),
                placed("b", Point::new(90.0, 90.0), Size::new(10.0, 10.0)),
            ])
            .edges(vec![edge])
            .build();
        let (index, _) = data.edges().next().expect("edge converted");
        (data, index)
    }

    #[test]
    fn test_edge_label_on_midpoint() {
        let (mut data, edge) = edge_fixture(
            vec![Point::new(0.0, 0.0), Point::new(100.0, 100.0)],
            "abcd",
        );

        assert!(EdgeLabelPositionProvider.update(&mut data, edge, false));

        let label = data.edge(edge).label(EdgeLabelSlot::Center).expect("label");
        assert_approx_eq!(f64, label.position().x(), 50.0);
        assert_approx_eq!(f64, label.position().y(), 50.0);
        assert_eq!(label.size(), Size::new(28.0, 18.0));
    }

    #[test]
    fn test_edge_label_uses_first_and_last_points() {
        let (mut data, edge) = edge_fixture(
            vec![
                Point::new(0.0, 0.0),
                Point::new(500.0, 0.0),
                Point::new(200.0, 40.0),
            ],
            "ab",
        );

        EdgeLabelPositionProvider.update(&mut data, edge, true);

        let label = data.edge(edge).label(EdgeLabelSlot::Center).expect("label");
        assert_eq!(label.position(), Point::new(100.0, 20.0));
    }

    #[test]
    fn test_edge_label_unset_without_route() {
        let (mut data, edge) = edge_fixture(vec![Point::new(5.0, 5.0)], "ab");

        EdgeLabelPositionProvider.update(&mut data, edge, true);

        let label = data.edge(edge).label(EdgeLabelSlot::Center).expect("label");
        assert!(label.position().is_unset());
    }
}
