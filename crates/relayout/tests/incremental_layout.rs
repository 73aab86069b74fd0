use relayout::{
    LayoutBuilder, LayoutRequest, RelayoutError,
    config::{AppConfig, LayoutConfig},
    geometry::{Point, Size},
    identifier::Id,
    metrics::TextBounds,
    semantic::{
        Diagram, Edge, ImageStyle, Label, LabelStyle, Node, NodeStyle, RectangleStyle,
    },
};

fn measure_text(_: &LabelStyle, text: &str) -> TextBounds {
    TextBounds::new(
        Size::new(text.chars().count() as f64 * 8.0, 20.0),
        Point::new(0.0, 15.0),
    )
}

fn builder() -> LayoutBuilder {
    LayoutBuilder::new(AppConfig::default())
        .with_text_measure(measure_text)
        .with_image_measure(|url: &str| (url == "logo.png").then(|| Size::new(200.0, 100.0)))
}

fn rect(id: &str) -> Node {
    Node::new(Id::new(id), NodeStyle::Rectangle(RectangleStyle::default()))
}

fn label(id: &str, text: &str) -> Option<Label> {
    Some(Label::new(Id::new(id), text, LabelStyle::default()))
}

/// A package holding two classes linked by an edge, plus an unrelated note.
fn fresh_diagram() -> Diagram {
    let package = rect("package")
        .with_label(label("package-label", "Package"))
        .with_child_nodes(vec![
            rect("class-a").with_label(label("class-a-label", "A")),
            rect("class-b").with_label(label("class-b-label", "B")),
        ]);
    Diagram::new(Id::new("diagram"))
        .with_nodes(vec![package, rect("note")])
        .with_edges(vec![
            Edge::new(Id::new("link"), Id::new("class-a"), Id::new("class-b"))
                .with_center_label(label("link-label", "uses")),
        ])
}

fn find<'a>(nodes: &'a [Node], id: &str) -> &'a Node {
    fn search<'a>(nodes: &'a [Node], id: &str) -> Option<&'a Node> {
        nodes.iter().find_map(|node| {
            if node.id() == id {
                Some(node)
            } else {
                search(node.child_nodes(), id)
            }
        })
    }
    search(nodes, id).unwrap_or_else(|| panic!("node `{id}` in output"))
}

fn assert_no_sibling_overlap(nodes: &[Node]) {
    for (i, a) in nodes.iter().enumerate() {
        for b in &nodes[i + 1..] {
            let a_bounds = a.position().to_bounds(a.size());
            let b_bounds = b.position().to_bounds(b.size());
            assert!(
                !a_bounds.intersects(&b_bounds),
                "`{}` overlaps `{}`",
                a.id(),
                b.id()
            );
        }
        assert_no_sibling_overlap(a.child_nodes());
    }
}

#[test]
fn first_layout_places_everything() {
    let output = builder()
        .layout(&fresh_diagram(), &LayoutRequest::new())
        .unwrap();

    assert_no_sibling_overlap(output.nodes());

    let package = find(output.nodes(), "package");
    for child in package.child_nodes() {
        let bounds = child.position().to_bounds(child.size());
        assert!(bounds.min_x() >= 0.0 && bounds.min_y() >= 0.0);
        assert!(bounds.max_x() <= package.size().width());
        assert!(bounds.max_y() <= package.size().height());
    }

    let package_label = package.label().unwrap();
    assert_eq!(package_label.size(), Size::new(56.0, 20.0));
    assert_eq!(package_label.position().y(), 5.0);

    let edge = &output.edges()[0];
    assert_eq!(edge.routing_points().len(), 2);
    let center_label = edge.center_label().unwrap();
    assert!(!center_label.position().is_unset());
}

#[test]
fn edge_center_label_sits_on_route_midpoint() {
    let diagram = Diagram::new(Id::new("diagram"))
        .with_nodes(vec![
            rect("a")
                .with_position(Point::new(0.0, 0.0))
                .with_size(Size::new(50.0, 50.0)),
            rect("b")
                .with_position(Point::new(200.0, 0.0))
                .with_size(Size::new(50.0, 50.0)),
        ])
        .with_edges(vec![
            Edge::new(Id::new("ab"), Id::new("a"), Id::new("b"))
                .with_center_label(label("ab-label", "ab")),
        ]);

    let output = builder().layout(&diagram, &LayoutRequest::new()).unwrap();

    let edge = &output.edges()[0];
    assert_eq!(
        edge.routing_points(),
        &[Point::new(25.0, 25.0), Point::new(225.0, 25.0)]
    );
    assert_eq!(
        edge.center_label().unwrap().position(),
        Point::new(125.0, 25.0)
    );
}

#[test]
fn second_run_without_changes_is_identity() {
    let builder = builder();
    let first = builder
        .layout(&fresh_diagram(), &LayoutRequest::new())
        .unwrap();

    let (second, report) = builder
        .layout_with_report(&first, &LayoutRequest::new())
        .unwrap();

    assert_eq!(first, second);
    assert_eq!(report.nodes_changed, 0);
    assert_eq!(report.edges_rerouted, 0);
    assert_eq!(report.labels_updated, 0);
}

#[test]
fn moving_a_child_grows_its_package_and_reroutes() {
    let builder = builder();
    let first = builder
        .layout(&fresh_diagram(), &LayoutRequest::new())
        .unwrap();
    let package_before = find(first.nodes(), "package").size();

    let request = LayoutRequest::new().with_moved(Id::new("class-b"), Point::new(600.0, 400.0));
    let (second, report) = builder.layout_with_report(&first, &request).unwrap();

    let package = find(second.nodes(), "package");
    let class_b = find(second.nodes(), "class-b");
    assert_eq!(class_b.position(), Point::new(600.0, 400.0));
    assert!(package.size().width() >= 600.0 + class_b.size().width());
    assert!(package.size().height() >= 400.0 + class_b.size().height());
    assert!(package.size().width() > package_before.width());
    assert_eq!(report.edges_rerouted, 1);

    let route = second.edges()[0].routing_points();
    let target_center = package
        .position()
        .add_point(class_b.position())
        .add_point(class_b.size().half());
    assert_eq!(route.last(), Some(&target_center));

    // The untouched sibling keeps its geometry.
    assert_eq!(
        find(second.nodes(), "class-a").position(),
        find(first.nodes(), "class-a").position()
    );

    // The grown package now covers the note, which is pushed below it.
    let note = find(second.nodes(), "note");
    assert_eq!(note.position().x(), find(first.nodes(), "note").position().x());
    assert!(note.position().y() >= package.position().y() + package.size().height());
}

#[test]
fn new_image_node_is_scaled() {
    let diagram = Diagram::new(Id::new("diagram")).with_nodes(vec![
        Node::new(Id::new("logo"), NodeStyle::Image(ImageStyle::new("logo.png", 5)))
            .with_label(label("logo-label", "Logo")),
        Node::new(Id::new("raw"), NodeStyle::Image(ImageStyle::new("logo.png", -1))),
    ]);

    let output = builder().layout(&diagram, &LayoutRequest::new()).unwrap();

    assert_eq!(find(output.nodes(), "logo").size(), Size::new(50.0, 25.0));
    assert_eq!(find(output.nodes(), "raw").size(), Size::new(200.0, 100.0));

    let logo_label = find(output.nodes(), "logo").label().unwrap();
    assert_eq!(logo_label.position(), Point::new(9.0, -25.0));
}

#[test]
fn starting_position_places_first_new_node() {
    let diagram = Diagram::new(Id::new("diagram")).with_nodes(vec![rect("a")]);
    let request = LayoutRequest::new().with_starting_position(Point::new(20.0, 70.0));

    let output = builder().layout(&diagram, &request).unwrap();

    assert_eq!(output.nodes()[0].position(), Point::new(20.0, 70.0));
    assert_eq!(output.nodes()[0].size(), Size::new(150.0, 70.0));
}

#[test]
fn configured_gap_drives_placement() {
    let config = AppConfig::new(LayoutConfig::default().with_node_gap(50.0));
    let builder = LayoutBuilder::new(config).with_text_measure(measure_text);
    let diagram = Diagram::new(Id::new("diagram")).with_nodes(vec![rect("a")]);

    let output = builder.layout(&diagram, &LayoutRequest::new()).unwrap();

    assert_eq!(output.nodes()[0].position(), Point::new(0.0, 50.0));
}

#[test]
fn dangling_edge_survives_untouched() {
    let dangling = Edge::new(Id::new("dangling"), Id::new("a"), Id::new("missing"))
        .with_routing_points(vec![Point::new(1.0, 1.0), Point::new(2.0, 2.0)]);
    let diagram = Diagram::new(Id::new("diagram"))
        .with_nodes(vec![rect("a")])
        .with_edges(vec![dangling.clone()]);

    let output = builder().layout(&diagram, &LayoutRequest::new()).unwrap();

    assert_eq!(output.edges(), &[dangling]);
}

#[test]
fn duplicate_ids_are_rejected() {
    let diagram = Diagram::new(Id::new("diagram")).with_nodes(vec![rect("a"), rect("a")]);

    let err = builder()
        .layout(&diagram, &LayoutRequest::new())
        .unwrap_err();

    assert!(matches!(err, RelayoutError::Convert(_)));
}

#[test]
fn non_finite_request_is_rejected() {
    let request = LayoutRequest::new().with_moved(Id::new("a"), Point::new(f64::NAN, 0.0));

    let err = builder().layout(&fresh_diagram(), &request).unwrap_err();

    assert!(matches!(err, RelayoutError::Layout(_)));
}
