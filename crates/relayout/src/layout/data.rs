//! Mutable layout tree.
//!
//! [`LayoutData`] mirrors one diagram snapshot for the duration of a single
//! layout run. Nodes and edges live in arenas owned by `LayoutData`; a node
//! owns its border and child nodes through [`NodeIndex`] handles and keeps a
//! non-owning [`Container`] handle to its parent. The parent handle is only
//! ever read: to compute absolute positions and to propagate change flags.
//!
//! ```text
//!   Root ──► child_nodes ──► LayoutNode ──► border_nodes ──► LayoutNode ...
//!                                  │    └─► child_nodes  ──► LayoutNode ...
//!                                  └─► label
//!   edges ──► LayoutEdge { source: NodeIndex, target: NodeIndex, labels }
//! ```

use indexmap::IndexMap;

use relayout_core::{
    geometry::{Bounds, Point, Size},
    identifier::Id,
    metrics::TextBounds,
    semantic::{NodeKind, NodeStyle},
};

/// Handle of a node in the layout arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeIndex(usize);

/// Handle of an edge in the layout arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EdgeIndex(usize);

/// Anything that owns an ordered list of child nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Container {
    /// The diagram itself.
    Root,
    Node(NodeIndex),
}

/// Which of an edge's three label slots a label sits in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeLabelSlot {
    Begin,
    Center,
    End,
}

/// What an id resolves to in the [`LayoutData`] index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Element {
    Diagram,
    Node(NodeIndex),
    Edge(EdgeIndex),
    NodeLabel(NodeIndex),
    EdgeLabel(EdgeIndex, EdgeLabelSlot),
    /// An edge kept out of the tree because an endpoint did not resolve.
    UnresolvedEdge,
}

/// Mutable bounds of a node or edge label.
///
/// `position`, `alignment` and `size` hold the bounds stored by the previous
/// layout (unset if there were none). `text_bounds` is the measurement of
/// the label's current text.
#[derive(Debug, Clone)]
pub struct LayoutLabel {
    id: Id,
    text_bounds: TextBounds,
    position: Point,
    alignment: Point,
    size: Size,
}

impl LayoutLabel {
    pub fn new(id: Id, text_bounds: TextBounds) -> Self {
        Self {
            id,
            text_bounds,
            position: Point::UNSET,
            alignment: Point::UNSET,
            size: Size::UNSET,
        }
    }

    /// Sets the bounds left by the previous layout.
    pub fn with_previous_bounds(mut self, position: Point, alignment: Point, size: Size) -> Self {
        self.position = position;
        self.alignment = alignment;
        self.size = size;
        self
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn text_bounds(&self) -> TextBounds {
        self.text_bounds
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn alignment(&self) -> Point {
        self.alignment
    }

    pub fn size(&self) -> Size {
        self.size
    }

    /// Returns true if a previous layout left bounds on this label.
    pub fn has_previous_bounds(&self) -> bool {
        !self.position.is_unset() && !self.size.is_unset()
    }

    /// Returns true if the stored size no longer matches the measured text.
    pub fn is_text_resized(&self) -> bool {
        self.size != self.text_bounds.size()
    }

    pub fn set_bounds(&mut self, position: Point, alignment: Point, size: Size) {
        self.position = position;
        self.alignment = alignment;
        self.size = size;
    }
}

/// Mutable layout state of one node.
#[derive(Debug, Clone)]
pub struct LayoutNode {
    id: Id,
    parent: Container,
    style: NodeStyle,
    position: Point,
    size: Size,
    border_nodes: Vec<NodeIndex>,
    child_nodes: Vec<NodeIndex>,
    label: Option<LayoutLabel>,
    changed: bool,
    pinned: bool,
}

impl LayoutNode {
    pub fn new(id: Id, parent: Container, style: NodeStyle) -> Self {
        Self {
            id,
            parent,
            style,
            position: Point::UNSET,
            size: Size::UNSET,
            border_nodes: Vec::new(),
            child_nodes: Vec::new(),
            label: None,
            changed: false,
            pinned: false,
        }
    }

    pub fn with_geometry(mut self, position: Point, size: Size) -> Self {
        self.position = position;
        self.size = size;
        self
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn parent(&self) -> Container {
        self.parent
    }

    pub fn kind(&self) -> NodeKind {
        self.style.kind()
    }

    pub fn style(&self) -> &NodeStyle {
        &self.style
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn size(&self) -> Size {
        self.size
    }

    /// Bounds in the parent's frame.
    pub fn bounds(&self) -> Bounds {
        self.position.to_bounds(self.size)
    }

    pub fn border_nodes(&self) -> &[NodeIndex] {
        &self.border_nodes
    }

    pub fn child_nodes(&self) -> &[NodeIndex] {
        &self.child_nodes
    }

    pub fn label(&self) -> Option<&LayoutLabel> {
        self.label.as_ref()
    }

    pub fn label_mut(&mut self) -> Option<&mut LayoutLabel> {
        self.label.as_mut()
    }

    pub fn set_label(&mut self, label: LayoutLabel) {
        self.label = Some(label);
    }

    pub fn set_position(&mut self, position: Point) {
        self.position = position;
    }

    pub fn set_size(&mut self, size: Size) {
        self.size = size;
    }

    /// Returns true if this node's own geometry changed during the run.
    pub fn is_changed(&self) -> bool {
        self.changed
    }

    pub fn set_changed(&mut self, changed: bool) {
        self.changed = changed;
    }

    /// Returns true if this node's position was decided explicitly during the run.
    pub fn is_pinned(&self) -> bool {
        self.pinned
    }

    pub fn set_pinned(&mut self, pinned: bool) {
        self.pinned = pinned;
    }
}

/// Mutable layout state of one edge.
#[derive(Debug, Clone)]
pub struct LayoutEdge {
    id: Id,
    source: NodeIndex,
    target: NodeIndex,
    begin_label: Option<LayoutLabel>,
    center_label: Option<LayoutLabel>,
    end_label: Option<LayoutLabel>,
    routing_points: Vec<Point>,
}

impl LayoutEdge {
    pub fn new(id: Id, source: NodeIndex, target: NodeIndex, routing_points: Vec<Point>) -> Self {
        Self {
            id,
            source,
            target,
            begin_label: None,
            center_label: None,
            end_label: None,
            routing_points,
        }
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn source(&self) -> NodeIndex {
        self.source
    }

    pub fn target(&self) -> NodeIndex {
        self.target
    }

    pub fn label(&self, slot: EdgeLabelSlot) -> Option<&LayoutLabel> {
        match slot {
            EdgeLabelSlot::Begin => self.begin_label.as_ref(),
            EdgeLabelSlot::Center => self.center_label.as_ref(),
            EdgeLabelSlot::End => self.end_label.as_ref(),
        }
    }

    pub fn label_mut(&mut self, slot: EdgeLabelSlot) -> Option<&mut LayoutLabel> {
        match slot {
            EdgeLabelSlot::Begin => self.begin_label.as_mut(),
            EdgeLabelSlot::Center => self.center_label.as_mut(),
            EdgeLabelSlot::End => self.end_label.as_mut(),
        }
    }

    pub fn set_label(&mut self, slot: EdgeLabelSlot, label: LayoutLabel) {
        let target = match slot {
            EdgeLabelSlot::Begin => &mut self.begin_label,
            EdgeLabelSlot::Center => &mut self.center_label,
            EdgeLabelSlot::End => &mut self.end_label,
        };
        *target = Some(label);
    }

    pub fn routing_points(&self) -> &[Point] {
        &self.routing_points
    }

    pub fn set_routing_points(&mut self, routing_points: Vec<Point>) {
        self.routing_points = routing_points;
    }
}

/// The diagram root container.
#[derive(Debug, Clone)]
pub struct DiagramLayoutData {
    id: Id,
    position: Point,
    size: Size,
    child_nodes: Vec<NodeIndex>,
}

impl DiagramLayoutData {
    pub fn id(&self) -> Id {
        self.id
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn child_nodes(&self) -> &[NodeIndex] {
        &self.child_nodes
    }
}

/// The complete mutable tree of one diagram plus its id index.
#[derive(Debug, Clone)]
pub struct LayoutData {
    root: DiagramLayoutData,
    nodes: Vec<LayoutNode>,
    edges: Vec<LayoutEdge>,
    index: IndexMap<Id, Element>,
}

impl LayoutData {
    /// Creates an empty tree for the diagram with the given id and geometry.
    pub(crate) fn new(id: Id, position: Point, size: Size) -> Self {
        let mut index = IndexMap::new();
        index.insert(id, Element::Diagram);
        Self {
            root: DiagramLayoutData {
                id,
                position,
                size,
                child_nodes: Vec::new(),
            },
            nodes: Vec::new(),
            edges: Vec::new(),
            index,
        }
    }

    // =========================================================================
    // Construction (used by the converter)
    // =========================================================================

    /// Returns the element already registered under `id`, if any.
    pub(crate) fn register(&mut self, id: Id, element: Element) -> Option<Element> {
        if let Some(existing) = self.index.get(&id) {
            return Some(*existing);
        }
        self.index.insert(id, element);
        None
    }

    /// Index the next pushed node will receive.
    pub(crate) fn next_node_index(&self) -> NodeIndex {
        NodeIndex(self.nodes.len())
    }

    /// Index the next pushed edge will receive.
    pub(crate) fn next_edge_index(&self) -> EdgeIndex {
        EdgeIndex(self.edges.len())
    }

    /// Adds a node to the arena and attaches it to its parent.
    pub(crate) fn push_node(&mut self, node: LayoutNode, border: bool) -> NodeIndex {
        let index = self.next_node_index();
        match (node.parent(), border) {
            (Container::Root, _) => self.root.child_nodes.push(index),
            (Container::Node(parent), true) => self.nodes[parent.0].border_nodes.push(index),
            (Container::Node(parent), false) => self.nodes[parent.0].child_nodes.push(index),
        }
        self.nodes.push(node);
        index
    }

    pub(crate) fn push_edge(&mut self, edge: LayoutEdge) -> EdgeIndex {
        let index = self.next_edge_index();
        self.edges.push(edge);
        index
    }

    // =========================================================================
    // Lookup
    // =========================================================================

    pub fn root(&self) -> &DiagramLayoutData {
        &self.root
    }

    pub fn node(&self, index: NodeIndex) -> &LayoutNode {
        &self.nodes[index.0]
    }

    pub fn node_mut(&mut self, index: NodeIndex) -> &mut LayoutNode {
        &mut self.nodes[index.0]
    }

    pub fn edge(&self, index: EdgeIndex) -> &LayoutEdge {
        &self.edges[index.0]
    }

    pub fn edge_mut(&mut self, index: EdgeIndex) -> &mut LayoutEdge {
        &mut self.edges[index.0]
    }

    /// Iterates over all nodes in conversion (preorder) order.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeIndex, &LayoutNode)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (NodeIndex(i), node))
    }

    /// Iterates over all edges in snapshot order.
    pub fn edges(&self) -> impl Iterator<Item = (EdgeIndex, &LayoutEdge)> {
        self.edges
            .iter()
            .enumerate()
            .map(|(i, edge)| (EdgeIndex(i), edge))
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Resolves an id through the index.
    pub fn lookup(&self, id: Id) -> Option<Element> {
        self.index.get(&id).copied()
    }

    /// Resolves an id to a node, ignoring ids of other element kinds.
    pub fn node_index(&self, id: Id) -> Option<NodeIndex> {
        match self.lookup(id)? {
            Element::Node(index) => Some(index),
            _ => None,
        }
    }

    // =========================================================================
    // Container capability
    // =========================================================================

    pub fn children(&self, container: Container) -> &[NodeIndex] {
        match container {
            Container::Root => &self.root.child_nodes,
            Container::Node(index) => &self.nodes[index.0].child_nodes,
        }
    }

    pub fn container_position(&self, container: Container) -> Point {
        match container {
            Container::Root => self.root.position,
            Container::Node(index) => self.nodes[index.0].position,
        }
    }

    pub fn container_size(&self, container: Container) -> Size {
        match container {
            Container::Root => self.root.size,
            Container::Node(index) => self.nodes[index.0].size,
        }
    }

    /// Moves a node container. The root never moves, so this ignores it.
    pub(crate) fn set_container_position(&mut self, container: Container, position: Point) {
        if let Container::Node(index) = container {
            self.nodes[index.0].position = position;
        }
    }

    pub(crate) fn set_container_size(&mut self, container: Container, size: Size) {
        match container {
            Container::Root => self.root.size = size,
            Container::Node(index) => self.nodes[index.0].size = size,
        }
    }

    /// Flags a node container as changed; the root carries no flag.
    pub(crate) fn mark_changed(&mut self, container: Container) {
        if let Container::Node(index) = container {
            self.nodes[index.0].changed = true;
        }
    }

    // =========================================================================
    // Tree queries
    // =========================================================================

    /// Position of a node in the root frame: its own position plus the
    /// positions of every node ancestor.
    pub fn absolute_position(&self, index: NodeIndex) -> Point {
        let mut node = self.node(index);
        let mut position = node.position;
        while let Container::Node(parent) = node.parent {
            node = self.node(parent);
            position = position.add_point(node.position);
        }
        position
    }

    /// Returns true if the node or any node ancestor changed during the run.
    pub fn has_changed(&self, index: NodeIndex) -> bool {
        let mut current = Container::Node(index);
        while let Container::Node(node_index) = current {
            let node = self.node(node_index);
            if node.changed {
                return true;
            }
            current = node.parent;
        }
        false
    }

    /// Returns every node in layout order: for each node, its border nodes
    /// come first, then its child nodes, then the node itself.
    pub fn post_order(&self) -> Vec<NodeIndex> {
        enum Visit {
            Enter(NodeIndex),
            Exit(NodeIndex),
        }

        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack: Vec<Visit> = self
            .root
            .child_nodes
            .iter()
            .rev()
            .map(|&index| Visit::Enter(index))
            .collect();

        while let Some(visit) = stack.pop() {
            match visit {
                Visit::Enter(index) => {
                    let node = self.node(index);
                    stack.push(Visit::Exit(index));
                    stack.extend(node.child_nodes.iter().rev().map(|&i| Visit::Enter(i)));
                    stack.extend(node.border_nodes.iter().rev().map(|&i| Visit::Enter(i)));
                }
                Visit::Exit(index) => order.push(index),
            }
        }

        order
    }
}
