use std::collections::HashMap;

use graph_lineup::{GraphProvider, Link, Point, Vec2};
use petgraph::graphmap::DiGraphMap;
use petgraph::Direction;

/// Opaque node identity within a [`NodeGraph`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(u32);

#[derive(Debug, Default)]
struct NodeInfo {
    size: Vec2,
    position: Point,
    nested: Option<NodeGraph>,
}

/// An in-memory directed node graph with sized nodes, link multiplicities
/// and nested subgraphs behind container nodes
///
/// The link structure lives in a petgraph [`DiGraphMap`] whose edge weight
/// is the link count between the two endpoints, which keeps the directed
/// neighbor queries cheap; node metadata sits in a side map.
#[derive(Debug, Default)]
pub struct NodeGraph {
    links: DiGraphMap<NodeId, usize>,
    nodes: HashMap<NodeId, NodeInfo>,
    next_id: u32,
    /// Containers whose nested editing context was entered, in order
    enters: Vec<NodeId>,
    exits: usize,
}

impl NodeGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node with the given rendered size
    pub fn add_node(&mut self, size: Vec2) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        self.links.add_node(id);
        self.nodes.insert(
            id,
            NodeInfo {
                size,
                ..Default::default()
            },
        );
        id
    }

    /// Add a container node wrapping `nested`
    pub fn add_container(&mut self, size: Vec2, nested: NodeGraph) -> NodeId {
        let id = self.add_node(size);
        if let Some(info) = self.nodes.get_mut(&id) {
            info.nested = Some(nested);
        }
        id
    }

    /// Add one link; linking the same pair again raises its multiplicity
    pub fn add_link(&mut self, from: NodeId, to: NodeId) {
        let count = self.links.edge_weight(from, to).copied().unwrap_or(0);
        self.links.add_edge(from, to, count + 1);
    }

    /// Current position of a node, the origin until a lineup ran
    pub fn position(&self, node: NodeId) -> Point {
        self.nodes
            .get(&node)
            .map(|info| info.position)
            .unwrap_or_else(Point::origin)
    }

    /// A container's nested graph
    pub fn nested(&self, node: NodeId) -> Option<&NodeGraph> {
        self.nodes.get(&node).and_then(|info| info.nested.as_ref())
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Containers whose nested context has been entered, in entry order
    pub fn entered(&self) -> &[NodeId] {
        &self.enters
    }

    /// Number of context exits; equals `entered().len()` when every enter
    /// was paired
    pub fn exited(&self) -> usize {
        self.exits
    }
}

impl GraphProvider for NodeGraph {
    type NodeId = NodeId;

    fn terminal_nodes(&self) -> Vec<NodeId> {
        self.links
            .nodes()
            .filter(|&n| {
                self.links
                    .neighbors_directed(n, Direction::Outgoing)
                    .next()
                    .is_none()
            })
            .collect()
    }

    fn incoming_sources(&self, node: NodeId) -> Vec<NodeId> {
        self.links
            .neighbors_directed(node, Direction::Incoming)
            .collect()
    }

    fn links(&self) -> Vec<Link<NodeId>> {
        self.links
            .all_edges()
            .flat_map(|(from, to, &count)| std::iter::repeat(Link { from, to }).take(count))
            .collect()
    }

    fn node_size(&self, node: NodeId) -> Vec2 {
        self.nodes
            .get(&node)
            .map(|info| info.size)
            .unwrap_or_else(Vec2::zero)
    }

    fn set_position(&mut self, node: NodeId, position: Point) {
        if let Some(info) = self.nodes.get_mut(&node) {
            info.position = position;
        }
    }

    fn is_container(&self, node: NodeId) -> bool {
        self.nodes.get(&node).is_some_and(|info| info.nested.is_some())
    }

    fn nested_graph_mut(&mut self, node: NodeId) -> Option<&mut Self> {
        self.nodes.get_mut(&node).and_then(|info| info.nested.as_mut())
    }

    fn enter_nested(&mut self, node: NodeId) {
        self.enters.push(node);
    }

    fn exit_nested(&mut self) {
        self.exits += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_nodes_include_isolated_ones() {
        let mut graph = NodeGraph::new();
        let a = graph.add_node(Vec2::new(100.0, 40.0));
        let b = graph.add_node(Vec2::new(100.0, 40.0));
        let lone = graph.add_node(Vec2::new(100.0, 40.0));
        graph.add_link(a, b);

        let terminals = graph.terminal_nodes();
        assert!(terminals.contains(&b));
        assert!(terminals.contains(&lone));
        assert!(!terminals.contains(&a));
    }

    #[test]
    fn repeated_links_raise_multiplicity() {
        let mut graph = NodeGraph::new();
        let a = graph.add_node(Vec2::new(100.0, 40.0));
        let b = graph.add_node(Vec2::new(100.0, 40.0));
        graph.add_link(a, b);
        graph.add_link(a, b);

        assert_eq!(graph.links().len(), 2);
        // Multiplicity dedupes to a single traversal edge.
        assert_eq!(graph.incoming_sources(b), vec![a]);
    }

    #[test]
    fn containers_expose_their_nested_graph() {
        let mut inner = NodeGraph::new();
        inner.add_node(Vec2::new(100.0, 40.0));
        let mut graph = NodeGraph::new();
        let plain = graph.add_node(Vec2::new(100.0, 40.0));
        let container = graph.add_container(Vec2::new(160.0, 60.0), inner);

        assert!(graph.is_container(container));
        assert!(!graph.is_container(plain));
        assert_eq!(graph.nested(container).map(NodeGraph::node_count), Some(1));
        assert!(graph.nested_graph_mut(plain).is_none());
    }
}
