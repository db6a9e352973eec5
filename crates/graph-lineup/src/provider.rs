use crate::geometry::{Point, Vec2};
use std::fmt::Debug;
use std::hash::Hash;

/// A directed link from the output of `from` to the input of `to`
///
/// The same pair may be linked several times; every occurrence counts
/// towards the source's fan-in record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Link<N> {
    pub from: N,
    pub to: N,
}

/// Capability set the lineup pipeline consumes from a host graph
///
/// The pipeline never holds host node objects, only ids; the host keeps
/// ownership of its nodes and receives the computed coordinates through
/// [`set_position`](GraphProvider::set_position). Providers without
/// container nodes only implement the core queries; the nested-graph
/// methods default to "no containers here".
pub trait GraphProvider {
    /// Opaque node identity
    type NodeId: Copy + Eq + Hash + Debug;

    /// Nodes with no outgoing links (the graph outputs), including nodes
    /// with no links at all
    fn terminal_nodes(&self) -> Vec<Self::NodeId>;

    /// Nodes with at least one link into `node`, without duplicates
    fn incoming_sources(&self, node: Self::NodeId) -> Vec<Self::NodeId>;

    /// Every link in the graph; a pair linked twice appears twice
    fn links(&self) -> Vec<Link<Self::NodeId>>;

    /// Rendered size of a node
    fn node_size(&self, node: Self::NodeId) -> Vec2;

    /// Write a node position back to the host
    fn set_position(&mut self, node: Self::NodeId, position: Point);

    /// Whether `node` wraps a nested graph of its own
    fn is_container(&self, _node: Self::NodeId) -> bool {
        false
    }

    /// Mutable access to a container's nested graph, if it has one
    fn nested_graph_mut(&mut self, _node: Self::NodeId) -> Option<&mut Self>
    where
        Self: Sized,
    {
        None
    }

    /// Called before the pipeline descends into `node`'s nested graph
    fn enter_nested(&mut self, _node: Self::NodeId) {}

    /// Called after the descent; paired with every
    /// [`enter_nested`](GraphProvider::enter_nested), even when the nested
    /// lineup returns early
    fn exit_nested(&mut self) {}
}
