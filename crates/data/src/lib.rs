//! In-memory node graph model
//!
//! The reference [`GraphProvider`](graph_lineup::GraphProvider)
//! implementation: sized nodes identified by opaque [`NodeId`]s, links with
//! multiplicities, and nested subgraphs behind container nodes. Hosts with
//! their own node object model implement the provider trait directly; this
//! crate is what the integration tests and provider-less tools build
//! against.

mod graph;

pub use graph::{NodeGraph, NodeId};
