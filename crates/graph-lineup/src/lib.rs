//! Column lineup for directed node graphs
//!
//! This crate lines up the nodes of a host graph editor into columns:
//! terminal nodes (the graph outputs) seed column 0, every other node lands
//! one column past the consumer that decides its placement, and the
//! resulting grid is projected into 2-D coordinates written back to the
//! host. Hosts plug in through the [`GraphProvider`] trait; container nodes
//! wrapping a nested graph are lined up recursively with the same settings.
//!
//! The pipeline, driven by [`LineupLayout`], runs in three phases: fan-in
//! indexing (who consumes whom, and how heavily), column assignment
//! ([`LineupLayout::compute_grid`]) and coordinate projection
//! ([`LineupLayout::apply_positions`]). [`LineupLayout::arrange`] chains
//! them and descends into containers.
//!
//! # Example
//!
//! ```
//! use graph_lineup::{GraphProvider, Link, LineupLayout, Point, Vec2};
//!
//! // A host graph with three nodes, `A` and `B` feeding `OUT`.
//! const A: usize = 0;
//! const B: usize = 1;
//! const OUT: usize = 2;
//!
//! struct Host {
//!     positions: [Point; 3],
//! }
//!
//! impl GraphProvider for Host {
//!     type NodeId = usize;
//!
//!     fn terminal_nodes(&self) -> Vec<usize> {
//!         vec![OUT]
//!     }
//!
//!     fn incoming_sources(&self, node: usize) -> Vec<usize> {
//!         if node == OUT {
//!             vec![A, B]
//!         } else {
//!             Vec::new()
//!         }
//!     }
//!
//!     fn links(&self) -> Vec<Link<usize>> {
//!         vec![Link { from: A, to: OUT }, Link { from: B, to: OUT }]
//!     }
//!
//!     fn node_size(&self, _node: usize) -> Vec2 {
//!         Vec2::new(100.0, 40.0)
//!     }
//!
//!     fn set_position(&mut self, node: usize, position: Point) {
//!         self.positions[node] = position;
//!     }
//! }
//!
//! let mut host = Host {
//!     positions: [Point::origin(); 3],
//! };
//! LineupLayout::default().arrange(&mut host)?;
//!
//! // `OUT` sits in column 0, its sources one column to its left.
//! assert!(host.positions[A].x < host.positions[OUT].x);
//! assert!(host.positions[B].x < host.positions[OUT].x);
//! # Ok::<(), graph_lineup::LineupError>(())
//! ```

mod engine;
mod geometry;
mod provider;

pub mod lineup;

// Re-export core types and traits
pub use engine::ArrangeEngine;
pub use geometry::{Point, Vec2};
pub use provider::{GraphProvider, Link};

// Re-export lineup layout types
pub use lineup::{ArrangeOrder, ColumnGrid, LineupError, LineupLayout, VerticalAlign};
