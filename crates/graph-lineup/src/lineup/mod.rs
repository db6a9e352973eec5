mod columns;
mod fanin;
mod project;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub use columns::ColumnGrid;

use crate::engine::ArrangeEngine;
use crate::geometry::Vec2;
use crate::provider::GraphProvider;
use columns::ColumnAssigner;
use fanin::FanInIndex;

/// Vertical alignment of the nodes within a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum VerticalAlign {
    /// Line up the top edges of the columns
    Top,
    /// Center every column on the horizontal axis
    #[default]
    Middle,
    /// Line up the bottom edges of the columns
    Bottom,
}

/// Which consumer decides the column of a node feeding several of them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ArrangeOrder {
    /// The shallowest consumer, closest to the graph outputs
    First,
    /// The deepest consumer
    #[default]
    Last,
    /// The consumer receiving the most links; proposals from the others
    /// are ignored rather than relocated
    Max,
}

/// Errors that can occur before a lineup runs
#[derive(Debug, Error)]
pub enum LineupError {
    /// Spacing must be non-negative in both directions
    #[error("node spacing must be non-negative, got {0}x{1}")]
    NegativeSpacing(f32, f32),
}

/// Configuration for the column lineup of a node graph
///
/// The defaults match the usual editor settings: columns centered on the
/// horizontal axis, multi-consumer nodes following their deepest consumer,
/// 50 units of spacing and at most 10 nodes per column.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineupLayout {
    /// Horizontal and vertical separation between nodes
    pub spacing: Vec2,

    /// Vertical alignment of each column
    pub align: VerticalAlign,

    /// Column choice for nodes feeding several consumers
    pub order: ArrangeOrder,

    /// Descend into container nodes and line up their nested graphs
    pub include_nested: bool,

    /// Maximum slots per column before spilling into the next one,
    /// 0 for no limit
    pub max_column_nodes: usize,
}

impl Default for LineupLayout {
    fn default() -> Self {
        Self {
            spacing: Vec2::splat(50.0),
            align: VerticalAlign::default(),
            order: ArrangeOrder::default(),
            include_nested: true,
            max_column_nodes: 10,
        }
    }
}

impl LineupLayout {
    /// Create a lineup configuration with the given node spacing
    pub fn new(spacing: Vec2) -> Self {
        Self {
            spacing,
            ..Default::default()
        }
    }

    /// Assign every node reachable from the graph outputs to a grid slot
    ///
    /// Terminal nodes seed column 0; each source lands one column past the
    /// consumer that decides its placement under the configured
    /// [`ArrangeOrder`]. Nodes unreachable from any terminal are not
    /// visited and keep whatever position they already had.
    pub fn compute_grid<P: GraphProvider>(&self, provider: &P) -> ColumnGrid<P::NodeId> {
        let links = provider.links();
        let mut index = FanInIndex::from_links(&links);
        let mut grid = ColumnGrid::default();
        let terminals = provider.terminal_nodes();
        ColumnAssigner::new(
            provider,
            &mut index,
            &mut grid,
            self.order,
            self.max_column_nodes,
        )
        .seed(&terminals);
        debug!(
            columns = grid.columns().len(),
            placed = grid.placed(),
            unreachable = index.unplaced(),
            "assigned node columns"
        );
        grid
    }

    /// Write the grid back as absolute positions, returning the container
    /// nodes encountered in placement order
    pub fn apply_positions<P: GraphProvider>(
        &self,
        provider: &mut P,
        grid: &ColumnGrid<P::NodeId>,
    ) -> Vec<P::NodeId> {
        project::apply_positions(provider, grid, self.align, self.spacing)
    }

    /// Run the full pipeline: index fan-in, assign columns, project
    /// positions, then line up the nested graph of every container met,
    /// with the same settings
    ///
    /// # Errors
    /// Fails before touching the graph when the spacing is negative.
    pub fn arrange<P: GraphProvider>(&self, provider: &mut P) -> Result<(), LineupError> {
        if self.spacing.x < 0.0 || self.spacing.y < 0.0 {
            return Err(LineupError::NegativeSpacing(self.spacing.x, self.spacing.y));
        }
        self.arrange_graph(provider)
    }

    fn arrange_graph<P: GraphProvider>(&self, provider: &mut P) -> Result<(), LineupError> {
        let grid = self.compute_grid(provider);
        let containers = self.apply_positions(provider, &grid);
        if !self.include_nested {
            return Ok(());
        }
        for node in containers {
            debug!(?node, "lining up nested graph");
            let mut scope = NestedScope::enter(&mut *provider, node);
            if let Some(nested) = scope.provider().nested_graph_mut(node) {
                self.arrange_graph(nested)?;
            }
        }
        Ok(())
    }
}

// Implement ArrangeEngine for any provider
impl<P: GraphProvider> ArrangeEngine<P> for LineupLayout {
    type Error = LineupError;

    fn arrange(&self, provider: &mut P) -> Result<(), Self::Error> {
        LineupLayout::arrange(self, provider)
    }
}

/// Keeps the provider's nested editing context balanced: the exit call runs
/// when the scope drops, even if the nested lineup returns early
struct NestedScope<'a, P: GraphProvider> {
    provider: &'a mut P,
}

impl<'a, P: GraphProvider> NestedScope<'a, P> {
    fn enter(provider: &'a mut P, node: P::NodeId) -> Self {
        provider.enter_nested(node);
        Self { provider }
    }

    fn provider(&mut self) -> &mut P {
        self.provider
    }
}

impl<P: GraphProvider> Drop for NestedScope<'_, P> {
    fn drop(&mut self) {
        self.provider.exit_nested();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::testgraph::TestGraph;

    #[test]
    fn defaults_match_the_editor_settings() {
        let layout = LineupLayout::default();
        assert_eq!(layout.spacing, Vec2::splat(50.0));
        assert_eq!(layout.align, VerticalAlign::Middle);
        assert_eq!(layout.order, ArrangeOrder::Last);
        assert!(layout.include_nested);
        assert_eq!(layout.max_column_nodes, 10);
    }

    #[test]
    fn negative_spacing_is_a_precondition_failure() {
        let mut graph = TestGraph::new();
        graph.add(1);

        let layout = LineupLayout::new(Vec2::new(-1.0, 50.0));
        let err = layout.arrange(&mut graph).unwrap_err();
        assert!(matches!(err, LineupError::NegativeSpacing(..)));
        assert_eq!(graph.position(1), None);
    }

    #[test]
    fn arrange_writes_positions_through_the_engine_seam() {
        let mut graph = TestGraph::new();
        graph.add(1);
        graph.add(2);
        graph.link(2, 1);

        let engine: &dyn ArrangeEngine<TestGraph, Error = LineupError> = &LineupLayout::default();
        engine.arrange(&mut graph).unwrap();
        assert!(graph.position(1).is_some());
        assert!(graph.position(2).is_some());
        assert!(graph.position(2).unwrap().x < graph.position(1).unwrap().x);
    }
}
