use std::collections::HashSet;

use tracing::trace;

use super::fanin::FanInIndex;
use super::ArrangeOrder;
use crate::provider::GraphProvider;

/// The layered grid: columns of slots, where a slot holds a node or the
/// tombstone left behind by a relocation
///
/// Column 0 holds the terminal nodes; every other node sits one column past
/// the consumer that decided its placement.
#[derive(Debug, Clone)]
pub struct ColumnGrid<N> {
    columns: Vec<Vec<Option<N>>>,
}

impl<N> Default for ColumnGrid<N> {
    fn default() -> Self {
        Self {
            columns: Vec::new(),
        }
    }
}

impl<N: Copy> ColumnGrid<N> {
    /// Columns in dependency order, tombstones included
    pub fn columns(&self) -> &[Vec<Option<N>>] {
        &self.columns
    }

    /// Column index of `node` among the occupied slots, if it was placed
    pub fn column_of(&self, node: N) -> Option<usize>
    where
        N: PartialEq,
    {
        self.columns
            .iter()
            .position(|column| column.iter().any(|slot| *slot == Some(node)))
    }

    /// Occupied slots across the whole grid
    pub fn placed(&self) -> usize {
        self.columns
            .iter()
            .map(|column| column.iter().flatten().count())
            .sum()
    }

    #[cfg(test)]
    pub(crate) fn from_columns(columns: Vec<Vec<Option<N>>>) -> Self {
        Self { columns }
    }

    fn ensure_column(&mut self, index: usize) {
        while self.columns.len() <= index {
            self.columns.push(Vec::new());
        }
    }

    /// Slot count of a column; capacity checks count tombstones too
    fn occupancy(&self, index: usize) -> usize {
        self.columns[index].len()
    }

    fn clear(&mut self, column: usize, row: usize) {
        self.columns[column][row] = None;
    }

    fn push(&mut self, column: usize, node: N) {
        self.columns[column].push(Some(node));
    }
}

/// Depth-first column assignment, walking from each destination node to its
/// not-yet-placed sources
pub(crate) struct ColumnAssigner<'a, P: GraphProvider> {
    provider: &'a P,
    index: &'a mut FanInIndex<P::NodeId>,
    grid: &'a mut ColumnGrid<P::NodeId>,
    order: ArrangeOrder,
    max_column_nodes: usize,
    /// Nodes on the active walk; a source already on it closes a cycle and
    /// is not entered again
    path: HashSet<P::NodeId>,
}

impl<'a, P: GraphProvider> ColumnAssigner<'a, P> {
    pub(crate) fn new(
        provider: &'a P,
        index: &'a mut FanInIndex<P::NodeId>,
        grid: &'a mut ColumnGrid<P::NodeId>,
        order: ArrangeOrder,
        max_column_nodes: usize,
    ) -> Self {
        Self {
            provider,
            index,
            grid,
            order,
            max_column_nodes,
            path: HashSet::new(),
        }
    }

    /// Place the terminal nodes in column 0 and recurse into their sources
    pub(crate) fn seed(mut self, terminals: &[P::NodeId]) {
        self.visit(None, terminals, 0);
    }

    fn visit(&mut self, dest: Option<P::NodeId>, sources: &[P::NodeId], depth: usize) {
        self.grid.ensure_column(depth);
        let mut depth = depth;
        for &node in sources {
            if self.path.contains(&node) {
                continue;
            }
            if self.max_column_nodes > 0 {
                // Soft overflow: spill into the next column once this one
                // is full, for this node and its remaining siblings.
                while self.grid.occupancy(depth) == self.max_column_nodes {
                    depth += 1;
                    self.grid.ensure_column(depth);
                }
            }
            if let Some(dest) = dest {
                // Proposed by a consumer: consult the source's record. Seed
                // visits have no consumer and place unconditionally.
                let Some(record) = self.index.record_mut(node) else {
                    continue; // already fully placed
                };
                if self.order == ArrangeOrder::Max {
                    if record.dominant() == Some(dest) {
                        self.index.finalize(node);
                    } else {
                        // The dominant consumer's branch will place it.
                        continue;
                    }
                } else {
                    let count = record.remove_destination(dest);
                    trace!(
                        ?node,
                        ?dest,
                        links = count,
                        remaining = record.destination_count(),
                        "consumed proposing destination"
                    );
                    let accept = match record.slot {
                        None => true,
                        Some((column, _)) => {
                            (self.order == ArrangeOrder::Last && column < depth)
                                || (self.order == ArrangeOrder::First && column > depth)
                        }
                    };
                    if !accept {
                        continue; // current column ranks better under this order
                    }
                    if let Some((column, row)) = record.slot {
                        self.grid.clear(column, row);
                    }
                    record.slot = Some((depth, self.grid.occupancy(depth)));
                }
            }
            self.grid.push(depth, node);
            let sources = self.provider.incoming_sources(node);
            self.path.insert(node);
            self.visit(Some(node), &sources, depth + 1);
            self.path.remove(&node);
        }
    }
}
