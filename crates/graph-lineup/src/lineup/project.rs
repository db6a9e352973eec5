use tracing::trace;

use super::columns::ColumnGrid;
use super::VerticalAlign;
use crate::geometry::{Point, Vec2};
use crate::provider::GraphProvider;

/// Project the finalized grid into absolute positions and write them back
/// to the provider, returning the container nodes met along the way in
/// placement order
///
/// Columns march leftward from the origin and rows stack downward, with
/// down as negative y; each node is centered within its column's width.
pub(crate) fn apply_positions<P: GraphProvider>(
    provider: &mut P,
    grid: &ColumnGrid<P::NodeId>,
    align: VerticalAlign,
    spacing: Vec2,
) -> Vec<P::NodeId> {
    let mut containers = Vec::new();
    let mut cursor = Point::origin();

    for column in grid.columns() {
        let nodes: Vec<P::NodeId> = column.iter().filter_map(|slot| *slot).collect();
        if nodes.is_empty() {
            // Tombstones only; the column takes no width at all.
            continue;
        }

        if align != VerticalAlign::Top {
            let height: f32 = nodes.iter().map(|&n| provider.node_size(n).y).sum::<f32>()
                + spacing.y * (nodes.len() - 1) as f32;
            cursor.y = match align {
                VerticalAlign::Middle => height / 2.0,
                _ => height,
            };
        }

        let max_width = nodes
            .iter()
            .map(|&n| provider.node_size(n).x)
            .fold(0.0, f32::max);

        let mut previous: Option<(Point, Vec2)> = None;
        for &node in &nodes {
            let size = provider.node_size(node);
            let y = match previous {
                None => cursor.y,
                Some((pos, prev_size)) => pos.y - prev_size.y - spacing.y,
            };
            let position = Point::new(cursor.x - (max_width + size.x) / 2.0, y);
            trace!(?node, x = position.x, y = position.y, "placed node");
            provider.set_position(node, position);
            if provider.is_container(node) {
                containers.push(node);
            }
            previous = Some((position, size));
        }

        cursor.x -= max_width + spacing.x;
        cursor.y = 0.0;
    }

    containers
}
