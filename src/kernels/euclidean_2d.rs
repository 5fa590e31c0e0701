//! Component D.4: quadtree-accelerated Euclidean nearest-neighbor kernel for
//! 2D points.

use crate::quadtree::Quadtree;
use crate::sort::fill_ranks_from_row;
use crate::types::{DistanceIndexPair, Index, Position2D};

/// Fill row `row` of `pairs_row`/`ranks_row` by querying `tree` for the
/// `N - 1` nearest neighbors of `positions[row]` (i.e. every other point),
/// reversing the tree's descending drain order to the ascending order the
/// shared segment's contract requires.
pub fn run_row(
    positions: &[Position2D],
    tree: &Quadtree,
    row: usize,
    pairs_row: &mut [DistanceIndexPair],
    ranks_row: &mut [Index],
) {
    let n = positions.len();
    let k = n - 1;
    let mut neighbors = tree.find_nearest_neighbors(positions[row], k);
    neighbors.reverse();

    debug_assert_eq!(neighbors.len(), n, "quadtree must return every point for k = N - 1");
    for (pair, entry) in pairs_row.iter_mut().zip(neighbors.iter()) {
        *pair = DistanceIndexPair::new(entry.value, entry.distance);
    }
    fill_ranks_from_row(pairs_row, ranks_row);
}
