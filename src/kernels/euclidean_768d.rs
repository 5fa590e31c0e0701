//! Component D.1: brute-force Euclidean nearest-neighbor kernel for 768D points.

use crate::distance::euclidean_768d;
use crate::sort::{fill_ranks_from_row, sort_row_by_distance};
use crate::types::{DistanceIndexPair, Index, Position768D};

/// Fill row `i` of `pairs_row`/`ranks_row` with every point's Euclidean
/// distance from `positions[row]`, sorted ascending.
pub fn run_row(
    positions: &[Position768D],
    row: usize,
    pairs_row: &mut [DistanceIndexPair],
    ranks_row: &mut [Index],
) {
    let query = &positions[row];
    for (j, pair) in pairs_row.iter_mut().enumerate() {
        *pair = DistanceIndexPair::new(j as Index, euclidean_768d(query, &positions[j]));
    }
    sort_row_by_distance(pairs_row);
    fill_ranks_from_row(pairs_row, ranks_row);
}
