//! Component D.2: brute-force cosine nearest-neighbor kernel for 768D points.

use crate::distance::cosine_768d;
use crate::sort::{fill_ranks_from_row, sort_row_by_distance};
use crate::types::{DistanceIndexPair, Index, Position768D};

/// Fill row `i` of `pairs_row`/`ranks_row` with every point's cosine distance
/// from `positions[row]`, sorted ascending.
pub fn run_row(
    positions: &[Position768D],
    row: usize,
    pairs_row: &mut [DistanceIndexPair],
    ranks_row: &mut [Index],
) {
    let query = &positions[row];
    for (j, pair) in pairs_row.iter_mut().enumerate() {
        *pair = DistanceIndexPair::new(j as Index, cosine_768d(query, &positions[j]));
    }
    sort_row_by_distance(pairs_row);
    fill_ranks_from_row(pairs_row, ranks_row);
}
