//! Total ordering on [`DistanceIndexPair`] (component B).

use crate::types::DistanceIndexPair;

/// Sign-of-difference comparison on distance, matching the source engine's
/// `compareDistanceIndexPair`: `(d_a - d_b > 0) - (d_a - d_b < 0)`.
///
/// `NaN` distances are not part of this engine's contract (see
/// [`crate::distance::cosine_2d`]); this comparator treats them as equal to
/// avoid panicking, which is sufficient given the no-zero-vector guarantee.
pub fn compare_distance(a: f32, b: f32) -> std::cmp::Ordering {
    a.partial_cmp(&b).unwrap_or(std::cmp::Ordering::Equal)
}

/// Sort a row of pairs by ascending distance, stably, so ties break by the
/// pairs' original order in `row` (the order in which callers wrote them).
pub fn sort_row_by_distance(row: &mut [DistanceIndexPair]) {
    row.sort_by(|a, b| compare_distance(a.distance, b.distance));
}

/// Fill `ranks[pair.index] = j` for each `pair` at position `j` in `row`.
///
/// `row` must already be sorted (see [`sort_row_by_distance`]); `ranks` must
/// be exactly `row.len()` long.
pub fn fill_ranks_from_row(row: &[DistanceIndexPair], ranks: &mut [crate::types::Index]) {
    debug_assert_eq!(row.len(), ranks.len());
    for (rank, pair) in row.iter().enumerate() {
        ranks[pair.index as usize] = rank as crate::types::Index;
    }
}
