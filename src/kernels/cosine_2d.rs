//! Component D.3: angular-sweep cosine nearest-neighbor kernel for 2D points.
//!
//! Exploits the fact that cosine distance is monotone in angular distance for
//! 2D vectors: sorting by angle once lets every row be produced by an
//! outward sweep with `N` distance computations and no per-row sort.

use crate::distance::{cosine_2d, position_angle_2d, relative_angle};
use crate::sort::fill_ranks_from_row;
use crate::types::{DistanceIndexPair, Index, Position2D};

/// Angle-sorted order over the point set, computed once before any row runs.
pub struct AngularOrder {
    /// `(original_index, angle)`, stably sorted by angle ascending.
    order: Vec<(Index, f32)>,
    /// `position_of[original_index]` is that point's slot in `order`.
    position_of: Vec<usize>,
}

impl AngularOrder {
    /// Build the angle-sorted order over `positions`.
    pub fn build(positions: &[Position2D]) -> Self {
        let mut order: Vec<(Index, f32)> = positions
            .iter()
            .enumerate()
            .map(|(i, p)| (i as Index, position_angle_2d(p)))
            .collect();
        order.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap());

        let mut position_of = vec![0usize; positions.len()];
        for (slot, (original_index, _)) in order.iter().enumerate() {
            position_of[*original_index as usize] = slot;
        }
        Self { order, position_of }
    }
}

/// Fill row `row` (an original point index) of `pairs_row`/`ranks_row` via the
/// angular sweep outward from `row`'s position in the angle-sorted order.
pub fn run_row(
    positions: &[Position2D],
    angular_order: &AngularOrder,
    row: usize,
    pairs_row: &mut [DistanceIndexPair],
    ranks_row: &mut [Index],
) {
    let n = positions.len();
    let order = &angular_order.order;
    let self_slot = angular_order.position_of[row];
    let query_angle = order[self_slot].1;
    let query = &positions[row];

    let mut left = self_slot as isize;
    let mut right = (self_slot + 1) % n;

    for pair in pairs_row.iter_mut().take(n) {
        let left_slot = left.rem_euclid(n as isize) as usize;
        let left_distance = relative_angle(query_angle, order[left_slot].1);
        let right_distance = relative_angle(query_angle, order[right].1);

        // Ties go to the right cursor (strict `<` favors left).
        let winner_slot = if left_distance < right_distance {
            left -= 1;
            left_slot
        } else {
            let slot = right;
            right = (right + 1) % n;
            slot
        };

        let winner_index = order[winner_slot].0;
        let distance = cosine_2d(query, &positions[winner_index as usize]);
        *pair = DistanceIndexPair::new(winner_index, distance);
    }

    fill_ranks_from_row(pairs_row, ranks_row);
}
