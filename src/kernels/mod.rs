//! Component D: dispatch and shared preparation for the four neighbor kernels.

mod cosine_2d;
mod cosine_768d;
mod euclidean_2d;
mod euclidean_768d;

use crate::quadtree::Quadtree;
use crate::types::{DistanceIndexPair, DistanceMetric, Index, Position2D, Position768D};
use crate::view::PositionSlice;
use cosine_2d::AngularOrder;

/// The prepared, metric-and-dimensionality-specific state a kernel needs
/// before any row can run. Built once on the main thread; shared read-only
/// across workers.
pub enum Kernel {
    /// §4.D.1.
    Euclidean768,
    /// §4.D.2.
    Cosine768,
    /// §4.D.3, carrying the angle-sorted preprocessing order.
    Cosine2D(AngularOrder),
    /// §4.D.4, carrying the prebuilt spatial index.
    Euclidean2D(Quadtree),
}

impl Kernel {
    /// Choose and prepare the kernel for `(metric, positions)`, per the
    /// dispatch table in §2 and §4.F.4.
    pub fn prepare(metric: DistanceMetric, positions: &PositionSlice) -> Self {
        match (metric, positions) {
            (DistanceMetric::Euclidean, PositionSlice::D768(_)) => Kernel::Euclidean768,
            (DistanceMetric::Cosine, PositionSlice::D768(_)) => Kernel::Cosine768,
            (DistanceMetric::Cosine, PositionSlice::D2(points)) => {
                Kernel::Cosine2D(AngularOrder::build(points))
            }
            (DistanceMetric::Euclidean, PositionSlice::D2(points)) => {
                Kernel::Euclidean2D(Quadtree::build(points))
            }
        }
    }

    /// Run this kernel's logic for a single row `row`, writing the full
    /// row of `pairs_row`/`ranks_row` (each exactly `N` long).
    pub fn run_row(
        &self,
        positions: &PositionSlice,
        row: usize,
        pairs_row: &mut [DistanceIndexPair],
        ranks_row: &mut [Index],
    ) {
        match self {
            Kernel::Euclidean768 => {
                euclidean_768d::run_row(expect_768(positions), row, pairs_row, ranks_row)
            }
            Kernel::Cosine768 => {
                cosine_768d::run_row(expect_768(positions), row, pairs_row, ranks_row)
            }
            Kernel::Cosine2D(order) => {
                cosine_2d::run_row(expect_2d(positions), order, row, pairs_row, ranks_row)
            }
            Kernel::Euclidean2D(tree) => {
                euclidean_2d::run_row(expect_2d(positions), tree, row, pairs_row, ranks_row)
            }
        }
    }
}

fn expect_2d<'a>(positions: &'a PositionSlice) -> &'a [Position2D] {
    positions.as_2d().expect("kernel/positions dimensionality mismatch")
}

fn expect_768<'a>(positions: &'a PositionSlice) -> &'a [Position768D] {
    positions.as_768d().expect("kernel/positions dimensionality mismatch")
}
