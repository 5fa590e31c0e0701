//! Component E: fixed-size, fork-join row partitioning across workers.
//!
//! `W = min(available_cores, N)` workers each take a uniform, contiguous
//! chunk of `C = ceil(N / W)` rows. Realized with a dedicated `rayon`
//! thread pool sized to `W` driving `par_chunks_mut` over the two output
//! matrices, rather than hand-rolled `std::thread::spawn`/`join`: the pool's
//! scope guarantees every worker has joined before `run` returns, and
//! `par_chunks_mut` proves the per-worker output slices are disjoint at the
//! type level.

use rayon::prelude::*;
use rayon::ThreadPoolBuilder;

use crate::kernels::Kernel;
use crate::types::{DistanceIndexPair, Index};
use crate::view::PositionSlice;

/// Run `kernel` over every row of an `N`-point dataset, partitioning rows
/// across `min(available_cores, N)` workers.
pub fn run(
    kernel: &Kernel,
    positions: &PositionSlice,
    n: usize,
    pairs: &mut [DistanceIndexPair],
    ranks: &mut [Index],
) {
    if n == 0 {
        return;
    }

    let available_cores = std::thread::available_parallelism()
        .map(|cores| cores.get())
        .unwrap_or(1);
    let workers = available_cores.min(n).max(1);
    let chunk_rows = (n + workers - 1) / workers;
    let chunk_elements = chunk_rows * n;

    let pool = ThreadPoolBuilder::new()
        .num_threads(workers)
        .build()
        .expect("failed to build worker thread pool");

    pool.install(|| {
        pairs
            .par_chunks_mut(chunk_elements)
            .zip(ranks.par_chunks_mut(chunk_elements))
            .enumerate()
            .for_each(|(chunk_index, (pairs_chunk, ranks_chunk))| {
                let start_row = chunk_index * chunk_rows;
                let rows_in_chunk = pairs_chunk.len() / n;
                for local_row in 0..rows_in_chunk {
                    let row = start_row + local_row;
                    let pairs_row = &mut pairs_chunk[local_row * n..(local_row + 1) * n];
                    let ranks_row = &mut ranks_chunk[local_row * n..(local_row + 1) * n];
                    kernel.run_row(positions, row, pairs_row, ranks_row);
                }
            });
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DistanceMetric, Position2D};

    #[test]
    fn partitions_every_row_exactly_once() {
        let positions: Vec<Position2D> = (0..11)
            .map(|i| Position2D::new(i as f32, (i * 2) as f32))
            .collect();
        let n = positions.len();
        let slice = PositionSlice::D2(&positions);
        let kernel = Kernel::prepare(DistanceMetric::Euclidean, &slice);

        let mut pairs = vec![DistanceIndexPair::new(0, 0.0); n * n];
        let mut ranks = vec![0; n * n];
        run(&kernel, &slice, n, &mut pairs, &mut ranks);

        for i in 0..n {
            let row = &pairs[i * n..(i + 1) * n];
            assert_eq!(row[0].index as usize, i);
            assert_eq!(row[0].distance, 0.0);
            let mut indices: Vec<_> = row.iter().map(|p| p.index).collect();
            indices.sort();
            assert_eq!(indices, (0..n as Index).collect::<Vec<_>>());
        }
    }
}
