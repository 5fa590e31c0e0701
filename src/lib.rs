//! An all-pairs nearest-neighbor computation engine for 2D and 768D point
//! clouds under Euclidean or cosine distance, operating over a caller-
//! attached shared-memory segment.
//!
//! See [`run`] for the engine's entry point once a segment is attached.
#![warn(missing_docs)]

pub mod distance;
pub mod error;
pub mod kernels;
pub mod quadtree;
pub mod shared_memory;
pub mod sort;
pub mod types;
pub mod view;
pub mod worker_pool;

use error::EngineError;
use kernels::Kernel;
use types::{DistanceMetric, Parameters, PARAMETERS_SIZE};
use view::build_view;

/// Read the header, validate it, dispatch the matching kernel across the
/// worker pool, and return once every row has been written.
///
/// `segment` must point at a buffer of at least `segment_size` bytes laid
/// out per the shared-segment contract (a [`Parameters`] header immediately
/// followed by positions, then the pairs and ranks matrices).
pub fn run(segment_ptr: *mut u8, segment_size: usize) -> Result<(), EngineError> {
    if segment_size < PARAMETERS_SIZE {
        return Err(EngineError::InvalidDimensions(0));
    }

    // SAFETY: `segment_ptr` points at at least `PARAMETERS_SIZE` bytes,
    // checked above; `Parameters` has no invalid bit patterns for `i8`/`u16`.
    let parameters: Parameters = unsafe { std::ptr::read_unaligned(segment_ptr as *const Parameters) };

    let metric = DistanceMetric::from_byte(parameters.distance_metric)
        .ok_or(EngineError::InvalidMetric(parameters.distance_metric))?;
    let dimensions = parameters.dimensions;
    if dimensions != types::DIMENSIONS_2 && dimensions != types::DIMENSIONS_768 {
        return Err(EngineError::InvalidDimensions(dimensions));
    }

    let n = parameters.datapoint_amount as usize;
    let span = tracing::info_span!(
        "kernel_dispatch",
        metric = ?metric,
        dimensions,
        n,
    );
    let _enter = span.enter();

    // SAFETY: the body pointer is within `segment_ptr`'s allocation (the
    // caller guarantees `segment_size` covers the full contract for `n`
    // points at `dimensions`), and this is the view's only live borrow.
    let body_ptr = unsafe { segment_ptr.add(PARAMETERS_SIZE) };
    let view = unsafe { build_view(&parameters, body_ptr) };

    let kernel = Kernel::prepare(metric, &view.positions);
    tracing::info!("starting row partitioning across workers");
    worker_pool::run(&kernel, &view.positions, n, view.pairs, view.ranks);
    tracing::info!("kernel dispatch complete");

    Ok(())
}
