//! Typed, bounds-checked view over the three output-bearing regions of the
//! shared segment (component F helper; see Design Notes on "shared raw-buffer
//! aliasing"). No arithmetic on raw pointer offsets appears outside this module.

use crate::types::{DistanceIndexPair, Index, Parameters, Position2D, Position768D};

/// Borrowed positions, typed by dimensionality.
pub enum PositionSlice<'a> {
    /// 2D positions.
    D2(&'a [Position2D]),
    /// 768D positions.
    D768(&'a [Position768D]),
}

impl PositionSlice<'_> {
    /// Number of positions (`N`).
    pub fn len(&self) -> usize {
        match self {
            PositionSlice::D2(s) => s.len(),
            PositionSlice::D768(s) => s.len(),
        }
    }

    /// Whether there are no positions.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The 2D positions, or `None` if this view is 768D.
    pub fn as_2d(&self) -> Option<&[Position2D]> {
        match self {
            PositionSlice::D2(s) => Some(s),
            PositionSlice::D768(_) => None,
        }
    }

    /// The 768D positions, or `None` if this view is 2D.
    pub fn as_768d(&self) -> Option<&[Position768D]> {
        match self {
            PositionSlice::D2(_) => None,
            PositionSlice::D768(s) => Some(s),
        }
    }
}

/// Borrowed, bounds-checked access to the positions, pairs, and ranks regions
/// of a parsed shared segment, independent of the storage behind them.
pub struct SharedView<'a> {
    /// Number of datapoints (`N`).
    pub n: usize,
    /// Read-only positions.
    pub positions: PositionSlice<'a>,
    /// The `N * N` neighbor-pairs matrix, row-major.
    pub pairs: &'a mut [DistanceIndexPair],
    /// The `N * N` ranks matrix, row-major.
    pub ranks: &'a mut [Index],
}

/// Byte size of the region holding `n` positions of the given dimensionality.
pub fn positions_region_bytes(n: usize, dimensions: u16) -> usize {
    n * position_stride_bytes(dimensions)
}

/// Byte size of a single position of the given dimensionality.
pub fn position_stride_bytes(dimensions: u16) -> usize {
    match dimensions {
        crate::types::DIMENSIONS_2 => std::mem::size_of::<Position2D>(),
        crate::types::DIMENSIONS_768 => std::mem::size_of::<Position768D>(),
        other => panic!("unsupported dimensionality {other}"),
    }
}

/// Total byte size of the three regions that follow the header, for a segment
/// of `n` datapoints at the given dimensionality. Used by callers (and tests)
/// to size a buffer correctly.
pub fn body_region_bytes(n: usize, dimensions: u16) -> usize {
    let pairs_bytes = n * n * std::mem::size_of::<DistanceIndexPair>();
    let ranks_bytes = n * n * std::mem::size_of::<Index>();
    positions_region_bytes(n, dimensions) + pairs_bytes + ranks_bytes
}

/// Build a [`SharedView`] over the body of the segment (the bytes immediately
/// following the [`Parameters`] header), interpreting it per `parameters`.
///
/// # Safety
/// `body` must be at least [`body_region_bytes`] long, suitably aligned for
/// `Position2D`/`Position768D`/`DistanceIndexPair`/`Index` (any byte-addressed
/// buffer backed by a `Vec<u8>` or `shmat` mapping satisfies this on all
/// platforms this engine targets, since none of these types require more than
/// 4-byte alignment and every region starts at a multiple of 4 bytes), and
/// must not be aliased elsewhere for the lifetime `'a`.
pub unsafe fn build_view<'a>(parameters: &Parameters, body: *mut u8) -> SharedView<'a> {
    let n = parameters.datapoint_amount as usize;
    let dimensions = parameters.dimensions;

    let positions_bytes = positions_region_bytes(n, dimensions);
    let pairs_ptr = body.add(positions_bytes) as *mut DistanceIndexPair;
    let pairs_len = n * n;
    let ranks_ptr = pairs_ptr.add(pairs_len) as *mut Index;
    let ranks_len = n * n;

    let positions = match dimensions {
        crate::types::DIMENSIONS_2 => {
            PositionSlice::D2(std::slice::from_raw_parts(body as *const Position2D, n))
        }
        crate::types::DIMENSIONS_768 => {
            PositionSlice::D768(std::slice::from_raw_parts(body as *const Position768D, n))
        }
        other => panic!("unsupported dimensionality {other}"),
    };

    SharedView {
        n,
        positions,
        pairs: std::slice::from_raw_parts_mut(pairs_ptr, pairs_len),
        ranks: std::slice::from_raw_parts_mut(ranks_ptr, ranks_len),
    }
}

/// A `Vec<u8>`-backed stand-in for a shared segment, used by tests that
/// cannot attach real System V shared memory. Lays out positions, pairs, and
/// ranks exactly as the shared-segment contract in `SPEC_FULL.md` §3 requires.
pub struct OwnedView {
    buffer: Vec<u8>,
    parameters: Parameters,
}

impl OwnedView {
    /// Allocate a zeroed body buffer for `n` positions of `dimensions`
    /// dimensionality under `metric`, with the given positions pre-filled.
    pub fn new(metric: i8, dimensions: u16, positions_bytes: &[u8]) -> Self {
        let n = (positions_bytes.len() / position_stride_bytes(dimensions)) as u16;
        let total = body_region_bytes(n as usize, dimensions);
        let mut buffer = vec![0u8; total];
        buffer[..positions_bytes.len()].copy_from_slice(positions_bytes);
        Self {
            buffer,
            parameters: Parameters {
                distance_metric: metric,
                datapoint_amount: n,
                dimensions,
            },
        }
    }

    /// Borrow a [`SharedView`] over this owned buffer.
    pub fn view(&mut self) -> SharedView<'_> {
        // SAFETY: `buffer` was sized by `body_region_bytes` for these exact
        // parameters in `new`, and this is the only live borrow of it.
        unsafe { build_view(&self.parameters, self.buffer.as_mut_ptr()) }
    }

    /// The parameters this view was built with.
    pub fn parameters(&self) -> Parameters {
        self.parameters
    }
}
