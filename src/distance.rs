//! Pure distance primitives (component A). No allocation, no I/O, no randomness:
//! the same two positions always produce the same distance.

use crate::types::{Position2D, Position768D};

/// Euclidean distance between two 2D positions, via a hypot-style call so that
/// squaring the components can't overflow.
pub fn euclidean_2d(a: &Position2D, b: &Position2D) -> f32 {
    (a.x - b.x).hypot(a.y - b.y)
}

/// Euclidean distance between two 768D positions.
pub fn euclidean_768d(a: &Position768D, b: &Position768D) -> f32 {
    let mut sum = 0.0f32;
    for i in 0..768 {
        let diff = a.values[i] - b.values[i];
        sum += diff * diff;
    }
    sum.sqrt()
}

/// Cosine distance between two 2D positions: `1 - cos(angle between a and b)`.
///
/// Undefined (produces `NaN`) if either input is the zero vector; the engine's
/// contract guarantees non-zero inputs and does not check for this.
pub fn cosine_2d(a: &Position2D, b: &Position2D) -> f32 {
    let dot_aa = a.x * a.x + a.y * a.y;
    let dot_bb = b.x * b.x + b.y * b.y;
    let dot_ab = a.x * b.x + a.y * b.y;
    1.0 - dot_ab / (dot_aa * dot_bb).sqrt()
}

/// Cosine distance between two 768D positions.
pub fn cosine_768d(a: &Position768D, b: &Position768D) -> f32 {
    let mut dot_aa = 0.0f32;
    let mut dot_bb = 0.0f32;
    let mut dot_ab = 0.0f32;
    for i in 0..768 {
        dot_aa += a.values[i] * a.values[i];
        dot_bb += b.values[i] * b.values[i];
        dot_ab += a.values[i] * b.values[i];
    }
    1.0 - dot_ab / (dot_aa * dot_bb).sqrt()
}

/// The angle of `a` relative to the origin, via `atan2(y, x)`.
///
/// `atan2(0, 0) == 0`, which collapses the angle of a zero vector; the
/// producer must guarantee non-zero vectors for the 2D cosine kernel.
pub fn position_angle_2d(a: &Position2D) -> f32 {
    a.y.atan2(a.x)
}

/// The shorter arc between two angles on the unit circle.
pub fn relative_angle(a: f32, b: f32) -> f32 {
    let diff = (a - b).abs();
    if diff > std::f32::consts::PI {
        2.0 * std::f32::consts::PI - diff
    } else {
        diff
    }
}
