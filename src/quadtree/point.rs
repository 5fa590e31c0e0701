//! 2D geometry helpers used by the quadtree (component C).

use crate::distance::euclidean_2d;
use crate::types::Position2D;

/// Two points closer than this on both axes are considered coincident.
pub const EPSILON: f32 = 0.0000001;

/// Whether `a` and `b` are coincident within [`EPSILON`] on each axis.
pub fn points_equal(a: Position2D, b: Position2D) -> bool {
    (a.x - b.x).abs() < EPSILON && (a.y - b.y).abs() < EPSILON
}

/// The midpoint of `a` and `b`.
pub fn midpoint(a: Position2D, b: Position2D) -> Position2D {
    Position2D::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0)
}

/// Distance from `p` to the nearest point of the axis-aligned box `[lo, hi]`,
/// via clamping `p` into the box and measuring the Euclidean distance to that
/// clamped point. Zero if `p` is inside the box.
pub fn bounding_box_distance(p: Position2D, lo: Position2D, hi: Position2D) -> f32 {
    let target = Position2D::new(p.x.clamp(lo.x, hi.x), p.y.clamp(lo.y, hi.y));
    euclidean_2d(&p, &target)
}

/// Which of the four quadrant children of a box centered at `center` contains
/// `p`. Ties on either axis go to the lower-indexed (upper/left) child.
pub fn child_index_for(p: Position2D, center: Position2D) -> usize {
    if p.y <= center.y {
        if p.x <= center.x {
            0
        } else {
            1
        }
    } else if p.x <= center.x {
        2
    } else {
        3
    }
}

/// The four child boxes of `[lo, hi]` split at `center`, in child-index order
/// (top-left, top-right, bottom-left, bottom-right).
pub fn child_boxes(
    lo: Position2D,
    hi: Position2D,
    center: Position2D,
) -> [(Position2D, Position2D); 4] {
    [
        (lo, center),
        (Position2D::new(center.x, lo.y), Position2D::new(hi.x, center.y)),
        (Position2D::new(lo.x, center.y), Position2D::new(center.x, hi.y)),
        (center, hi),
    ]
}
