//! Component C: a 2D region quadtree supporting insertion and exact
//! k-nearest-neighbor queries via a bounded max-heap traversal.

mod heap;
mod node;
mod point;

pub use heap::HeapEntry;
use node::{Node, NodeId};
pub use point::EPSILON;
use point::{bounding_box_distance, child_boxes, child_index_for, midpoint, points_equal};

use crate::distance::euclidean_2d;
use crate::types::{Index, Position2D};
use heap::BoundedMaxHeap;

/// A 2D region quadtree over a fixed bounding box, with arena-allocated nodes.
pub struct Quadtree {
    arena: Vec<Node>,
    root: NodeId,
    element_count: usize,
}

impl Quadtree {
    /// Create an empty tree spanning `[lo, hi]`.
    pub fn new(lo: Position2D, hi: Position2D) -> Self {
        Self {
            arena: vec![Node::empty_leaf(lo, hi)],
            root: 0,
            element_count: 0,
        }
    }

    /// Build a tree over the bounding box of `positions`, inserting every
    /// `(positions[i], i)` pair.
    pub fn build(positions: &[Position2D]) -> Self {
        let (lo, hi) = bounding_box(positions);
        let mut tree = Quadtree::new(lo, hi);
        for (i, p) in positions.iter().enumerate() {
            tree.insert(*p, i as Index);
        }
        tree
    }

    /// Whether any point has been inserted.
    pub fn is_empty(&self) -> bool {
        self.element_count == 0
    }

    /// Insert `(p, value)`.
    pub fn insert(&mut self, p: Position2D, value: Index) {
        self.insert_from(self.root, p, value);
        self.element_count += 1;
    }

    fn insert_from(&mut self, start: NodeId, p: Position2D, value: Index) {
        let mut id = start;
        loop {
            match &self.arena[id as usize] {
                Node::Inner { center, children, .. } => {
                    id = children[child_index_for(p, *center)];
                }
                Node::Leaf { .. } => break,
            }
        }
        self.insert_into_leaf(id, p, value);
    }

    fn insert_into_leaf(&mut self, leaf_id: NodeId, p: Position2D, value: Index) {
        let (lo, hi, existing) = match &self.arena[leaf_id as usize] {
            Node::Leaf { lo, hi, point, .. } => (*lo, *hi, *point),
            Node::Inner { .. } => unreachable!("descent always stops at a leaf"),
        };

        match existing {
            None => {
                if let Node::Leaf { point, values, .. } = &mut self.arena[leaf_id as usize] {
                    *point = Some(p);
                    values.push(value);
                }
            }
            Some(existing_point) if points_equal(existing_point, p) => {
                if let Node::Leaf { values, .. } = &mut self.arena[leaf_id as usize] {
                    values.push(value);
                }
            }
            Some(existing_point) => {
                let coincident = match &mut self.arena[leaf_id as usize] {
                    Node::Leaf { values, .. } => std::mem::take(values),
                    Node::Inner { .. } => unreachable!(),
                };

                let center = midpoint(lo, hi);
                let boxes = child_boxes(lo, hi, center);
                let mut children = [0u32; 4];
                for (slot, (child_lo, child_hi)) in children.iter_mut().zip(boxes) {
                    *slot = self.arena.len() as NodeId;
                    self.arena.push(Node::empty_leaf(child_lo, child_hi));
                }
                self.arena[leaf_id as usize] = Node::Inner {
                    lo,
                    hi,
                    center,
                    children,
                };

                for v in coincident {
                    self.insert_from(leaf_id, existing_point, v);
                }
                self.insert_from(leaf_id, p, value);
            }
        }
    }

    /// Find up to `k + 1` nearest neighbors of `p`, drained from the bounded
    /// max-heap in pop order (farthest first, nearest last — see
    /// [`heap::BoundedMaxHeap::drain_descending`]). Callers that need
    /// ascending-by-distance order should reverse the result.
    pub fn find_nearest_neighbors(&self, p: Position2D, k: usize) -> Vec<HeapEntry> {
        let mut heap = BoundedMaxHeap::new(k);
        self.query(self.root, p, &mut heap);
        heap.drain_descending()
    }

    fn query(&self, node_id: NodeId, p: Position2D, heap: &mut BoundedMaxHeap) {
        match &self.arena[node_id as usize] {
            Node::Leaf { point, values, .. } => {
                if let Some(leaf_point) = point {
                    let distance = euclidean_2d(&p, leaf_point);
                    for &value in values {
                        heap.push_or_reject(HeapEntry { distance, value });
                    }
                }
            }
            Node::Inner { center, children, .. } => {
                let primary = child_index_for(p, *center);
                self.query(children[primary], p, heap);
                for (i, &child_id) in children.iter().enumerate() {
                    if i == primary {
                        continue;
                    }
                    if !heap.is_full() {
                        self.query(child_id, p, heap);
                        continue;
                    }
                    let (lo, hi) = self.arena[child_id as usize].bounds();
                    let min_distance = bounding_box_distance(p, lo, hi);
                    if min_distance < heap.max_distance().unwrap() {
                        self.query(child_id, p, heap);
                    }
                }
            }
        }
    }
}

/// The axis-aligned bounding box of `positions`, by scanning min/max per axis.
///
/// Panics on an empty slice; the engine's contract guarantees `N >= 1`.
pub fn bounding_box(positions: &[Position2D]) -> (Position2D, Position2D) {
    let first = positions[0];
    let mut min_x = first.x;
    let mut max_x = first.x;
    let mut min_y = first.y;
    let mut max_y = first.y;
    for p in &positions[1..] {
        min_x = min_x.min(p.x);
        max_x = max_x.max(p.x);
        min_y = min_y.min(p.y);
        max_y = max_y.max(p.y);
    }
    (Position2D::new(min_x, min_y), Position2D::new(max_x, max_y))
}
