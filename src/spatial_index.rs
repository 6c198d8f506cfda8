//! Radius queries over a [`PointSet`](crate::entity::PointSet).
//!
//! The index is a bucket quadtree rebuilt from scratch every frame. Leaves hold up to
//! `bucket_capacity` points and split on overflow, so the tree only grows deep where points
//! are dense. Coincident points can not be separated; once `max_depth` is reached a leaf
//! keeps growing instead.

use {
  crate::{
    entity::Entity,
    geometry::{self, P2, V2, WorldSpace},
    quadtree::{Quadrant, Quadtree, TraverseCommand, TreeStats}
  },
  euclid::{Box2D, Rect, Size2D},
  tracing::trace
};

#[cfg(test)] mod tests;

/// Padding of the root and tolerance of the subtree pruning, relative to the root side.
const PRUNE_SLACK: f64 = 1e-9;

/// Leaf payload: index into the point set, and the position it had at build time.
type Bucket = Vec<(usize, P2<f64>)>;

#[derive(Debug, Clone)]
pub struct SpatialIndex {
  tree: Quadtree<Bucket, f64>,
  bucket_capacity: usize,
  /// distance by which a point may lie outside the rect of the leaf it was routed to
  slack: f64,
  len: usize
}

impl SpatialIndex {
  /// Build over the current positions of `entities`. O(n log n) for non-degenerate inputs.
  pub fn build(entities: &[Entity], bucket_capacity: usize, max_depth: u8) -> Self {
    let bucket_capacity = bucket_capacity.max(1);
    let (root, slack) = root_rect(entities);
    let mut index = Self {
      tree: Quadtree::new(root, max_depth, vec![]),
      bucket_capacity,
      slack,
      len: 0
    };
    for (i, entity) in entities.iter().enumerate() {
      index.insert(i, entity.position);
    }
    if tracing::enabled!(tracing::Level::TRACE) {
      let TreeStats { nodes, leaves, max_depth } = index.tree.stats();
      trace!(points = index.len, nodes, leaves, max_depth, "spatial index rebuilt");
    }
    index
  }

  fn insert(&mut self, i: usize, pt: P2<f64>) {
    let capacity = self.bucket_capacity;
    let leaf = self.tree.pt_to_node_mut(pt);
    leaf.data.push((i, pt));
    split_overflowing(leaf, capacity);
    self.len += 1;
  }

  /// Indices of every entity within distance `r` (inclusive) of `(x, y)`, ascending.
  ///
  /// A subtree is skipped as soon as its rectangle is farther than `r` from the query point,
  /// up to a rounding tolerance. Points are always filtered by their exact distance.
  pub fn query_radius(&self, x: f64, y: f64, r: f64) -> Vec<usize> {
    let mut result = vec![];
    if !(r >= 0.0) || self.len == 0 {
      return result;
    }
    let center = P2::new(x, y);
    let r_sq = r * r;
    // child rects are derived in floating point and may miss a routed point by a few ulps
    let reach = r + self.slack;
    let reach_sq = reach * reach;
    self.tree.traverse_managed(&mut |node| {
      if geometry::min_distance_sq(&node.rect, center) > reach_sq {
        return TraverseCommand::Skip;
      }
      result.extend(node.data.iter()
        .filter(|(_, pt)| (*pt - center).square_length() <= r_sq)
        .map(|&(i, _)| i));
      TraverseCommand::Ok
    });
    result.sort_unstable();
    result
  }

  pub fn len(&self) -> usize { self.len }
  pub fn is_empty(&self) -> bool { self.len == 0 }
  pub fn stats(&self) -> TreeStats { self.tree.stats() }
}

/// Square strictly covering every position, so quadrants stay square at every depth.
///
/// Also returns the pad added on each side, which bounds the rounding error of the child
/// rects at any depth.
fn root_rect(entities: &[Entity]) -> (Rect<f64, WorldSpace>, f64) {
  let bbox = Box2D::from_points(entities.iter().map(|e| e.position));
  let side = bbox.width().max(bbox.height());
  let side = if side > 0.0 { side } else { 1.0 };
  let magnitude = [bbox.min.x, bbox.min.y, bbox.max.x, bbox.max.y]
    .into_iter()
    .fold(side, |m, v| m.max(v.abs()));
  let pad = magnitude * PRUNE_SLACK;
  (Rect::new(bbox.min - V2::splat(pad), Size2D::splat(side + 3.0 * pad)), pad)
}

fn split_overflowing(node: &mut Quadtree<Bucket, f64>, capacity: usize) {
  if node.data.len() <= capacity || node.depth >= node.max_depth {
    return;
  }
  let items = std::mem::take(&mut node.data);
  let rect = node.rect;
  if let Some(children) = node.subdivide(|_| vec![]).as_deref_mut() {
    for (i, pt) in items {
      children[Quadrant::get(rect, pt) as usize].data.push((i, pt));
    }
    for child in children.iter_mut() {
      split_overflowing(child, capacity);
    }
  }
}
