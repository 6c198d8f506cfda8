//! .
//!
//! The origin of coordinate system is in top-left corner. World coordinates are expressed in
//! the same units as the viewport at identity zoom, so an 800x600 viewport spans
//! `[0, 800] x [0, 600]`.

use euclid::{Point2D, Vector2D, Size2D, Rect};

pub mod view;
pub use view::ViewTransform;

/// Simulation coordinate basis
#[derive(Debug, Copy, Clone)]
pub struct WorldSpace;
/// Raw input coordinate basis, before the zoom/pan transform is inverted
#[derive(Debug, Copy, Clone)]
pub struct ScreenSpace;

pub type P2<T> = Point2D<T, WorldSpace>;
pub type V2<T> = Vector2D<T, WorldSpace>;
/// Extent of the simulated area, anchored at the origin.
pub type Bounds = Size2D<f64, WorldSpace>;

/// Squared distance from `pt` to the closest point of `rect`, zero if `pt` is inside.
pub fn min_distance_sq(rect: &Rect<f64, WorldSpace>, pt: P2<f64>) -> f64 {
  let dx = (rect.min_x() - pt.x).max(pt.x - rect.max_x()).max(0.0);
  let dy = (rect.min_y() - pt.y).max(pt.y - rect.max_y()).max(0.0);
  dx * dx + dy * dy
}

/// Constrain `value` to `[margin, extent - margin]`.
///
/// When the interval is empty (`extent < 2 * margin`) the value is pinned to the middle
/// of the extent.
pub fn clamp_axis(value: f64, margin: f64, extent: f64) -> f64 {
  let (lo, hi) = (margin, extent - margin);
  if lo > hi {
    return extent / 2.0;
  }
  value.max(lo).min(hi)
}

/// Constrain a point so that a disk of `radius` around it stays within `bounds`.
pub fn clamp_to_bounds(pt: P2<f64>, radius: f64, bounds: Bounds) -> P2<f64> {
  P2::new(
    clamp_axis(pt.x, radius, bounds.width),
    clamp_axis(pt.y, radius, bounds.height)
  )
}
