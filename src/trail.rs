//! Decorative cursor trail.
//!
//! Each cursor movement leaves a short-lived "wake": two strokes running parallel to the
//! motion on either side of it, closed by a quadratic arc bulging ahead of the cursor.

use {
  crate::geometry::{P2, V2},
  std::collections::VecDeque
};

/// Distance of each parallel stroke from the motion line.
pub const LINE_OFFSET: f64 = 15.0;
/// Distance of the arc control point ahead of the cursor.
pub const ARC_OFFSET: f64 = 25.0;
/// Seconds a stroke stays alive.
pub const LINE_LIFETIME: f64 = 0.2;
/// Seconds the arc stays alive.
pub const ARC_LIFETIME: f64 = 0.05;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Line {
  pub from: P2<f64>,
  pub to: P2<f64>
}

/// Quadratic Bézier `from -> control -> to`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Arc {
  pub from: P2<f64>,
  pub control: P2<f64>,
  pub to: P2<f64>
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TrailSegment {
  pub lines: [Line; 2],
  pub arc: Arc,
  /// seconds since creation
  pub age: f64
}

impl TrailSegment {
  /// `None` when the cursor did not actually move.
  pub fn between(last: P2<f64>, current: P2<f64>) -> Option<Self> {
    let motion = current - last;
    let length = motion.length();
    if !(length > 0.0) {
      return None;
    }
    let direction = motion / length;
    let normal = V2::new(-direction.y, direction.x) * LINE_OFFSET;
    let lines = [
      Line { from: last + normal, to: current + normal },
      Line { from: last - normal, to: current - normal }
    ];
    let arc = Arc {
      from: lines[0].to,
      control: current + direction * ARC_OFFSET,
      to: lines[1].to
    };
    Some(Self { lines, arc, age: 0.0 })
  }

  pub fn lines_alive(&self) -> bool { self.age < LINE_LIFETIME }
  pub fn arc_alive(&self) -> bool { self.age < ARC_LIFETIME }
}

#[derive(Debug, Clone)]
pub struct Trail {
  last: P2<f64>,
  segments: VecDeque<TrailSegment>
}

impl Trail {
  /// `start` is where the cursor is assumed to be before the first movement.
  pub fn new(start: P2<f64>) -> Self {
    Self { last: start, segments: VecDeque::new() }
  }

  pub fn last(&self) -> P2<f64> { self.last }

  pub fn record(&mut self, cursor: P2<f64>) -> Option<&TrailSegment> {
    let segment = TrailSegment::between(self.last, cursor);
    self.last = cursor;
    self.segments.push_back(segment?);
    self.segments.back()
  }

  /// Advance the clock by `dt` seconds and forget segments that faded out.
  pub fn age(&mut self, dt: f64) {
    let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
    for segment in self.segments.iter_mut() {
      segment.age += dt;
    }
    self.segments.retain(TrailSegment::lines_alive);
  }

  pub fn segments(&self) -> impl Iterator<Item = &TrailSegment> + '_ {
    self.segments.iter()
  }

  pub fn len(&self) -> usize { self.segments.len() }
  pub fn is_empty(&self) -> bool { self.segments.is_empty() }
}

#[cfg(test)] mod tests {
  use super::*;

  fn close(a: P2<f64>, b: P2<f64>) -> bool {
    (a - b).length() < 1e-9
  }

  #[test] fn horizontal_motion() {
    let segment = TrailSegment::between(P2::new(0.0, 0.0), P2::new(10.0, 0.0)).unwrap();
    assert!(close(segment.lines[0].from, P2::new(0.0, 15.0)));
    assert!(close(segment.lines[0].to, P2::new(10.0, 15.0)));
    assert!(close(segment.lines[1].to, P2::new(10.0, -15.0)));
    assert!(close(segment.arc.control, P2::new(35.0, 0.0)));
    assert_eq!(segment.arc.from, segment.lines[0].to);
    assert_eq!(segment.arc.to, segment.lines[1].to);
  }

  #[test] fn no_motion_no_segment() {
    let mut trail = Trail::new(P2::new(400.0, 300.0));
    assert!(trail.record(P2::new(400.0, 300.0)).is_none());
    assert!(trail.is_empty());
    assert!(trail.record(P2::new(410.0, 300.0)).is_some());
    assert_eq!(trail.last(), P2::new(410.0, 300.0));
  }

  #[test] fn segments_expire() {
    let mut trail = Trail::new(P2::new(0.0, 0.0));
    trail.record(P2::new(5.0, 5.0));
    trail.age(0.03);
    trail.record(P2::new(9.0, 5.0));
    let alive: Vec<bool> = trail.segments().map(TrailSegment::arc_alive).collect();
    assert_eq!(alive, vec![true, true]);
    trail.age(0.03);
    let alive: Vec<bool> = trail.segments().map(TrailSegment::arc_alive).collect();
    assert_eq!(alive, vec![false, true]);
    trail.age(0.15);
    assert_eq!(trail.len(), 1);
    trail.age(1.0);
    assert!(trail.is_empty());
  }
}
