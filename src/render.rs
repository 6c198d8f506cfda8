//! Seams towards the host: where shapes come from, and where frames go.

use {
  crate::{
    entity::{EntityId, PointSet},
    geometry::{P2, ViewTransform},
    trail::Trail
  },
  tracing::warn
};

pub use crate::trail::TrailSegment;

/// Receives one complete frame per call to [`sync`].
///
/// `Shape` is whatever opaque handle the [`ShapeLoader`] produced for an entity.
pub trait RenderSurface<Shape> {
  fn begin_frame(&mut self, _view: &ViewTransform) {}
  fn draw_entity(&mut self, id: EntityId, position: P2<f64>, radius: f64, shape: &Shape);
  fn draw_trail(&mut self, _segment: &TrailSegment) {}
  fn end_frame(&mut self) {}
}

/// Supplies the decorative shape of each entity.
pub trait ShapeLoader {
  type Handle;
  fn load(&mut self, id: EntityId, radius: f64) -> anyhow::Result<Self::Handle>;
}

impl<H, F> ShapeLoader for F where F: FnMut(EntityId, f64) -> anyhow::Result<H> {
  type Handle = H;
  fn load(&mut self, id: EntityId, radius: f64) -> anyhow::Result<H> {
    self(id, radius)
  }
}

/// One handle per entity, in point set order. Entities whose shape failed to load get `None`
/// and are skipped by [`sync`]; the failure is logged.
pub fn load_shapes<L: ShapeLoader>(loader: &mut L, set: &PointSet) -> Vec<Option<L::Handle>> {
  set.iter()
    .map(|entity| loader.load(entity.id(), entity.radius())
      .map_err(|err| warn!(id = %entity.id(), error = %err, "shape failed to load"))
      .ok())
    .collect()
}

/// Push the current state of the world to `surface`.
pub fn sync<S>(
  surface: &mut impl RenderSurface<S>,
  set: &PointSet,
  shapes: &[Option<S>],
  trail: &Trail,
  view: &ViewTransform
) {
  surface.begin_frame(view);
  for segment in trail.segments() {
    surface.draw_trail(segment);
  }
  for (entity, shape) in set.iter().zip(shapes) {
    if let Some(shape) = shape {
      surface.draw_entity(entity.id(), entity.position, entity.radius(), shape);
    }
  }
  surface.end_frame();
}

/// Records draw calls, for tests.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct Recorder {
  pub frames: usize,
  pub entities: Vec<(EntityId, P2<f64>, f64)>,
  pub trail: usize
}

#[cfg(test)]
impl<S> RenderSurface<S> for Recorder {
  fn begin_frame(&mut self, _view: &ViewTransform) {
    self.entities.clear();
    self.trail = 0;
  }
  fn draw_entity(&mut self, id: EntityId, position: P2<f64>, radius: f64, _shape: &S) {
    self.entities.push((id, position, radius));
  }
  fn draw_trail(&mut self, _segment: &TrailSegment) {
    self.trail += 1;
  }
  fn end_frame(&mut self) {
    self.frames += 1;
  }
}
