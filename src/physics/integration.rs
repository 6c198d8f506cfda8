use crate::{
  config::SimConfig,
  entity::PointSet,
  geometry
};

/// Damp velocities, move, then clamp positions into the bounds.
///
/// Damping is applied before the displacement, so an unperturbed entity slows down every
/// frame. Clamping leaves the velocity untouched: an entity pressed against a wall stays
/// there until its velocity turns around.
pub fn advance(set: &mut PointSet, dt: f64, config: &SimConfig) {
  let frames = config.time_scaling.frames(dt);
  let damping = config.damping.powf(frames);
  let bounds = set.bounds();
  for entity in set.as_mut_slice() {
    entity.velocity *= damping;
    let moved = entity.position + entity.velocity * frames;
    entity.position = geometry::clamp_to_bounds(moved, entity.radius(), bounds);
  }
}
