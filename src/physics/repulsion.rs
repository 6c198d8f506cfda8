use {
  crate::{
    config::SimConfig,
    entity::{Entity, PointSet},
    geometry::{P2, V2},
    spatial_index::SpatialIndex
  },
  rayon::prelude::*
};

/// Push direction for an entity sitting exactly on the cursor.
pub const FALLBACK_DIRECTION: V2<f64> = V2::new(1.0, 0.0);

/// `min(K / d^2, F_max) * (1 - d / radius)^2`, zero outside of `radius`.
///
/// At `d == 0` the clipped value `F_max` is used. Never exceeds `config.max_force`.
pub fn force_magnitude(distance: f64, radius: f64, config: &SimConfig) -> f64 {
  if !(radius > 0.0) || !(distance < radius) {
    return 0.0;
  }
  let clipped = if distance > 0.0 {
    (config.strength / (distance * distance)).min(config.max_force)
  } else {
    config.max_force
  };
  let falloff = 1.0 - distance / radius;
  clipped * falloff * falloff
}

/// Velocity change of a single entity, scaled by `frames` reference frames.
fn impulse(entity: &Entity, cursor: P2<f64>, config: &SimConfig, frames: f64) -> V2<f64> {
  let radius = config.repulsion_radius.for_entity(entity.radius());
  let offset = entity.position - cursor;
  let distance = offset.length();
  let force = force_magnitude(distance, radius, config);
  if force == 0.0 {
    return V2::zero();
  }
  let direction = if distance > 0.0 { offset / distance } else { FALLBACK_DIRECTION };
  direction * (force * config.gain * frames)
}

/// Largest repulsion radius over the set, used for the index query.
fn query_radius(set: &PointSet, config: &SimConfig) -> f64 {
  config.repulsion_radius.for_entity(set.max_radius())
}

/// Accumulate cursor repulsion into the velocity of every entity in range.
///
/// Returns the number of entities that received an impulse.
pub fn apply(set: &mut PointSet, index: &SpatialIndex, cursor: P2<f64>, dt: f64, config: &SimConfig) -> usize {
  let frames = config.time_scaling.frames(dt);
  let candidates = index.query_radius(cursor.x, cursor.y, query_radius(set, config));
  let entities = set.as_mut_slice();
  let mut affected = 0;
  for i in candidates {
    let Some(entity) = entities.get_mut(i) else { continue };
    let dv = impulse(entity, cursor, config, frames);
    if dv != V2::zero() {
      entity.velocity += dv;
      affected += 1;
    }
  }
  affected
}

/// Same as [`apply`], with the force law evaluated on the rayon pool.
///
/// Each entity's velocity is written by exactly one task, the index is only read.
pub fn apply_parallel(set: &mut PointSet, index: &SpatialIndex, cursor: P2<f64>, dt: f64, config: &SimConfig) -> usize {
  let frames = config.time_scaling.frames(dt);
  let mut in_range = vec![false; set.len()];
  for i in index.query_radius(cursor.x, cursor.y, query_radius(set, config)) {
    if let Some(flag) = in_range.get_mut(i) {
      *flag = true;
    }
  }
  set.as_mut_slice()
    .par_iter_mut()
    .zip(in_range.par_iter())
    .filter(|(_, in_range)| **in_range)
    .map(|(entity, _)| {
      let dv = impulse(entity, cursor, config, frames);
      entity.velocity += dv;
      (dv != V2::zero()) as usize
    })
    .sum()
}
