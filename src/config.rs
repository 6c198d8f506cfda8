//! Tunables threaded through the index build, repulsion and integration.

use crate::error::{Error, Result};

/// How far from the cursor an entity feels the repulsion.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum RepulsionRadius {
  /// Same radius for every entity.
  Fixed(f64),
  /// `entity.radius * factor`, so larger shapes have a larger hitbox.
  PerEntity { factor: f64 }
}

impl RepulsionRadius {
  pub fn for_entity(&self, radius: f64) -> f64 {
    match *self {
      RepulsionRadius::Fixed(r) => r,
      RepulsionRadius::PerEntity { factor } => radius * factor
    }
  }
}

/// Relation between elapsed frame time and simulated motion.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum TimeScaling {
  /// One step per frame, `dt` ignored. Motion speed depends on the frame rate.
  PerFrame,
  /// Impulse, damping and displacement are scaled by `dt / reference_dt`.
  Elapsed { reference_dt: f64 }
}

impl TimeScaling {
  /// Number of reference frames `dt` amounts to.
  pub fn frames(&self, dt: f64) -> f64 {
    match *self {
      TimeScaling::PerFrame => 1.0,
      TimeScaling::Elapsed { reference_dt } => {
        if dt.is_finite() && dt > 0.0 { dt / reference_dt } else { 0.0 }
      }
    }
  }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SimConfig {
  /// numerator of the inverse-square law, `K / d^2`
  pub strength: f64,
  /// upper bound of the force magnitude
  pub max_force: f64,
  /// force to velocity factor
  pub gain: f64,
  /// per-frame multiplicative velocity decay, in (0, 1)
  pub damping: f64,
  pub repulsion_radius: RepulsionRadius,
  pub time_scaling: TimeScaling,
  /// leaf capacity before a quadtree node is subdivided
  pub bucket_capacity: usize,
  pub max_depth: u8
}

impl Default for SimConfig {
  fn default() -> Self {
    Self {
      strength: 1000.0,
      max_force: 50.0,
      gain: 1.0,
      damping: 0.98,
      repulsion_radius: RepulsionRadius::PerEntity { factor: 2.0 },
      time_scaling: TimeScaling::PerFrame,
      bucket_capacity: 8,
      max_depth: 12
    }
  }
}

impl SimConfig {
  pub fn with_strength(mut self, strength: f64) -> Self {
    self.strength = strength;
    self
  }
  pub fn with_max_force(mut self, max_force: f64) -> Self {
    self.max_force = max_force;
    self
  }
  pub fn with_gain(mut self, gain: f64) -> Self {
    self.gain = gain;
    self
  }
  pub fn with_damping(mut self, damping: f64) -> Self {
    self.damping = damping;
    self
  }
  pub fn with_repulsion_radius(mut self, radius: RepulsionRadius) -> Self {
    self.repulsion_radius = radius;
    self
  }
  pub fn with_time_scaling(mut self, time_scaling: TimeScaling) -> Self {
    self.time_scaling = time_scaling;
    self
  }
  /// Controls leaf size and maximum subdivision of the spatial index
  pub fn with_index_shape(mut self, bucket_capacity: usize, max_depth: u8) -> Self {
    self.bucket_capacity = bucket_capacity;
    self.max_depth = max_depth;
    self
  }

  pub fn validate(&self) -> Result<()> {
    fn finite_non_negative(name: &str, v: f64) -> Result<()> {
      if v.is_finite() && v >= 0.0 {
        Ok(())
      } else {
        Err(Error::invalid_param(format!("{name} must be finite and >= 0, got {v}")))
      }
    }

    finite_non_negative("strength", self.strength)?;
    finite_non_negative("max_force", self.max_force)?;
    finite_non_negative("gain", self.gain)?;
    if !(self.damping > 0.0 && self.damping < 1.0) {
      return Err(Error::invalid_param(format!("damping must be in (0, 1), got {}", self.damping)));
    }
    match self.repulsion_radius {
      RepulsionRadius::Fixed(r) => finite_non_negative("repulsion radius", r)?,
      RepulsionRadius::PerEntity { factor } => finite_non_negative("repulsion radius factor", factor)?
    }
    if let TimeScaling::Elapsed { reference_dt } = self.time_scaling {
      if !(reference_dt.is_finite() && reference_dt > 0.0) {
        return Err(Error::invalid_param(format!("reference_dt must be > 0, got {reference_dt}")));
      }
    }
    if self.bucket_capacity == 0 {
      return Err(Error::invalid_param("bucket_capacity must be > 0"));
    }
    Ok(())
  }
}
