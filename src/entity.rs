use {
  crate::{
    error::{Error, Result},
    geometry::{self, Bounds, P2, V2}
  },
  rand::Rng,
  std::{
    collections::HashSet,
    fmt::{Display, Formatter}
  }
};

/// Smallest randomly assigned radius.
pub const SCATTER_RADIUS_MIN: f64 = 20.0;
/// Randomly assigned radii fall in `[SCATTER_RADIUS_MIN, SCATTER_RADIUS_MIN + SCATTER_RADIUS_SPREAD)`.
pub const SCATTER_RADIUS_SPREAD: f64 = 10.0;

/// Stable identifier, correlates an entity with its rendered shape across frames.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub u32);

impl Display for EntityId {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.0)
  }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
  id: EntityId,
  radius: f64,
  pub position: P2<f64>,
  pub velocity: V2<f64>
}

impl Entity {
  pub fn new(id: EntityId, position: P2<f64>, radius: f64) -> Result<Self> {
    if !(radius.is_finite() && radius > 0.0) {
      return Err(Error::invalid_param(format!("entity {id}: radius must be finite and > 0, got {radius}")));
    }
    if !(position.x.is_finite() && position.y.is_finite()) {
      return Err(Error::invalid_param(format!("entity {id}: position must be finite")));
    }
    Ok(Self { id, radius, position, velocity: V2::zero() })
  }

  pub fn id(&self) -> EntityId { self.id }
  pub fn radius(&self) -> f64 { self.radius }
  pub fn speed(&self) -> f64 { self.velocity.length() }
}

/// Fixed population of entities living inside `bounds`.
///
/// Entities are never added or removed once the set is built; their order is the order
/// the spatial index refers to.
#[derive(Debug, Clone)]
pub struct PointSet {
  entities: Vec<Entity>,
  bounds: Bounds,
  max_radius: f64
}

fn validate_bounds(bounds: Bounds) -> Result<()> {
  if bounds.width.is_finite() && bounds.height.is_finite() && bounds.width > 0.0 && bounds.height > 0.0 {
    Ok(())
  } else {
    Err(Error::invalid_param(format!("bounds must be finite and positive, got {bounds:?}")))
  }
}

impl PointSet {
  /// Build from explicit entities; positions are clamped into `bounds`.
  ///
  /// Ids must be unique, and every entity must fit into `bounds` (`2 * radius` no larger
  /// than either side).
  pub fn from_entities(bounds: Bounds, entities: impl IntoIterator<Item = Entity>) -> Result<Self> {
    validate_bounds(bounds)?;
    let entities: Vec<Entity> = entities.into_iter().collect();
    let mut seen = HashSet::with_capacity(entities.len());
    for entity in &entities {
      if !seen.insert(entity.id) {
        return Err(Error::invalid_param(format!("duplicate entity id {}", entity.id)));
      }
      if 2.0 * entity.radius > bounds.width.min(bounds.height) {
        return Err(Error::invalid_param(format!(
          "entity {}: radius {} does not fit into {}x{}", entity.id, entity.radius, bounds.width, bounds.height
        )));
      }
    }
    let mut set = Self { entities, bounds, max_radius: 0.0 };
    set.max_radius = set.entities.iter()
      .map(Entity::radius)
      .fold(0.0, f64::max);
    set.clamp_all();
    Ok(set)
  }

  /// `n` entities with uniformly random positions and radii.
  pub fn scatter(n: usize, bounds: Bounds, rng: &mut impl Rng) -> Result<Self> {
    validate_bounds(bounds)?;
    let entities = (0..n)
      .map(|i| {
        let radius = SCATTER_RADIUS_MIN + rng.gen_range(0.0..SCATTER_RADIUS_SPREAD);
        Entity::new(EntityId(i as u32), random_position(bounds, rng), radius)
      })
      .collect::<Result<Vec<_>>>()?;
    Self::from_entities(bounds, entities)
  }

  /// Move every entity to a new random position and stop it. Ids and radii are kept.
  pub fn rescatter(&mut self, rng: &mut impl Rng) {
    let bounds = self.bounds;
    for entity in self.entities.iter_mut() {
      entity.position = random_position(bounds, rng);
      entity.velocity = V2::zero();
    }
    self.clamp_all();
  }

  pub(crate) fn clamp_all(&mut self) {
    let bounds = self.bounds;
    for entity in self.entities.iter_mut() {
      entity.position = geometry::clamp_to_bounds(entity.position, entity.radius, bounds);
    }
  }

  pub fn bounds(&self) -> Bounds { self.bounds }
  /// Largest radius in the set, zero when empty.
  pub fn max_radius(&self) -> f64 { self.max_radius }
  pub fn len(&self) -> usize { self.entities.len() }
  pub fn is_empty(&self) -> bool { self.entities.is_empty() }
  pub fn get(&self, index: usize) -> Option<&Entity> { self.entities.get(index) }
  pub fn iter(&self) -> std::slice::Iter<'_, Entity> { self.entities.iter() }
  pub fn as_slice(&self) -> &[Entity] { &self.entities }
  pub(crate) fn as_mut_slice(&mut self) -> &mut [Entity] { &mut self.entities }
}

fn random_position(bounds: Bounds, rng: &mut impl Rng) -> P2<f64> {
  P2::new(rng.gen_range(0.0..bounds.width), rng.gen_range(0.0..bounds.height))
}

#[cfg(test)] mod tests {
  use {
    super::*,
    rand::SeedableRng
  };

  #[test] fn scatter_respects_invariants() -> anyhow::Result<()> {
    let mut rng = rand_pcg::Pcg64::seed_from_u64(0);
    let bounds = Bounds::new(800.0, 600.0);
    let set = PointSet::scatter(30, bounds, &mut rng)?;
    assert_eq!(set.len(), 30);
    for (i, e) in set.iter().enumerate() {
      assert_eq!(e.id(), EntityId(i as u32));
      assert!(e.radius() >= SCATTER_RADIUS_MIN && e.radius() < SCATTER_RADIUS_MIN + SCATTER_RADIUS_SPREAD);
      assert!(e.position.x >= e.radius() && e.position.x <= bounds.width - e.radius());
      assert!(e.position.y >= e.radius() && e.position.y <= bounds.height - e.radius());
      assert_eq!(e.velocity, V2::zero());
    }
    assert!(set.max_radius() >= set.iter().map(Entity::radius).fold(0.0, f64::max));
    Ok(())
  }

  #[test] fn rejects_bad_radius_and_bounds() {
    assert!(Entity::new(EntityId(0), P2::new(1.0, 1.0), 0.0).is_err());
    assert!(Entity::new(EntityId(0), P2::new(1.0, 1.0), -3.0).is_err());
    assert!(Entity::new(EntityId(0), P2::new(f64::NAN, 1.0), 3.0).is_err());
    assert!(PointSet::from_entities(Bounds::new(0.0, 10.0), vec![]).is_err());
  }

  #[test] fn rejects_duplicate_ids() -> anyhow::Result<()> {
    let bounds = Bounds::new(800.0, 600.0);
    let twins = vec![
      Entity::new(EntityId(1), P2::new(100.0, 100.0), 20.0)?,
      Entity::new(EntityId(1), P2::new(300.0, 200.0), 20.0)?,
    ];
    let err = PointSet::from_entities(bounds, twins).unwrap_err();
    assert!(err.to_string().contains("duplicate entity id 1"), "{err}");

    // every accepted set survives its own export
    let set = PointSet::from_entities(bounds, vec![
      Entity::new(EntityId(1), P2::new(100.0, 100.0), 20.0)?,
      Entity::new(EntityId(2), P2::new(300.0, 200.0), 20.0)?,
    ])?;
    let csv = crate::positions::to_csv(&set);
    let restored = crate::positions::import(std::io::Cursor::new(csv), bounds)?;
    assert_eq!(restored.iter().map(Entity::id).collect::<Vec<_>>(), vec![EntityId(1), EntityId(2)]);
    Ok(())
  }

  #[test] fn rejects_entities_larger_than_bounds() -> anyhow::Result<()> {
    let bounds = Bounds::new(100.0, 40.0);
    assert!(PointSet::from_entities(bounds, vec![Entity::new(EntityId(0), P2::new(50.0, 20.0), 20.5)?]).is_err());
    let set = PointSet::from_entities(bounds, vec![Entity::new(EntityId(0), P2::new(0.0, 0.0), 20.0)?])?;
    assert_eq!(set.as_slice()[0].position, P2::new(20.0, 20.0));
    // an imported size that can not fit is refused, the caller falls back to scatter
    assert!(crate::positions::import(std::io::Cursor::new("id,x,y,size\n0,0.5,0.5,21\n"), bounds).is_err());
    Ok(())
  }

  #[test] fn rescatter_keeps_identity() -> anyhow::Result<()> {
    let mut rng = rand_pcg::Pcg64::seed_from_u64(7);
    let mut set = PointSet::scatter(10, Bounds::new(300.0, 200.0), &mut rng)?;
    set.as_mut_slice()[0].velocity = V2::new(3.0, -1.0);
    let radii: Vec<_> = set.iter().map(Entity::radius).collect();
    set.rescatter(&mut rng);
    assert_eq!(set.iter().map(Entity::radius).collect::<Vec<_>>(), radii);
    assert!(set.iter().all(|e| e.velocity == V2::zero()));
    Ok(())
  }

  #[test] fn from_entities_clamps() -> anyhow::Result<()> {
    let e = Entity::new(EntityId(4), P2::new(-50.0, 700.0), 10.0)?;
    let set = PointSet::from_entities(Bounds::new(100.0, 100.0), vec![e])?;
    assert_eq!(set.as_slice()[0].position, P2::new(10.0, 90.0));
    Ok(())
  }
}
