use {
  super::*,
  crate::entity::{EntityId, Entity},
  anyhow::Result,
  rand::prelude::*
};

fn random_entities(rng: &mut impl Rng, n: usize, width: f64, height: f64) -> Result<Vec<Entity>> {
  (0..n)
    .map(|i| Entity::new(
      EntityId(i as u32),
      P2::new(rng.gen_range(0.0..width), rng.gen_range(0.0..height)),
      1.0
    ).map_err(Into::into))
    .collect()
}

fn brute_force(entities: &[Entity], x: f64, y: f64, r: f64) -> Vec<usize> {
  let center = P2::new(x, y);
  entities.iter()
    .enumerate()
    .filter(|(_, e)| (e.position - center).square_length() <= r * r)
    .map(|(i, _)| i)
    .collect()
}

#[test] fn matches_brute_force() -> Result<()> {
  let mut rng = rand_pcg::Pcg64::seed_from_u64(0);
  for n in [0, 1, 2, 7, 30, 300, 2000] {
    let entities = random_entities(&mut rng, n, 800.0, 600.0)?;
    let index = SpatialIndex::build(&entities, 4, 12);
    assert_eq!(index.len(), n);
    for _ in 0..50 {
      let (x, y) = (rng.gen_range(-100.0..900.0), rng.gen_range(-100.0..700.0));
      let r = rng.gen_range(0.0..250.0);
      assert_eq!(index.query_radius(x, y, r), brute_force(&entities, x, y, r), "n = {n}, ({x}, {y}, {r})");
    }
  }
  Ok(())
}

#[test] fn clustered_points() -> Result<()> {
  let mut rng = rand_pcg::Pcg64::seed_from_u64(3);
  // a dense cluster inside a sparse field
  let mut entities = random_entities(&mut rng, 100, 1000.0, 1000.0)?;
  for i in 0..400 {
    let p = P2::new(500.0 + rng.gen_range(-1.0..1.0), 250.0 + rng.gen_range(-1.0..1.0));
    entities.push(Entity::new(EntityId(100 + i), p, 1.0)?);
  }
  let index = SpatialIndex::build(&entities, 8, 16);
  assert!(index.stats().max_depth > 6);
  for r in [0.5, 1.0, 2.0, 40.0] {
    assert_eq!(index.query_radius(500.0, 250.0, r), brute_force(&entities, 500.0, 250.0, r));
  }
  Ok(())
}

#[test] fn coincident_points_stop_at_max_depth() -> Result<()> {
  let entities = (0..64)
    .map(|i| Entity::new(EntityId(i), P2::new(10.0, 10.0), 1.0))
    .collect::<crate::error::Result<Vec<_>>>()?;
  let index = SpatialIndex::build(&entities, 4, 5);
  assert!(index.stats().max_depth <= 5);
  assert_eq!(index.query_radius(10.0, 10.0, 0.0), (0..64).collect::<Vec<_>>());
  assert!(index.query_radius(11.0, 10.0, 0.5).is_empty());
  Ok(())
}

#[test] fn boundary_is_inclusive() -> Result<()> {
  let entities = vec![
    Entity::new(EntityId(0), P2::new(0.0, 0.0), 1.0)?,
    Entity::new(EntityId(1), P2::new(3.0, 4.0), 1.0)?,
  ];
  let index = SpatialIndex::build(&entities, 1, 8);
  assert_eq!(index.query_radius(0.0, 0.0, 5.0), vec![0, 1]);
  assert_eq!(index.query_radius(0.0, 0.0, 4.999), vec![0]);
  Ok(())
}

#[test] fn idempotent_queries() -> Result<()> {
  let mut rng = rand_pcg::Pcg64::seed_from_u64(11);
  let entities = random_entities(&mut rng, 500, 800.0, 600.0)?;
  let index = SpatialIndex::build(&entities, 8, 12);
  let first = index.query_radius(400.0, 300.0, 120.0);
  let second = index.query_radius(400.0, 300.0, 120.0);
  assert!(!first.is_empty());
  assert_eq!(first, second);
  Ok(())
}

#[test] fn invalid_radius_is_empty() -> Result<()> {
  let entities = vec![Entity::new(EntityId(0), P2::new(5.0, 5.0), 1.0)?];
  let index = SpatialIndex::build(&entities, 8, 12);
  assert!(index.query_radius(5.0, 5.0, -1.0).is_empty());
  assert!(index.query_radius(5.0, 5.0, f64::NAN).is_empty());
  Ok(())
}

#[test] fn every_point_finds_itself() -> Result<()> {
  let mut rng = rand_pcg::Pcg64::seed_from_u64(5);
  for (offset, width, height) in [(0.0, 800.0, 600.0), (0.0, 1.0, 1.0), (1e6, 3.0, 700.0)] {
    for _ in 0..200 {
      let n = rng.gen_range(1..20);
      let entities: Vec<Entity> = random_entities(&mut rng, n, width, height)?
        .into_iter()
        .map(|mut e| { e.position += V2::splat(offset); e })
        .collect();
      let index = SpatialIndex::build(&entities, 2, 12);
      for (i, e) in entities.iter().enumerate() {
        assert!(index.tree.rect.contains(e.position), "root misses {:?}", e.position);
        for r in [0.0, 1e-12] {
          assert!(
            index.query_radius(e.position.x, e.position.y, r).contains(&i),
            "n = {n}, entity {i} at {:?} not found with r = {r}", e.position
          );
        }
      }
    }
  }
  Ok(())
}
