//! Position export and import.
//!
//! Positions are stored as comma separated text, one header row then one row per entity:
//! ```text
//! id,x,y,size
//! 0,0.1250,0.5000,24.3100
//! ```
//! `x` and `y` are normalized by the bounds the set lived in, so a file can be replayed on a
//! viewport of a different size. Values are written with 4 decimal places.

use {
  crate::{
    entity::{Entity, EntityId, PointSet},
    error::{Error, Result},
    geometry::{Bounds, P2}
  },
  itertools::Itertools,
  rand::Rng,
  std::io::{BufRead, Write},
  tracing::{info, warn}
};

pub const HEADER: &str = "id,x,y,size";

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PositionRecord {
  pub id: EntityId,
  /// normalized to `[0, 1]`
  pub x: f64,
  /// normalized to `[0, 1]`
  pub y: f64,
  pub size: f64
}

impl PositionRecord {
  pub fn from_entity(entity: &Entity, bounds: Bounds) -> Self {
    Self {
      id: entity.id(),
      x: entity.position.x / bounds.width,
      y: entity.position.y / bounds.height,
      size: entity.radius()
    }
  }

  fn to_row(self) -> String {
    format!("{},{:.4},{:.4},{:.4}", self.id, self.x, self.y, self.size)
  }
}

pub fn to_csv(set: &PointSet) -> String {
  let bounds = set.bounds();
  std::iter::once(HEADER.to_string())
    .chain(set.iter().map(|e| PositionRecord::from_entity(e, bounds).to_row()))
    .join("\n") + "\n"
}

pub fn export(set: &PointSet, mut writer: impl Write) -> Result<()> {
  writer.write_all(to_csv(set).as_bytes())?;
  writer.flush()?;
  info!(entities = set.len(), "positions exported");
  Ok(())
}

fn parse_row(line_no: usize, line: &str) -> Result<PositionRecord> {
  let columns: Vec<&str> = line.split(',').map(str::trim).collect();
  let &[id, x, y, size] = columns.as_slice() else {
    return Err(Error::parse(line_no, format!("expected 4 columns, found {}", columns.len())));
  };
  let number = |name: &str, value: &str| -> Result<f64> {
    match value.parse::<f64>() {
      Ok(v) if v.is_finite() => Ok(v),
      _ => Err(Error::parse(line_no, format!("{name}: not a finite number: {value:?}")))
    }
  };
  let id = id.parse::<u32>()
    .map_err(|e| Error::parse(line_no, format!("id: {e}")))?;
  Ok(PositionRecord {
    id: EntityId(id),
    x: number("x", x)?,
    y: number("y", y)?,
    size: number("size", size)?
  })
}

/// Read records. The first non-blank line must be the header; blank lines are ignored.
pub fn parse(reader: impl BufRead) -> Result<Vec<PositionRecord>> {
  let mut records = vec![];
  let mut header_seen = false;
  for (i, line) in reader.lines().enumerate() {
    let line = line?;
    let line = line.trim();
    if line.is_empty() {
      continue;
    }
    if !header_seen {
      if line.replace(' ', "") != HEADER {
        return Err(Error::parse(i + 1, format!("expected header {HEADER:?}, found {line:?}")));
      }
      header_seen = true;
      continue;
    }
    records.push(parse_row(i + 1, line)?);
  }
  if !header_seen {
    return Err(Error::parse(0, "empty position source"));
  }
  Ok(records)
}

/// Scale normalized records by `bounds`. Ids must be unique.
pub fn to_point_set(records: &[PositionRecord], bounds: Bounds) -> Result<PointSet> {
  let entities = records.iter()
    .map(|r| Entity::new(r.id, P2::new(r.x * bounds.width, r.y * bounds.height), r.size))
    .collect::<Result<Vec<_>>>()?;
  PointSet::from_entities(bounds, entities)
}

pub fn import(reader: impl BufRead, bounds: Bounds) -> Result<PointSet> {
  let records = parse(reader)?;
  if records.is_empty() {
    return Err(Error::parse(0, "position source has no rows"));
  }
  to_point_set(&records, bounds)
}

/// Load positions from `source`, or scatter `n` random entities when there is no source or
/// it can not be read. A broken source is only reported in the log.
///
/// Fails only when `bounds` itself is invalid.
pub fn load_or_scatter(
  source: Option<impl BufRead>,
  n: usize,
  bounds: Bounds,
  rng: &mut impl Rng
) -> Result<PointSet> {
  match source.map(|reader| import(reader, bounds)) {
    Some(Ok(set)) => {
      info!(entities = set.len(), "positions loaded");
      Ok(set)
    }
    Some(Err(err)) => {
      warn!(error = %err, "failed to load positions, falling back to random placement");
      PointSet::scatter(n, bounds, rng)
    }
    None => PointSet::scatter(n, bounds, rng)
  }
}

#[cfg(test)] mod tests {
  use {
    super::*,
    rand::SeedableRng,
    std::io::Cursor
  };

  #[test] fn round_trip() -> anyhow::Result<()> {
    let mut rng = rand_pcg::Pcg64::seed_from_u64(0);
    let bounds = Bounds::new(800.0, 600.0);
    let set = PointSet::scatter(30, bounds, &mut rng)?;
    let mut buf = vec![];
    export(&set, &mut buf)?;
    let restored = import(Cursor::new(buf), bounds)?;
    assert_eq!(restored.len(), set.len());
    for (a, b) in set.iter().zip(restored.iter()) {
      assert_eq!(a.id(), b.id());
      assert!((a.position.x / bounds.width - b.position.x / bounds.width).abs() <= 0.5e-4 + 1e-12);
      assert!((a.position.y / bounds.height - b.position.y / bounds.height).abs() <= 0.5e-4 + 1e-12);
      assert!((a.radius() - b.radius()).abs() <= 0.5e-4 + 1e-12);
    }
    Ok(())
  }

  #[test] fn rescales_to_new_bounds() -> anyhow::Result<()> {
    let csv = "id,x,y,size\n7,0.5000,0.2500,20.0000\n";
    let set = import(Cursor::new(csv), Bounds::new(1000.0, 400.0))?;
    let e = &set.as_slice()[0];
    assert_eq!(e.id(), EntityId(7));
    assert_eq!(e.position, P2::new(500.0, 100.0));
    Ok(())
  }

  #[test] fn malformed_rows() {
    let cases = [
      ("", "empty"),
      ("x,y\n", "header"),
      ("id,x,y,size\n1,0.5,0.5\n", "columns"),
      ("id,x,y,size\n1,abc,0.5,20\n", "x:"),
      ("id,x,y,size\n-1,0.5,0.5,20\n", "id:"),
      ("id,x,y,size\n1,0.5,inf,20\n", "y:"),
    ];
    for (csv, expected) in cases {
      let err = parse(Cursor::new(csv)).unwrap_err().to_string();
      assert!(err.contains(expected), "{csv:?}: {err}");
    }
  }

  #[test] fn rejects_duplicates_and_bad_sizes() {
    let bounds = Bounds::new(100.0, 100.0);
    assert!(import(Cursor::new("id,x,y,size\n1,0.1,0.1,5\n1,0.2,0.2,5\n"), bounds).is_err());
    assert!(import(Cursor::new("id,x,y,size\n1,0.1,0.1,0\n"), bounds).is_err());
    assert!(import(Cursor::new("id,x,y,size\n"), bounds).is_err());
  }

  #[test] fn falls_back_to_scatter() -> anyhow::Result<()> {
    let mut rng = rand_pcg::Pcg64::seed_from_u64(1);
    let bounds = Bounds::new(800.0, 600.0);
    let set = load_or_scatter(Some(Cursor::new("garbage")), 30, bounds, &mut rng)?;
    assert_eq!(set.len(), 30);
    let set = load_or_scatter(None::<Cursor<&str>>, 12, bounds, &mut rng)?;
    assert_eq!(set.len(), 12);
    let set = load_or_scatter(Some(Cursor::new("id,x,y,size\n3,0.5,0.5,22\n")), 30, bounds, &mut rng)?;
    assert_eq!(set.len(), 1);
    Ok(())
  }
}
