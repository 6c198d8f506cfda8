use {
  crate::{
    config::SimConfig,
    entity::PointSet,
    error::{Error, Result},
    geometry::{P2, ViewTransform},
    input::{Click, InputEvent, InputQueue},
    physics::{integration, repulsion},
    positions,
    render::{self, RenderSurface, ShapeLoader},
    spatial_index::SpatialIndex,
    trail::Trail
  },
  rand::SeedableRng,
  tracing::{debug, trace}
};


/// Outcome of a single [`Controller::step`].
#[derive(Debug, Default, Clone, PartialEq)]
pub struct FrameReport {
  pub frame: u64,
  /// entities that received a repulsion impulse this frame
  pub repelled: usize,
  /// positions serialized by an `ExportPositions` click, as `id,x,y,size` text
  pub exported: Option<String>
}

/// Owns the world and runs the per-frame pipeline:
/// input → repulsion → integration → index rebuild → render.
pub struct Controller<S> {
  config: SimConfig,
  set: PointSet,
  index: SpatialIndex,
  shapes: Vec<Option<S>>,
  view: ViewTransform,
  trail: Trail,
  input: InputQueue,
  rng: rand_pcg::Pcg64,
  parallel: bool,
  frame: u64
}

impl<S> Controller<S> {
  /// `shapes[i]` is the handle rendered for the `i`-th entity of `set`.
  pub fn new(config: SimConfig, set: PointSet, shapes: Vec<Option<S>>, seed: u64) -> Result<Self> {
    config.validate()?;
    if shapes.len() != set.len() {
      return Err(Error::invalid_param(format!(
        "{} shapes for {} entities", shapes.len(), set.len()
      )));
    }
    let index = SpatialIndex::build(set.as_slice(), config.bucket_capacity, config.max_depth);
    let bounds = set.bounds();
    debug!(entities = set.len(), ?bounds, "controller created");
    Ok(Self {
      config,
      index,
      shapes,
      view: ViewTransform::identity(),
      trail: Trail::new(P2::new(bounds.width / 2.0, bounds.height / 2.0)),
      input: InputQueue::new(),
      rng: rand_pcg::Pcg64::seed_from_u64(seed),
      parallel: false,
      frame: 0,
      set
    })
  }

  pub fn with_loader(
    config: SimConfig,
    set: PointSet,
    loader: &mut impl ShapeLoader<Handle = S>,
    seed: u64
  ) -> Result<Self> {
    let shapes = render::load_shapes(loader, &set);
    Self::new(config, set, shapes, seed)
  }

  /// Evaluate the force law on the rayon pool.
  pub fn with_parallel_repulsion(mut self, parallel: bool) -> Self {
    self.parallel = parallel;
    self
  }

  pub fn push_input(&mut self, event: InputEvent) {
    self.input.push(event);
  }

  /// Replace the tunables; takes effect on the next frame.
  pub fn set_config(&mut self, config: SimConfig) -> Result<()> {
    config.validate()?;
    self.config = config;
    self.rebuild_index();
    Ok(())
  }

  pub fn config(&self) -> &SimConfig { &self.config }
  pub fn point_set(&self) -> &PointSet { &self.set }
  pub fn index(&self) -> &SpatialIndex { &self.index }
  pub fn view(&self) -> &ViewTransform { &self.view }
  pub fn trail(&self) -> &Trail { &self.trail }
  pub fn frame(&self) -> u64 { self.frame }

  fn rebuild_index(&mut self) {
    self.index = SpatialIndex::build(self.set.as_slice(), self.config.bucket_capacity, self.config.max_depth);
  }

  /// Run one frame. `dt` is the elapsed time since the previous frame, in seconds.
  ///
  /// Clicks are handled before the physics, so an export reflects the positions the
  /// previous frame rendered. Repulsion only happens on frames where the cursor moved.
  #[tracing::instrument(level = "trace", skip_all, fields(frame = self.frame))]
  pub fn step(&mut self, dt: f64, surface: &mut impl RenderSurface<S>) -> FrameReport {
    let input = self.input.drain();
    let mut report = FrameReport { frame: self.frame, ..Default::default() };

    if let Some(view) = input.view {
      self.view = view;
    }
    for click in input.clicks {
      match click {
        Click::ExportPositions => report.exported = Some(positions::to_csv(&self.set)),
        Click::ResetView => self.view = ViewTransform::identity(),
        Click::Scatter => {
          self.set.rescatter(&mut self.rng);
          self.rebuild_index();
        }
      }
      debug!(?click, "click handled");
    }

    if let Some(screen) = input.cursor {
      let cursor = self.view.to_world(screen);
      self.trail.record(cursor);
      report.repelled = if self.parallel {
        repulsion::apply_parallel(&mut self.set, &self.index, cursor, dt, &self.config)
      } else {
        repulsion::apply(&mut self.set, &self.index, cursor, dt, &self.config)
      };
      trace!(x = cursor.x, y = cursor.y, repelled = report.repelled, "cursor");
    }

    integration::advance(&mut self.set, dt, &self.config);
    self.rebuild_index();
    self.trail.age(dt);

    render::sync(surface, &self.set, &self.shapes, &self.trail, &self.view);
    self.frame += 1;
    report
  }
}
