//! Sweep the cursor diagonally across a field of 30 disks and save the last frame.
//!
//! `cargo run --example cursor_sweep --features drawing -- [positions.csv]`

use {
  lily_pond::{
    config::SimConfig,
    controller::Controller,
    drawing::Canvas,
    entity::EntityId,
    geometry::Bounds,
    input::{Click, InputEvent},
    positions
  },
  anyhow::Result,
  euclid::Point2D,
  image::Rgba,
  rand::prelude::*,
  std::{fs::File, io::BufReader}
};

fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_max_level(tracing::Level::DEBUG)
    .init();

  let (width, height) = (800u32, 600u32);
  let bounds = Bounds::new(width as f64, height as f64);
  let mut rng = rand_pcg::Pcg64::seed_from_u64(0);

  // a missing file is fine, positions are randomized then
  let source = std::env::args().nth(1)
    .and_then(|path| File::open(path).ok())
    .map(BufReader::new);
  let set = positions::load_or_scatter(source, 30, bounds, &mut rng)?;

  let mut loader = |id: EntityId, _radius: f64| -> Result<Rgba<u8>> {
    let shade = 160 + (id.0 % 96 * 37 % 96) as u8;
    Ok(Rgba([40, shade, 70, 255]))
  };
  let mut controller = Controller::with_loader(SimConfig::default(), set, &mut loader, 0)?
    .with_parallel_repulsion(true);
  let mut canvas = Canvas::new(width, height);

  let t0 = std::time::Instant::now();
  let steps = 240;
  for i in 0..=steps {
    let t = i as f64 / steps as f64;
    controller.push_input(InputEvent::CursorMoved(Point2D::new(t * width as f64, t * height as f64)));
    controller.step(1.0 / 60.0, &mut canvas);
  }
  println!("{} frames: {}ms", steps + 1, t0.elapsed().as_millis());

  controller.push_input(InputEvent::Click(Click::ExportPositions));
  if let Some(csv) = controller.step(1.0 / 60.0, &mut canvas).exported {
    std::fs::write("positions.csv", csv)?;
  }
  canvas.image.save("out.png")?;
  Ok(())
}
