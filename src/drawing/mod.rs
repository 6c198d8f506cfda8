//! Raster render surface, draws every entity as a filled disk into an [`RgbaImage`].

use {
  crate::{
    entity::EntityId,
    geometry::{P2, ScreenSpace, ViewTransform},
    render::{RenderSurface, TrailSegment}
  },
  euclid::{Box2D, Point2D},
  image::{Rgba, RgbaImage}
};


/// Frame buffer plus the view transform of the frame being drawn.
///
/// The shape handle of each entity is its fill colour.
pub struct Canvas {
  pub image: RgbaImage,
  pub background: Rgba<u8>,
  pub trail_color: Rgba<u8>,
  view: ViewTransform
}

impl Canvas {
  pub fn new(width: u32, height: u32) -> Self {
    Self {
      image: RgbaImage::new(width, height),
      background: Rgba([0x3a, 0x86, 0xff, 0xff]),
      trail_color: Rgba([0xad, 0xd8, 0xe6, 0xff]),
      view: ViewTransform::identity()
    }
  }

  /// Paint every pixel whose center lies within `radius` of `center` (screen space).
  fn fill_disk(&mut self, center: Point2D<f64, ScreenSpace>, radius: f64, color: Rgba<u8>) {
    let (width, height) = self.image.dimensions();
    let bounds = Box2D::new(
      center - euclid::Vector2D::splat(radius),
      center + euclid::Vector2D::splat(radius)
    )
      .round_out()
      .intersection(&Box2D::new(Point2D::zero(), Point2D::new(width as f64, height as f64)));
    let Some(bounds) = bounds else { return };
    let r_sq = radius * radius;
    for y in bounds.min.y as u32..bounds.max.y as u32 {
      for x in bounds.min.x as u32..bounds.max.x as u32 {
        let pixel = Point2D::new(x as f64 + 0.5, y as f64 + 0.5);
        if (pixel - center).square_length() <= r_sq {
          self.image.put_pixel(x, y, color);
        }
      }
    }
  }

  fn stroke(&mut self, points: impl Iterator<Item = P2<f64>>, width: f64, color: Rgba<u8>) {
    for pt in points {
      let pt = self.view.to_screen(pt);
      self.fill_disk(pt, width * self.view.scale / 2.0, color);
    }
  }
}

/// Evenly spaced points on the segment `a -> b`, roughly one per unit of length.
fn sample_line(a: P2<f64>, b: P2<f64>) -> impl Iterator<Item = P2<f64>> {
  let steps = (b - a).length().ceil().max(1.0) as usize;
  (0..=steps).map(move |i| a.lerp(b, i as f64 / steps as f64))
}

fn sample_quad(from: P2<f64>, control: P2<f64>, to: P2<f64>) -> impl Iterator<Item = P2<f64>> {
  let steps = ((control - from).length() + (to - control).length()).ceil().max(1.0) as usize;
  (0..=steps).map(move |i| {
    let t = i as f64 / steps as f64;
    from.lerp(control, t).lerp(control.lerp(to, t), t)
  })
}

impl RenderSurface<Rgba<u8>> for Canvas {
  fn begin_frame(&mut self, view: &ViewTransform) {
    self.view = *view;
    let background = self.background;
    self.image.pixels_mut().for_each(|p| *p = background);
  }

  fn draw_entity(&mut self, _id: EntityId, position: P2<f64>, radius: f64, shape: &Rgba<u8>) {
    let center = self.view.to_screen(position);
    self.fill_disk(center, radius * self.view.scale, *shape);
  }

  fn draw_trail(&mut self, segment: &TrailSegment) {
    let color = self.trail_color;
    if segment.lines_alive() {
      for line in segment.lines {
        self.stroke(sample_line(line.from, line.to), 3.0, color);
      }
    }
    if segment.arc_alive() {
      let arc = segment.arc;
      self.stroke(sample_quad(arc.from, arc.control, arc.to), 3.0, color);
    }
  }
}
