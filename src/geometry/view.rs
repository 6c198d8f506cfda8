use {
  super::{P2, ScreenSpace},
  euclid::{Point2D, Vector2D}
};

pub const MIN_SCALE: f64 = 0.5;
pub const MAX_SCALE: f64 = 10.0;

/// Zoom and pan applied to the world when it is displayed.
///
/// `screen = world * scale + translation`
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ViewTransform {
  pub scale: f64,
  pub translation: Vector2D<f64, ScreenSpace>
}

impl Default for ViewTransform {
  fn default() -> Self {
    Self::identity()
  }
}

impl ViewTransform {
  pub fn identity() -> Self {
    Self { scale: 1.0, translation: Vector2D::zero() }
  }

  pub fn new(scale: f64, translation: Vector2D<f64, ScreenSpace>) -> Self {
    Self { scale: Self::clamp_scale(scale), translation }
  }

  fn clamp_scale(scale: f64) -> f64 {
    if scale.is_finite() {
      scale.max(MIN_SCALE).min(MAX_SCALE)
    } else {
      1.0
    }
  }

  pub fn to_world(&self, pt: Point2D<f64, ScreenSpace>) -> P2<f64> {
    ((pt - self.translation) / self.scale).cast_unit()
  }

  pub fn to_screen(&self, pt: P2<f64>) -> Point2D<f64, ScreenSpace> {
    (pt * self.scale).cast_unit::<ScreenSpace>() + self.translation
  }

  /// Multiply the scale by `factor`, keeping the world point under `anchor` in place.
  pub fn zoom_about(self, anchor: Point2D<f64, ScreenSpace>, factor: f64) -> Self {
    let world_anchor = self.to_world(anchor);
    let scale = Self::clamp_scale(self.scale * factor);
    let translation = anchor - (world_anchor * scale).cast_unit::<ScreenSpace>();
    Self { scale, translation }
  }

  pub fn pan_by(self, delta: Vector2D<f64, ScreenSpace>) -> Self {
    Self { translation: self.translation + delta, ..self }
  }
}
