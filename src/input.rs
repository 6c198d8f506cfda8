//! Input events buffered between frames.
//!
//! The host pushes events as they arrive; the controller drains the queue once per frame.
//! Cursor position and view transform keep only their latest value, clicks are delivered
//! exactly once each, in arrival order.

use {
  crate::geometry::{ScreenSpace, ViewTransform},
  euclid::Point2D,
  std::collections::VecDeque
};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Click {
  /// Serialize current positions
  ExportPositions,
  /// Restore identity zoom and pan
  ResetView,
  /// Re-randomize positions
  Scatter
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum InputEvent {
  CursorMoved(Point2D<f64, ScreenSpace>),
  ViewChanged(ViewTransform),
  Click(Click)
}

/// Everything that happened since the previous frame.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct FrameInput {
  pub cursor: Option<Point2D<f64, ScreenSpace>>,
  pub view: Option<ViewTransform>,
  pub clicks: Vec<Click>
}

#[derive(Debug, Default)]
pub struct InputQueue {
  events: VecDeque<InputEvent>
}

impl InputQueue {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn push(&mut self, event: InputEvent) {
    self.events.push_back(event);
  }

  pub fn len(&self) -> usize { self.events.len() }
  pub fn is_empty(&self) -> bool { self.events.is_empty() }

  pub fn drain(&mut self) -> FrameInput {
    let mut input = FrameInput::default();
    for event in self.events.drain(..) {
      match event {
        InputEvent::CursorMoved(pt) => input.cursor = Some(pt),
        InputEvent::ViewChanged(view) => input.view = Some(view),
        InputEvent::Click(click) => input.clicks.push(click)
      }
    }
    input
  }
}
