use {
  crate::geometry::WorldSpace,
  std::fmt::{Debug, Formatter},
  euclid::{Point2D, Rect},
  num_traits::Float
};

type Point<T> = Point2D<T, WorldSpace>;

/// Region quadtree: every node covers a rectangle, children split it into four equal quadrants.
#[derive(Clone)]
pub struct Quadtree<Data, Float> {
  pub rect: Rect<Float, WorldSpace>,
  pub children: Option<Box<[Quadtree<Data, Float>; 4]>>,
  pub depth: u8,
  pub max_depth: u8,
  pub data: Data
}

impl<Data: Debug, _Float: Float + Debug> Debug for Quadtree<Data, _Float> {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Quadtree")
      .field("rect", &self.rect)
      .field("children", &if self.children.is_some() { "Some(...)" } else { "None" })
      .field("depth", &self.depth)
      .field("data", &self.data)
      .finish()
  }
}

#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq)]
/// 4 sections of a rectangle
pub enum Quadrant {
  TL = 0,
  TR = 1,
  BL = 2,
  BR = 3
}

fn quadrant_origin<_Float: Float>() -> [Point<_Float>; 4] {
  let half = _Float::one() / (_Float::one() + _Float::one());
  [
    Point::new(_Float::zero(), _Float::zero()),
    Point::new(half, _Float::zero()),
    Point::new(_Float::zero(), half),
    Point::new(half, half)
  ]
}

impl Quadrant {
  /// Determine the section of `rect` that owns `pt`.
  ///
  /// Split lines belong to the right/bottom quadrant. Points outside of `rect` are assigned to
  /// the nearest quadrant, so the answer is always defined.
  pub fn get<_Float: Float>(rect: Rect<_Float, WorldSpace>, pt: Point<_Float>) -> Self {
    use Quadrant::*;
    let c = rect.center();
    match (pt.x < c.x, pt.y < c.y) {
      (true, true) => TL,
      (false, true) => TR,
      (true, false) => BL,
      (false, false) => BR
    }
  }
}

#[derive(PartialEq)]
pub enum TraverseCommand {
  Ok,
  Skip
}

#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct TreeStats {
  pub nodes: usize,
  pub leaves: usize,
  pub max_depth: u8
}

impl<Data, _Float: Float> Quadtree<Data, _Float> {
  pub fn new(rect: Rect<_Float, WorldSpace>, max_depth: u8, init: Data) -> Self {
    Quadtree {
      rect,
      children: None,
      depth: 0,
      max_depth,
      data: init
    }
  }

  pub fn is_leaf(&self) -> bool {
    self.children.is_none()
  }

  /// Depth-first walk; subtrees of nodes for which `f` returns `Skip` are not visited.
  pub fn traverse_managed(&self, f: &mut impl FnMut(&Self) -> TraverseCommand) {
    if f(self) == TraverseCommand::Ok {
      self.traverse_managed_a(f);
    }
  }

  fn traverse_managed_a(&self, f: &mut impl FnMut(&Self) -> TraverseCommand) {
    if let Some(children) = &self.children {
      for child in children.iter() {
        if f(child) == TraverseCommand::Ok {
          child.traverse_managed_a(f);
        }
      }
    }
  }

  /// Split a leaf into four children, `f` initializes their data.
  /// Does nothing at `max_depth` or if the node is already split.
  pub fn subdivide(&mut self, f: impl Fn(Rect<_Float, WorldSpace>) -> Data) -> &mut Option<Box<[Quadtree<Data, _Float>; 4]>> {
    if self.depth < self.max_depth && self.children.is_none() {
      let rect = self.rect;
      let children: [Quadtree<Data, _Float>; 4] = [0, 1, 2, 3]
        .map(|i| {
          let rect = Rect {
            origin: rect.origin +
              quadrant_origin()[i as usize].to_vector()
                .component_mul(rect.size.to_vector()),
            size: rect.size / (_Float::one() + _Float::one())
          };
          Quadtree {
            rect,
            children: None,
            depth: self.depth + 1,
            max_depth: self.max_depth,
            data: f(rect)
          }
        });
      self.children = Some(Box::new(children));
    }
    &mut self.children
  }

  /// find a smallest node containing pt
  pub fn pt_to_node_mut(&mut self, pt: Point<_Float>) -> &mut Self {
    let mut node = self;
    while node.children.is_some() {
      let quad = Quadrant::get(node.rect, pt) as usize;
      node = match node.children.as_deref_mut() {
        Some(children) => &mut children[quad],
        None => unreachable!()
      };
    }
    node
  }

  pub fn stats(&self) -> TreeStats {
    let mut stats = TreeStats::default();
    self.traverse_managed(&mut |node| {
      stats.nodes += 1;
      stats.leaves += node.is_leaf() as usize;
      stats.max_depth = stats.max_depth.max(node.depth);
      TraverseCommand::Ok
    });
    stats
  }
}
