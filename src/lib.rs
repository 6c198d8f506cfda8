//! A cursor-repulsion field over a fixed set of 2D points.
//!
//! Every entity has a position, a velocity and a radius. Each frame, entities close to the
//! cursor are pushed away from it, then velocities are damped, positions advanced and clamped
//! into the viewport. Proximity queries go through a quadtree rebuilt from scratch every frame.
//!
//! # Basic usage
//! ```no_run
//! # use {
//! #   lily_pond::{
//! #     error::Result,
//! #     config::SimConfig,
//! #     controller::Controller,
//! #     entity::{EntityId, PointSet},
//! #     geometry::{Bounds, P2},
//! #     input::InputEvent,
//! #     render::RenderSurface
//! #   },
//! #   rand::SeedableRng,
//! #   euclid::Point2D
//! # };
//! # struct Log;
//! # impl RenderSurface<()> for Log {
//! #   fn draw_entity(&mut self, id: EntityId, position: P2<f64>, radius: f64, _: &()) {
//! #     println!("{id}: {position:?} r = {radius}");
//! #   }
//! # }
//! # fn main() -> Result<()> {
//! let mut rng = rand_pcg::Pcg64::seed_from_u64(0);
//! // 30 entities with random positions and radii in an 800x600 viewport
//! let set = PointSet::scatter(30, Bounds::new(800.0, 600.0), &mut rng)?;
//! let shapes = vec![Some(()); set.len()];
//! let mut controller = Controller::new(SimConfig::default(), set, shapes, 0)?;
//!
//! // the host forwards input as it arrives...
//! controller.push_input(InputEvent::CursorMoved(Point2D::new(400.0, 300.0)));
//! // ...and steps once per animation frame
//! let report = controller.step(1.0 / 60.0, &mut Log);
//! println!("{} entities repelled", report.repelled);
//! #   Ok(())
//! # }
//! ```
//!
//! The pipeline pieces are usable on their own: [`spatial_index::SpatialIndex`] for radius
//! queries, [`physics::repulsion`] and [`physics::integration`] for the force update, and
//! [`positions`] for saving and replaying a layout.
//!
//! Motion is frame-driven by default: each call to `step` is one impulse/damping/move cycle
//! no matter how much time elapsed. Use [`config::TimeScaling::Elapsed`] for frame-rate
//! independent motion.

#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod error;
pub mod geometry;
pub mod config;
pub mod entity;
pub mod quadtree;
pub mod spatial_index;
pub mod physics;
pub mod positions;
pub mod input;
pub mod trail;
pub mod render;
pub mod controller;
#[cfg(feature = "drawing")]
#[cfg_attr(docsrs, doc(cfg(feature = "drawing")))]
pub mod drawing;
