//! Per-frame force update: cursor repulsion followed by damped integration.
//!
//! Both steps only touch the entities they are given. The spatial index passed to
//! [`repulsion::apply`] must have been built from the current positions; [`integration::advance`]
//! invalidates it.

pub mod repulsion;
pub mod integration;

pub use repulsion::force_magnitude;
