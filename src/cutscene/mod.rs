//! Catch celebration: timed phases and a burst of particles.

#![allow(unused_imports)]

pub mod catch;
pub mod particles;

pub use catch::*;
pub use particles::*;
