//! Environment: weather, day/night, water surface and ambient scenery.

#![allow(unused_imports)]

pub mod day_night;
pub mod events;
pub mod water;
pub mod weather;

pub use day_night::*;
pub use events::*;
pub use water::*;
pub use weather::*;
