//! Profile persistence and settings.

#![allow(unused_imports)]

pub mod manager;
pub mod settings;

pub use manager::*;
pub use settings::*;
