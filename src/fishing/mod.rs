//! Fishing system: static data, types and the rules for bites, reeling and scoring.

#![allow(unused_imports)]

pub mod data;
pub mod logic;
pub mod types;

pub use data::*;
pub use logic::*;
pub use types::*;
