//! Tacklebox: every fish the player has landed, plus lifetime catch statistics.

#![allow(unused_imports)]

pub mod logic;
pub mod types;

pub use logic::*;
pub use types::*;
