//! GO FISH! - terminal fishing game library
//!
//! This module exposes the game logic for testing and external use.

pub mod achievements;
pub mod api;
pub mod backend;
pub mod config;
pub mod core;
pub mod cutscene;
pub mod environment;
pub mod fish_ai;
pub mod fishing;
pub mod progression;
pub mod save;
pub mod tacklebox;
pub mod utils;

// UI lives in the binary; it is tightly coupled to the terminal
