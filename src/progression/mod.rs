//! Angler progression: experience, skills, prestige and rotating challenges.

#![allow(unused_imports)]

pub mod challenges;
pub mod experience;

pub use challenges::*;
pub use experience::*;
