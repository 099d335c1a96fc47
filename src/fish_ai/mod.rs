//! Fish behaviour: individual brains, schools and the bite decision.

#![allow(unused_imports)]

pub mod bite;
pub mod brain;
pub mod school;
pub mod types;

pub use bite::*;
pub use brain::*;
pub use school::*;
pub use types::*;
