//! In-process implementation of the backend's REST semantics.
//!
//! Used for offline play and as the reference the HTTP client is tested
//! against.

#![allow(unused_imports)]

pub mod catalog;
pub mod store;
pub mod weather;

pub use catalog::*;
pub use store::*;
pub use weather::*;
