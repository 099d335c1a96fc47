//! Utility modules: build info, ~/.gofish paths, device id, file logging.

#![allow(unused_imports)]

pub mod build_info;
pub mod device;
pub mod logging;
pub mod persistence;

pub use build_info::*;
pub use device::*;
