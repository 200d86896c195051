//! Utility modules for Spectrice processing

pub mod math;

pub use math::*;
