//! # Utilities Module
//!
//! Line-of-sight mathematics and weighted grid pathfinding.

pub mod math;
pub mod pathfinding;

pub use math::*;
pub use pathfinding::*;
