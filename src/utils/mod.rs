//! # Utilities Module
//!
//! Numeric helpers for blending and graph helpers for pathway networks.

pub mod graph;
pub mod math;

pub use graph::*;
pub use math::*;

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Creates a seeded random number generator for reproducible layouts.
pub fn create_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}
