//! # Hamlet Settlement Layouts
//!
//! Procedural spatial layouts for settlements in a generated game world.
//!
//! ## Architecture Overview
//!
//! Hamlet turns a settlement descriptor into a discrete square grid partitioned
//! into building clusters, plus a pathway network that links those clusters.
//! The core revolves around a few concepts:
//!
//! - **Settlement**: a settlement type, its size, and the generation parameters
//!   resolved for that type from a [`SettlementTypeRegistry`]
//! - **Layout Generators**: strategies implementing [`LayoutGenerator`] that turn a
//!   settlement into a [`LayoutPatternResult`]
//! - **Pattern Blender**: weighted interpolation of several layouts into one
//!
//! Every operation is a synchronous, in-memory transform over value data. The
//! only randomness is the seeded RNG handed to `generate`; blending is fully
//! deterministic.

pub mod blend;
pub mod layout;
pub mod settlement;
pub mod utils;

pub use blend::*;
pub use layout::*;
pub use settlement::*;

/// Core error type for settlement layout generation.
#[derive(thiserror::Error, Debug)]
pub enum LayoutError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Settlement type has no usable generation parameters
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Caller supplied invalid input
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Generation could not satisfy its invariants
    #[error("Generation failed: {0}")]
    GenerationFailed(String),
}

/// Result type used throughout the Hamlet codebase.
pub type LayoutResult<T> = Result<T, LayoutError>;

/// Version information for the crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library-wide configuration constants.
pub mod config {
    /// Seed used when the caller does not pick one
    pub const DEFAULT_SEED: u64 = 12345;

    /// Default number of random placement attempts per cluster seed
    pub const DEFAULT_PLACEMENT_ATTEMPTS: u32 = 100;

    /// Wire name of the main pathway category
    pub const MAIN_PATHWAY: &str = "main";

    /// Wire name of the organic connector category
    pub const ORGANIC_PATHWAY: &str = "organic";
}
