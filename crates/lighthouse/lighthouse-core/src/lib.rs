//! # lighthouse-core
//!
//! Foundation crate for the Lighthouse synthesis engine.
//! Defines all types, traits, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::LighthouseConfig;
pub use errors::{LighthouseError, LighthouseResult};
pub use models::{
    ContentUnit, DifficultyTier, Entity, Fragment, GenerationBatch, Partition, PartitionId, Shard,
    WeightVector,
};
