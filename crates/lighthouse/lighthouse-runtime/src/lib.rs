//! # lighthouse-runtime
//!
//! Loads configuration, knowledge store and roster once, then runs the whole
//! pipeline: batch generation, shard packing, persistence to an
//! [`IShardSink`](lighthouse_core::traits::IShardSink) and metrics.

pub mod runtime;

pub use runtime::{LighthouseRuntime, RunOutput, RuntimeOptions};
