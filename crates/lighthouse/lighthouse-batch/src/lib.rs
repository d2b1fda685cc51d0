//! # lighthouse-batch
//!
//! Fans `(entity, unit_index)` tasks out to a fixed pool of worker threads
//! and folds their outcomes into one [`GenerationBatch`] on a single
//! aggregator.
//!
//! [`GenerationBatch`]: lighthouse_core::models::GenerationBatch

pub mod aggregator;
pub mod cancel;
pub mod generator;
pub mod orchestrator;
pub mod retry;
pub mod task;

pub use cancel::CancelToken;
pub use generator::{IUnitGenerator, PipelineGenerator};
pub use orchestrator::BatchOrchestrator;
pub use retry::RetryPolicy;
pub use task::{TaskOutcome, UnitTask};
