//! # lighthouse-observability
//!
//! Tracing subscriber setup and span macros, degradation tracking, and
//! metrics over batches and shards.

pub mod degradation;
pub mod engine;
pub mod metrics;
pub mod tracing_setup;

pub use degradation::{DegradationEpisode, DegradationEvent, DegradationTracker};
pub use engine::ObservabilityEngine;
pub use metrics::MetricsCollector;
pub use tracing_setup::init_tracing;
