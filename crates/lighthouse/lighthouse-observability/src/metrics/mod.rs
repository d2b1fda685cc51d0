//! Central metrics registry.
//!
//! [`MetricsCollector`] owns the batch and shard collectors and provides a
//! unified interface for recording and querying metrics.

pub mod batch_metrics;
pub mod shard_metrics;

pub use batch_metrics::BatchMetricsCollector;
pub use shard_metrics::ShardMetricsCollector;

#[derive(Debug, Clone, Default, serde::Serialize)]
pub struct MetricsCollector {
    pub batch: BatchMetricsCollector,
    pub shard: ShardMetricsCollector,
}

impl MetricsCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset all metrics (useful for testing or periodic rotation).
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
