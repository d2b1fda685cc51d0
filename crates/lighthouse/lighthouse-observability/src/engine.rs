//! [`ObservabilityEngine`]: owns the metrics and degradation subsystems.

use lighthouse_core::errors::LighthouseResult;
use lighthouse_core::models::{BatchReport, Shard};

use crate::degradation::{DegradationEvent, DegradationTracker};
use crate::metrics::MetricsCollector;
use crate::tracing_setup::events;

#[derive(Debug, Default)]
pub struct ObservabilityEngine {
    pub metrics: MetricsCollector,
    pub degradation: DegradationTracker,
}

impl ObservabilityEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Log a batch report and fold it into the batch metrics.
    pub fn record_batch(&mut self, report: &BatchReport, degraded: usize, retries: usize) {
        events::batch_reported(report);
        self.metrics.batch.record(report, degraded, retries);
    }

    pub fn record_shards(&mut self, shards: &[Shard], dropped: usize) {
        self.metrics.shard.record(shards, dropped);
    }

    pub fn record_degradation(&mut self, event: DegradationEvent) {
        self.degradation.record(event);
    }

    pub fn mark_recovered(&mut self, component: &str) -> bool {
        self.degradation.mark_recovered(component)
    }

    /// Reset all metrics (for testing or periodic rotation).
    pub fn reset_metrics(&mut self) {
        self.metrics.reset();
    }

    /// Serialize current metrics and degradation state to JSON.
    pub fn metrics_snapshot(&self) -> LighthouseResult<serde_json::Value> {
        let metrics_json = serde_json::to_value(&self.metrics)?;
        Ok(serde_json::json!({
            "metrics": metrics_json,
            "batch_success_rate": self.metrics.batch.success_rate(),
            "compression_ratio": self.metrics.shard.compression_ratio(),
            "degraded_components": self
                .degradation
                .active()
                .map(|e| e.component.as_str())
                .collect::<Vec<_>>(),
            "degradation_episodes": self.degradation.episodes().len(),
        }))
    }
}
