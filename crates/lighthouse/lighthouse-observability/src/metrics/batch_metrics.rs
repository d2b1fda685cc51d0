//! Aggregates over batch reports: throughput, authenticity, success rate.

use lighthouse_core::models::BatchReport;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchMetricsCollector {
    samples: Vec<BatchReport>,
    pub total_runs: u64,
    pub units_targeted: u64,
    pub units_produced: u64,
    pub units_failed: u64,
    pub degraded_units: u64,
    pub retries: u64,
}

impl BatchMetricsCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, report: &BatchReport, degraded: usize, retries: usize) {
        self.total_runs += 1;
        self.units_targeted += report.target_count as u64;
        self.units_produced += report.produced_count as u64;
        self.units_failed += report.failed_count as u64;
        self.degraded_units += degraded as u64;
        self.retries += retries as u64;
        self.samples.push(report.clone());
    }

    pub fn avg_throughput(&self) -> f64 {
        Self::avg(&self.samples, |r| r.throughput)
    }

    pub fn avg_authenticity(&self) -> f64 {
        Self::avg(&self.samples, |r| r.avg_authenticity)
    }

    /// Produced over targeted across all runs.
    pub fn success_rate(&self) -> f64 {
        if self.units_targeted == 0 {
            return 0.0;
        }
        self.units_produced as f64 / self.units_targeted as f64
    }

    pub fn last(&self) -> Option<&BatchReport> {
        self.samples.last()
    }

    fn avg(samples: &[BatchReport], f: fn(&BatchReport) -> f64) -> f64 {
        if samples.is_empty() {
            return 0.0;
        }
        let sum: f64 = samples.iter().map(f).sum();
        sum / samples.len() as f64
    }
}
