//! Structured events emitted by the observability layer.

use lighthouse_core::models::BatchReport;
use tracing::{info, warn};

pub fn degradation_triggered(component: &str, failure: &str, fallback: &str) {
    warn!(component, failure, fallback, "degradation triggered");
}

pub fn degradation_recovered(component: &str) {
    info!(component, "degradation recovered");
}

pub fn batch_reported(report: &BatchReport) {
    info!(
        target_count = report.target_count,
        produced = report.produced_count,
        failed = report.failed_count,
        throughput = report.throughput,
        avg_authenticity = report.avg_authenticity,
        elapsed_ms = report.elapsed_ms,
        "batch report"
    );
}
