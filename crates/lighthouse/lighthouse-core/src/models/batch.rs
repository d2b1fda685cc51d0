use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::content_unit::ContentUnit;

/// Lifecycle of one `(entity, unit_index)` task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskState {
    Queued,
    Running,
    Completed,
    Failed,
    TimedOut,
    Cancelled,
}

impl TaskState {
    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::Queued | Self::Running)
    }
}

/// Record of a task that ended without a unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskFailure {
    pub entity_id: String,
    pub unit_index: u32,
    pub state: TaskState,
    pub attempts: u32,
    pub error: String,
}

/// Per-entity results within a batch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntitySummary {
    pub entity_id: String,
    pub produced: usize,
    pub failed: usize,
    pub avg_authenticity: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchMetrics {
    /// Units produced per second of wall time.
    pub throughput: f64,
    pub avg_authenticity: f64,
    /// produced / target.
    pub success_rate: f64,
    pub high_authenticity_count: usize,
}

/// Result of one batch run. Built only by the orchestrator's aggregator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationBatch {
    pub id: String,
    pub target_count: usize,
    pub attempted_count: usize,
    pub produced_units: Vec<ContentUnit>,
    /// Includes timed-out tasks.
    pub failed_count: usize,
    pub timed_out_count: usize,
    pub cancelled_count: usize,
    pub degraded_count: usize,
    pub retry_count: usize,
    pub failures: Vec<TaskFailure>,
    pub entity_summaries: Vec<EntitySummary>,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
    pub elapsed_ms: u64,
    pub metrics: BatchMetrics,
}

impl GenerationBatch {
    pub fn produced_count(&self) -> usize {
        self.produced_units.len()
    }

    pub fn report(&self) -> BatchReport {
        BatchReport {
            target_count: self.target_count,
            produced_count: self.produced_count(),
            failed_count: self.failed_count,
            throughput: self.metrics.throughput,
            avg_authenticity: self.metrics.avg_authenticity,
            elapsed_ms: self.elapsed_ms,
        }
    }
}

/// Summary handed to the caller and the observability layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchReport {
    pub target_count: usize,
    pub produced_count: usize,
    pub failed_count: usize,
    pub throughput: f64,
    pub avg_authenticity: f64,
    pub elapsed_ms: u64,
}
