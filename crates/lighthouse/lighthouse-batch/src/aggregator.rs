//! Single-writer fold of task outcomes into a GenerationBatch.

use std::time::Duration;

use chrono::{DateTime, Utc};
use lighthouse_core::constants::{HIGH_AUTHENTICITY_THRESHOLD, MAX_FAILURE_LOG};
use lighthouse_core::models::{
    BatchMetrics, ContentUnit, Entity, EntitySummary, GenerationBatch, TaskFailure, TaskState,
};
use tracing::warn;

use crate::task::TaskOutcome;

#[derive(Debug, Default, Clone)]
struct EntityTally {
    produced: usize,
    failed: usize,
    score_sum: f64,
}

/// Owned by exactly one thread; workers reach it only through the result channel.
pub struct BatchAggregator {
    batch_id: String,
    target_count: usize,
    entity_ids: Vec<String>,
    tallies: Vec<EntityTally>,
    produced: Vec<(usize, ContentUnit)>,
    failed_count: usize,
    timed_out_count: usize,
    cancelled_count: usize,
    degraded_count: usize,
    retry_count: usize,
    high_authenticity_count: usize,
    score_sum: f64,
    failures: Vec<TaskFailure>,
}

impl BatchAggregator {
    pub fn new(batch_id: impl Into<String>, entities: &[Entity], target_count: usize) -> Self {
        Self {
            batch_id: batch_id.into(),
            target_count,
            entity_ids: entities.iter().map(|e| e.id.clone()).collect(),
            tallies: vec![EntityTally::default(); entities.len()],
            produced: Vec::with_capacity(target_count),
            failed_count: 0,
            timed_out_count: 0,
            cancelled_count: 0,
            degraded_count: 0,
            retry_count: 0,
            high_authenticity_count: 0,
            score_sum: 0.0,
            failures: Vec::new(),
        }
    }

    pub fn record(&mut self, outcome: TaskOutcome) {
        self.retry_count += outcome.attempts().saturating_sub(1) as usize;
        match outcome {
            TaskOutcome::Completed { task, unit, .. } => {
                let score = unit.authenticity_score;
                if let Some(tally) = self.tallies.get_mut(task.entity_index) {
                    tally.produced += 1;
                    tally.score_sum += score;
                }
                self.score_sum += score;
                if score >= HIGH_AUTHENTICITY_THRESHOLD {
                    self.high_authenticity_count += 1;
                }
                if unit.degraded {
                    self.degraded_count += 1;
                }
                self.produced.push((task.ordinal, *unit));
            }
            TaskOutcome::Failed {
                task,
                state,
                attempts,
                error,
            } => {
                self.failed_count += 1;
                if state == TaskState::TimedOut {
                    self.timed_out_count += 1;
                }
                if let Some(tally) = self.tallies.get_mut(task.entity_index) {
                    tally.failed += 1;
                }
                if self.failures.len() < MAX_FAILURE_LOG {
                    self.failures.push(TaskFailure {
                        entity_id: self
                            .entity_ids
                            .get(task.entity_index)
                            .cloned()
                            .unwrap_or_default(),
                        unit_index: task.unit_index,
                        state,
                        attempts,
                        error,
                    });
                }
            }
            TaskOutcome::Cancelled { .. } => {
                self.cancelled_count += 1;
            }
        }
    }

    /// Seal the batch. Produced units are ordered by task ordinal.
    pub fn finish(mut self, started_at: DateTime<Utc>, elapsed: Duration) -> GenerationBatch {
        let accounted = self.produced.len() + self.failed_count + self.cancelled_count;
        if accounted < self.target_count {
            let lost = self.target_count - accounted;
            warn!(
                batch_id = %self.batch_id,
                lost,
                "tasks ended without an outcome, counting them as failed"
            );
            self.failed_count += lost;
        }

        self.produced.sort_by_key(|(ordinal, _)| *ordinal);
        let produced_units: Vec<ContentUnit> =
            self.produced.into_iter().map(|(_, unit)| unit).collect();
        let produced = produced_units.len();

        let secs = elapsed.as_secs_f64();
        let metrics = BatchMetrics {
            throughput: if secs > 0.0 { produced as f64 / secs } else { 0.0 },
            avg_authenticity: if produced > 0 {
                self.score_sum / produced as f64
            } else {
                0.0
            },
            success_rate: if self.target_count > 0 {
                produced as f64 / self.target_count as f64
            } else {
                0.0
            },
            high_authenticity_count: self.high_authenticity_count,
        };

        let entity_summaries = self
            .entity_ids
            .into_iter()
            .zip(self.tallies)
            .map(|(entity_id, t)| EntitySummary {
                entity_id,
                produced: t.produced,
                failed: t.failed,
                avg_authenticity: if t.produced > 0 {
                    t.score_sum / t.produced as f64
                } else {
                    0.0
                },
            })
            .collect();

        let completed_at = started_at
            + chrono::Duration::from_std(elapsed).unwrap_or_else(|_| chrono::Duration::zero());

        GenerationBatch {
            id: self.batch_id,
            target_count: self.target_count,
            attempted_count: produced + self.failed_count,
            produced_units,
            failed_count: self.failed_count,
            timed_out_count: self.timed_out_count,
            cancelled_count: self.cancelled_count,
            degraded_count: self.degraded_count,
            retry_count: self.retry_count,
            failures: self.failures,
            entity_summaries,
            started_at,
            completed_at,
            elapsed_ms: elapsed.as_millis() as u64,
            metrics,
        }
    }
}
