//! BatchOrchestrator: bounded worker pool over a crossbeam task queue.
//!
//! Every `(entity, unit_index)` task is enqueued up front. `worker_count`
//! scoped threads dequeue until the queue is empty or the batch is
//! cancelled, sending outcomes over a result channel that the calling thread
//! folds into the batch. Tasks still queued after the workers stop are
//! counted as cancelled when the batch was cancelled, and as failed
//! otherwise.

use std::thread;
use std::time::{Duration, Instant};

use chrono::Utc;
use crossbeam_channel::{Receiver, Sender};
use lighthouse_core::config::BatchConfig;
use lighthouse_core::models::{Entity, GenerationBatch, TaskState};
use lighthouse_observability::batch_span;
use tracing::{debug, error, info, warn};

use crate::aggregator::BatchAggregator;
use crate::cancel::CancelToken;
use crate::generator::IUnitGenerator;
use crate::retry::RetryPolicy;
use crate::task::{self, TaskOutcome, UnitTask};

/// Capacity of the worker → aggregator channel.
const RESULT_CHANNEL_CAPACITY: usize = 1024;

pub struct BatchOrchestrator<'g> {
    generator: &'g dyn IUnitGenerator,
    policy: RetryPolicy,
    unit_timeout: Duration,
}

impl<'g> BatchOrchestrator<'g> {
    pub fn new(generator: &'g dyn IUnitGenerator, config: &BatchConfig) -> Self {
        Self {
            generator,
            policy: RetryPolicy::from_config(config),
            unit_timeout: config.unit_timeout(),
        }
    }

    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_unit_timeout(mut self, timeout: Duration) -> Self {
        self.unit_timeout = timeout;
        self
    }

    /// Generate `per_entity_quota` units for every entity.
    ///
    /// Always completes: unit failures are retried and then counted, never
    /// propagated.
    pub fn run_batch(
        &self,
        entities: &[Entity],
        per_entity_quota: usize,
        worker_count: usize,
        cancel: &CancelToken,
    ) -> GenerationBatch {
        let batch_id = uuid::Uuid::new_v4().to_string();
        let target_count = entities.len() * per_entity_quota;
        let span = batch_span!(batch_id, target_count);
        let _enter = span.enter();

        let started_at = Utc::now();
        let clock = Instant::now();

        let (task_tx, task_rx) = crossbeam_channel::unbounded::<UnitTask>();
        for entity_index in 0..entities.len() {
            for unit_index in 0..per_entity_quota {
                let queued = task_tx.send(UnitTask {
                    ordinal: entity_index * per_entity_quota + unit_index,
                    entity_index,
                    unit_index: unit_index as u32,
                });
                if queued.is_err() {
                    break;
                }
            }
        }
        drop(task_tx);

        let workers = worker_count.max(1).min(target_count.max(1));
        info!(
            entities = entities.len(),
            per_entity_quota, workers, "batch started"
        );

        let mut aggregator = BatchAggregator::new(batch_id.clone(), entities, target_count);
        let (result_tx, result_rx) = crossbeam_channel::bounded(RESULT_CHANNEL_CAPACITY);

        thread::scope(|scope| {
            let handles: Vec<_> = (0..workers)
                .map(|worker| {
                    let tasks = task_rx.clone();
                    let results = result_tx.clone();
                    let parent = span.clone();
                    scope.spawn(move || {
                        let _enter = parent.enter();
                        self.worker_loop(worker, entities, &tasks, &results, cancel);
                    })
                })
                .collect();
            drop(result_tx);

            for outcome in result_rx.iter() {
                aggregator.record(outcome);
            }

            for handle in handles {
                if handle.join().is_err() {
                    error!("batch worker panicked");
                }
            }
        });

        let cancelled = cancel.is_cancelled();
        let mut never_dequeued = 0usize;
        for task in task_rx.try_iter() {
            let outcome = if cancelled {
                TaskOutcome::Cancelled { task }
            } else {
                TaskOutcome::Failed {
                    task,
                    state: TaskState::Failed,
                    attempts: 0,
                    error: "workers stopped before the task was dequeued".to_string(),
                }
            };
            aggregator.record(outcome);
            never_dequeued += 1;
        }
        if never_dequeued > 0 && cancelled {
            info!(cancelled = never_dequeued, "batch cancelled before the queue drained");
        } else if never_dequeued > 0 {
            warn!(failed = never_dequeued, "workers stopped before the queue drained");
        }

        let batch = aggregator.finish(started_at, clock.elapsed());
        info!(
            produced = batch.produced_count(),
            failed = batch.failed_count,
            timed_out = batch.timed_out_count,
            cancelled = batch.cancelled_count,
            degraded = batch.degraded_count,
            retries = batch.retry_count,
            elapsed_ms = batch.elapsed_ms,
            "batch complete"
        );
        batch
    }

    fn worker_loop(
        &self,
        worker: usize,
        entities: &[Entity],
        tasks: &Receiver<UnitTask>,
        results: &Sender<TaskOutcome>,
        cancel: &CancelToken,
    ) {
        let mut handled = 0usize;
        loop {
            if cancel.is_cancelled() {
                debug!(worker, "cancellation observed");
                break;
            }
            let Ok(task) = tasks.recv() else {
                break;
            };
            let Some(entity) = entities.get(task.entity_index) else {
                continue;
            };
            let outcome = task::execute(task, entity, self.generator, &self.policy, self.unit_timeout);
            handled += 1;
            if results.send(outcome).is_err() {
                break;
            }
        }
        debug!(worker, handled, "worker finished");
    }
}
