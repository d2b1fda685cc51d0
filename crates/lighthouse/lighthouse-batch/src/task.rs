//! One `(entity, unit_index)` task: attempts, soft timeout, backoff.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::thread;
use std::time::{Duration, Instant};

use lighthouse_core::errors::{GenerationError, LighthouseError};
use lighthouse_core::models::{ContentUnit, Entity, TaskState};
use lighthouse_observability::unit_span;
use tracing::debug;

use crate::generator::IUnitGenerator;
use crate::retry::RetryPolicy;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnitTask {
    /// `entity_index * quota + unit_index`; fixes the order of produced units.
    pub ordinal: usize,
    pub entity_index: usize,
    pub unit_index: u32,
}

/// Terminal result of a task, sent from a worker to the aggregator.
#[derive(Debug)]
pub enum TaskOutcome {
    Completed {
        task: UnitTask,
        unit: Box<ContentUnit>,
        attempts: u32,
    },
    /// `state` is `Failed` or `TimedOut`.
    Failed {
        task: UnitTask,
        state: TaskState,
        attempts: u32,
        error: String,
    },
    Cancelled {
        task: UnitTask,
    },
}

impl TaskOutcome {
    pub fn task(&self) -> UnitTask {
        match self {
            Self::Completed { task, .. } | Self::Failed { task, .. } | Self::Cancelled { task } => {
                *task
            }
        }
    }

    pub fn state(&self) -> TaskState {
        match self {
            Self::Completed { .. } => TaskState::Completed,
            Self::Failed { state, .. } => *state,
            Self::Cancelled { .. } => TaskState::Cancelled,
        }
    }

    pub fn attempts(&self) -> u32 {
        match self {
            Self::Completed { attempts, .. } | Self::Failed { attempts, .. } => *attempts,
            Self::Cancelled { .. } => 0,
        }
    }
}

/// Run a dequeued task to a terminal state.
///
/// An attempt whose wall time exceeds `timeout` is discarded as timed out
/// even if it produced a unit. Errors the generator deems retryable back off
/// and try again up to the policy's limit. A panicking generator fails the
/// task without another attempt; the batch is never aborted from here.
pub fn execute(
    task: UnitTask,
    entity: &Entity,
    generator: &dyn IUnitGenerator,
    policy: &RetryPolicy,
    timeout: Duration,
) -> TaskOutcome {
    let span = unit_span!(entity.id, task.unit_index);
    let _enter = span.enter();
    debug!(state = ?TaskState::Running, ordinal = task.ordinal, "task dequeued");

    let max_attempts = policy.max_attempts();
    let mut last_error: Option<LighthouseError> = None;
    let mut attempts = 0;

    while attempts < max_attempts {
        let attempt = attempts;
        attempts += 1;

        let started = Instant::now();
        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            generator.generate(entity, task.unit_index, attempt)
        }))
        .unwrap_or_else(|payload| {
            Err(GenerationError::Panicked {
                reason: panic_reason(payload.as_ref()),
            }
            .into())
        });
        let elapsed = started.elapsed();

        let error = match result {
            Ok(_) if elapsed > timeout => GenerationError::TimedOut {
                elapsed_ms: elapsed.as_millis() as u64,
                limit_ms: timeout.as_millis() as u64,
            }
            .into(),
            Ok(unit) => {
                debug!(state = ?TaskState::Completed, attempts, "task completed");
                return TaskOutcome::Completed {
                    task,
                    unit: Box::new(unit),
                    attempts,
                };
            }
            Err(e) => e,
        };

        debug!(attempt, error = %error, "unit attempt failed");
        let retryable = generator.should_retry(&error);
        last_error = Some(error);
        if !retryable || attempts >= max_attempts {
            break;
        }
        thread::sleep(policy.backoff(attempt));
    }

    let state = match last_error {
        Some(LighthouseError::GenerationError(GenerationError::TimedOut { .. })) => {
            TaskState::TimedOut
        }
        _ => TaskState::Failed,
    };
    let error = last_error
        .map(|e| e.to_string())
        .unwrap_or_else(|| "no attempt was made".to_string());
    debug!(state = ?state, attempts, error = %error, "task gave up");
    TaskOutcome::Failed {
        task,
        state,
        attempts,
        error,
    }
}

fn panic_reason(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
