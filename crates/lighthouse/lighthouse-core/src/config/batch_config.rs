use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::defaults;

/// Batch orchestration configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Worker threads. 0 = one per available core.
    pub worker_count: usize,
    /// Units generated per entity.
    pub per_entity_quota: usize,
    /// Seed shared by every unit of the batch.
    pub batch_seed: u64,
    /// Retries after the first failed attempt of a unit.
    pub max_retries: u32,
    pub backoff_base_ms: u64,
    pub backoff_max_ms: u64,
    /// Soft timeout per unit attempt.
    pub unit_timeout_ms: u64,
    /// Fixed `created_at` for every unit. When unset the batch start time is used.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clock_epoch: Option<DateTime<Utc>>,
}

impl BatchConfig {
    /// Resolve `worker_count = 0` to the number of available cores.
    pub fn effective_worker_count(&self) -> usize {
        if self.worker_count > 0 {
            return self.worker_count;
        }
        std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(4)
    }

    pub fn unit_timeout(&self) -> Duration {
        Duration::from_millis(self.unit_timeout_ms)
    }
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            worker_count: defaults::DEFAULT_WORKER_COUNT,
            per_entity_quota: defaults::DEFAULT_PER_ENTITY_QUOTA,
            batch_seed: defaults::DEFAULT_BATCH_SEED,
            max_retries: defaults::DEFAULT_MAX_RETRIES,
            backoff_base_ms: defaults::DEFAULT_BACKOFF_BASE_MS,
            backoff_max_ms: defaults::DEFAULT_BACKOFF_MAX_MS,
            unit_timeout_ms: defaults::DEFAULT_UNIT_TIMEOUT_MS,
            clock_epoch: None,
        }
    }
}
