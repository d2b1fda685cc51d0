//! Shard packing counters.

use lighthouse_core::models::Shard;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShardMetricsCollector {
    pub shards_sealed: u64,
    pub units_packed: u64,
    pub pack_failures: u64,
    pub compressed_bytes: u64,
    pub raw_bytes: u64,
    pub largest_shard_bytes: u64,
}

impl ShardMetricsCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, shards: &[Shard], dropped: usize) {
        for shard in shards {
            self.shards_sealed += 1;
            self.units_packed += shard.unit_count() as u64;
            self.compressed_bytes += shard.byte_size as u64;
            self.raw_bytes += shard.raw_size as u64;
            self.largest_shard_bytes = self.largest_shard_bytes.max(shard.byte_size as u64);
        }
        self.pack_failures += dropped as u64;
    }

    /// Raw bytes per compressed byte.
    pub fn compression_ratio(&self) -> f64 {
        if self.compressed_bytes == 0 {
            return 0.0;
        }
        self.raw_bytes as f64 / self.compressed_bytes as f64
    }
}
