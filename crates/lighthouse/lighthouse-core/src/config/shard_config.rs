use serde::{Deserialize, Serialize};

use super::defaults;

/// Shard packing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ShardConfig {
    /// Maximum compressed payload size per shard, in bytes.
    pub byte_ceiling: usize,
    /// zstd compression level (1-22).
    pub compression_level: i32,
    /// Packing attempts per unit before it is dropped.
    pub max_pack_attempts: u32,
}

impl Default for ShardConfig {
    fn default() -> Self {
        Self {
            byte_ceiling: defaults::DEFAULT_SHARD_BYTE_CEILING,
            compression_level: defaults::DEFAULT_COMPRESSION_LEVEL,
            max_pack_attempts: defaults::DEFAULT_MAX_PACK_ATTEMPTS,
        }
    }
}
