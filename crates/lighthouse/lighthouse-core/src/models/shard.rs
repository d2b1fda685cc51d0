use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A sealed, size-bounded, compressed group of content units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shard {
    pub id: String,
    pub sequence_index: u64,
    pub compressed_payload: Vec<u8>,
    /// Length of `compressed_payload`.
    pub byte_size: usize,
    /// Length of the uncompressed NDJSON payload.
    pub raw_size: usize,
    /// Merkle root over the units' content hashes (hex).
    pub merkle_root: String,
    /// blake3 of `compressed_payload` (hex).
    pub payload_hash: String,
    pub unit_ids: Vec<String>,
}

impl Shard {
    pub fn unit_count(&self) -> usize {
        self.unit_ids.len()
    }

    pub fn compression_ratio(&self) -> f64 {
        if self.byte_size == 0 {
            0.0
        } else {
            self.raw_size as f64 / self.byte_size as f64
        }
    }
}

/// Manifest line for one shard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShardSummary {
    pub id: String,
    pub sequence_index: u64,
    pub unit_count: usize,
    pub byte_size: usize,
    pub merkle_root: String,
}

/// Index over a whole shard sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShardManifest {
    pub shard_count: usize,
    pub unit_count: usize,
    pub total_bytes: usize,
    pub largest_shard_bytes: usize,
    pub smallest_shard_bytes: usize,
    pub avg_compression_ratio: f64,
    /// Merkle root over the shard roots, in sequence order.
    pub collection_root: String,
    pub shards: Vec<ShardSummary>,
    pub created_at: DateTime<Utc>,
}
