//! Index over a sealed shard sequence.

use chrono::{DateTime, Utc};
use lighthouse_core::models::{Shard, ShardManifest, ShardSummary};

use crate::merkle;

/// Summarize `shards` (in sequence order). The collection root is a Merkle
/// root over the shards' own roots.
pub fn build_manifest(shards: &[Shard], created_at: DateTime<Utc>) -> ShardManifest {
    let roots: Vec<&str> = shards.iter().map(|s| s.merkle_root.as_str()).collect();
    let total_bytes = shards.iter().map(|s| s.byte_size).sum();
    let avg_compression_ratio = if shards.is_empty() {
        0.0
    } else {
        shards.iter().map(Shard::compression_ratio).sum::<f64>() / shards.len() as f64
    };

    ShardManifest {
        shard_count: shards.len(),
        unit_count: shards.iter().map(Shard::unit_count).sum(),
        total_bytes,
        largest_shard_bytes: shards.iter().map(|s| s.byte_size).max().unwrap_or(0),
        smallest_shard_bytes: shards.iter().map(|s| s.byte_size).min().unwrap_or(0),
        avg_compression_ratio,
        collection_root: merkle::merkle_root(&roots),
        shards: shards
            .iter()
            .map(|s| ShardSummary {
                id: s.id.clone(),
                sequence_index: s.sequence_index,
                unit_count: s.unit_count(),
                byte_size: s.byte_size,
                merkle_root: s.merkle_root.clone(),
            })
            .collect(),
        created_at,
    }
}
