//! # lighthouse-shard
//!
//! Packs ordered content units into size-bounded, zstd-compressed shards,
//! each carrying a Merkle root over its units' content hashes.

pub mod codec;
pub mod manifest;
pub mod merkle;
pub mod packer;
pub mod sink;
pub mod verify;

pub use manifest::build_manifest;
pub use packer::{PackFailure, PackFailureKind, PackOutcome, ShardPacker};
pub use sink::MemoryShardSink;
pub use verify::{verify_shard, verify_shard_within};
