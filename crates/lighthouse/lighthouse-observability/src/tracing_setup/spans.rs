//! Span definitions per operation: batch, unit task, shard.

/// Create a batch span.
#[macro_export]
macro_rules! batch_span {
    ($batch_id:expr, $target:expr) => {
        tracing::info_span!("lighthouse.batch", batch_id = %$batch_id, target = $target)
    };
}

/// Create a unit task span.
#[macro_export]
macro_rules! unit_span {
    ($entity_id:expr, $unit_index:expr) => {
        tracing::debug_span!("lighthouse.unit", entity = %$entity_id, unit_index = $unit_index)
    };
}

/// Create a shard span.
#[macro_export]
macro_rules! shard_span {
    ($sequence_index:expr) => {
        tracing::info_span!("lighthouse.shard", sequence_index = $sequence_index)
    };
}

/// Span names as constants for programmatic use.
pub mod names {
    pub const BATCH: &str = "lighthouse.batch";
    pub const UNIT: &str = "lighthouse.unit";
    pub const SHARD: &str = "lighthouse.shard";
}
