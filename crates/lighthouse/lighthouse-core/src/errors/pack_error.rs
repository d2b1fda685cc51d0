/// Shard packing and verification errors.
#[derive(Debug, thiserror::Error)]
pub enum PackError {
    #[error("compression failed: {reason}")]
    Compression { reason: String },

    #[error("decompression failed: {reason}")]
    Decompression { reason: String },

    #[error("unit {unit_id} compresses to {compressed_size} bytes, over the {ceiling} byte ceiling")]
    Oversized {
        unit_id: String,
        compressed_size: usize,
        ceiling: usize,
    },

    #[error("shard {shard_id} is {size} bytes, over the {ceiling} byte ceiling")]
    SizeExceeded {
        shard_id: String,
        size: usize,
        ceiling: usize,
    },

    #[error("shard {shard_id} {what} size is {actual} bytes, recorded {recorded}")]
    SizeMismatch {
        shard_id: String,
        what: &'static str,
        recorded: usize,
        actual: usize,
    },

    #[error("merkle root mismatch on shard {shard_id}: expected {expected}, got {actual}")]
    MerkleMismatch {
        shard_id: String,
        expected: String,
        actual: String,
    },

    #[error("content hash mismatch on unit {unit_id}")]
    ContentHashMismatch { unit_id: String },

    #[error("payload hash mismatch on shard {shard_id}")]
    PayloadHashMismatch { shard_id: String },

    #[error("shard {shard_id} unit list does not match its payload")]
    UnitListMismatch { shard_id: String },

    #[error("shard persistence failed: {reason}")]
    Persist { reason: String },
}
