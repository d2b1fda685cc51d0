/// Knowledge store errors.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("partition not found: {partition_id}")]
    PartitionNotFound { partition_id: String },

    #[error("fragment not found: {partition_id}/{fragment_id}")]
    FragmentNotFound {
        partition_id: String,
        fragment_id: String,
    },

    #[error("duplicate partition: {partition_id}")]
    DuplicatePartition { partition_id: String },

    #[error("duplicate fragment {fragment_id} in partition {partition_id}")]
    DuplicateFragment {
        partition_id: String,
        fragment_id: String,
    },

    #[error("citation reliability {reliability} out of range on {partition_id}/{fragment_id}")]
    InvalidCitation {
        partition_id: String,
        fragment_id: String,
        reliability: f64,
    },

    #[error("knowledge load failed: {reason}")]
    LoadFailed { reason: String },
}

impl StoreError {
    /// Errors that can only arise while loading the store.
    pub fn is_load_error(&self) -> bool {
        matches!(
            self,
            Self::DuplicatePartition { .. }
                | Self::DuplicateFragment { .. }
                | Self::InvalidCitation { .. }
                | Self::LoadFailed { .. }
        )
    }
}
