/// Retrieval sampling errors. Raised per unit; the batch retries and
/// eventually marks the unit failed.
#[derive(Debug, thiserror::Error)]
pub enum SamplingError {
    #[error("sample size must be at least 1")]
    ZeroSampleSize,

    #[error("partition {partition_id} carries weight but holds no fragments")]
    EmptyPartition { partition_id: String },

    #[error("no partition with positive weight for entity {entity_id}")]
    NoWeightedPartitions { entity_id: String },
}
