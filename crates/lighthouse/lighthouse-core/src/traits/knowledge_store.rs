use crate::errors::LighthouseResult;
use crate::models::{Fragment, Partition};

/// Read-only access to partitioned knowledge.
pub trait IKnowledgeStore: Send + Sync {
    /// Look up a partition by id.
    fn get_partition(&self, partition_id: &str) -> LighthouseResult<&Partition>;

    /// Look up a fragment within a partition.
    fn get_fragment(&self, partition_id: &str, fragment_id: &str) -> LighthouseResult<&Fragment>;

    /// Id of the single Primary partition.
    fn primary_id(&self) -> &str;

    /// All partition ids in load order.
    fn partition_ids(&self) -> Vec<&str>;
}
