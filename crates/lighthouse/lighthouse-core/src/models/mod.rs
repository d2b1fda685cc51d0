mod batch;
mod content_unit;
mod entity;
mod partition;
mod shard;
mod weight_vector;

pub use batch::{
    BatchMetrics, BatchReport, EntitySummary, GenerationBatch, TaskFailure, TaskState,
};
pub use content_unit::{ContentUnit, NarrativeSlot, ScoreBreakdown, Stage};
pub use entity::{DifficultyTier, Entity, Group, PersonaBlob};
pub use partition::{Citation, Fragment, FragmentCategory, FragmentRef, Partition, PartitionId};
pub use shard::{Shard, ShardManifest, ShardSummary};
pub use weight_vector::WeightVector;
