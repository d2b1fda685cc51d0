use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::partition::PartitionId;
use crate::constants::DIFFICULTY_TIER_COUNT;

/// Four ordered difficulty tiers, shared by fragments and entity groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DifficultyTier {
    Beginner,
    Intermediate,
    Advanced,
    Master,
}

impl DifficultyTier {
    pub const ALL: [DifficultyTier; DIFFICULTY_TIER_COUNT] = [
        DifficultyTier::Beginner,
        DifficultyTier::Intermediate,
        DifficultyTier::Advanced,
        DifficultyTier::Master,
    ];

    /// 0 for Beginner through 3 for Master.
    pub fn ordinal(self) -> usize {
        self as usize
    }

    /// Map a group rank (1 = most exalted) to a tier in four equal-width
    /// bands over `group_count`. Rank 1 is Master, the last ranks Beginner.
    pub fn from_group_rank(rank: u32, group_count: usize) -> Self {
        let group_count = group_count.max(1);
        let position = (rank.max(1) as usize - 1).min(group_count - 1);
        let band = (position * DIFFICULTY_TIER_COUNT / group_count).min(DIFFICULTY_TIER_COUNT - 1);
        Self::ALL[DIFFICULTY_TIER_COUNT - 1 - band]
    }
}

/// Opaque persona payload. The engine only forwards it into content units.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersonaBlob(pub String);

/// A fixed cluster of entities sharing a difficulty tier (source term: Aethyr).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub id: String,
    pub name: String,
    /// 1 = most exalted.
    pub rank: u32,
}

/// An actor content units are generated for (source term: governor).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: String,
    pub name: String,
    pub group_id: String,
    /// Partition id → declared weight (≥ 0).
    #[serde(default)]
    pub declared_affinities: BTreeMap<PartitionId, f64>,
    #[serde(default)]
    pub persona: PersonaBlob,
}
