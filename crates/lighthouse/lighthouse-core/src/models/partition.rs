use serde::{Deserialize, Serialize};

use super::entity::DifficultyTier;

/// Partition identifier (source term: tradition name).
pub type PartitionId = String;

/// Kind of knowledge a fragment carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FragmentCategory {
    Concept,
    Practice,
    Symbol,
    Principle,
}

/// A source backing a fragment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Citation {
    pub source_label: String,
    /// Reliability in [0.0, 1.0].
    pub reliability: f64,
}

/// Pointer to a fragment in some partition.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FragmentRef {
    pub partition_id: PartitionId,
    pub fragment_id: String,
}

impl FragmentRef {
    pub fn new(partition_id: impl Into<String>, fragment_id: impl Into<String>) -> Self {
        Self {
            partition_id: partition_id.into(),
            fragment_id: fragment_id.into(),
        }
    }
}

/// A single unit of knowledge. Created at load time, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fragment {
    /// Unique within its partition.
    pub id: String,
    pub name: String,
    pub category: FragmentCategory,
    pub summary: String,
    pub description: String,
    #[serde(default)]
    pub citations: Vec<Citation>,
    #[serde(default)]
    pub cross_refs: Vec<FragmentRef>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub difficulty: DifficultyTier,
}

impl Fragment {
    /// Case-insensitive keyword check over name, summary, description and tags.
    pub fn mentions(&self, keyword: &str) -> bool {
        let needle = keyword.to_lowercase();
        if needle.is_empty() {
            return false;
        }
        [&self.name, &self.summary, &self.description]
            .into_iter()
            .chain(self.tags.iter())
            .any(|text| text.to_lowercase().contains(&needle))
    }
}

/// A named topical collection of fragments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Partition {
    pub id: PartitionId,
    pub name: String,
    /// Exactly one partition system-wide is primary.
    #[serde(default)]
    pub is_primary: bool,
    /// Key concepts the authenticity scorer checks this partition's fragments against.
    #[serde(default)]
    pub keywords: Vec<String>,
    /// Ordered as loaded.
    #[serde(default)]
    pub fragments: Vec<Fragment>,
}

impl Partition {
    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }
}
