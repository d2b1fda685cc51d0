use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::defaults;

/// Authenticity scoring configuration.
///
/// The Primary partition always scores with `primary_multiplier`; every other
/// partition uses its entry in `partition_multipliers` or `default_multiplier`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Tradition multiplier of the Primary partition. Must be the highest.
    pub primary_multiplier: f64,
    /// Multiplier for partitions without an explicit entry.
    pub default_multiplier: f64,
    /// Per-partition multipliers, keyed by partition id.
    pub partition_multipliers: BTreeMap<String, f64>,
    /// Added when any citation meets `primary_source_reliability`.
    pub primary_source_bonus: f64,
    /// Reliability at or above which a citation counts as a primary source.
    pub primary_source_reliability: f64,
    /// Added when the unit holds at least `primacy_bonus_min_fragments` Primary fragments.
    pub primacy_bonus: f64,
    pub primacy_bonus_min_fragments: usize,
    /// Subtracted when the unit carries no citation at all.
    pub missing_citation_penalty: f64,
    /// Lexicon for fragments whose partition declares no keywords.
    pub default_keywords: Vec<String>,
}

impl ScoringConfig {
    /// Multiplier for a non-primary partition.
    pub fn multiplier_for(&self, partition_id: &str) -> f64 {
        self.partition_multipliers
            .get(partition_id)
            .copied()
            .unwrap_or(self.default_multiplier)
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            primary_multiplier: defaults::DEFAULT_PRIMARY_MULTIPLIER,
            default_multiplier: defaults::DEFAULT_PARTITION_MULTIPLIER,
            partition_multipliers: defaults::DEFAULT_PARTITION_MULTIPLIERS
                .iter()
                .map(|(id, m)| (id.to_string(), *m))
                .collect(),
            primary_source_bonus: defaults::DEFAULT_PRIMARY_SOURCE_BONUS,
            primary_source_reliability: defaults::DEFAULT_PRIMARY_SOURCE_RELIABILITY,
            primacy_bonus: defaults::DEFAULT_PRIMACY_BONUS,
            primacy_bonus_min_fragments: defaults::DEFAULT_PRIMACY_BONUS_MIN_FRAGMENTS,
            missing_citation_penalty: defaults::DEFAULT_MISSING_CITATION_PENALTY,
            default_keywords: defaults::DEFAULT_KEYWORDS
                .iter()
                .map(|k| k.to_string())
                .collect(),
        }
    }
}
