use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::partition::PartitionId;
use crate::constants::WEIGHT_SUM_EPSILON;

/// Normalized per-entity sampling weights. Ordered by partition id so that
/// iteration, and therefore sampling, is deterministic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightVector {
    pub entity_id: String,
    pub primary_id: PartitionId,
    weights: BTreeMap<PartitionId, f64>,
}

impl WeightVector {
    pub fn new(
        entity_id: impl Into<String>,
        primary_id: impl Into<String>,
        weights: BTreeMap<PartitionId, f64>,
    ) -> Self {
        Self {
            entity_id: entity_id.into(),
            primary_id: primary_id.into(),
            weights,
        }
    }

    /// Weight of a partition; 0.0 when absent.
    pub fn get(&self, partition_id: &str) -> f64 {
        self.weights.get(partition_id).copied().unwrap_or(0.0)
    }

    pub fn primary_weight(&self) -> f64 {
        self.get(&self.primary_id)
    }

    /// Partitions with a strictly positive weight, in id order.
    pub fn positive(&self) -> impl Iterator<Item = (&str, f64)> {
        self.weights
            .iter()
            .filter(|(_, w)| **w > 0.0)
            .map(|(id, w)| (id.as_str(), *w))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.weights.iter().map(|(id, w)| (id.as_str(), *w))
    }

    pub fn sum(&self) -> f64 {
        self.weights.values().sum()
    }

    /// Σ weights == 1.0 ± ε.
    pub fn is_normalized(&self) -> bool {
        (self.sum() - 1.0).abs() <= WEIGHT_SUM_EPSILON
    }
}
