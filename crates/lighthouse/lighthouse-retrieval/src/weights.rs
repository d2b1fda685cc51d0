//! Entity affinities → normalized WeightVector.
//!
//! The Primary partition always receives exactly `F`. The remaining `1 - F`
//! is split over the entity's declared non-primary affinities in proportion
//! to their declared values. A declared Primary affinity is ignored.

use std::collections::BTreeMap;

use lighthouse_core::config::PrimacyConfig;
use lighthouse_core::models::{Entity, PartitionId, WeightVector};
use tracing::debug;

pub struct WeightResolver {
    primary_weight: f64,
    primary_id: PartitionId,
}

impl WeightResolver {
    pub fn new(config: &PrimacyConfig, primary_id: impl Into<String>) -> Self {
        Self {
            primary_weight: config.primary_weight,
            primary_id: primary_id.into(),
        }
    }

    pub fn primary_id(&self) -> &str {
        &self.primary_id
    }

    /// Pure and deterministic.
    ///
    /// An entity with no positive non-primary affinity gives the whole mass
    /// to Primary so the vector still sums to 1.
    pub fn resolve(&self, entity: &Entity) -> WeightVector {
        let declared: Vec<(&String, f64)> = entity
            .declared_affinities
            .iter()
            .filter(|(id, _)| **id != self.primary_id)
            .map(|(id, w)| (id, if w.is_finite() && *w > 0.0 { *w } else { 0.0 }))
            .collect();
        let total: f64 = declared.iter().map(|(_, w)| w).sum();

        let mut weights = BTreeMap::new();
        if total > 0.0 {
            let remainder = 1.0 - self.primary_weight;
            for (id, w) in declared {
                weights.insert(id.clone(), remainder * w / total);
            }
            weights.insert(self.primary_id.clone(), self.primary_weight);
        } else {
            for (id, _) in declared {
                weights.insert(id.clone(), 0.0);
            }
            weights.insert(self.primary_id.clone(), 1.0);
            debug!(
                entity = %entity.id,
                "no positive secondary affinity, primary takes full weight"
            );
        }

        WeightVector::new(entity.id.clone(), self.primary_id.clone(), weights)
    }
}
