//! Seeded weighted sampling with a Primary floor.
//!
//! Picks `1..k-1` choose a partition by weighted draw and then a uniformly
//! random fragment not yet drawn from it. Pick `k` is forced onto the Primary
//! partition when no Primary fragment was drawn before it. A partition that
//! runs out of undrawn fragments is sampled with replacement. A partition is
//! reported as exhausted, and the outcome is `Degraded`, when it holds fewer
//! fragments than `ceil(weight * k)` or when the draws actually empty it.

use std::collections::BTreeMap;

use lighthouse_core::constants::WEIGHT_SUM_EPSILON;
use lighthouse_core::errors::{LighthouseResult, SamplingError};
use lighthouse_core::models::{Fragment, Partition, PartitionId, WeightVector};
use lighthouse_core::traits::IKnowledgeStore;
use rand::distributions::{Distribution, WeightedIndex};
use rand::rngs::StdRng;
use rand::Rng;
use tracing::warn;

use crate::seed::UnitSeed;

/// One drawn fragment, borrowed from the store.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampledFragment<'a> {
    pub partition_id: &'a str,
    pub fragment: &'a Fragment,
    /// Drawn after its partition was exhausted.
    pub with_replacement: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SampleOutcome<'a> {
    Full(Vec<SampledFragment<'a>>),
    Degraded {
        fragments: Vec<SampledFragment<'a>>,
        exhausted: Vec<PartitionId>,
    },
}

impl<'a> SampleOutcome<'a> {
    pub fn fragments(&self) -> &[SampledFragment<'a>] {
        match self {
            Self::Full(fragments) | Self::Degraded { fragments, .. } => fragments,
        }
    }

    pub fn into_fragments(self) -> Vec<SampledFragment<'a>> {
        match self {
            Self::Full(fragments) | Self::Degraded { fragments, .. } => fragments,
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, Self::Degraded { .. })
    }

    pub fn exhausted(&self) -> &[PartitionId] {
        match self {
            Self::Full(_) => &[],
            Self::Degraded { exhausted, .. } => exhausted,
        }
    }
}

/// Undrawn fragment positions of one candidate partition.
struct Pool<'a> {
    partition: &'a Partition,
    remaining: Vec<usize>,
    exhausted: bool,
}

impl<'a> Pool<'a> {
    fn new(partition: &'a Partition) -> Self {
        Self {
            partition,
            remaining: (0..partition.fragments.len()).collect(),
            exhausted: false,
        }
    }

    fn draw(&mut self, rng: &mut StdRng) -> SampledFragment<'a> {
        let partition: &'a Partition = self.partition;
        let (pos, with_replacement) = if self.remaining.is_empty() {
            self.exhausted = true;
            (rng.gen_range(0..partition.fragments.len()), true)
        } else {
            let slot = rng.gen_range(0..self.remaining.len());
            (self.remaining.swap_remove(slot), false)
        };
        SampledFragment {
            partition_id: &partition.id,
            fragment: &partition.fragments[pos],
            with_replacement,
        }
    }
}

/// Fragments a partition of weight `weight` is expected to supply for `k` picks.
fn proportional_need(weight: f64, k: usize) -> usize {
    let share = weight * k as f64 - WEIGHT_SUM_EPSILON;
    if share <= 0.0 {
        0
    } else {
        share.ceil() as usize
    }
}

pub struct RetrievalSampler;

impl RetrievalSampler {
    /// Draw `k` fragments for one unit. Identical inputs give identical output.
    ///
    /// Errors are unit-level: a weighted partition unknown to the store, a
    /// weighted or Primary partition with no fragments, or `k == 0`.
    pub fn sample<'a>(
        store: &'a dyn IKnowledgeStore,
        weights: &WeightVector,
        k: usize,
        seed: UnitSeed,
    ) -> LighthouseResult<SampleOutcome<'a>> {
        if k == 0 {
            return Err(SamplingError::ZeroSampleSize.into());
        }

        let primary_id = store.primary_id();
        let mut pools: BTreeMap<&str, Pool<'a>> = BTreeMap::new();
        let mut candidates: Vec<&str> = Vec::new();
        let mut candidate_weights: Vec<f64> = Vec::new();

        for (partition_id, weight) in weights.positive() {
            let partition = store.get_partition(partition_id)?;
            if partition.is_empty() {
                return Err(SamplingError::EmptyPartition {
                    partition_id: partition_id.to_string(),
                }
                .into());
            }
            let mut pool = Pool::new(partition);
            // Fewer fragments than the proportional share of k: degraded up front.
            if proportional_need(weight, k) > partition.len() {
                pool.exhausted = true;
            }
            candidates.push(partition.id.as_str());
            candidate_weights.push(weight);
            pools.insert(partition.id.as_str(), pool);
        }
        if !pools.contains_key(primary_id) {
            let primary = store.get_partition(primary_id)?;
            if primary.is_empty() {
                return Err(SamplingError::EmptyPartition {
                    partition_id: primary_id.to_string(),
                }
                .into());
            }
            pools.insert(primary.id.as_str(), Pool::new(primary));
        }

        let distribution = WeightedIndex::new(&candidate_weights).map_err(|_| {
            SamplingError::NoWeightedPartitions {
                entity_id: weights.entity_id.clone(),
            }
        })?;

        let mut rng = seed.rng();
        let mut drawn = Vec::with_capacity(k);
        let mut primary_drawn = false;

        for pick in 0..k {
            let chosen = if pick + 1 == k && !primary_drawn {
                primary_id
            } else {
                candidates[distribution.sample(&mut rng)]
            };
            // Every candidate and the Primary have a pool.
            let Some(pool) = pools.get_mut(chosen) else {
                continue;
            };
            let sampled = pool.draw(&mut rng);
            primary_drawn |= sampled.partition_id == primary_id;
            drawn.push(sampled);
        }

        let exhausted: Vec<PartitionId> = pools
            .values()
            .filter(|p| p.exhausted)
            .map(|p| p.partition.id.clone())
            .collect();

        if exhausted.is_empty() {
            Ok(SampleOutcome::Full(drawn))
        } else {
            warn!(
                entity = %weights.entity_id,
                seed = seed.as_u64(),
                exhausted = ?exhausted,
                "partition exhausted, sampled with replacement"
            );
            Ok(SampleOutcome::Degraded {
                fragments: drawn,
                exhausted,
            })
        }
    }
}
