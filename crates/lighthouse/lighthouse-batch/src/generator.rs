//! The per-unit work a task performs, behind the [`IUnitGenerator`] seam.

use chrono::{DateTime, Utc};
use lighthouse_core::config::LighthouseConfig;
use lighthouse_core::errors::{LighthouseError, LighthouseResult, StoreError};
use lighthouse_core::models::{ContentUnit, Entity};
use lighthouse_core::traits::IKnowledgeStore;
use lighthouse_retrieval::{RetrievalSampler, UnitSeed, WeightResolver};
use lighthouse_store::Roster;
use lighthouse_synthesis::{ContentSynthesizer, SynthesisRequest};

/// Produces one content unit. Called concurrently from worker threads.
pub trait IUnitGenerator: Send + Sync {
    /// `attempt` counts from 0 and increases on every retry of the same unit.
    fn generate(&self, entity: &Entity, unit_index: u32, attempt: u32)
        -> LighthouseResult<ContentUnit>;

    /// Whether a failed attempt is worth repeating.
    fn should_retry(&self, error: &LighthouseError) -> bool {
        error.is_retryable()
    }
}

/// Weight resolution → seeded sampling → synthesis and scoring.
pub struct PipelineGenerator<'a> {
    store: &'a dyn IKnowledgeStore,
    roster: &'a Roster,
    resolver: WeightResolver,
    synthesizer: ContentSynthesizer,
    fragments_per_unit: usize,
    stage_count: usize,
    batch_seed: u64,
    created_at: DateTime<Utc>,
}

impl<'a> PipelineGenerator<'a> {
    /// `created_at` is stamped on every unit of the batch.
    pub fn new(
        store: &'a dyn IKnowledgeStore,
        roster: &'a Roster,
        config: &LighthouseConfig,
        created_at: DateTime<Utc>,
    ) -> Self {
        let primary_id = store.primary_id();
        Self {
            store,
            roster,
            resolver: WeightResolver::new(&config.primacy, primary_id),
            synthesizer: ContentSynthesizer::new(&config.scoring, primary_id),
            fragments_per_unit: config.sampling.fragments_per_unit,
            stage_count: config.synthesis.stage_count,
            batch_seed: config.batch.batch_seed,
            created_at,
        }
    }
}

impl IUnitGenerator for PipelineGenerator<'_> {
    fn generate(
        &self,
        entity: &Entity,
        unit_index: u32,
        _attempt: u32,
    ) -> LighthouseResult<ContentUnit> {
        let tier = self.roster.tier_of(entity)?;
        let weights = self.resolver.resolve(entity);
        let seed = UnitSeed::derive(self.batch_seed, &entity.id, unit_index);
        let sample = RetrievalSampler::sample(self.store, &weights, self.fragments_per_unit, seed)?;
        self.synthesizer.synthesize(&SynthesisRequest {
            entity,
            tier,
            sample: &sample,
            stage_count: self.stage_count,
            seed,
            unit_index,
            created_at: self.created_at,
            store: self.store,
        })
    }

    /// The store is immutable and the seed ignores `attempt`, so a sampling
    /// error or an unknown partition repeats identically on every attempt.
    fn should_retry(&self, error: &LighthouseError) -> bool {
        match error {
            LighthouseError::SamplingError(_)
            | LighthouseError::StoreError(StoreError::PartitionNotFound { .. }) => false,
            other => other.is_retryable(),
        }
    }
}
