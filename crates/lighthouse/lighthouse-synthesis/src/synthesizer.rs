//! ContentSynthesizer: sample → staged, cited, cross-referenced, scored unit.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use lighthouse_core::config::ScoringConfig;
use lighthouse_core::errors::LighthouseResult;
use lighthouse_core::models::{Citation, ContentUnit, DifficultyTier, Entity, FragmentRef};
use lighthouse_core::traits::IKnowledgeStore;
use lighthouse_retrieval::{SampleOutcome, UnitSeed};
use tracing::debug;

use crate::scoring::{AuthenticityScorer, DraftFragment, UnitDraft};
use crate::stages::split_into_stages;

/// Everything needed to build one unit.
pub struct SynthesisRequest<'a> {
    pub entity: &'a Entity,
    pub tier: DifficultyTier,
    pub sample: &'a SampleOutcome<'a>,
    pub stage_count: usize,
    pub seed: UnitSeed,
    pub unit_index: u32,
    pub created_at: DateTime<Utc>,
    /// Used for keyword lookup and cross-reference resolution. Never mutated.
    pub store: &'a dyn IKnowledgeStore,
}

pub struct ContentSynthesizer {
    scorer: AuthenticityScorer,
}

impl ContentSynthesizer {
    pub fn new(config: &ScoringConfig, primary_id: impl Into<String>) -> Self {
        Self {
            scorer: AuthenticityScorer::new(config, primary_id),
        }
    }

    pub fn scorer(&self) -> &AuthenticityScorer {
        &self.scorer
    }

    pub fn synthesize(&self, request: &SynthesisRequest<'_>) -> LighthouseResult<ContentUnit> {
        let sampled = request.sample.fragments();

        let mut draft = UnitDraft {
            fragments: Vec::with_capacity(sampled.len()),
        };
        for s in sampled {
            let partition = request.store.get_partition(s.partition_id)?;
            draft.fragments.push(DraftFragment {
                partition_id: s.partition_id,
                keywords: &partition.keywords,
                fragment: s.fragment,
            });
        }
        let breakdown = self.scorer.score_detailed(&draft);

        let refs: Vec<FragmentRef> = sampled
            .iter()
            .map(|s| FragmentRef::new(s.partition_id, s.fragment.id.as_str()))
            .collect();
        let stages = split_into_stages(&refs, request.stage_count, request.tier);

        let aggregated_citations =
            aggregate_citations(sampled.iter().flat_map(|s| s.fragment.citations.iter()));

        let (cross_references, skipped_cross_refs) = resolve_cross_refs(
            request.store,
            sampled.iter().flat_map(|s| s.fragment.cross_refs.iter()),
        );

        let seed_hex = request.seed.hex();
        let mut unit = ContentUnit {
            id: format!(
                "{}-u{:05}-{}",
                request.entity.id,
                request.unit_index,
                &seed_hex[..8]
            ),
            entity_id: request.entity.id.clone(),
            entity_name: request.entity.name.clone(),
            group_id: request.entity.group_id.clone(),
            unit_index: request.unit_index,
            seed: request.seed.as_u64(),
            stages,
            difficulty_tier: request.tier,
            authenticity_score: breakdown.score,
            score_breakdown: breakdown,
            aggregated_citations,
            cross_references,
            skipped_cross_refs,
            degraded: request.sample.is_degraded(),
            persona: request.entity.persona.clone(),
            created_at: request.created_at,
            content_hash: String::new(),
        };
        unit.seal()?;

        debug!(
            unit = %unit.id,
            score = unit.authenticity_score,
            fragments = refs.len(),
            skipped_cross_refs,
            "unit synthesized"
        );
        Ok(unit)
    }
}

/// Deduplicate by source label, keeping the highest reliability, in first-seen order.
fn aggregate_citations<'a>(citations: impl Iterator<Item = &'a Citation>) -> Vec<Citation> {
    let mut out: Vec<Citation> = Vec::new();
    let mut index: HashMap<&'a str, usize> = HashMap::new();
    for c in citations {
        match index.get(c.source_label.as_str()) {
            Some(&i) => {
                if c.reliability > out[i].reliability {
                    out[i].reliability = c.reliability;
                }
            }
            None => {
                index.insert(c.source_label.as_str(), out.len());
                out.push(c.clone());
            }
        }
    }
    out
}

/// Keep references that resolve in the store; count the dangling ones.
fn resolve_cross_refs<'a>(
    store: &dyn IKnowledgeStore,
    refs: impl Iterator<Item = &'a FragmentRef>,
) -> (Vec<FragmentRef>, usize) {
    let mut seen = HashSet::new();
    let mut resolved = Vec::new();
    let mut skipped = 0;
    for r in refs {
        if !seen.insert(r) {
            continue;
        }
        match store.get_fragment(&r.partition_id, &r.fragment_id) {
            Ok(_) => resolved.push(r.clone()),
            Err(e) => {
                debug!(
                    partition = %r.partition_id,
                    fragment = %r.fragment_id,
                    error = %e,
                    "skipping dangling cross reference"
                );
                skipped += 1;
            }
        }
    }
    (resolved, skipped)
}
