use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::entity::{DifficultyTier, PersonaBlob};
use super::partition::{Citation, FragmentRef};
use crate::errors::LighthouseResult;

/// Position of a stage in the four-beat progression arc.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NarrativeSlot {
    Study,
    Practice,
    Trial,
    Integration,
}

impl NarrativeSlot {
    pub const ARC: [NarrativeSlot; 4] = [
        NarrativeSlot::Study,
        NarrativeSlot::Practice,
        NarrativeSlot::Trial,
        NarrativeSlot::Integration,
    ];

    /// Slot for `stage_index` when the arc is stretched over `stage_count` stages.
    pub fn for_stage(stage_index: usize, stage_count: usize) -> Self {
        let stage_count = stage_count.max(1);
        let slot = (stage_index.min(stage_count - 1) * Self::ARC.len()) / stage_count;
        Self::ARC[slot.min(Self::ARC.len() - 1)]
    }
}

/// One step of a unit's progression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stage {
    pub index: usize,
    pub narrative_slot: NarrativeSlot,
    pub difficulty_level: u32,
    pub fragment_refs: Vec<FragmentRef>,
}

/// Component terms of an authenticity score.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    /// Mean matched/checked keyword ratio over the sampled fragments.
    pub base: f64,
    pub tradition_multiplier: f64,
    pub primary_source_bonus: f64,
    pub primacy_bonus: f64,
    pub missing_citation_penalty: f64,
    /// Final clamped score in [0, 1].
    pub score: f64,
}

/// A synthesized, scored piece of content for one entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentUnit {
    pub id: String,
    pub entity_id: String,
    pub entity_name: String,
    pub group_id: String,
    pub unit_index: u32,
    pub seed: u64,
    pub stages: Vec<Stage>,
    pub difficulty_tier: DifficultyTier,
    pub authenticity_score: f64,
    pub score_breakdown: ScoreBreakdown,
    pub aggregated_citations: Vec<Citation>,
    pub cross_references: Vec<FragmentRef>,
    pub skipped_cross_refs: usize,
    /// Sampling fell back to drawing with replacement.
    pub degraded: bool,
    pub persona: PersonaBlob,
    pub created_at: DateTime<Utc>,
    pub content_hash: String,
}

impl ContentUnit {
    /// blake3 over the canonical JSON of the unit, excluding `created_at`
    /// and `content_hash`.
    pub fn compute_content_hash(&self) -> LighthouseResult<String> {
        let mut value = serde_json::to_value(self)?;
        if let Some(map) = value.as_object_mut() {
            map.remove("created_at");
            map.remove("content_hash");
        }
        let bytes = serde_json::to_vec(&value)?;
        Ok(blake3::hash(&bytes).to_hex().to_string())
    }

    /// Recompute and store the content hash.
    pub fn seal(&mut self) -> LighthouseResult<()> {
        self.content_hash = self.compute_content_hash()?;
        Ok(())
    }

    pub fn fragment_refs(&self) -> impl Iterator<Item = &FragmentRef> {
        self.stages.iter().flat_map(|s| s.fragment_refs.iter())
    }

    pub fn fragment_count(&self) -> usize {
        self.stages.iter().map(|s| s.fragment_refs.len()).sum()
    }
}
