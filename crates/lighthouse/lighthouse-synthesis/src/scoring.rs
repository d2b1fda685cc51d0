//! Authenticity scoring.
//!
//! ```text
//! base  = mean(matched_keywords / checked_keywords) over sampled fragments
//! score = clamp01(base * tradition_multiplier
//!                 + primary_source_bonus   (any citation >= primary_source_reliability)
//!                 + primacy_bonus          (>= primacy_bonus_min_fragments Primary fragments)
//!                 - missing_citation_penalty (no citation at all))
//! ```
//!
//! The multiplier is the highest one among the partitions present in the unit.
//! Scores are informational only; nothing is rejected on them.

use std::collections::BTreeSet;

use lighthouse_core::config::ScoringConfig;
use lighthouse_core::models::{Fragment, PartitionId, ScoreBreakdown};

/// A sampled fragment together with its partition's keyword lexicon.
#[derive(Debug, Clone, Copy)]
pub struct DraftFragment<'a> {
    pub partition_id: &'a str,
    /// Partition keywords. Empty means "use the default lexicon".
    pub keywords: &'a [String],
    pub fragment: &'a Fragment,
}

/// What the scorer sees of a unit before it is sealed.
#[derive(Debug, Clone, Default)]
pub struct UnitDraft<'a> {
    pub fragments: Vec<DraftFragment<'a>>,
}

pub struct AuthenticityScorer {
    config: ScoringConfig,
    primary_id: PartitionId,
}

impl AuthenticityScorer {
    pub fn new(config: &ScoringConfig, primary_id: impl Into<String>) -> Self {
        Self {
            config: config.clone(),
            primary_id: primary_id.into(),
        }
    }

    pub fn score(&self, draft: &UnitDraft<'_>) -> f64 {
        self.score_detailed(draft).score
    }

    pub fn score_detailed(&self, draft: &UnitDraft<'_>) -> ScoreBreakdown {
        let base = if draft.fragments.is_empty() {
            0.0
        } else {
            draft
                .fragments
                .iter()
                .map(|f| self.keyword_ratio(f))
                .sum::<f64>()
                / draft.fragments.len() as f64
        };

        let tradition_multiplier = self.tradition_multiplier(draft);

        let citations = draft.fragments.iter().flat_map(|f| f.fragment.citations.iter());
        let mut any_citation = false;
        let mut primary_source = false;
        for c in citations {
            any_citation = true;
            primary_source |= c.reliability >= self.config.primary_source_reliability;
        }

        let primary_fragments = draft
            .fragments
            .iter()
            .filter(|f| f.partition_id == self.primary_id)
            .count();

        let primary_source_bonus = if primary_source {
            self.config.primary_source_bonus
        } else {
            0.0
        };
        let primacy_bonus = if primary_fragments >= self.config.primacy_bonus_min_fragments {
            self.config.primacy_bonus
        } else {
            0.0
        };
        let missing_citation_penalty = if any_citation {
            0.0
        } else {
            self.config.missing_citation_penalty
        };

        let raw = base * tradition_multiplier + primary_source_bonus + primacy_bonus
            - missing_citation_penalty;

        ScoreBreakdown {
            base,
            tradition_multiplier,
            primary_source_bonus,
            primacy_bonus,
            missing_citation_penalty,
            score: raw.clamp(0.0, 1.0),
        }
    }

    /// Matched / checked keywords for one fragment; 0 when nothing is checked.
    fn keyword_ratio(&self, f: &DraftFragment<'_>) -> f64 {
        let lexicon: &[String] = if f.keywords.is_empty() {
            &self.config.default_keywords
        } else {
            f.keywords
        };
        if lexicon.is_empty() {
            return 0.0;
        }
        let matched = lexicon.iter().filter(|k| f.fragment.mentions(k)).count();
        matched as f64 / lexicon.len() as f64
    }

    fn tradition_multiplier(&self, draft: &UnitDraft<'_>) -> f64 {
        let present: BTreeSet<&str> = draft.fragments.iter().map(|f| f.partition_id).collect();
        present
            .into_iter()
            .map(|id| {
                if id == self.primary_id {
                    self.config.primary_multiplier
                } else {
                    self.config.multiplier_for(id)
                }
            })
            .reduce(f64::max)
            .unwrap_or(self.config.default_multiplier)
    }
}
