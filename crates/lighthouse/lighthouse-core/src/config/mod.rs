//! Engine configuration.
//!
//! Every section is `#[serde(default)]`, so an empty TOML document yields the
//! defaults from [`defaults`]. [`LighthouseConfig::from_toml`] parses and then
//! validates; a config that fails validation is a fatal configuration error.

pub mod batch_config;
pub mod defaults;
pub mod observability_config;
pub mod primacy_config;
pub mod roster_config;
pub mod sampling_config;
pub mod scoring_config;
pub mod shard_config;
pub mod synthesis_config;

pub use batch_config::BatchConfig;
pub use observability_config::ObservabilityConfig;
pub use primacy_config::PrimacyConfig;
pub use roster_config::RosterConfig;
pub use sampling_config::SamplingConfig;
pub use scoring_config::ScoringConfig;
pub use shard_config::ShardConfig;
pub use synthesis_config::SynthesisConfig;

use serde::{Deserialize, Serialize};

use crate::errors::{LighthouseError, LighthouseResult};

/// Top-level configuration aggregating all subsystem configs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LighthouseConfig {
    pub primacy: PrimacyConfig,
    pub sampling: SamplingConfig,
    pub synthesis: SynthesisConfig,
    pub scoring: ScoringConfig,
    pub batch: BatchConfig,
    pub shard: ShardConfig,
    pub roster: RosterConfig,
    pub observability: ObservabilityConfig,
}

impl LighthouseConfig {
    /// Parse a TOML document and validate the result.
    pub fn from_toml(source: &str) -> LighthouseResult<Self> {
        let config: Self =
            toml::from_str(source).map_err(|e| LighthouseError::ConfigError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize back to TOML.
    pub fn to_toml(&self) -> LighthouseResult<String> {
        toml::to_string(self).map_err(|e| LighthouseError::ConfigError(e.to_string()))
    }

    /// Check cross-field invariants.
    pub fn validate(&self) -> LighthouseResult<()> {
        let f = self.primacy.primary_weight;
        if !(f.is_finite() && f > 0.0 && f <= 1.0) {
            return Err(invalid(format!(
                "primacy.primary_weight must be in (0, 1], got {f}"
            )));
        }

        if self.sampling.fragments_per_unit == 0 {
            return Err(invalid("sampling.fragments_per_unit must be at least 1"));
        }
        if self.synthesis.stage_count == 0 {
            return Err(invalid("synthesis.stage_count must be at least 1"));
        }
        if self.sampling.fragments_per_unit < self.synthesis.stage_count {
            return Err(invalid(format!(
                "sampling.fragments_per_unit ({}) must cover synthesis.stage_count ({})",
                self.sampling.fragments_per_unit, self.synthesis.stage_count
            )));
        }

        self.validate_scoring()?;

        if self.batch.backoff_max_ms < self.batch.backoff_base_ms {
            return Err(invalid("batch.backoff_max_ms must be >= batch.backoff_base_ms"));
        }
        if self.batch.unit_timeout_ms == 0 {
            return Err(invalid("batch.unit_timeout_ms must be positive"));
        }

        if self.shard.byte_ceiling == 0 {
            return Err(invalid("shard.byte_ceiling must be positive"));
        }
        if !(1..=22).contains(&self.shard.compression_level) {
            return Err(invalid(format!(
                "shard.compression_level must be in 1..=22, got {}",
                self.shard.compression_level
            )));
        }
        if self.shard.max_pack_attempts == 0 {
            return Err(invalid("shard.max_pack_attempts must be at least 1"));
        }

        Ok(())
    }

    fn validate_scoring(&self) -> LighthouseResult<()> {
        let s = &self.scoring;
        let positive = |m: f64| m.is_finite() && m > 0.0;

        if !positive(s.primary_multiplier) || !positive(s.default_multiplier) {
            return Err(invalid("scoring multipliers must be positive"));
        }
        if s.primary_multiplier <= s.default_multiplier {
            return Err(invalid(format!(
                "scoring.primary_multiplier ({}) must exceed default_multiplier ({})",
                s.primary_multiplier, s.default_multiplier
            )));
        }
        for (partition, m) in &s.partition_multipliers {
            if !positive(*m) {
                return Err(invalid(format!(
                    "scoring multiplier for {partition} must be positive"
                )));
            }
            if *m >= s.primary_multiplier {
                return Err(invalid(format!(
                    "scoring multiplier for {partition} ({m}) must stay below primary_multiplier ({})",
                    s.primary_multiplier
                )));
            }
        }
        if !(0.0..=1.0).contains(&s.primary_source_reliability) {
            return Err(invalid("scoring.primary_source_reliability must be in [0, 1]"));
        }
        for (name, v) in [
            ("primary_source_bonus", s.primary_source_bonus),
            ("primacy_bonus", s.primacy_bonus),
            ("missing_citation_penalty", s.missing_citation_penalty),
        ] {
            if !(v.is_finite() && v >= 0.0) {
                return Err(invalid(format!("scoring.{name} must be non-negative")));
            }
        }
        Ok(())
    }
}

fn invalid(reason: impl Into<String>) -> LighthouseError {
    LighthouseError::ConfigError(reason.into())
}
