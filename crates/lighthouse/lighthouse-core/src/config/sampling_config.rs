use serde::{Deserialize, Serialize};

use super::defaults;

/// Retrieval sampling configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplingConfig {
    /// Fragments sampled per content unit (`k`).
    pub fragments_per_unit: usize,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            fragments_per_unit: defaults::DEFAULT_FRAGMENTS_PER_UNIT,
        }
    }
}
