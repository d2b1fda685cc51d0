use serde::{Deserialize, Serialize};

use super::defaults;

/// Content synthesis configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SynthesisConfig {
    /// Ordered narrative stages per content unit.
    pub stage_count: usize,
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            stage_count: defaults::DEFAULT_STAGE_COUNT,
        }
    }
}
