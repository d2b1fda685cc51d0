use serde::{Deserialize, Serialize};

use super::defaults;

/// Primary-partition weight floor applied to every entity.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PrimacyConfig {
    /// Fixed weight `F` of the Primary partition. Default: 0.60.
    pub primary_weight: f64,
}

impl Default for PrimacyConfig {
    fn default() -> Self {
        Self {
            primary_weight: defaults::DEFAULT_PRIMARY_WEIGHT,
        }
    }
}
