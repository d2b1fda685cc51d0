use serde::{Deserialize, Serialize};

use super::defaults;

/// Roster loading configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RosterConfig {
    /// Reject rosters that are not 30 groups / 91 entities.
    pub require_canonical_shape: bool,
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            require_canonical_shape: defaults::DEFAULT_REQUIRE_CANONICAL_SHAPE,
        }
    }
}
