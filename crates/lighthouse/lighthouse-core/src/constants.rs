/// Lighthouse engine version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Tolerance for the weight-vector sum invariant.
pub const WEIGHT_SUM_EPSILON: f64 = 1e-9;

/// Score at or above which a unit counts as high-authenticity in batch metrics.
pub const HIGH_AUTHENTICITY_THRESHOLD: f64 = 0.95;

/// Number of ordered difficulty tiers.
pub const DIFFICULTY_TIER_COUNT: usize = 4;

/// Canonical roster shape: 30 groups, one of which holds 4 entities.
pub const CANONICAL_GROUP_COUNT: usize = 30;
pub const CANONICAL_ENTITY_COUNT: usize = 91;
pub const CANONICAL_GROUP_SIZE: usize = 3;
pub const CANONICAL_LARGE_GROUP_SIZE: usize = 4;

/// Maximum number of failure records retained on a batch.
pub const MAX_FAILURE_LOG: usize = 256;

/// Merkle root width in hex characters (blake3, 32 bytes).
pub const MERKLE_ROOT_HEX_LEN: usize = 64;
