//! Per-unit seed derivation.

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

/// Deterministic seed for one `(batch_seed, entity, unit_index)` triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UnitSeed(u64);

impl UnitSeed {
    /// blake3 over the three inputs; the first 8 digest bytes, little-endian.
    pub fn derive(batch_seed: u64, entity_id: &str, unit_index: u32) -> Self {
        let mut hasher = blake3::Hasher::new();
        hasher.update(&batch_seed.to_le_bytes());
        hasher.update(&(entity_id.len() as u64).to_le_bytes());
        hasher.update(entity_id.as_bytes());
        hasher.update(&unit_index.to_le_bytes());
        let digest = hasher.finalize();
        let mut head = [0u8; 8];
        head.copy_from_slice(&digest.as_bytes()[..8]);
        Self(u64::from_le_bytes(head))
    }

    pub fn from_raw(seed: u64) -> Self {
        Self(seed)
    }

    pub fn as_u64(self) -> u64 {
        self.0
    }

    /// 16 lowercase hex digits.
    pub fn hex(self) -> String {
        format!("{:016x}", self.0)
    }

    pub fn rng(self) -> StdRng {
        StdRng::seed_from_u64(self.0)
    }
}
