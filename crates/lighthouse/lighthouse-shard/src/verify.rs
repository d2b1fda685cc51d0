//! Independent re-check of a sealed shard.

use lighthouse_core::errors::{LighthouseResult, PackError};
use lighthouse_core::models::{ContentUnit, Shard};

use crate::{codec, merkle};

/// Decompress `shard`, re-hash every unit and recompute the Merkle root.
///
/// Returns the decoded units when every check passes.
pub fn verify_shard(shard: &Shard) -> LighthouseResult<Vec<ContentUnit>> {
    if blake3::hash(&shard.compressed_payload).to_hex().as_str() != shard.payload_hash {
        return Err(PackError::PayloadHashMismatch {
            shard_id: shard.id.clone(),
        }
        .into());
    }
    if shard.compressed_payload.len() != shard.byte_size {
        return Err(PackError::SizeMismatch {
            shard_id: shard.id.clone(),
            what: "compressed",
            recorded: shard.byte_size,
            actual: shard.compressed_payload.len(),
        }
        .into());
    }

    let raw = codec::decompress(&shard.compressed_payload)?;
    if raw.len() != shard.raw_size {
        return Err(PackError::SizeMismatch {
            shard_id: shard.id.clone(),
            what: "raw",
            recorded: shard.raw_size,
            actual: raw.len(),
        }
        .into());
    }
    let units = codec::decode_lines(&raw)?;

    for unit in &units {
        if unit.compute_content_hash()? != unit.content_hash {
            return Err(PackError::ContentHashMismatch {
                unit_id: unit.id.clone(),
            }
            .into());
        }
    }
    if !units.iter().map(|u| &u.id).eq(shard.unit_ids.iter()) {
        return Err(PackError::UnitListMismatch {
            shard_id: shard.id.clone(),
        }
        .into());
    }

    let hashes: Vec<&str> = units.iter().map(|u| u.content_hash.as_str()).collect();
    let actual = merkle::merkle_root(&hashes);
    if actual != shard.merkle_root {
        return Err(PackError::MerkleMismatch {
            shard_id: shard.id.clone(),
            expected: shard.merkle_root.clone(),
            actual,
        }
        .into());
    }
    Ok(units)
}

/// [`verify_shard`] plus the size ceiling.
pub fn verify_shard_within(shard: &Shard, byte_ceiling: usize) -> LighthouseResult<Vec<ContentUnit>> {
    if shard.byte_size > byte_ceiling {
        return Err(PackError::SizeExceeded {
            shard_id: shard.id.clone(),
            size: shard.byte_size,
            ceiling: byte_ceiling,
        }
        .into());
    }
    verify_shard(shard)
}
