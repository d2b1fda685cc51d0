//! Newline-delimited JSON payloads and their zstd framing.

use lighthouse_core::errors::{LighthouseResult, PackError};
use lighthouse_core::models::ContentUnit;

/// Serialize one unit as a single JSON line, newline included.
///
/// Refuses a unit whose stored content hash no longer matches its fields,
/// so shard leaves always commit to what is actually in the payload.
pub fn encode_line(unit: &ContentUnit) -> LighthouseResult<Vec<u8>> {
    if unit.compute_content_hash()? != unit.content_hash {
        return Err(PackError::ContentHashMismatch {
            unit_id: unit.id.clone(),
        }
        .into());
    }
    let mut line = serde_json::to_vec(unit)?;
    line.push(b'\n');
    Ok(line)
}

/// Parse an NDJSON payload back into units. Blank lines are ignored.
pub fn decode_lines(raw: &[u8]) -> LighthouseResult<Vec<ContentUnit>> {
    raw.split(|b| *b == b'\n')
        .filter(|line| !line.iter().all(u8::is_ascii_whitespace))
        .map(|line| serde_json::from_slice(line).map_err(Into::into))
        .collect()
}

pub fn compress(raw: &[u8], level: i32) -> LighthouseResult<Vec<u8>> {
    zstd::encode_all(raw, level).map_err(|e| {
        PackError::Compression {
            reason: e.to_string(),
        }
        .into()
    })
}

pub fn decompress(payload: &[u8]) -> LighthouseResult<Vec<u8>> {
    zstd::decode_all(payload).map_err(|e| {
        PackError::Decompression {
            reason: e.to_string(),
        }
        .into()
    })
}

/// Worst-case compressed size for `raw_len` input bytes.
pub fn compress_bound(raw_len: usize) -> usize {
    zstd::zstd_safe::compress_bound(raw_len)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compress_round_trips() {
        let raw = b"{\"a\":1}\n{\"a\":2}\n".repeat(50);
        let packed = compress(&raw, 3).unwrap();
        assert!(packed.len() < raw.len());
        assert_eq!(decompress(&packed).unwrap(), raw);
    }

    #[test]
    fn garbage_fails_to_decompress() {
        assert!(decompress(b"not a zstd frame").is_err());
    }

    #[test]
    fn bound_is_never_below_input() {
        for n in [0, 1, 100, 1_000_000] {
            assert!(compress_bound(n) >= n);
        }
    }
}
