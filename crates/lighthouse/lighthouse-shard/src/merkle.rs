//! Binary Merkle tree over hex content hashes.
//!
//! Leaf: `blake3(0x00 ‖ hash)`. Interior: `blake3(0x01 ‖ left ‖ right)`.
//! An unpaired node at the end of a level moves up unchanged.

const LEAF_PREFIX: u8 = 0x00;
const NODE_PREFIX: u8 = 0x01;

pub fn leaf_hash(content_hash: &str) -> blake3::Hash {
    let mut hasher = blake3::Hasher::new();
    hasher.update(&[LEAF_PREFIX]);
    hasher.update(content_hash.as_bytes());
    hasher.finalize()
}

pub fn node_hash(left: &blake3::Hash, right: &blake3::Hash) -> blake3::Hash {
    let mut hasher = blake3::Hasher::new();
    hasher.update(&[NODE_PREFIX]);
    hasher.update(left.as_bytes());
    hasher.update(right.as_bytes());
    hasher.finalize()
}

/// Hex root over `hashes` in order. An empty input hashes to `blake3("")`.
pub fn merkle_root<S: AsRef<str>>(hashes: &[S]) -> String {
    let mut level: Vec<blake3::Hash> = hashes.iter().map(|h| leaf_hash(h.as_ref())).collect();
    if level.is_empty() {
        return blake3::hash(&[]).to_hex().to_string();
    }
    while level.len() > 1 {
        level = level
            .chunks(2)
            .map(|pair| match pair.get(1) {
                Some(right) => node_hash(&pair[0], right),
                None => pair[0],
            })
            .collect();
    }
    level[0].to_hex().to_string()
}
