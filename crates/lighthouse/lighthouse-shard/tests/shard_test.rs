use lighthouse_core::config::ShardConfig;
use lighthouse_core::errors::{LighthouseError, PackError};
use lighthouse_core::models::{ContentUnit, Shard};
use lighthouse_core::traits::IShardSink;
use lighthouse_shard::{
    build_manifest, codec, merkle, verify_shard, verify_shard_within, MemoryShardSink,
    PackFailureKind, ShardPacker,
};
use test_fixtures::{content_unit, content_units, fixed_epoch};

fn packer(byte_ceiling: usize) -> ShardPacker {
    ShardPacker::new(&ShardConfig {
        byte_ceiling,
        compression_level: 3,
        max_pack_attempts: 2,
    })
}

fn packed_ids(shards: &[Shard]) -> Vec<String> {
    shards.iter().flat_map(|s| s.unit_ids.clone()).collect()
}

fn ids(units: &[ContentUnit]) -> Vec<String> {
    units.iter().map(|u| u.id.clone()).collect()
}

#[test]
fn small_batch_fits_one_shard_under_default_ceiling() {
    let units = content_units("OCCODON", 20, 500);
    let outcome = ShardPacker::new(&ShardConfig::default()).pack(&units);
    assert_eq!(outcome.shards.len(), 1);
    assert!(outcome.dropped.is_empty());
    assert_eq!(outcome.shards[0].sequence_index, 0);
    assert_eq!(packed_ids(&outcome.shards), ids(&units));
}

#[test]
fn every_shard_stays_under_the_ceiling() {
    let units = content_units("PASCOMB", 40, 2_000);
    let ceiling = 8_000;
    let outcome = packer(ceiling).pack(&units);

    assert!(outcome.shards.len() > 2, "expected a split, got {}", outcome.shards.len());
    assert!(outcome.dropped.is_empty());
    for (i, shard) in outcome.shards.iter().enumerate() {
        assert_eq!(shard.sequence_index, i as u64);
        assert!(shard.byte_size <= ceiling, "shard {i} is {} bytes", shard.byte_size);
        assert_eq!(shard.byte_size, shard.compressed_payload.len());
        verify_shard_within(shard, ceiling).unwrap();
    }
}

#[test]
fn units_keep_production_order_across_shards() {
    let units = content_units("VALGARS", 30, 2_000);
    let outcome = packer(6_000).pack(&units);
    assert_eq!(packed_ids(&outcome.shards), ids(&units));
    assert_eq!(outcome.unit_count(), units.len());
}

#[test]
fn verify_returns_the_packed_units() {
    let units = content_units("DOAGNIS", 12, 300);
    let outcome = packer(1_000_000).pack(&units);
    let decoded = verify_shard(&outcome.shards[0]).unwrap();
    assert_eq!(decoded, units);
}

#[test]
fn scores_without_short_decimal_form_survive_verification() {
    let scores = [
        0.13703577889618127,
        0.1 + 0.2,
        1.0 / 3.0,
        0.7071067811865476,
        2.0f64.sqrt() / 7.0,
    ];
    let units: Vec<ContentUnit> = scores
        .iter()
        .enumerate()
        .map(|(i, score)| {
            let mut unit = content_unit("E1", i as u32, 64);
            unit.authenticity_score = *score;
            unit.score_breakdown.base = score / 1.3;
            unit.score_breakdown.score = *score;
            unit.seal().unwrap();
            unit
        })
        .collect();

    let outcome = ShardPacker::new(&ShardConfig::default()).pack(&units);
    assert!(outcome.dropped.is_empty());
    let decoded = verify_shard(&outcome.shards[0]).unwrap();
    assert_eq!(decoded[0].authenticity_score.to_bits(), 0.13703577889618127f64.to_bits());
    assert_eq!(decoded, units);
}

#[test]
fn shard_root_commits_to_unit_hashes_in_order() {
    let units = content_units("PACASNA", 5, 100);
    let outcome = packer(1_000_000).pack(&units);
    let hashes: Vec<&str> = units.iter().map(|u| u.content_hash.as_str()).collect();
    assert_eq!(outcome.shards[0].merkle_root, merkle::merkle_root(&hashes));
    assert_eq!(outcome.shards[0].merkle_root.len(), 64);
}

#[test]
fn oversized_unit_is_dropped_and_the_rest_packed() {
    let mut units = content_units("DIALIVA", 6, 1_000);
    units.insert(3, content_unit("DIALIVA", 99, 40_000));
    let outcome = packer(8_000).pack(&units);

    assert_eq!(outcome.dropped.len(), 1);
    let failure = &outcome.dropped[0];
    assert_eq!(failure.unit_id, units[3].id);
    assert_eq!(failure.kind, PackFailureKind::Oversized);

    let mut expected = ids(&units);
    expected.remove(3);
    assert_eq!(packed_ids(&outcome.shards), expected);
}

#[test]
fn unsealed_unit_is_deferred_then_dropped() {
    let mut units = content_units("TAOAGLA", 4, 200);
    units[1].authenticity_score = 0.01;
    let outcome = packer(1_000_000).pack(&units);

    assert_eq!(outcome.dropped.len(), 1);
    let failure = &outcome.dropped[0];
    assert_eq!(failure.unit_id, units[1].id);
    assert_eq!(failure.kind, PackFailureKind::Exhausted);
    assert_eq!(failure.attempts, 2);
    assert!(failure.reason.contains("content hash mismatch"));
    assert_eq!(outcome.unit_count(), 3);
}

#[test]
fn empty_input_produces_no_shards() {
    let outcome = packer(8_000).pack(&[]);
    assert!(outcome.shards.is_empty());
    assert!(outcome.dropped.is_empty());
}

fn packed_shard() -> Shard {
    let units = content_units("OCCODON", 6, 200);
    packer(1_000_000).pack(&units).shards.remove(0)
}

#[test]
fn flipped_payload_byte_is_detected() {
    let mut shard = packed_shard();
    let mid = shard.compressed_payload.len() / 2;
    shard.compressed_payload[mid] ^= 0xff;
    assert!(matches!(
        verify_shard(&shard),
        Err(LighthouseError::PackError(PackError::PayloadHashMismatch { .. }))
    ));
}

#[test]
fn forged_merkle_root_is_detected() {
    let mut shard = packed_shard();
    shard.merkle_root = merkle::merkle_root(&["forged"]);
    assert!(matches!(
        verify_shard(&shard),
        Err(LighthouseError::PackError(PackError::MerkleMismatch { .. }))
    ));
}

#[test]
fn edited_unit_with_rebuilt_payload_is_detected() {
    let mut shard = packed_shard();
    let mut units = verify_shard(&shard).unwrap();
    units[2].authenticity_score = 1.0;
    let raw: Vec<u8> = units
        .iter()
        .flat_map(|u| {
            let mut line = serde_json::to_vec(u).unwrap();
            line.push(b'\n');
            line
        })
        .collect();
    let payload = codec::compress(&raw, 3).unwrap();
    shard.raw_size = raw.len();
    shard.byte_size = payload.len();
    shard.payload_hash = blake3::hash(&payload).to_hex().to_string();
    shard.compressed_payload = payload;

    match verify_shard(&shard) {
        Err(LighthouseError::PackError(PackError::ContentHashMismatch { unit_id })) => {
            assert_eq!(unit_id, units[2].id);
        }
        other => panic!("expected content hash mismatch, got {other:?}"),
    }
}

#[test]
fn reordered_unit_list_is_detected() {
    let mut shard = packed_shard();
    shard.unit_ids.swap(0, 1);
    assert!(matches!(
        verify_shard(&shard),
        Err(LighthouseError::PackError(PackError::UnitListMismatch { .. }))
    ));
}

#[test]
fn ceiling_check_rejects_large_shard() {
    let shard = packed_shard();
    assert!(verify_shard_within(&shard, shard.byte_size).is_ok());
    assert!(matches!(
        verify_shard_within(&shard, shard.byte_size - 1),
        Err(LighthouseError::PackError(PackError::SizeExceeded { .. }))
    ));
}

#[test]
fn manifest_summarizes_the_sequence() {
    let units = content_units("PASCOMB", 30, 2_000);
    let shards = packer(6_000).pack(&units).shards;
    let manifest = build_manifest(&shards, fixed_epoch());

    assert_eq!(manifest.shard_count, shards.len());
    assert_eq!(manifest.unit_count, 30);
    assert_eq!(
        manifest.total_bytes,
        shards.iter().map(|s| s.byte_size).sum::<usize>()
    );
    assert!(manifest.largest_shard_bytes <= 6_000);
    assert!(manifest.smallest_shard_bytes <= manifest.largest_shard_bytes);
    assert!(manifest.avg_compression_ratio > 1.0);

    let roots: Vec<&str> = shards.iter().map(|s| s.merkle_root.as_str()).collect();
    assert_eq!(manifest.collection_root, merkle::merkle_root(&roots));
    assert_eq!(manifest.shards.len(), shards.len());
    assert_eq!(manifest.created_at, fixed_epoch());
}

#[test]
fn empty_manifest_is_all_zero() {
    let manifest = build_manifest(&[], fixed_epoch());
    assert_eq!(manifest.shard_count, 0);
    assert_eq!(manifest.largest_shard_bytes, 0);
    assert_eq!(manifest.avg_compression_ratio, 0.0);
    assert_eq!(manifest.collection_root.len(), 64);
}

#[test]
fn memory_sink_requires_sequence_order() {
    let units = content_units("VALGARS", 30, 2_000);
    let shards = packer(6_000).pack(&units).shards;
    assert!(shards.len() >= 2);

    let mut sink = MemoryShardSink::new();
    assert!(sink.persist(&shards[1]).is_err());
    for shard in &shards {
        sink.persist(shard).unwrap();
    }
    sink.persist_manifest(&build_manifest(&shards, fixed_epoch()))
        .unwrap();
    assert_eq!(sink.shards().len(), shards.len());
    assert_eq!(sink.manifest().unwrap().shard_count, shards.len());
}
