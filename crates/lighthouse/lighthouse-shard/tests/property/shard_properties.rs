use lighthouse_core::config::ShardConfig;
use lighthouse_shard::{verify_shard_within, ShardPacker};
use proptest::prelude::*;
use test_fixtures::content_unit;

const CEILING: usize = 6_000;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn packing_preserves_units_and_ceiling(noise in prop::collection::vec(0usize..3_000, 0..40)) {
        let units: Vec<_> = noise
            .iter()
            .enumerate()
            .map(|(i, n)| content_unit("PROP", i as u32, *n))
            .collect();
        let packer = ShardPacker::new(&ShardConfig {
            byte_ceiling: CEILING,
            compression_level: 3,
            max_pack_attempts: 2,
        });
        let outcome = packer.pack(&units);

        prop_assert!(outcome.dropped.is_empty());
        let packed: Vec<String> = outcome.shards.iter().flat_map(|s| s.unit_ids.clone()).collect();
        let input: Vec<String> = units.iter().map(|u| u.id.clone()).collect();
        prop_assert_eq!(packed, input);

        for (i, shard) in outcome.shards.iter().enumerate() {
            prop_assert_eq!(shard.sequence_index, i as u64);
            prop_assert!(shard.byte_size <= CEILING);
            prop_assert!(verify_shard_within(shard, CEILING).is_ok());
        }
    }
}
