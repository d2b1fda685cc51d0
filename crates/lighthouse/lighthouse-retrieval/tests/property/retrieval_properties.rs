use lighthouse_core::config::PrimacyConfig;
use lighthouse_retrieval::{RetrievalSampler, UnitSeed, WeightResolver};
use proptest::prelude::*;
use test_fixtures::{entity, full_store, PRIMARY, SECONDARY_PARTITIONS};

fn affinities() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(0.0f64..10.0, SECONDARY_PARTITIONS.len())
}

proptest! {
    #[test]
    fn weights_always_sum_to_one(f in 0.01f64..=1.0, declared in affinities(), primary_decl in 0.0f64..5.0) {
        let mut pairs: Vec<(&str, f64)> = SECONDARY_PARTITIONS.iter().copied().zip(declared).collect();
        pairs.push((PRIMARY, primary_decl));
        let w = WeightResolver::new(&PrimacyConfig { primary_weight: f }, PRIMARY)
            .resolve(&entity("E", "G", &pairs));
        prop_assert!(w.is_normalized(), "sum = {}", w.sum());
        prop_assert!(w.iter().all(|(_, x)| x >= 0.0));
        let has_secondary = w.iter().any(|(id, x)| id != PRIMARY && x > 0.0);
        if has_secondary {
            prop_assert!((w.primary_weight() - f).abs() < 1e-12);
        } else {
            prop_assert_eq!(w.primary_weight(), 1.0);
        }
    }

    #[test]
    fn every_sample_contains_a_primary_fragment(
        declared in affinities(),
        k in 1usize..12,
        batch_seed in any::<u64>(),
        unit in 0u32..1000,
    ) {
        let store = full_store(8);
        let pairs: Vec<(&str, f64)> = SECONDARY_PARTITIONS.iter().copied().zip(declared).collect();
        let weights = WeightResolver::new(&PrimacyConfig::default(), PRIMARY)
            .resolve(&entity("E", "G", &pairs));
        let outcome = RetrievalSampler::sample(&store, &weights, k, UnitSeed::derive(batch_seed, "E", unit)).unwrap();
        prop_assert_eq!(outcome.fragments().len(), k);
        prop_assert!(outcome.fragments().iter().any(|s| s.partition_id == PRIMARY));
    }

    #[test]
    fn sampling_is_deterministic(batch_seed in any::<u64>(), unit in 0u32..1000, k in 1usize..10) {
        let store = full_store(4);
        let weights = WeightResolver::new(&PrimacyConfig::default(), PRIMARY)
            .resolve(&entity("E", "G", &[("Thelema", 1.0), ("Alchemy", 2.0)]));
        let seed = UnitSeed::derive(batch_seed, "E", unit);
        let a = RetrievalSampler::sample(&store, &weights, k, seed).unwrap();
        let b = RetrievalSampler::sample(&store, &weights, k, seed).unwrap();
        prop_assert_eq!(a, b);
    }
}
