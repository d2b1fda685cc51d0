use std::time::Duration;

use lighthouse_batch::{BatchOrchestrator, CancelToken, PipelineGenerator, RetryPolicy};
use lighthouse_core::config::LighthouseConfig;
use lighthouse_store::{KnowledgeStore, PartitionSource, Roster, RosterSource};
use proptest::prelude::*;
use test_fixtures::{entity, fixed_epoch, group, partition_source, PRIMARY};

fn store() -> KnowledgeStore {
    KnowledgeStore::load(vec![
        partition_source(PRIMARY, true, 6),
        partition_source("Thelema", false, 3),
        PartitionSource::new("Broken", false),
    ])
    .unwrap()
}

fn roster(broken: &[bool]) -> Roster {
    let entities = broken
        .iter()
        .enumerate()
        .map(|(i, b)| {
            let p = if *b { "Broken" } else { "Thelema" };
            entity(&format!("E{i}"), "G1", &[(p, 1.0)])
        })
        .collect();
    Roster::load(RosterSource {
        groups: vec![group("G1", 1)],
        entities,
    })
    .unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn outcome_counts_always_balance(
        broken in prop::collection::vec(any::<bool>(), 1..5),
        quota in 1usize..6,
        workers in 1usize..5,
    ) {
        let store = store();
        let roster = roster(&broken);
        let config = LighthouseConfig::default();
        let generator = PipelineGenerator::new(&store, &roster, &config, fixed_epoch());
        let batch = BatchOrchestrator::new(&generator, &config.batch)
            .with_policy(RetryPolicy { max_retries: 1, backoff_base: Duration::ZERO, backoff_max: Duration::ZERO })
            .run_batch(roster.entities(), quota, workers, &CancelToken::new());

        let broken_count = broken.iter().filter(|b| **b).count();
        prop_assert_eq!(batch.target_count, broken.len() * quota);
        prop_assert_eq!(batch.produced_count() + batch.failed_count, batch.attempted_count);
        prop_assert_eq!(batch.attempted_count + batch.cancelled_count, batch.target_count);
        prop_assert_eq!(batch.failed_count, broken_count * quota);
        prop_assert_eq!(batch.produced_count(), (broken.len() - broken_count) * quota);
    }
}
