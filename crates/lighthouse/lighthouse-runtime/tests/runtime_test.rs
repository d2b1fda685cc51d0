use lighthouse_batch::CancelToken;
use lighthouse_core::errors::{LighthouseError, LighthouseResult, PackError};
use lighthouse_core::models::{Shard, ShardManifest};
use lighthouse_core::traits::IShardSink;
use lighthouse_runtime::{LighthouseRuntime, RuntimeOptions};
use lighthouse_shard::{verify_shard_within, MemoryShardSink};
use test_fixtures::{fixed_epoch, knowledge_bundle_json, roster_json};

const CONFIG: &str = r#"
[batch]
per_entity_quota = 4
worker_count = 2
backoff_base_ms = 0
backoff_max_ms = 0
clock_epoch = "2024-01-01T00:00:00Z"

[observability]
log_level = "warn"
"#;

fn options(config_toml: Option<&str>) -> RuntimeOptions {
    RuntimeOptions {
        config_toml: config_toml.map(str::to_string),
        knowledge_json: knowledge_bundle_json(),
        roster_json: roster_json(),
    }
}

fn runtime() -> LighthouseRuntime {
    LighthouseRuntime::new(options(Some(CONFIG))).unwrap()
}

#[test]
fn full_run_produces_verifiable_shards() {
    let runtime = runtime();
    let mut sink = MemoryShardSink::new();
    let output = runtime.run(&CancelToken::new(), &mut sink).unwrap();

    assert_eq!(output.batch.target_count, 28);
    assert_eq!(output.batch.produced_count(), 28);
    assert_eq!(output.report.produced_count, 28);
    assert!(output.dropped.is_empty());

    let ceiling = runtime.config.shard.byte_ceiling;
    for shard in &output.shards {
        let units = verify_shard_within(shard, ceiling).unwrap();
        assert!(units.iter().all(|u| u.created_at == fixed_epoch()));
    }
    assert_eq!(output.manifest.unit_count, 28);
    assert_eq!(output.manifest.created_at, fixed_epoch());
    assert_eq!(sink.shards().len(), output.shards.len());
    assert_eq!(sink.manifest(), Some(&output.manifest));
}

#[test]
fn pinned_clock_makes_runs_reproducible() {
    let first = runtime().run(&CancelToken::new(), &mut MemoryShardSink::new()).unwrap();
    let second = runtime().run(&CancelToken::new(), &mut MemoryShardSink::new()).unwrap();

    assert_eq!(first.manifest.collection_root, second.manifest.collection_root);
    let payloads = |shards: &[Shard]| -> Vec<String> {
        shards.iter().map(|s| s.payload_hash.clone()).collect()
    };
    assert_eq!(payloads(&first.shards), payloads(&second.shards));
    assert_ne!(first.batch.id, second.batch.id);
}

#[test]
fn run_is_recorded_in_observability() {
    let runtime = runtime();
    let output = runtime.run(&CancelToken::new(), &mut MemoryShardSink::new()).unwrap();

    let engine = runtime.engine();
    assert_eq!(engine.metrics.batch.total_runs, 1);
    assert_eq!(engine.metrics.batch.units_produced, 28);
    assert_eq!(engine.metrics.shard.shards_sealed, output.shards.len() as u64);
    assert_eq!(engine.metrics.shard.units_packed, 28);
    assert_eq!(
        engine.degradation.is_degraded("sampler"),
        output.batch.degraded_count > 0
    );
}

#[test]
fn cancelled_run_still_reports() {
    let runtime = runtime();
    let token = CancelToken::new();
    token.cancel();
    let output = runtime.run(&token, &mut MemoryShardSink::new()).unwrap();

    assert_eq!(output.batch.produced_count(), 0);
    assert_eq!(output.batch.cancelled_count, 28);
    assert!(output.shards.is_empty());
    assert_eq!(output.manifest.shard_count, 0);
}

#[test]
fn defaults_apply_without_config() {
    let runtime = LighthouseRuntime::new(options(None)).unwrap();
    assert_eq!(runtime.config.batch.per_entity_quota, 100);
    assert_eq!(runtime.roster.entities().len(), 7);
}

#[test]
fn invalid_config_is_fatal() {
    let err = LighthouseRuntime::new(options(Some("[primacy]\nprimary_weight = 1.5\n")))
        .err()
        .unwrap();
    assert!(err.is_fatal());
}

#[test]
fn malformed_knowledge_is_fatal() {
    let mut opts = options(Some(CONFIG));
    opts.knowledge_json = "{ \"partitions\": [".into();
    assert!(LighthouseRuntime::new(opts).err().unwrap().is_fatal());
}

#[test]
fn small_roster_fails_canonical_shape_check() {
    let config = format!("{CONFIG}\n[roster]\nrequire_canonical_shape = true\n");
    let err = LighthouseRuntime::new(options(Some(&config))).err().unwrap();
    assert!(matches!(err, LighthouseError::RosterError(_)));
    assert!(err.is_fatal());
}

/// Accepts nothing.
struct RefusingSink;

impl IShardSink for RefusingSink {
    fn persist(&mut self, _shard: &Shard) -> LighthouseResult<()> {
        Err(PackError::Persist {
            reason: "ledger offline".into(),
        }
        .into())
    }

    fn persist_manifest(&mut self, _manifest: &ShardManifest) -> LighthouseResult<()> {
        Ok(())
    }
}

#[test]
fn sink_failure_aborts_the_run() {
    let err = runtime().run(&CancelToken::new(), &mut RefusingSink).err().unwrap();
    assert!(err.to_string().contains("ledger offline"));
}
