//! LighthouseRuntime: owns config, store, roster and the observability engine.

use std::sync::{Mutex, MutexGuard};

use chrono::Utc;
use lighthouse_batch::{BatchOrchestrator, CancelToken, PipelineGenerator};
use lighthouse_core::config::LighthouseConfig;
use lighthouse_core::errors::LighthouseResult;
use lighthouse_core::models::{BatchReport, GenerationBatch, Shard, ShardManifest};
use lighthouse_core::traits::IShardSink;
use lighthouse_observability::{init_tracing, DegradationEvent, ObservabilityEngine};
use lighthouse_shard::{build_manifest, PackFailure, ShardPacker};
use lighthouse_store::{KnowledgeStore, Roster};
use tracing::{info, warn};

/// Degradation component for partition exhaustion during sampling.
const SAMPLER_COMPONENT: &str = "sampler";

/// Inputs for [`LighthouseRuntime::new`].
#[derive(Debug, Clone, Default)]
pub struct RuntimeOptions {
    /// TOML configuration string. If None, uses defaults.
    pub config_toml: Option<String>,
    /// Knowledge bundle JSON.
    pub knowledge_json: String,
    /// Roster JSON.
    pub roster_json: String,
}

/// Everything one run produced.
#[derive(Debug)]
pub struct RunOutput {
    pub batch: GenerationBatch,
    pub shards: Vec<Shard>,
    pub dropped: Vec<PackFailure>,
    pub manifest: ShardManifest,
    pub report: BatchReport,
}

pub struct LighthouseRuntime {
    pub config: LighthouseConfig,
    pub store: KnowledgeStore,
    pub roster: Roster,
    pub observability: Mutex<ObservabilityEngine>,
}

impl LighthouseRuntime {
    /// Load and validate every input. Any error here is a configuration
    /// error and should stop the process.
    pub fn new(opts: RuntimeOptions) -> LighthouseResult<Self> {
        let config = match &opts.config_toml {
            Some(toml_str) => LighthouseConfig::from_toml(toml_str)?,
            None => LighthouseConfig::default(),
        };
        init_tracing(&config.observability)?;

        let store = KnowledgeStore::from_json(&opts.knowledge_json)?;
        let roster = Roster::from_json(&opts.roster_json)?;
        if config.roster.require_canonical_shape {
            roster.check_canonical_shape()?;
        }

        info!(
            partitions = store.partitions().len(),
            fragments = store.fragment_count(),
            entities = roster.entities().len(),
            groups = roster.groups().len(),
            "runtime initialized"
        );

        Ok(Self {
            config,
            store,
            roster,
            observability: Mutex::new(ObservabilityEngine::new()),
        })
    }

    /// Generate a batch for the whole roster, pack it, and hand every shard
    /// plus the manifest to `sink` in sequence order.
    ///
    /// Unit and packing failures are counted, not returned. Only a sink
    /// error aborts the run.
    pub fn run(&self, cancel: &CancelToken, sink: &mut dyn IShardSink) -> LighthouseResult<RunOutput> {
        let batch_config = &self.config.batch;
        let created_at = batch_config.clock_epoch.unwrap_or_else(Utc::now);

        let generator = PipelineGenerator::new(&self.store, &self.roster, &self.config, created_at);
        let batch = BatchOrchestrator::new(&generator, batch_config).run_batch(
            self.roster.entities(),
            batch_config.per_entity_quota,
            batch_config.effective_worker_count(),
            cancel,
        );

        let outcome = ShardPacker::new(&self.config.shard).pack(&batch.produced_units);
        for shard in &outcome.shards {
            sink.persist(shard)?;
        }
        let manifest = build_manifest(&outcome.shards, created_at);
        sink.persist_manifest(&manifest)?;

        let report = batch.report();
        {
            let mut engine = self.engine();
            engine.record_batch(&report, batch.degraded_count, batch.retry_count);
            engine.record_shards(&outcome.shards, outcome.dropped.len());
            if batch.degraded_count > 0 {
                engine.record_degradation(DegradationEvent::new(
                    SAMPLER_COMPONENT,
                    format!("{} unit(s) exhausted a partition", batch.degraded_count),
                    "sampling with replacement",
                ));
            } else {
                engine.mark_recovered(SAMPLER_COMPONENT);
            }
        }
        if !outcome.dropped.is_empty() {
            warn!(dropped = outcome.dropped.len(), "units dropped during packing");
        }

        Ok(RunOutput {
            batch,
            shards: outcome.shards,
            dropped: outcome.dropped,
            manifest,
            report,
        })
    }

    /// Lock the observability engine, recovering it if a previous holder panicked.
    pub fn engine(&self) -> MutexGuard<'_, ObservabilityEngine> {
        self.observability
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
