use lighthouse_core::config::*;
use lighthouse_core::LighthouseError;

#[test]
fn config_loads_from_empty_toml_with_all_defaults() {
    let config = LighthouseConfig::from_toml("").unwrap();

    // Primacy defaults
    assert_eq!(config.primacy.primary_weight, 0.60);

    // Sampling / synthesis defaults
    assert_eq!(config.sampling.fragments_per_unit, 5);
    assert_eq!(config.synthesis.stage_count, 4);

    // Scoring defaults
    assert_eq!(config.scoring.primary_multiplier, 1.3);
    assert_eq!(config.scoring.default_multiplier, 1.0);
    assert_eq!(config.scoring.multiplier_for("Hermetic_Qabalah"), 1.2);
    assert_eq!(config.scoring.multiplier_for("Chaos_Magic"), 1.05);
    assert_eq!(config.scoring.multiplier_for("Unlisted"), 1.0);
    assert_eq!(config.scoring.primary_source_bonus, 0.10);
    assert_eq!(config.scoring.primacy_bonus, 0.05);
    assert_eq!(config.scoring.missing_citation_penalty, 0.15);
    assert!(config.scoring.default_keywords.iter().any(|k| k == "enochian"));

    // Batch defaults
    assert_eq!(config.batch.worker_count, 0);
    assert!(config.batch.effective_worker_count() >= 1);
    assert_eq!(config.batch.per_entity_quota, 100);
    assert_eq!(config.batch.max_retries, 3);
    assert_eq!(config.batch.unit_timeout_ms, 5_000);
    assert!(config.batch.clock_epoch.is_none());

    // Shard defaults
    assert_eq!(config.shard.byte_ceiling, 1_000_000);
    assert_eq!(config.shard.max_pack_attempts, 2);

    // Roster / observability defaults
    assert!(!config.roster.require_canonical_shape);
    assert_eq!(config.observability.log_level, "info");
    assert!(!config.observability.json_logs);
}

#[test]
fn config_loads_partial_toml_with_overrides() {
    let toml = r#"
[primacy]
primary_weight = 0.75

[batch]
worker_count = 8
per_entity_quota = 10
clock_epoch = "2024-01-01T00:00:00Z"

[shard]
byte_ceiling = 4096
"#;
    let config = LighthouseConfig::from_toml(toml).unwrap();
    assert_eq!(config.primacy.primary_weight, 0.75);
    assert_eq!(config.batch.worker_count, 8);
    assert_eq!(config.batch.effective_worker_count(), 8);
    assert_eq!(config.batch.per_entity_quota, 10);
    assert!(config.batch.clock_epoch.is_some());
    assert_eq!(config.shard.byte_ceiling, 4096);
    // Non-overridden fields keep defaults
    assert_eq!(config.batch.max_retries, 3);
    assert_eq!(config.shard.compression_level, 12);
    assert_eq!(config.sampling.fragments_per_unit, 5);
}

#[test]
fn config_roundtrips_through_toml() {
    let config = LighthouseConfig::default();
    let text = config.to_toml().unwrap();
    let back = LighthouseConfig::from_toml(&text).unwrap();
    assert_eq!(back.primacy.primary_weight, config.primacy.primary_weight);
    assert_eq!(
        back.scoring.partition_multipliers,
        config.scoring.partition_multipliers
    );
}

#[test]
fn malformed_toml_is_a_fatal_config_error() {
    let err = LighthouseConfig::from_toml("[primacy\nprimary_weight = ").unwrap_err();
    assert!(matches!(err, LighthouseError::ConfigError(_)));
    assert!(err.is_fatal());
}

#[test]
fn primary_weight_out_of_range_is_rejected() {
    for bad in ["0.0", "1.5", "-0.2"] {
        let toml = format!("[primacy]\nprimary_weight = {bad}\n");
        assert!(LighthouseConfig::from_toml(&toml).is_err(), "accepted {bad}");
    }
    assert!(LighthouseConfig::from_toml("[primacy]\nprimary_weight = 1.0\n").is_ok());
}

#[test]
fn fragments_must_cover_stage_count() {
    let toml = "[sampling]\nfragments_per_unit = 3\n[synthesis]\nstage_count = 4\n";
    let err = LighthouseConfig::from_toml(toml).unwrap_err();
    assert!(err.to_string().contains("stage_count"));
}

#[test]
fn primary_multiplier_must_dominate_every_other_multiplier() {
    let toml = r#"
[scoring]
primary_multiplier = 1.3

[scoring.partition_multipliers]
Thelema = 1.4
"#;
    let err = LighthouseConfig::from_toml(toml).unwrap_err();
    assert!(err.to_string().contains("Thelema"));

    let toml = "[scoring]\nprimary_multiplier = 0.9\n";
    assert!(LighthouseConfig::from_toml(toml).is_err());
}

#[test]
fn shard_and_batch_limits_are_validated() {
    assert!(LighthouseConfig::from_toml("[shard]\nbyte_ceiling = 0\n").is_err());
    assert!(LighthouseConfig::from_toml("[shard]\ncompression_level = 30\n").is_err());
    assert!(LighthouseConfig::from_toml("[shard]\nmax_pack_attempts = 0\n").is_err());
    assert!(LighthouseConfig::from_toml("[batch]\nunit_timeout_ms = 0\n").is_err());
    assert!(
        LighthouseConfig::from_toml("[batch]\nbackoff_base_ms = 50\nbackoff_max_ms = 10\n")
            .is_err()
    );
}
