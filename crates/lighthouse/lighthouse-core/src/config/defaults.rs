// Single source of truth for all default values.

// --- Primacy ---
pub const DEFAULT_PRIMARY_WEIGHT: f64 = 0.60;

// --- Sampling ---
pub const DEFAULT_FRAGMENTS_PER_UNIT: usize = 5;

// --- Synthesis ---
pub const DEFAULT_STAGE_COUNT: usize = 4;

// --- Scoring ---
pub const DEFAULT_PRIMARY_MULTIPLIER: f64 = 1.3;
pub const DEFAULT_PARTITION_MULTIPLIER: f64 = 1.0;
pub const DEFAULT_PRIMARY_SOURCE_BONUS: f64 = 0.10;
pub const DEFAULT_PRIMARY_SOURCE_RELIABILITY: f64 = 0.9;
pub const DEFAULT_PRIMACY_BONUS: f64 = 0.05;
pub const DEFAULT_PRIMACY_BONUS_MIN_FRAGMENTS: usize = 2;
pub const DEFAULT_MISSING_CITATION_PENALTY: f64 = 0.15;

/// Per-partition multipliers for the non-primary traditions.
pub const DEFAULT_PARTITION_MULTIPLIERS: &[(&str, f64)] = &[
    ("Hermetic_Qabalah", 1.2),
    ("Thelema", 1.15),
    ("Golden_Dawn", 1.1),
    ("Alchemy", 1.1),
    ("Chaos_Magic", 1.05),
];

/// Lexicon checked against fragments whose partition declares no keywords.
pub const DEFAULT_KEYWORDS: &[&str] = &[
    "enochian",
    "aethyr",
    "governor",
    "angel",
    "dee",
    "kelley",
    "watchtower",
    "tablet",
    "sigil",
    "invocation",
    "scrying",
    "vision",
    "liber",
    "chanokh",
    "spiritual",
    "divine",
    "sacred",
    "mystical",
    "wisdom",
    "enlightenment",
];

// --- Batch ---
/// 0 = one worker per available core.
pub const DEFAULT_WORKER_COUNT: usize = 0;
pub const DEFAULT_PER_ENTITY_QUOTA: usize = 100;
pub const DEFAULT_BATCH_SEED: u64 = 42;
pub const DEFAULT_MAX_RETRIES: u32 = 3;
pub const DEFAULT_BACKOFF_BASE_MS: u64 = 10;
pub const DEFAULT_BACKOFF_MAX_MS: u64 = 1_000;
pub const DEFAULT_UNIT_TIMEOUT_MS: u64 = 5_000;

// --- Shard ---
pub const DEFAULT_SHARD_BYTE_CEILING: usize = 1_000_000; // under 1 MiB
pub const DEFAULT_COMPRESSION_LEVEL: i32 = 12;
pub const DEFAULT_MAX_PACK_ATTEMPTS: u32 = 2;

// --- Roster ---
pub const DEFAULT_REQUIRE_CANONICAL_SHAPE: bool = false;

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_JSON_LOGS: bool = false;
