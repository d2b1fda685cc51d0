//! Test fixtures for the Lighthouse workspace: JSON fixture files under
//! `data/` plus in-memory builders for stores and rosters.

pub mod builders;

use serde::de::DeserializeOwned;
use std::path::PathBuf;

pub use builders::*;

/// Root directory of the fixture data files.
fn fixtures_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data")
}

/// Load and deserialize a JSON fixture file.
///
/// # Panics
/// Panics if the file doesn't exist or can't be deserialized.
pub fn load_fixture<T: DeserializeOwned>(relative_path: &str) -> T {
    let content = read_fixture(relative_path);
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture {relative_path}: {e}"))
}

/// Read a fixture file as a string.
pub fn read_fixture(relative_path: &str) -> String {
    let path = fixtures_root().join(relative_path);
    std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e))
}

pub fn fixture_exists(relative_path: &str) -> bool {
    fixtures_root().join(relative_path).exists()
}

/// Absolute path to a fixture file.
pub fn fixture_path(relative_path: &str) -> PathBuf {
    fixtures_root().join(relative_path)
}

/// Four-partition knowledge bundle with citations and one dangling cross reference.
pub fn knowledge_bundle_json() -> String {
    read_fixture("knowledge_bundle.json")
}

/// Three-group, seven-entity roster matching `knowledge_bundle.json`.
pub fn roster_json() -> String {
    read_fixture("roster_small.json")
}
