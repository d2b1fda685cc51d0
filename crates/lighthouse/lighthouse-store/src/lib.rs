//! # lighthouse-store
//!
//! Immutable knowledge store (partitions of fragments, one Primary) and the
//! entity roster. Both are validated once at load and shared by reference
//! afterwards.

pub mod bundle;
pub mod roster;
pub mod store;

pub use bundle::{KnowledgeBundle, PartitionSource};
pub use roster::{Roster, RosterSource};
pub use store::KnowledgeStore;
