//! Degradation tracking.

pub mod tracker;

pub use tracker::{DegradationEpisode, DegradationEvent, DegradationTracker};
