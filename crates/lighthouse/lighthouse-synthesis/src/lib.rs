//! # lighthouse-synthesis
//!
//! Turns a sample of fragments into a scored [`ContentUnit`].
//!
//! [`ContentUnit`]: lighthouse_core::models::ContentUnit

pub mod scoring;
pub mod stages;
pub mod synthesizer;

pub use scoring::{AuthenticityScorer, DraftFragment, UnitDraft};
pub use synthesizer::{ContentSynthesizer, SynthesisRequest};
