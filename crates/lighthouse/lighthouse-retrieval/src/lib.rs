//! # lighthouse-retrieval
//!
//! Weight resolution (fixed Primary share, proportional remainder) and the
//! seeded sampler that draws fragments for one content unit.

pub mod sampler;
pub mod seed;
pub mod weights;

pub use sampler::{RetrievalSampler, SampleOutcome, SampledFragment};
pub use seed::UnitSeed;
pub use weights::WeightResolver;
