mod generation_error;
mod pack_error;
mod roster_error;
mod sampling_error;
mod store_error;

pub use generation_error::GenerationError;
pub use pack_error::PackError;
pub use roster_error::RosterError;
pub use sampling_error::SamplingError;
pub use store_error::StoreError;

/// Convenience alias used across the workspace.
pub type LighthouseResult<T> = Result<T, LighthouseError>;

/// Top-level error for every Lighthouse subsystem.
#[derive(Debug, thiserror::Error)]
pub enum LighthouseError {
    #[error("store error: {0}")]
    StoreError(#[from] StoreError),

    #[error("roster error: {0}")]
    RosterError(#[from] RosterError),

    #[error("sampling error: {0}")]
    SamplingError(#[from] SamplingError),

    #[error("generation error: {0}")]
    GenerationError(#[from] GenerationError),

    #[error("pack error: {0}")]
    PackError(#[from] PackError),

    #[error("invalid configuration: {reason}")]
    InvalidConfiguration { reason: String },

    #[error("config error: {0}")]
    ConfigError(String),

    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl LighthouseError {
    /// Configuration-class errors stop the process at startup. Everything
    /// else is recovered at unit, task or shard level.
    pub fn is_fatal(&self) -> bool {
        match self {
            Self::InvalidConfiguration { .. } | Self::ConfigError(_) | Self::RosterError(_) => true,
            Self::StoreError(e) => e.is_load_error(),
            _ => false,
        }
    }

    /// Whether a unit task that hit this error may be attempted again.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::GenerationError(GenerationError::Cancelled | GenerationError::Panicked { .. }) => {
                false
            }
            other => !other.is_fatal(),
        }
    }
}
