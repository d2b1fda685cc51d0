/// Unit generation errors surfaced by the batch orchestrator.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("transient generation failure: {reason}")]
    Transient { reason: String },

    #[error("unit timed out after {elapsed_ms}ms (limit {limit_ms}ms)")]
    TimedOut { elapsed_ms: u64, limit_ms: u64 },

    #[error("unit task cancelled")]
    Cancelled,

    #[error("unit generator panicked: {reason}")]
    Panicked { reason: String },
}
