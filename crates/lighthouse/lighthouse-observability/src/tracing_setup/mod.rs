//! Subscriber installation, span macros, and structured event helpers.

pub mod events;
pub mod spans;

use std::sync::OnceLock;

use lighthouse_core::config::ObservabilityConfig;
use lighthouse_core::errors::{LighthouseError, LighthouseResult};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

static INITIALIZED: OnceLock<()> = OnceLock::new();

/// Install the global `fmt` subscriber. `RUST_LOG` overrides the configured
/// level. Calling it again, or after the host installed its own subscriber,
/// is a no-op.
pub fn init_tracing(config: &ObservabilityConfig) -> LighthouseResult<()> {
    if INITIALIZED.get().is_some() {
        return Ok(());
    }

    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.log_level).map_err(|e| {
            LighthouseError::ConfigError(format!(
                "observability.log_level {:?}: {e}",
                config.log_level
            ))
        })?,
    };

    let registry = tracing_subscriber::registry().with(filter);
    let installed = if config.json_logs {
        registry.with(fmt::layer().json()).try_init()
    } else {
        registry.with(fmt::layer()).try_init()
    };
    if let Err(e) = installed {
        tracing::debug!(error = %e, "global subscriber already installed");
    }

    let _ = INITIALIZED.set(());
    Ok(())
}
