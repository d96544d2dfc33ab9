//! stderr tracing setup for `solaudit`.
//!
//! stdout carries command output (text tables or JSON), so every log line
//! goes to stderr. Level and format come from `[general]`; `RUST_LOG` wins
//! over `log_level` when set.

use anyhow::{Result, anyhow};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

use solaudit_core::config::GeneralConfig;

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Install the process-wide subscriber.
///
/// A second call fails because a global subscriber is already set.
pub fn init_tracing(config: &GeneralConfig) -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    let layer = stderr_layer(&config.log_format)?;

    tracing_subscriber::registry()
        .with(layer)
        .with(filter)
        .try_init()
        .map_err(|e| anyhow!("failed to install {} log subscriber: {}", config.log_format, e))
}

/// `json` emits one object per event, `pretty` is for reading in a terminal.
fn stderr_layer(format: &str) -> Result<BoxedLayer> {
    let base = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);
    match format {
        "json" => Ok(base.json().boxed()),
        "pretty" => Ok(base.pretty().boxed()),
        other => Err(anyhow!(
            "unknown log format '{}', expected 'json' or 'pretty'",
            other
        )),
    }
}
