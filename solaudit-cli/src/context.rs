//! Configuration loading and shared command context
//!
//! Precedence: CLI flag > environment (`SOLAUDIT_*`) > file > defaults.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::debug;

use solaudit_client::{ClientConfig, HttpReportStore, Notifier, ReportService};
use solaudit_core::config::{DEFAULT_CONFIG_PATH, SolauditConfig};

use crate::cli::{Cli, OutputFormat};
use crate::error::CliError;
use crate::notifier::TerminalNotifier;
use crate::output::OutputWriter;

/// Where the configuration comes from.
#[derive(Debug, Clone)]
pub struct ConfigSource {
    path: PathBuf,
    explicit: bool,
}

impl ConfigSource {
    /// An explicitly given path must exist; the default path may be absent.
    pub fn new(path: Option<&Path>) -> Self {
        match path {
            Some(path) => Self {
                path: path.to_path_buf(),
                explicit: true,
            },
            None => Self {
                path: PathBuf::from(DEFAULT_CONFIG_PATH),
                explicit: false,
            },
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the file with env overrides applied.
    pub async fn load(&self) -> Result<SolauditConfig, CliError> {
        let config = if self.explicit {
            SolauditConfig::load(&self.path).await?
        } else {
            SolauditConfig::load_or_default(&self.path).await?
        };
        debug!(path = %self.path.display(), explicit = self.explicit, "configuration loaded");
        Ok(config)
    }
}

/// Global flags that override file and environment values.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub log_level: Option<String>,
    pub base_url: Option<String>,
}

impl Overrides {
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            log_level: cli.log_level.clone(),
            base_url: cli.base_url.clone(),
        }
    }

    /// Apply flags and re-validate.
    pub fn apply(&self, config: &mut SolauditConfig) -> Result<(), CliError> {
        if let Some(level) = &self.log_level {
            config.general.log_level = level.clone();
        }
        if let Some(url) = &self.base_url {
            config.backend.base_url = url.clone();
        }
        config.validate()?;
        Ok(())
    }
}

/// Everything a report command needs.
pub struct AppContext {
    pub client: ClientConfig,
    pub service: ReportService<HttpReportStore>,
    pub notifier: Arc<dyn Notifier>,
    pub writer: OutputWriter,
}

impl AppContext {
    pub fn new(config: &SolauditConfig, format: OutputFormat) -> Result<Self, CliError> {
        let client = ClientConfig::from_core(config)?;
        let store = Arc::new(HttpReportStore::new(&client)?);
        debug!(base_url = %store.base_url(), "report store ready");
        Ok(Self {
            client,
            service: ReportService::new(store),
            notifier: Arc::new(TerminalNotifier::stderr()),
            writer: OutputWriter::new(format),
        })
    }

    pub fn store(&self) -> Arc<HttpReportStore> {
        Arc::clone(self.service.store())
    }
}
