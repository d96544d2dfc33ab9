//! Solaudit CLI -- upload contracts and browse audit reports from the terminal.

mod cli;
mod commands;
mod context;
mod error;
mod logging;
mod notifier;
mod output;

use clap::Parser;
use colored::Colorize;

use solaudit_core::config::GeneralConfig;

use crate::cli::Cli;
use crate::context::{ConfigSource, Overrides};
use crate::error::CliError;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let source = ConfigSource::new(cli.config.as_deref());
    let overrides = Overrides::from_cli(&cli);

    let loaded = match source.load().await {
        Ok(mut config) => overrides.apply(&mut config).map(|()| config),
        Err(e) => Err(e),
    };

    // Logging must work even when the config file is broken.
    let mut general = loaded
        .as_ref()
        .map(|config| config.general.clone())
        .unwrap_or_else(|_| GeneralConfig::default());
    if let Some(level) = &cli.log_level {
        general.log_level = level.clone();
    }
    if let Err(e) = logging::init_tracing(&general) {
        eprintln!("{} {}", "warning:".yellow().bold(), e);
    }

    solaudit_core::metrics::describe_all();
    tracing::debug!(config = %source.path().display(), "solaudit starting");

    if let Err(e) = commands::dispatch(cli.command, loaded, &source, cli.output).await {
        report_error(&e);
        std::process::exit(e.exit_code());
    }

    Ok(())
}

fn report_error(e: &CliError) {
    eprintln!("{} {}", "error:".red().bold(), e);
    if e.offers_home_link() {
        eprintln!("  Go to Homepage: {}", "solaudit open /".bold());
    }
}
