//! Command handlers -- one module per subcommand

pub mod config;
pub mod delete;
pub mod open;
pub mod reports;
pub mod show;
pub mod upload;

use solaudit_core::config::SolauditConfig;

use crate::cli::{Commands, OutputFormat};
use crate::context::{AppContext, ConfigSource};
use crate::error::CliError;
use crate::output::OutputWriter;

/// Run a subcommand.
///
/// `config` only needs the loaded configuration; every other command
/// connects to the report service first.
pub async fn dispatch(
    command: Commands,
    loaded: Result<SolauditConfig, CliError>,
    source: &ConfigSource,
    format: OutputFormat,
) -> Result<(), CliError> {
    match command {
        Commands::Config(args) => {
            config::execute(args, source.path(), loaded, &OutputWriter::new(format))
        }
        Commands::Upload(args) => upload::execute(args, &connect(loaded, format)?).await,
        Commands::Reports(args) => reports::execute(args, &connect(loaded, format)?).await,
        Commands::Show(args) => show::execute(args, &connect(loaded, format)?).await,
        Commands::Delete(args) => delete::execute(args, &connect(loaded, format)?).await,
        Commands::Open(args) => open::execute(args, &connect(loaded, format)?).await,
    }
}

fn connect(
    loaded: Result<SolauditConfig, CliError>,
    format: OutputFormat,
) -> Result<AppContext, CliError> {
    AppContext::new(&loaded?, format)
}
