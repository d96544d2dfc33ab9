//! `solaudit config` command handler

use std::io::Write;
use std::path::Path;

use serde::Serialize;
use tracing::info;

use solaudit_core::config::SolauditConfig;

use crate::cli::{ConfigAction, ConfigArgs};
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Section names accepted by `config show --section`.
pub const SECTIONS: [&str; 4] = ["general", "backend", "reports", "upload"];

/// Execute the `config` command.
///
/// `loaded` is the result of loading `config_path` with env and flag overrides applied.
pub fn execute(
    args: ConfigArgs,
    config_path: &Path,
    loaded: Result<SolauditConfig, CliError>,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    match args.action {
        ConfigAction::Validate => execute_validate(config_path, loaded, writer),
        ConfigAction::Show { section } => execute_show(config_path, loaded, section, writer),
    }
}

/// Report whether the configuration loaded and validated.
///
/// # Errors
///
/// Returns `CliError::Config` if validation fails (parse errors, invalid values).
fn execute_validate(
    config_path: &Path,
    loaded: Result<SolauditConfig, CliError>,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    info!(path = %config_path.display(), "validating configuration");

    let report = validation_report(config_path, &loaded);
    writer.render(&report)?;

    if !report.valid {
        return Err(CliError::Config("configuration is invalid".to_owned()));
    }

    Ok(())
}

fn validation_report(
    config_path: &Path,
    loaded: &Result<SolauditConfig, CliError>,
) -> ConfigValidationReport {
    ConfigValidationReport {
        source: config_path.display().to_string(),
        valid: loaded.is_ok(),
        errors: loaded
            .as_ref()
            .err()
            .map(|e| vec![e.to_string()])
            .unwrap_or_default(),
    }
}

/// Display the effective configuration (file + env overrides + defaults).
///
/// # Errors
///
/// Returns the load error, or `CliError::Command` if the section name is invalid.
fn execute_show(
    config_path: &Path,
    loaded: Result<SolauditConfig, CliError>,
    section: Option<String>,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    info!(path = %config_path.display(), "showing configuration");

    let config = loaded?;
    let report = show_report(config_path, &config, section.as_deref())?;
    writer.render(&report)?;

    Ok(())
}

fn show_report(
    config_path: &Path,
    config: &SolauditConfig,
    section: Option<&str>,
) -> Result<ConfigReport, CliError> {
    let config_toml = match section {
        None => to_toml(config),
        Some("general") => to_toml(&config.general),
        Some("backend") => to_toml(&config.backend),
        Some("reports") => to_toml(&config.reports),
        Some("upload") => to_toml(&config.upload),
        Some(other) => {
            return Err(CliError::Command(format!(
                "unknown section: {} (expected: {})",
                other,
                SECTIONS.join(", ")
            )));
        }
    };

    Ok(ConfigReport {
        source: config_path.display().to_string(),
        section: section.map(str::to_owned),
        config_toml,
    })
}

fn to_toml<T: Serialize>(value: &T) -> String {
    toml::to_string_pretty(value).unwrap_or_else(|e| format!("(serialization error: {})", e))
}

/// Configuration display report.
///
/// The `config_toml` field is skipped during JSON serialization (only used for text rendering).
#[derive(Serialize)]
pub struct ConfigReport {
    /// Configuration file path
    pub source: String,
    /// Optional section name (None = full config)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    /// Serialized TOML configuration
    #[serde(skip)]
    pub config_toml: String,
}

impl Render for ConfigReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        if let Some(ref section) = self.section {
            let section_label = format!("[{}]", section);
            writeln!(
                w,
                "Configuration {} (source: {})",
                section_label.bold(),
                self.source
            )?;
        } else {
            writeln!(w, "Configuration (source: {})", self.source.bold())?;
        }

        writeln!(w)?;
        write!(w, "{}", self.config_toml)?;

        Ok(())
    }
}

/// Configuration validation report.
#[derive(Serialize)]
pub struct ConfigValidationReport {
    /// Configuration file path
    pub source: String,
    /// Whether the configuration is valid
    pub valid: bool,
    /// Validation error messages (empty if valid)
    pub errors: Vec<String>,
}

impl Render for ConfigValidationReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        writeln!(w, "Config Validation: {}", self.source.bold())?;

        if self.valid {
            writeln!(w, "  Result: {}", "VALID".green().bold())?;
        } else {
            writeln!(w, "  Result: {}", "INVALID".red().bold())?;
            for err in &self.errors {
                writeln!(w, "  Error: {}", err.red())?;
            }
        }

        Ok(())
    }
}
