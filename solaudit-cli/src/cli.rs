//! CLI argument parsing using clap derive API
//!
//! This module defines the command-line interface structure using clap's derive macros.
//! It is purely declarative with no side effects or I/O.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use solaudit_core::types::{ReportId, SortField, SortOrder};

/// Solaudit -- smart contract audit report client.
///
/// Use `solaudit <COMMAND> --help` for subcommand details.
#[derive(Parser, Debug)]
#[command(name = "solaudit", version, about, long_about = None)]
pub struct Cli {
    /// Path to the solaudit.toml configuration file (default: ./solaudit.toml if present).
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Override log level (trace, debug, info, warn, error).
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Override the report service base URL.
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Output format.
    #[arg(long, global = true, default_value = "text")]
    pub output: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Supported output formats.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table / text output.
    Text,
    /// Machine-readable JSON.
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Upload a Solidity contract for auditing.
    Upload(UploadArgs),

    /// List, search and sort audit reports.
    Reports(ReportsArgs),

    /// Show a single audit report.
    Show(ShowArgs),

    /// Delete an audit report.
    Delete(DeleteArgs),

    /// Open a page by path (/, /about, /reports, /reports/<id>).
    Open(OpenArgs),

    /// Manage configuration.
    Config(ConfigArgs),
}

// ---- upload ----

/// Upload a contract file and show the resulting report.
#[derive(Args, Debug)]
pub struct UploadArgs {
    /// Contract file to upload (.sol).
    pub file: PathBuf,

    /// Only print the new report id instead of the full report.
    #[arg(long)]
    pub no_open: bool,
}

// ---- reports ----

/// List reports with optional search and sort.
#[derive(Args, Debug, Default)]
pub struct ReportsArgs {
    /// Keep only reports containing this text in any listed column.
    #[arg(short, long)]
    pub query: Option<String>,

    /// Sort key (contract_name, number_of_vulnerabilities, submission_date).
    #[arg(long)]
    pub sort_by: Option<SortField>,

    /// Sort direction (asc, desc).
    #[arg(long)]
    pub order: Option<SortOrder>,

    /// Delete this report from the list before displaying it.
    #[arg(long)]
    pub delete: Option<ReportId>,
}

// ---- show ----

/// Show report details.
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Report id.
    pub id: ReportId,
}

// ---- delete ----

/// Delete a report.
#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Report id.
    pub id: ReportId,
}

// ---- open ----

/// Resolve a page path and display it.
#[derive(Args, Debug)]
pub struct OpenArgs {
    /// Page path, e.g. `/reports/42`.
    #[arg(default_value = "/")]
    pub path: String,
}

// ---- config ----

/// Manage solaudit configuration.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Validate the configuration file and report errors.
    Validate,
    /// Show the effective configuration (file + env overrides + defaults).
    Show {
        /// Show only a specific section (general, backend, reports, upload).
        #[arg(long)]
        section: Option<String>,
    },
}
