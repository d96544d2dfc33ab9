//! CLI-specific error types and exit code mapping

use solaudit_client::{ClientError, messages};
use solaudit_core::error::{ReportError, SolauditError};

/// CLI-specific error type.
///
/// Each variant carries the message shown to the user.
/// The `exit_code()` method maps errors to process exit codes.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Configuration loading or validation failure.
    #[error("configuration error: {0}")]
    Config(String),

    /// A subcommand-specific operation failed.
    #[error("{0}")]
    Command(String),

    /// The report service did not respond.
    #[error("{0}")]
    Unreachable(String),

    /// The requested report or page does not exist.
    #[error("{0}")]
    NotFound(String),

    /// The upload was rejected before or by the service.
    #[error("{0}")]
    Validation(String),

    /// JSON serialisation failed during output rendering.
    #[error("json output error: {0}")]
    JsonSerialize(#[from] serde_json::Error),

    /// IO error (file read, stdout write, etc.).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Wrapped domain error from solaudit-core.
    #[error("{0}")]
    Core(#[from] SolauditError),
}

impl CliError {
    /// Map the error to a process exit code.
    ///
    /// | Code | Meaning                         |
    /// |------|---------------------------------|
    /// | 0    | Success                         |
    /// | 1    | General / command error         |
    /// | 2    | Configuration error             |
    /// | 3    | Report service unreachable      |
    /// | 4    | Report or page not found        |
    /// | 5    | Upload rejected                 |
    /// | 10   | IO error                        |
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) => 2,
            Self::Unreachable(_) => 3,
            Self::NotFound(_) => 4,
            Self::Validation(_) => 5,
            Self::Io(_) => 10,
            Self::Core(SolauditError::Config(_)) => 2,
            Self::Core(SolauditError::Io(_)) => 10,
            Self::Core(SolauditError::Report(ReportError::Connectivity(_))) => 3,
            Self::Core(SolauditError::Report(ReportError::NotFound(_))) => 4,
            Self::Core(SolauditError::Report(ReportError::Validation(_))) => 5,
            Self::JsonSerialize(_) | Self::Command(_) | Self::Core(_) => 1,
        }
    }

    /// Classify a message shown by a page (upload form, report list, report detail).
    pub fn from_page_message(message: &str) -> Self {
        match message {
            messages::CONNECTIVITY => Self::Unreachable(message.to_owned()),
            messages::NO_REPORTS_YET | messages::REPORT_NOT_FOUND => {
                Self::NotFound(message.to_owned())
            }
            messages::NO_FILE_SELECTED | messages::INVALID_ENCODING => {
                Self::Validation(message.to_owned())
            }
            m if m.starts_with("Invalid file extension") => Self::Validation(message.to_owned()),
            _ => Self::Command(message.to_owned()),
        }
    }

    /// Whether the error view should point the user back home.
    pub fn offers_home_link(&self) -> bool {
        matches!(
            self,
            Self::Unreachable(_) | Self::NotFound(_) | Self::Command(_)
        )
    }
}

impl From<ClientError> for CliError {
    fn from(e: ClientError) -> Self {
        match e {
            ClientError::Config { field, reason } => Self::Config(format!("{field}: {reason}")),
            ClientError::Io(io) => Self::Io(io),
            other => Self::Core(other.into()),
        }
    }
}
