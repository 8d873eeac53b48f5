//! Error types for the planreport CLI

use std::path::PathBuf;
use std::process::ExitCode;
use thiserror::Error;

/// Result type alias for CLI operations
pub(crate) type Result<T> = std::result::Result<T, CliError>;

/// CLI error types
#[derive(Error, Debug)]
pub(crate) enum CliError {
    /// Input file does not exist
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// Report rejected its configuration
    #[error("Invalid report configuration: {0}")]
    Configuration(planreport::ReportError),

    /// Properties or config file could not be parsed
    #[error("Invalid input: {0}")]
    InvalidInput(planreport::ReportError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Logging could not be initialized
    #[error("Logging setup failed: {0}")]
    Logging(String),
}

impl CliError {
    /// Process exit status for this error
    pub(crate) fn exit_status(&self) -> u8 {
        match self {
            Self::FileNotFound(_) => 3,
            Self::InvalidInput(_) => 4,
            Self::Configuration(_) => 5,
            Self::Io(_) => 7,
            Self::Logging(_) => 1,
        }
    }

    /// Get exit code for this error
    pub(crate) fn exit_code(&self) -> ExitCode {
        ExitCode::from(self.exit_status())
    }
}

impl From<planreport::ReportError> for CliError {
    fn from(e: planreport::ReportError) -> Self {
        match e {
            planreport::ReportError::Io(io) => Self::Io(io),
            e if e.is_configuration() => Self::Configuration(e),
            e => Self::InvalidInput(e),
        }
    }
}
