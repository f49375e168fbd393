//! CLI-level errors (wraps infrastructure errors)

use thiserror::Error;

use crate::application::BindError;
use crate::exitcode;
use crate::infrastructure::InfraError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Infra(#[from] InfraError),

    #[error("{0}")]
    Usage(String),
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Usage(_) => exitcode::USAGE,
            CliError::Infra(e) => match e {
                InfraError::Io { .. } => exitcode::NOINPUT,
                InfraError::Load { .. } => exitcode::DATAERR,
                InfraError::UnsupportedValue { .. } => exitcode::DATAERR,
                InfraError::Property(_) => exitcode::DATAERR,
                InfraError::Application(BindError::Property(_)) => exitcode::DATAERR,
                InfraError::Application(b) if b.is_configuration() => exitcode::CONFIG,
                InfraError::Application(_) => exitcode::SOFTWARE,
            },
        }
    }
}
