//! CLI-level errors (wraps infrastructure errors)

use thiserror::Error;

use crate::application::ApplicationError;
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

impl From<ApplicationError> for CliError {
    fn from(e: ApplicationError) -> Self {
        CliError::Infra(InfraError::Application(e))
    }
}

impl CliError {
    /// Get the appropriate exit code for this error.
    ///
    /// Every handled failure maps to the same status.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Usage(_) | CliError::Infra(_) => crate::exitcode::FAILURE,
        }
    }

    /// Body of a failed HTTP response, printed after the error message.
    pub fn response_body(&self) -> Option<&str> {
        match self {
            CliError::Infra(e) => e.response_body(),
            CliError::Usage(_) => None,
        }
    }
}
