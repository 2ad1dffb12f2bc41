//! CLI-level errors (wraps infrastructure errors)

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;
use crate::exitcode;
use crate::infrastructure::InfraError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Infra(#[from] InfraError),
}

impl From<ApplicationError> for CliError {
    fn from(e: ApplicationError) -> Self {
        CliError::Infra(InfraError::Application(e))
    }
}

impl From<DomainError> for CliError {
    fn from(e: DomainError) -> Self {
        ApplicationError::Domain(e).into()
    }
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// True for errors about how the command was invoked. These are printed
    /// as a bare message, without an `error:` prefix.
    pub fn is_command_option(&self) -> bool {
        matches!(self, CliError::Infra(InfraError::Application(e)) if e.is_command_option())
    }

    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Infra(InfraError::Io { .. }) => exitcode::IOERR,
            CliError::Infra(InfraError::Application(e)) => match e {
                e if e.is_command_option() => exitcode::FAILURE,
                ApplicationError::DataFile { .. } | ApplicationError::Template { .. } => {
                    exitcode::DATAERR
                }
                ApplicationError::Config { .. } => exitcode::CONFIG,
                ApplicationError::OperationFailed { source, .. } => {
                    match source.downcast_ref::<std::io::Error>() {
                        Some(io) if io.kind() == std::io::ErrorKind::NotFound => {
                            exitcode::NOINPUT
                        }
                        Some(_) => exitcode::IOERR,
                        None => exitcode::SOFTWARE,
                    }
                }
                _ => exitcode::SOFTWARE,
            },
        }
    }
}
