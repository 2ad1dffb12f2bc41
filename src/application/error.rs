//! Application-level errors (wraps domain errors)

use thiserror::Error;

use crate::domain::DomainError;

/// Application errors wrap domain errors and add driver-level context.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("-c {0}: invalid class name.")]
    InvalidClassName(String),

    #[error("-p {0}: invalid pattern.")]
    InvalidPattern(String),

    #[error("-K {0}: invalid kanji code.")]
    InvalidKanjiCode(String),

    #[error("-K {0}: unsupported kanji code.")]
    UnsupportedKanjiCode(String),

    #[error("{origin}: root object is not a mapping.")]
    NotAMapping { origin: String },

    #[error("{origin}: {source}")]
    DataFile {
        origin: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("{context}: {source}")]
    Template {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("config error: {message}")]
    Config { message: String },

    #[error("{context}: {source}")]
    OperationFailed {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl ApplicationError {
    /// Errors caused by how the command was invoked rather than by the
    /// templates or the environment. These are reported as a bare message.
    pub fn is_command_option(&self) -> bool {
        matches!(
            self,
            ApplicationError::Domain(_)
                | ApplicationError::InvalidClassName(_)
                | ApplicationError::InvalidPattern(_)
                | ApplicationError::InvalidKanjiCode(_)
                | ApplicationError::UnsupportedKanjiCode(_)
                | ApplicationError::NotAMapping { .. }
        )
    }
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
