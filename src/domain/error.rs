//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent malformed command lines.
/// Messages mirror the classic `-x: reason.` style of short-option tools.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("{0}: invalid context value.")]
    InvalidContextValue(String),

    #[error("-{0}: argument required.")]
    MissingArgument(char),

    #[error("-{0}: unknown option.")]
    UnknownOption(char),
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
