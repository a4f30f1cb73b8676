//! Domain layer error definitions.

use thiserror::Error;

/// Errors related to Value Objects validation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueObjectError {
    /// ConnectionId validation error
    #[error("ConnectionId cannot be empty")]
    ConnectionIdEmpty,

    /// ConnectionId invalid format error (not a valid UUID format)
    #[error("ConnectionId must be a valid UUID format (got: {0})")]
    ConnectionIdInvalidFormat(String),

    /// BoardId validation error
    #[error("BoardId cannot be empty")]
    BoardIdEmpty,

    /// BoardId too long error
    #[error("BoardId cannot exceed {max} characters (got {actual})")]
    BoardIdTooLong { max: usize, actual: usize },

    /// UserId validation error
    #[error("UserId cannot be empty")]
    UserIdEmpty,

    /// UserId too long error
    #[error("UserId cannot exceed {max} characters (got {actual})")]
    UserIdTooLong { max: usize, actual: usize },
}

/// Errors returned by the board hub repository
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// A connection with the same id is already registered
    #[error("Connection '{0}' is already registered")]
    ConnectionAlreadyRegistered(String),
}
