//! Error types for the PoloMarket identity services.
//!
//! This module defines custom error types using `thiserror` for precise error handling.

use crate::domain::ValidationError;
use thiserror::Error;

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Environment variable has invalid value
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue { var: String, reason: String },
}

/// Errors raised by user storage.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// Record not found
    #[error("User not found: {0}")]
    NotFound(u64),

    /// A unique field is already taken
    #[error("Unique constraint violated on {field}")]
    Conflict { field: UniqueField },

    /// Backend failure
    #[error("Storage error: {0}")]
    Storage(String),
}

/// User fields carrying a uniqueness constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniqueField {
    Username,
    Email,
    Rut,
}

impl std::fmt::Display for UniqueField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Username => f.write_str("username"),
            Self::Email => f.write_str("email"),
            Self::Rut => f.write_str("rut"),
        }
    }
}

/// Errors returned to registration callers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistrationError {
    /// The RUT failed shape or check digit validation
    #[error("Invalid RUT: {0}")]
    InvalidRut(String),

    /// Configuration requires a RUT and none was given
    #[error("RUT is required")]
    MissingRut,

    /// The RUT already belongs to another account
    #[error("RUT already registered")]
    RutAlreadyRegistered,

    /// The username is taken
    #[error("Username already exists")]
    UsernameTaken,

    /// The email is taken
    #[error("Email already registered")]
    EmailTaken,

    /// Any other field failed validation
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Storage failure unrelated to the request contents
    #[error(transparent)]
    Repository(RepositoryError),
}

impl RegistrationError {
    /// Whether the error was caused by the request rather than the backend.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, Self::Repository(_))
    }
}

impl From<RepositoryError> for RegistrationError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::Conflict { field } => match field {
                UniqueField::Username => Self::UsernameTaken,
                UniqueField::Email => Self::EmailTaken,
                UniqueField::Rut => Self::RutAlreadyRegistered,
            },
            other => Self::Repository(other),
        }
    }
}

/// Convenience type alias for Results with ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Convenience type alias for Results with RepositoryError
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Convenience type alias for Results with RegistrationError
pub type RegistrationResult<T> = Result<T, RegistrationError>;
