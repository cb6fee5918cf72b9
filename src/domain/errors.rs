//! Domain validation errors.

use std::fmt;

/// Errors that can occur during domain value object validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The provided RUT is malformed or its check digit does not match.
    InvalidRut(String),

    /// The provided username is invalid.
    InvalidUsername(String),

    /// The provided email address is invalid.
    InvalidEmail(String),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidRut(rut) => write!(f, "Invalid RUT: {}", rut),
            Self::InvalidUsername(name) => write!(f, "Invalid username: {}", name),
            Self::InvalidEmail(email) => write!(f, "Invalid email address: {}", email),
        }
    }
}

impl std::error::Error for ValidationError {}
