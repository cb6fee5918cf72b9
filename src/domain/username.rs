//! Username value object.

use super::errors::ValidationError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

const MIN_LEN: usize = 3;
const MAX_LEN: usize = 50;

/// A marketplace account handle.
///
/// Leading and trailing whitespace is trimmed before validation.
///
/// # Example
///
/// ```
/// use polomarket_identity::domain::Username;
///
/// let name = Username::new("  la_dolfina ").unwrap();
/// assert_eq!(name.as_str(), "la_dolfina");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Username(String);

impl Username {
    /// Create a new Username.
    ///
    /// # Validation Rules
    ///
    /// - 3 to 50 characters after trimming
    /// - ASCII letters, digits, `_`, `-` and `.` only
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidUsername` otherwise.
    pub fn new(name: impl AsRef<str>) -> Result<Self, ValidationError> {
        let name = name.as_ref().trim();

        let allowed = |c: char| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.');
        if !(MIN_LEN..=MAX_LEN).contains(&name.len()) || !name.chars().all(allowed) {
            return Err(ValidationError::InvalidUsername(name.to_string()));
        }

        Ok(Self(name.to_string()))
    }

    /// Get the username as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Serialize for Username {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Username {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Username::new(s).map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
