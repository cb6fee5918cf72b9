//! User account model.

use crate::domain::{Rut, Username};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registered marketplace account.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    /// Storage-assigned identifier
    pub id: u64,

    pub username: Username,

    /// Email address, stored as given
    pub email: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,

    /// National identity number, serialized in `12.345.678-5` form
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rut: Option<Rut>,

    pub created_at: DateTime<Utc>,
}

/// Unvalidated registration payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub rut: Option<String>,
}

/// Validated fields handed to a repository for insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUserRecord {
    pub username: Username,
    pub email: String,
    pub full_name: Option<String>,
    pub rut: Option<Rut>,
}
