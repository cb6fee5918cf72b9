//! PoloMarket identity services.
//!
//! Validation and formatting of Chilean RUT (national identity / taxpayer)
//! numbers, and the account registration flow that consumes them, exposed
//! to assistants over the Model Context Protocol.
//!
//! # Architecture
//!
//! - **domain**: RUT functions and validated value objects
//! - **models**: User account data structures
//! - **repositories**: User storage abstraction and in-memory implementation
//! - **services**: Registration rules (RUT check before uniqueness check)
//! - **server**: MCP tool handlers
//! - **observability**: Counters and timers
//! - **config** / **error**: Environment configuration and error types

pub mod config;
pub mod domain;
pub mod error;
pub mod models;
pub mod observability;
pub mod repositories;
pub mod server;
pub mod services;

pub use config::Config;
pub use domain::{compute_check_digit, format_rut, validate_rut, Rut, Username, ValidationError};
pub use error::{ConfigError, RegistrationError, RepositoryError};
pub use models::{NewUser, User};
pub use observability::MetricsTracker;
pub use server::IdentityMcpServer;
