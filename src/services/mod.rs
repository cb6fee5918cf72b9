//! Application service layer.
//!
//! Services hold the business rules and sit between the MCP handlers and
//! the repositories.

mod registration_service;

pub use registration_service::{RegistrationService, RegistrationServiceImpl};
