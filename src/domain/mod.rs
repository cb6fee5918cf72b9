//! Domain value objects and types.
//!
//! Type-safe wrappers that validate at construction time, plus the free
//! RUT functions they are built on.

pub mod errors;
pub mod rut;
pub mod username;

pub use errors::ValidationError;
pub use rut::{compute_check_digit, format_rut, validate_rut, Rut};
pub use username::Username;
