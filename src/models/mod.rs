//! Data models for PoloMarket accounts.

pub mod user;

pub use user::{NewUser, NewUserRecord, User};
