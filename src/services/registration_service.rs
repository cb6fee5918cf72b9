//! Registration service layer.
//!
//! Validates a registration payload, checks uniqueness against the user
//! repository and persists the account. A malformed RUT is rejected before
//! the repository is consulted at all.

use crate::domain::{Rut, Username, ValidationError};
use crate::error::{RegistrationError, RegistrationResult};
use crate::models::{NewUser, NewUserRecord, User};
use crate::observability::{MetricsTracker, Timer};
use crate::repositories::UserRepository;
use async_trait::async_trait;
use std::sync::Arc;

/// Registration service trait for account operations.
#[async_trait]
pub trait RegistrationService: Send + Sync {
    /// Register a new account.
    async fn register(&self, new_user: NewUser) -> RegistrationResult<User>;

    /// Find the account holding a RUT, in any punctuation style.
    async fn lookup_by_rut(&self, rut: &str) -> RegistrationResult<Option<User>>;

    /// List accounts. `limit` is clamped to the configured maximum.
    async fn list_users(&self, limit: Option<usize>, offset: usize)
        -> RegistrationResult<Vec<User>>;
}

/// Default implementation of RegistrationService.
pub struct RegistrationServiceImpl {
    users: Arc<dyn UserRepository>,
    require_rut: bool,
    max_list_results: usize,
    metrics: MetricsTracker,
}

/// Validation helper functions.
impl RegistrationServiceImpl {
    /// Validate email format: one '@', a local part, and a dotted domain.
    fn validate_email(email: &str) -> Result<(), ValidationError> {
        let invalid = || ValidationError::InvalidEmail(email.to_string());

        let (local, domain) = email.split_once('@').ok_or_else(invalid)?;
        if local.is_empty() || domain.contains('@') || email.chars().any(char::is_whitespace) {
            return Err(invalid());
        }
        if !domain.contains('.') || domain.split('.').any(str::is_empty) {
            return Err(invalid());
        }
        Ok(())
    }

    /// Parse the optional RUT, treating a blank string as absent.
    ///
    /// A non-blank value reaches the validator untouched, so surrounding
    /// whitespace makes it invalid exactly as `validate_rut` would.
    fn parse_rut(&self, rut: Option<&str>) -> RegistrationResult<Option<Rut>> {
        let rut = rut.filter(|r| !r.trim().is_empty());

        match rut {
            Some(raw) => {
                let parsed = Rut::new(raw);
                self.metrics.track_rut_validation(parsed.is_ok());
                parsed
                    .map(Some)
                    .map_err(|_| RegistrationError::InvalidRut(raw.to_string()))
            }
            None if self.require_rut => Err(RegistrationError::MissingRut),
            None => Ok(None),
        }
    }

    async fn register_inner(&self, new_user: NewUser) -> RegistrationResult<User> {
        let username = Username::new(&new_user.username)?;
        let email = new_user.email.trim().to_string();
        Self::validate_email(&email)?;
        let rut = self.parse_rut(new_user.rut.as_deref())?;

        if self
            .users
            .find_by_username(username.as_str())
            .await?
            .is_some()
        {
            return Err(RegistrationError::UsernameTaken);
        }
        if self.users.find_by_email(&email).await?.is_some() {
            return Err(RegistrationError::EmailTaken);
        }
        if let Some(rut) = &rut {
            if self.users.find_by_rut(rut).await?.is_some() {
                return Err(RegistrationError::RutAlreadyRegistered);
            }
        }

        let full_name = new_user
            .full_name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());

        let user = self
            .users
            .create(NewUserRecord {
                username,
                email,
                full_name,
                rut,
            })
            .await?;

        Ok(user)
    }
}

impl RegistrationServiceImpl {
    /// Create a new registration service.
    pub fn new(
        users: Arc<dyn UserRepository>,
        require_rut: bool,
        max_list_results: usize,
        metrics: MetricsTracker,
    ) -> Self {
        Self {
            users,
            require_rut,
            max_list_results,
            metrics,
        }
    }
}

#[async_trait]
impl RegistrationService for RegistrationServiceImpl {
    async fn register(&self, new_user: NewUser) -> RegistrationResult<User> {
        let timer = Timer::new("register");
        let result = self.register_inner(new_user).await;

        let duration_ms = timer.finish_with_status(result.is_ok());
        self.metrics.track_registration(result.is_ok(), duration_ms);

        match &result {
            Ok(user) => tracing::info!(user_id = user.id, "User registered"),
            Err(e) => tracing::info!(error = %e, "Registration rejected"),
        }
        result
    }

    async fn lookup_by_rut(&self, rut: &str) -> RegistrationResult<Option<User>> {
        let parsed = Rut::new(rut);
        self.metrics.track_rut_validation(parsed.is_ok());
        let rut = parsed.map_err(|_| RegistrationError::InvalidRut(rut.to_string()))?;

        Ok(self.users.find_by_rut(&rut).await?)
    }

    async fn list_users(
        &self,
        limit: Option<usize>,
        offset: usize,
    ) -> RegistrationResult<Vec<User>> {
        let limit = limit
            .unwrap_or(self.max_list_results)
            .min(self.max_list_results);

        Ok(self.users.list(limit, offset).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_email() {
        assert!(RegistrationServiceImpl::validate_email("rider@club.cl").is_ok());
        assert!(RegistrationServiceImpl::validate_email("a.b+c@mail.example.com").is_ok());
        assert!(RegistrationServiceImpl::validate_email("invalid").is_err());
        assert!(RegistrationServiceImpl::validate_email("@club.cl").is_err());
        assert!(RegistrationServiceImpl::validate_email("rider@club").is_err());
        assert!(RegistrationServiceImpl::validate_email("rider@@club.cl").is_err());
        assert!(RegistrationServiceImpl::validate_email("rider@club..cl").is_err());
        assert!(RegistrationServiceImpl::validate_email("ri der@club.cl").is_err());
    }
}
