use crate::domain::Rut;
use crate::error::RepositoryResult;
use crate::models::{NewUserRecord, User};
use async_trait::async_trait;

/// Repository for managing user accounts.
///
/// Implementations must enforce uniqueness of username, email and RUT at
/// insert time and report violations as `RepositoryError::Conflict`.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Retrieve a single user by ID.
    async fn get(&self, id: u64) -> RepositoryResult<User>;

    /// Retrieve users ordered by ID, with pagination.
    async fn list(&self, limit: usize, offset: usize) -> RepositoryResult<Vec<User>>;

    /// Find a user by exact username.
    async fn find_by_username(&self, username: &str) -> RepositoryResult<Option<User>>;

    /// Find a user by email, ignoring ASCII case.
    async fn find_by_email(&self, email: &str) -> RepositoryResult<Option<User>>;

    /// Find the user holding a RUT.
    async fn find_by_rut(&self, rut: &Rut) -> RepositoryResult<Option<User>>;

    /// Insert a new user and return it with its assigned ID.
    async fn create(&self, record: NewUserRecord) -> RepositoryResult<User>;
}
