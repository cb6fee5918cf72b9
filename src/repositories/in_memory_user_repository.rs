//! Process-local user storage.

use super::traits::UserRepository;
use crate::domain::Rut;
use crate::error::{RepositoryError, RepositoryResult, UniqueField};
use crate::models::{NewUserRecord, User};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct Store {
    users: BTreeMap<u64, User>,
    next_id: u64,
}

/// `UserRepository` backed by an in-memory map.
///
/// IDs start at 1 and are never reused. The write lock is held across the
/// uniqueness check and the insert, so concurrent registrations cannot both
/// claim the same RUT.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    store: RwLock<Store>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

/// First violated constraint, checked field by field across all users in
/// the same order the registration service uses: username, email, RUT.
fn conflict(users: &BTreeMap<u64, User>, record: &NewUserRecord) -> Option<UniqueField> {
    let all = || users.values();

    if all().any(|u| u.username == record.username) {
        return Some(UniqueField::Username);
    }
    if all().any(|u| u.email.eq_ignore_ascii_case(&record.email)) {
        return Some(UniqueField::Email);
    }
    if record.rut.is_some() && all().any(|u| u.rut == record.rut) {
        return Some(UniqueField::Rut);
    }
    None
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn get(&self, id: u64) -> RepositoryResult<User> {
        let store = self.store.read().await;
        store
            .users
            .get(&id)
            .cloned()
            .ok_or(RepositoryError::NotFound(id))
    }

    async fn list(&self, limit: usize, offset: usize) -> RepositoryResult<Vec<User>> {
        let store = self.store.read().await;
        Ok(store
            .users
            .values()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn find_by_username(&self, username: &str) -> RepositoryResult<Option<User>> {
        let store = self.store.read().await;
        Ok(store
            .users
            .values()
            .find(|u| u.username.as_str() == username)
            .cloned())
    }

    async fn find_by_email(&self, email: &str) -> RepositoryResult<Option<User>> {
        let store = self.store.read().await;
        Ok(store
            .users
            .values()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn find_by_rut(&self, rut: &Rut) -> RepositoryResult<Option<User>> {
        let store = self.store.read().await;
        Ok(store
            .users
            .values()
            .find(|u| u.rut.as_ref() == Some(rut))
            .cloned())
    }

    async fn create(&self, record: NewUserRecord) -> RepositoryResult<User> {
        let mut store = self.store.write().await;

        if let Some(field) = conflict(&store.users, &record) {
            tracing::debug!(%field, "Rejected insert on unique constraint");
            return Err(RepositoryError::Conflict { field });
        }

        store.next_id += 1;
        let user = User {
            id: store.next_id,
            username: record.username,
            email: record.email,
            full_name: record.full_name,
            rut: record.rut,
            created_at: Utc::now(),
        };
        store.users.insert(user.id, user.clone());

        Ok(user)
    }
}
