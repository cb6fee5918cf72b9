use async_trait::async_trait;
use chrono::Utc;
use polomarket_identity::domain::Rut;
use polomarket_identity::error::{RepositoryError, RepositoryResult};
use polomarket_identity::models::{NewUserRecord, User};
use polomarket_identity::repositories::UserRepository;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Mock user repository for testing.
///
/// Stores users in memory, tracks method calls for verification, and can be
/// told to fail every call to simulate a storage outage.
#[allow(dead_code)]
#[derive(Clone, Default)]
pub struct MockUserRepository {
    users: Arc<Mutex<Vec<User>>>,
    call_counts: Arc<Mutex<HashMap<String, usize>>>,
    failing: Arc<Mutex<bool>>,
}

#[allow(dead_code)]
impl MockUserRepository {
    /// Create a new empty MockUserRepository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a user directly, bypassing uniqueness rules.
    pub fn add_user(&self, user: User) {
        self.users.lock().unwrap().push(user);
    }

    /// Make every subsequent call return a storage error.
    pub fn fail_all(&self) {
        *self.failing.lock().unwrap() = true;
    }

    /// Get the number of times a method was called.
    pub fn get_call_count(&self, method: &str) -> usize {
        let counts = self.call_counts.lock().unwrap();
        *counts.get(method).unwrap_or(&0)
    }

    /// Total calls across all methods.
    pub fn total_calls(&self) -> usize {
        self.call_counts.lock().unwrap().values().sum()
    }

    fn track_call(&self, method: &str) -> RepositoryResult<()> {
        let mut counts = self.call_counts.lock().unwrap();
        *counts.entry(method.to_string()).or_insert(0) += 1;

        if *self.failing.lock().unwrap() {
            return Err(RepositoryError::Storage("mock outage".to_string()));
        }
        Ok(())
    }

    fn find(&self, pred: impl Fn(&User) -> bool) -> Option<User> {
        self.users.lock().unwrap().iter().find(|u| pred(u)).cloned()
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn get(&self, id: u64) -> RepositoryResult<User> {
        self.track_call("get")?;
        self.find(|u| u.id == id)
            .ok_or(RepositoryError::NotFound(id))
    }

    async fn list(&self, limit: usize, offset: usize) -> RepositoryResult<Vec<User>> {
        self.track_call("list")?;
        let users = self.users.lock().unwrap();
        Ok(users.iter().skip(offset).take(limit).cloned().collect())
    }

    async fn find_by_username(&self, username: &str) -> RepositoryResult<Option<User>> {
        self.track_call("find_by_username")?;
        Ok(self.find(|u| u.username.as_str() == username))
    }

    async fn find_by_email(&self, email: &str) -> RepositoryResult<Option<User>> {
        self.track_call("find_by_email")?;
        Ok(self.find(|u| u.email.eq_ignore_ascii_case(email)))
    }

    async fn find_by_rut(&self, rut: &Rut) -> RepositoryResult<Option<User>> {
        self.track_call("find_by_rut")?;
        Ok(self.find(|u| u.rut.as_ref() == Some(rut)))
    }

    async fn create(&self, record: NewUserRecord) -> RepositoryResult<User> {
        self.track_call("create")?;
        let mut users = self.users.lock().unwrap();
        let user = User {
            id: users.len() as u64 + 1,
            username: record.username,
            email: record.email,
            full_name: record.full_name,
            rut: record.rut,
            created_at: Utc::now(),
        };
        users.push(user.clone());
        Ok(user)
    }
}
