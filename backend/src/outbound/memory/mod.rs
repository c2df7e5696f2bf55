//! In-memory repository adapters.
//!
//! Entities are stored as snapshots behind a `tokio::sync::RwLock`, so every
//! caller receives its own entity instance and concurrent writers resolve as
//! last-writer-wins.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::ports::{
    UserRepository, UserRepositoryError, WineRepository, WineRepositoryError,
};
use crate::domain::{User, UserId, UserSnapshot, Wine, WineId, WineSnapshot};

/// Process-local implementation of [`WineRepository`].
#[derive(Debug, Default)]
pub struct InMemoryWineRepository {
    wines: RwLock<HashMap<WineId, WineSnapshot>>,
}

impl InMemoryWineRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl WineRepository for InMemoryWineRepository {
    async fn find_by_id(&self, id: &WineId) -> Result<Option<Wine>, WineRepositoryError> {
        let wines = self.wines.read().await;
        Ok(wines.get(id).cloned().map(Wine::reconstitute))
    }

    async fn find_by_user_id(&self, user_id: &UserId) -> Result<Vec<Wine>, WineRepositoryError> {
        let wines = self.wines.read().await;
        let mut owned: Vec<Wine> = wines
            .values()
            .filter(|snapshot| &snapshot.user_id == user_id)
            .cloned()
            .map(Wine::reconstitute)
            .collect();
        owned.sort_by(|a, b| {
            a.created_at()
                .cmp(&b.created_at())
                .then_with(|| a.id().cmp(b.id()))
        });
        Ok(owned)
    }

    async fn save(&self, wine: &Wine) -> Result<(), WineRepositoryError> {
        let mut wines = self.wines.write().await;
        if wines.contains_key(wine.id()) {
            return Err(WineRepositoryError::query(format!(
                "wine {} already exists",
                wine.id()
            )));
        }
        wines.insert(wine.id().clone(), wine.to_snapshot());
        Ok(())
    }

    async fn update(&self, wine: &Wine) -> Result<(), WineRepositoryError> {
        let mut wines = self.wines.write().await;
        match wines.get_mut(wine.id()) {
            Some(stored) => {
                *stored = wine.to_snapshot();
                Ok(())
            }
            None => Err(WineRepositoryError::query(format!(
                "wine {} does not exist",
                wine.id()
            ))),
        }
    }

    async fn delete(&self, id: &WineId) -> Result<(), WineRepositoryError> {
        self.wines.write().await.remove(id);
        Ok(())
    }
}

/// Process-local implementation of [`UserRepository`].
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<UserId, UserSnapshot>>,
}

impl InMemoryUserRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserRepositoryError> {
        let users = self.users.read().await;
        Ok(users.get(id).cloned().map(User::reconstitute))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserRepositoryError> {
        let users = self.users.read().await;
        Ok(users
            .values()
            .find(|snapshot| snapshot.email == email)
            .cloned()
            .map(User::reconstitute))
    }

    async fn save(&self, user: &User) -> Result<(), UserRepositoryError> {
        let mut users = self.users.write().await;
        if users.contains_key(user.id()) {
            return Err(UserRepositoryError::query(format!(
                "user {} already exists",
                user.id()
            )));
        }
        users.insert(user.id().clone(), user.to_snapshot());
        Ok(())
    }

    async fn update(&self, user: &User) -> Result<(), UserRepositoryError> {
        let mut users = self.users.write().await;
        match users.get_mut(user.id()) {
            Some(stored) => {
                *stored = user.to_snapshot();
                Ok(())
            }
            None => Err(UserRepositoryError::query(format!(
                "user {} does not exist",
                user.id()
            ))),
        }
    }

    async fn delete(&self, id: &UserId) -> Result<(), UserRepositoryError> {
        self.users.write().await.remove(id);
        Ok(())
    }
}
