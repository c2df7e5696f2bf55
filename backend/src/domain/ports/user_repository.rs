//! Port abstraction for user persistence adapters and their errors.

use async_trait::async_trait;

use crate::domain::{User, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
    }
}

/// Port for storing and loading cellar owners.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserRepositoryError>;

    /// Fetch a user by email address, compared verbatim.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserRepositoryError>;

    /// Insert a new user.
    async fn save(&self, user: &User) -> Result<(), UserRepositoryError>;

    /// Persist changes to an existing user.
    async fn update(&self, user: &User) -> Result<(), UserRepositoryError>;

    /// Remove a user. Removing an unknown id is not an error.
    async fn delete(&self, id: &UserId) -> Result<(), UserRepositoryError>;
}

/// Fixture implementation for tests that do not exercise user persistence.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureUserRepository;

#[async_trait]
impl UserRepository for FixtureUserRepository {
    async fn find_by_id(&self, _id: &UserId) -> Result<Option<User>, UserRepositoryError> {
        Ok(None)
    }

    async fn find_by_email(&self, _email: &str) -> Result<Option<User>, UserRepositoryError> {
        Ok(None)
    }

    async fn save(&self, _user: &User) -> Result<(), UserRepositoryError> {
        Ok(())
    }

    async fn update(&self, _user: &User) -> Result<(), UserRepositoryError> {
        Ok(())
    }

    async fn delete(&self, _id: &UserId) -> Result<(), UserRepositoryError> {
        Ok(())
    }
}
