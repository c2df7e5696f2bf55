//! Port abstraction for wine persistence adapters and their errors.

use async_trait::async_trait;

use crate::domain::{UserId, Wine, WineId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by wine repository adapters.
    pub enum WineRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "wine repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "wine repository query failed: {message}",
    }
}

/// Port for storing and loading cellar wines.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WineRepository: Send + Sync {
    /// Fetch a wine by identifier.
    async fn find_by_id(&self, id: &WineId) -> Result<Option<Wine>, WineRepositoryError>;

    /// Fetch every wine owned by `user_id`.
    async fn find_by_user_id(&self, user_id: &UserId) -> Result<Vec<Wine>, WineRepositoryError>;

    /// Insert a new wine.
    async fn save(&self, wine: &Wine) -> Result<(), WineRepositoryError>;

    /// Persist changes to an existing wine.
    async fn update(&self, wine: &Wine) -> Result<(), WineRepositoryError>;

    /// Remove a wine. Removing an unknown id is not an error.
    async fn delete(&self, id: &WineId) -> Result<(), WineRepositoryError>;
}

/// Fixture implementation for tests that do not exercise wine persistence.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureWineRepository;

#[async_trait]
impl WineRepository for FixtureWineRepository {
    async fn find_by_id(&self, _id: &WineId) -> Result<Option<Wine>, WineRepositoryError> {
        Ok(None)
    }

    async fn find_by_user_id(&self, _user_id: &UserId) -> Result<Vec<Wine>, WineRepositoryError> {
        Ok(Vec::new())
    }

    async fn save(&self, _wine: &Wine) -> Result<(), WineRepositoryError> {
        Ok(())
    }

    async fn update(&self, _wine: &Wine) -> Result<(), WineRepositoryError> {
        Ok(())
    }

    async fn delete(&self, _id: &WineId) -> Result<(), WineRepositoryError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::test_support::{MutableClock, red_wine_draft, utc};

    #[rstest]
    #[tokio::test]
    async fn fixture_find_returns_none() {
        let found = FixtureWineRepository
            .find_by_id(&WineId::random())
            .await
            .expect("fixture lookup succeeds");
        assert!(found.is_none());
    }

    #[rstest]
    #[tokio::test]
    async fn fixture_list_returns_empty() {
        let listed = FixtureWineRepository
            .find_by_user_id(&UserId::random())
            .await
            .expect("fixture list succeeds");
        assert!(listed.is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn fixture_writes_succeed() {
        let clock = MutableClock::new(utc(2024, 1, 1, 0, 0));
        let wine = Wine::create(red_wine_draft(2019, 2), &clock);
        let repo = FixtureWineRepository;

        repo.save(&wine).await.expect("fixture save succeeds");
        repo.update(&wine).await.expect("fixture update succeeds");
        repo.delete(wine.id()).await.expect("fixture delete succeeds");
    }

    #[rstest]
    fn query_error_formats_message() {
        let err = WineRepositoryError::query("broken sql");
        assert_eq!(err.to_string(), "wine repository query failed: broken sql");
    }
}
