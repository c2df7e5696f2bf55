//! Driving port for reading cellar wines together with their consumption window.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::{ConsumptionReport, Error, UserId, WineId, WineSnapshot};

/// A wine plus its consumption report, evaluated at read time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WineView {
    pub wine: WineSnapshot,
    pub consumption: ConsumptionReport,
}

/// Read-side use-cases for the cellar.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CellarQuery: Send + Sync {
    /// Load a single wine.
    async fn get_wine(&self, wine_id: &WineId) -> Result<WineView, Error>;

    /// Load every wine owned by `user_id`.
    async fn list_wines_for_owner(&self, user_id: &UserId) -> Result<Vec<WineView>, Error>;
}

/// Fixture query reporting an empty cellar.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureCellarQuery;

#[async_trait]
impl CellarQuery for FixtureCellarQuery {
    async fn get_wine(&self, wine_id: &WineId) -> Result<WineView, Error> {
        Err(Error::not_found(format!("wine with id {wine_id} not found")))
    }

    async fn list_wines_for_owner(&self, _user_id: &UserId) -> Result<Vec<WineView>, Error> {
        Ok(Vec::new())
    }
}
