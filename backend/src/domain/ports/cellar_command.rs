//! Driving port for cellar inventory mutations.
//!
//! Every mutation returns the updated wine with a fresh consumption report so
//! adapters can render the new state without a second round trip.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockable::DefaultClock;

use super::WineView;
use crate::domain::{
    Error, OptimalConsumptionCalculator, UserId, Wine, WineDraft, WineId, WineType,
};

/// Attributes for a wine entering the cellar; the identifier is assigned by
/// the service.
#[derive(Debug, Clone, PartialEq)]
pub struct RegisterWineRequest {
    pub user_id: UserId,
    pub name: String,
    pub vintage: i32,
    pub coupage: String,
    pub wine_type: WineType,
    pub cellar_entry_date: DateTime<Utc>,
    pub quantity: u32,
    pub alcohol_content: f64,
    pub denomination: String,
    pub winery: String,
    pub suggested_consumption_date: Option<DateTime<Utc>>,
    pub notes: Option<String>,
}

impl RegisterWineRequest {
    /// Attach `id` and turn the request into an entity draft.
    pub fn into_draft(self, id: WineId) -> WineDraft {
        let Self {
            user_id,
            name,
            vintage,
            coupage,
            wine_type,
            cellar_entry_date,
            quantity,
            alcohol_content,
            denomination,
            winery,
            suggested_consumption_date,
            notes,
        } = self;
        WineDraft {
            id,
            user_id,
            name,
            vintage,
            coupage,
            wine_type,
            cellar_entry_date,
            quantity,
            alcohol_content,
            denomination,
            winery,
            suggested_consumption_date,
            notes,
        }
    }
}

/// Relative change to a wine's bottle count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BottleAdjustment {
    Add { amount: i64 },
    Remove { amount: i64 },
}

/// Write-side use-cases for the cellar.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CellarCommand: Send + Sync {
    /// Add a new wine to its owner's cellar.
    async fn register_wine(&self, request: RegisterWineRequest) -> Result<WineView, Error>;

    /// Overwrite the bottle count.
    async fn set_quantity(&self, wine_id: &WineId, quantity: i64) -> Result<WineView, Error>;

    /// Add or remove bottles.
    async fn adjust_bottles(
        &self,
        wine_id: &WineId,
        adjustment: BottleAdjustment,
    ) -> Result<WineView, Error>;

    /// Replace the tasting notes.
    async fn update_notes(&self, wine_id: &WineId, notes: String) -> Result<WineView, Error>;

    /// Recompute the heuristic consumption date and store it on the wine.
    async fn refresh_suggested_consumption_date(
        &self,
        wine_id: &WineId,
    ) -> Result<WineView, Error>;
}

/// Fixture command that accepts registrations without storing them and
/// reports every other wine as missing.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureCellarCommand;

fn missing(wine_id: &WineId) -> Error {
    Error::not_found(format!("wine with id {wine_id} not found"))
}

#[async_trait]
impl CellarCommand for FixtureCellarCommand {
    async fn register_wine(&self, request: RegisterWineRequest) -> Result<WineView, Error> {
        let wine = Wine::create(request.into_draft(WineId::random()), &DefaultClock);
        let consumption =
            OptimalConsumptionCalculator::new(Arc::new(DefaultClock)).consumption_report(&wine);
        Ok(WineView {
            wine: wine.to_snapshot(),
            consumption,
        })
    }

    async fn set_quantity(&self, wine_id: &WineId, _quantity: i64) -> Result<WineView, Error> {
        Err(missing(wine_id))
    }

    async fn adjust_bottles(
        &self,
        wine_id: &WineId,
        _adjustment: BottleAdjustment,
    ) -> Result<WineView, Error> {
        Err(missing(wine_id))
    }

    async fn update_notes(&self, wine_id: &WineId, _notes: String) -> Result<WineView, Error> {
        Err(missing(wine_id))
    }

    async fn refresh_suggested_consumption_date(
        &self,
        wine_id: &WineId,
    ) -> Result<WineView, Error> {
        Err(missing(wine_id))
    }
}
