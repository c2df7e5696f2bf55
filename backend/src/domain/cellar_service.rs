//! Cellar domain service.
//!
//! Implements the cellar driving ports over a [`WineRepository`]: load the
//! wine, apply one entity mutator, persist, and answer with the wine plus its
//! consumption report.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{debug, warn};

use crate::domain::ports::{
    BottleAdjustment, CellarCommand, CellarQuery, RegisterWineRequest, WineRepository,
    WineRepositoryError, WineView,
};
use crate::domain::{DomainError, Error, OptimalConsumptionCalculator, UserId, Wine, WineId};

fn map_repository_error(error: WineRepositoryError) -> Error {
    warn!(%error, "wine repository call failed");
    match error {
        WineRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("wine repository unavailable: {message}"))
        }
        WineRepositoryError::Query { message } => {
            Error::internal(format!("wine repository error: {message}"))
        }
    }
}

/// Cellar service implementing [`CellarCommand`] and [`CellarQuery`].
#[derive(Clone)]
pub struct CellarService<R> {
    wine_repo: Arc<R>,
    clock: Arc<dyn Clock>,
    calculator: OptimalConsumptionCalculator,
}

impl<R> CellarService<R> {
    /// Create a service reading time from `clock` for both entity timestamps
    /// and consumption reports.
    ///
    /// # Examples
    /// ```
    /// # use std::sync::Arc;
    /// # use celleret::domain::CellarService;
    /// # use celleret::domain::ports::FixtureWineRepository;
    /// # use mockable::DefaultClock;
    /// let service = CellarService::new(Arc::new(FixtureWineRepository), Arc::new(DefaultClock));
    /// # let _ = service;
    /// ```
    pub fn new(wine_repo: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        let calculator = OptimalConsumptionCalculator::new(clock.clone());
        Self {
            wine_repo,
            clock,
            calculator,
        }
    }

    fn view(&self, wine: &Wine) -> WineView {
        WineView {
            wine: wine.to_snapshot(),
            consumption: self.calculator.consumption_report(wine),
        }
    }
}

impl<R> CellarService<R>
where
    R: WineRepository,
{
    async fn load(&self, wine_id: &WineId) -> Result<Wine, Error> {
        self.wine_repo
            .find_by_id(wine_id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| DomainError::wine_not_found(wine_id).into())
    }

    /// Load, mutate and persist. Nothing is written when `mutate` fails.
    async fn mutate<F>(&self, wine_id: &WineId, mutate: F) -> Result<WineView, Error>
    where
        F: FnOnce(&mut Wine, &dyn Clock) -> Result<(), DomainError> + Send,
    {
        let mut wine = self.load(wine_id).await?;
        mutate(&mut wine, self.clock.as_ref())?;
        self.wine_repo
            .update(&wine)
            .await
            .map_err(map_repository_error)?;
        Ok(self.view(&wine))
    }
}

#[async_trait]
impl<R> CellarCommand for CellarService<R>
where
    R: WineRepository,
{
    async fn register_wine(&self, request: RegisterWineRequest) -> Result<WineView, Error> {
        let wine = Wine::create(request.into_draft(WineId::random()), self.clock.as_ref());
        self.wine_repo
            .save(&wine)
            .await
            .map_err(map_repository_error)?;
        debug!(wine_id = %wine.id(), user_id = %wine.user_id(), "wine registered");
        Ok(self.view(&wine))
    }

    async fn set_quantity(&self, wine_id: &WineId, quantity: i64) -> Result<WineView, Error> {
        self.mutate(wine_id, |wine, clock| wine.update_quantity(quantity, clock))
            .await
    }

    async fn adjust_bottles(
        &self,
        wine_id: &WineId,
        adjustment: BottleAdjustment,
    ) -> Result<WineView, Error> {
        self.mutate(wine_id, |wine, clock| match adjustment {
            BottleAdjustment::Add { amount } => wine.add_bottles(amount, clock),
            BottleAdjustment::Remove { amount } => wine.remove_bottles(amount, clock),
        })
        .await
    }

    async fn update_notes(&self, wine_id: &WineId, notes: String) -> Result<WineView, Error> {
        self.mutate(wine_id, |wine, clock| {
            wine.update_notes(notes, clock);
            Ok(())
        })
        .await
    }

    async fn refresh_suggested_consumption_date(
        &self,
        wine_id: &WineId,
    ) -> Result<WineView, Error> {
        let calculator = self.calculator.clone();
        self.mutate(wine_id, move |wine, clock| {
            let suggested = calculator.suggest_consumption_date(wine);
            debug!(wine_id = %wine.id(), %suggested, "suggested consumption date recomputed");
            wine.update_suggested_consumption_date(suggested, clock);
            Ok(())
        })
        .await
    }
}

#[async_trait]
impl<R> CellarQuery for CellarService<R>
where
    R: WineRepository,
{
    async fn get_wine(&self, wine_id: &WineId) -> Result<WineView, Error> {
        let wine = self.load(wine_id).await?;
        Ok(self.view(&wine))
    }

    async fn list_wines_for_owner(&self, user_id: &UserId) -> Result<Vec<WineView>, Error> {
        let wines = self
            .wine_repo
            .find_by_user_id(user_id)
            .await
            .map_err(map_repository_error)?;
        Ok(wines.iter().map(|wine| self.view(wine)).collect())
    }
}

#[cfg(test)]
#[path = "cellar_service_tests.rs"]
mod tests;
