//! Tests for the cellar domain service.

use std::sync::Arc;

use chrono::TimeDelta;
use mockall::predicate::eq;
use rstest::rstest;

use super::*;
use crate::domain::ports::MockWineRepository;
use crate::domain::{ConsumptionStatus, ErrorCode, WineType};
use crate::test_support::{MutableClock, red_wine_draft, utc};

fn fixture_clock() -> Arc<MutableClock> {
    Arc::new(MutableClock::new(utc(2024, 6, 15, 12, 0)))
}

fn stored_wine(quantity: u32) -> Wine {
    let clock = MutableClock::new(utc(2023, 1, 1, 0, 0));
    Wine::create(red_wine_draft(2023, quantity), &clock)
}

fn make_service(
    repo: MockWineRepository,
    clock: Arc<MutableClock>,
) -> CellarService<MockWineRepository> {
    CellarService::new(Arc::new(repo), clock)
}

fn register_request() -> RegisterWineRequest {
    let draft = red_wine_draft(2021, 6);
    RegisterWineRequest {
        user_id: draft.user_id,
        name: draft.name,
        vintage: draft.vintage,
        coupage: draft.coupage,
        wine_type: WineType::White,
        cellar_entry_date: draft.cellar_entry_date,
        quantity: draft.quantity,
        alcohol_content: 12.5,
        denomination: draft.denomination,
        winery: draft.winery,
        suggested_consumption_date: None,
        notes: Some("Gift".to_owned()),
    }
}

#[tokio::test]
async fn register_saves_new_wine_with_generated_id() {
    let mut repo = MockWineRepository::new();
    repo.expect_save().times(1).return_once(|_| Ok(()));

    let service = make_service(repo, fixture_clock());
    let view = service
        .register_wine(register_request())
        .await
        .expect("registration succeeds");

    assert!(!view.wine.id.as_ref().is_empty());
    assert_eq!(view.wine.quantity, 6);
    assert_eq!(view.wine.created_at, utc(2024, 6, 15, 12, 0));
    assert_eq!(view.consumption.status, ConsumptionStatus::Unknown);
}

#[tokio::test]
async fn register_maps_connection_error_to_service_unavailable() {
    let mut repo = MockWineRepository::new();
    repo.expect_save()
        .times(1)
        .return_once(|_| Err(WineRepositoryError::connection("pool exhausted")));

    let service = make_service(repo, fixture_clock());
    let error = service
        .register_wine(register_request())
        .await
        .expect_err("repository offline");

    assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
}

#[tokio::test]
async fn get_wine_returns_not_found_when_missing() {
    let mut repo = MockWineRepository::new();
    repo.expect_find_by_id().times(1).return_once(|_| Ok(None));

    let service = make_service(repo, fixture_clock());
    let error = service
        .get_wine(&WineId::new("wine-404").expect("valid id"))
        .await
        .expect_err("not found");

    assert_eq!(error.code(), ErrorCode::NotFound);
    assert_eq!(error.message(), "wine with id wine-404 not found");
}

#[tokio::test]
async fn get_wine_maps_query_error_to_internal() {
    let mut repo = MockWineRepository::new();
    repo.expect_find_by_id()
        .times(1)
        .return_once(|_| Err(WineRepositoryError::query("syntax error")));

    let service = make_service(repo, fixture_clock());
    let error = service
        .get_wine(&WineId::random())
        .await
        .expect_err("query failure");

    assert_eq!(error.code(), ErrorCode::InternalError);
}

#[rstest]
#[case(BottleAdjustment::Add { amount: 2 }, 5)]
#[case(BottleAdjustment::Remove { amount: 3 }, 0)]
#[tokio::test]
async fn adjust_bottles_persists_new_quantity(
    #[case] adjustment: BottleAdjustment,
    #[case] expected: u32,
) {
    let wine = stored_wine(3);
    let wine_id = wine.id().clone();
    let mut repo = MockWineRepository::new();
    repo.expect_find_by_id()
        .with(eq(wine_id.clone()))
        .times(1)
        .return_once(move |_| Ok(Some(wine)));
    repo.expect_update()
        .withf(move |wine: &Wine| wine.quantity() == expected)
        .times(1)
        .return_once(|_| Ok(()));

    let service = make_service(repo, fixture_clock());
    let view = service
        .adjust_bottles(&wine_id, adjustment)
        .await
        .expect("adjustment succeeds");

    assert_eq!(view.wine.quantity, expected);
    assert_eq!(view.wine.updated_at, utc(2024, 6, 15, 12, 0));
}

#[tokio::test]
async fn insufficient_stock_is_a_conflict_and_nothing_is_written() {
    let wine = stored_wine(1);
    let wine_id = wine.id().clone();
    let mut repo = MockWineRepository::new();
    repo.expect_find_by_id()
        .times(1)
        .return_once(move |_| Ok(Some(wine)));
    repo.expect_update().times(0);

    let service = make_service(repo, fixture_clock());
    let error = service
        .adjust_bottles(&wine_id, BottleAdjustment::Remove { amount: 2 })
        .await
        .expect_err("not enough bottles");

    assert_eq!(error.code(), ErrorCode::Conflict);
}

#[rstest]
#[case(-1)]
#[case(i64::MIN)]
#[tokio::test]
async fn negative_quantity_is_rejected_without_writing(#[case] quantity: i64) {
    let wine = stored_wine(4);
    let wine_id = wine.id().clone();
    let mut repo = MockWineRepository::new();
    repo.expect_find_by_id()
        .times(1)
        .return_once(move |_| Ok(Some(wine)));
    repo.expect_update().times(0);

    let service = make_service(repo, fixture_clock());
    let error = service
        .set_quantity(&wine_id, quantity)
        .await
        .expect_err("invalid quantity");

    assert_eq!(error.code(), ErrorCode::InvalidRequest);
}

#[tokio::test]
async fn update_notes_persists_notes() {
    let wine = stored_wine(4);
    let wine_id = wine.id().clone();
    let mut repo = MockWineRepository::new();
    repo.expect_find_by_id()
        .times(1)
        .return_once(move |_| Ok(Some(wine)));
    repo.expect_update()
        .withf(|wine: &Wine| wine.notes() == Some("Open in 2026"))
        .times(1)
        .return_once(|_| Ok(()));

    let service = make_service(repo, fixture_clock());
    let view = service
        .update_notes(&wine_id, "Open in 2026".to_owned())
        .await
        .expect("notes stored");

    assert_eq!(view.wine.notes.as_deref(), Some("Open in 2026"));
}

#[tokio::test]
async fn refresh_stores_heuristic_date_and_reports_status() {
    // Red, vintage 2023, evaluated in 2024: age 1, so two years after the
    // 2020-01-01 cellar entry.
    let wine = stored_wine(2);
    let wine_id = wine.id().clone();
    let mut repo = MockWineRepository::new();
    repo.expect_find_by_id()
        .times(1)
        .return_once(move |_| Ok(Some(wine)));
    repo.expect_update()
        .withf(|wine: &Wine| wine.suggested_consumption_date() == Some(utc(2022, 1, 1, 0, 0)))
        .times(1)
        .return_once(|_| Ok(()));

    let service = make_service(repo, fixture_clock());
    let view = service
        .refresh_suggested_consumption_date(&wine_id)
        .await
        .expect("refresh succeeds");

    assert_eq!(view.wine.suggested_consumption_date, Some(utc(2022, 1, 1, 0, 0)));
    assert_eq!(view.consumption.status, ConsumptionStatus::Optimal);
    assert!(view.consumption.optimal_to_consume);
}

#[tokio::test]
async fn list_reports_each_wine_against_the_same_clock() {
    let clock = fixture_clock();
    let mut soon = stored_wine(1);
    soon.update_suggested_consumption_date(clock.utc() + TimeDelta::days(10), clock.as_ref());
    let unknown = stored_wine(2);
    let owner = soon.user_id().clone();

    let mut repo = MockWineRepository::new();
    repo.expect_find_by_user_id()
        .with(eq(owner.clone()))
        .times(1)
        .return_once(move |_| Ok(vec![soon, unknown]));

    let service = make_service(repo, clock);
    let views = service
        .list_wines_for_owner(&owner)
        .await
        .expect("list succeeds");

    let statuses: Vec<_> = views.iter().map(|view| view.consumption.status).collect();
    assert_eq!(
        statuses,
        vec![ConsumptionStatus::Approaching, ConsumptionStatus::Unknown]
    );
    assert_eq!(views[0].consumption.days_until_optimal, Some(10));
}
