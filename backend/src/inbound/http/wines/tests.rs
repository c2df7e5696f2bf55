//! Tests for the cellar wine HTTP handlers.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use mockable::Clock;
use serde_json::{Value, json};

use super::*;
use crate::domain::CellarService;
use crate::domain::ports::{CellarCommand, CellarQuery, FixtureCellarQuery, MockCellarCommand};
use crate::outbound::memory::InMemoryWineRepository;
use crate::test_support::{MutableClock, utc};

fn cellar_app(
    command: Arc<dyn CellarCommand>,
    query: Arc<dyn CellarQuery>,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(HttpState::new(command, query)))
        .service(
            web::scope("/api/v1")
                .service(register_wine)
                .service(get_wine)
                .service(list_user_wines)
                .service(set_quantity)
                .service(adjust_bottles)
                .service(update_notes)
                .service(refresh_suggested_consumption_date),
        )
}

fn in_memory_app() -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let clock: Arc<dyn Clock> = Arc::new(MutableClock::new(utc(2024, 6, 15, 12, 0)));
    let service = Arc::new(CellarService::new(
        Arc::new(InMemoryWineRepository::new()),
        clock,
    ));
    cellar_app(service.clone(), service)
}

fn sample_wine_payload() -> Value {
    json!({
        "userId": "user-1",
        "name": "Viña Tondonia",
        "vintage": 2023,
        "coupage": "70% Tempranillo, 30% Garnacha",
        "type": "red",
        "cellarEntryDate": "2024-01-01T00:00:00Z",
        "quantity": 3,
        "alcoholContent": 13.5,
        "denomination": "DOCa Rioja",
        "winery": "López de Heredia",
        "suggestedConsumptionDate": "2024-07-15T12:00:00Z"
    })
}

async fn register(
    app: &impl actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
    >,
    payload: Value,
) -> WineResponseBody {
    let request = actix_test::TestRequest::post()
        .uri("/api/v1/wines")
        .set_json(payload)
        .to_request();
    let response = actix_test::call_service(app, request).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    actix_test::read_body_json(response).await
}

#[actix_web::test]
async fn register_returns_created_wine_with_location_and_report() {
    let app = actix_test::init_service(in_memory_app()).await;

    let request = actix_test::TestRequest::post()
        .uri("/api/v1/wines")
        .set_json(sample_wine_payload())
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let location = response
        .headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
        .expect("location header");
    let body: WineResponseBody = actix_test::read_body_json(response).await;

    assert_eq!(location, format!("/api/v1/wines/{}", body.id));
    assert_eq!(body.wine_type, "red");
    assert_eq!(body.quantity, 3);
    assert_eq!(body.created_at, "2024-06-15T12:00:00.000Z");
    assert_eq!(body.consumption.status, "approaching");
    assert_eq!(body.consumption.days_until_optimal, Some(30));
    assert!(!body.consumption.optimal_to_consume);
}

#[actix_web::test]
async fn registered_wine_is_readable_and_listed_for_its_owner() {
    let app = actix_test::init_service(in_memory_app()).await;
    let created = register(&app, sample_wine_payload()).await;

    let fetched = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri(&format!("/api/v1/wines/{}", created.id))
            .to_request(),
    )
    .await;
    assert_eq!(fetched.status(), StatusCode::OK);
    let fetched: WineResponseBody = actix_test::read_body_json(fetched).await;
    assert_eq!(fetched.name, "Viña Tondonia");

    let listed = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/users/user-1/wines")
            .to_request(),
    )
    .await;
    assert_eq!(listed.status(), StatusCode::OK);
    let listed: Vec<WineResponseBody> = actix_test::read_body_json(listed).await;
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, created.id);
}

#[actix_web::test]
async fn unknown_wine_answers_not_found() {
    let app = actix_test::init_service(in_memory_app()).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/wines/wine-404")
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body.get("code").and_then(Value::as_str), Some("not_found"));
}

#[actix_web::test]
async fn register_rejects_negative_quantity() {
    let app = actix_test::init_service(in_memory_app()).await;
    let mut payload = sample_wine_payload();
    payload["quantity"] = json!(-1);

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/wines")
            .set_json(payload)
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["details"]["field"], json!("quantity"));
}

#[actix_web::test]
async fn register_rejects_unknown_wine_type() {
    let app = actix_test::init_service(in_memory_app()).await;
    let mut payload = sample_wine_payload();
    payload["type"] = json!("orange");

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/wines")
            .set_json(payload)
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn set_quantity_rejects_negative_values() {
    let app = actix_test::init_service(in_memory_app()).await;
    let created = register(&app, sample_wine_payload()).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::put()
            .uri(&format!("/api/v1/wines/{}/quantity", created.id))
            .set_json(json!({"quantity": -4}))
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["details"]["code"], json!("invalid_quantity"));
}

#[actix_web::test]
async fn set_quantity_overwrites_bottle_count() {
    let app = actix_test::init_service(in_memory_app()).await;
    let created = register(&app, sample_wine_payload()).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::put()
            .uri(&format!("/api/v1/wines/{}/quantity", created.id))
            .set_json(json!({"quantity": 0}))
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: WineResponseBody = actix_test::read_body_json(response).await;
    assert_eq!(body.quantity, 0);
}

#[actix_web::test]
async fn removing_more_bottles_than_held_is_a_conflict() {
    let app = actix_test::init_service(in_memory_app()).await;
    let created = register(&app, sample_wine_payload()).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri(&format!("/api/v1/wines/{}/bottles", created.id))
            .set_json(json!({"action": "remove", "amount": 4}))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let unchanged = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri(&format!("/api/v1/wines/{}", created.id))
            .to_request(),
    )
    .await;
    let unchanged: WineResponseBody = actix_test::read_body_json(unchanged).await;
    assert_eq!(unchanged.quantity, 3);
}

#[actix_web::test]
async fn bottles_endpoint_adds_bottles() {
    let app = actix_test::init_service(in_memory_app()).await;
    let created = register(&app, sample_wine_payload()).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri(&format!("/api/v1/wines/{}/bottles", created.id))
            .set_json(json!({"action": "add", "amount": 2}))
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: WineResponseBody = actix_test::read_body_json(response).await;
    assert_eq!(body.quantity, 5);
}

#[actix_web::test]
async fn bottles_endpoint_rejects_unknown_action() {
    let app = actix_test::init_service(in_memory_app()).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/wines/wine-1/bottles")
            .set_json(json!({"action": "drink", "amount": 1}))
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["details"]["code"], json!("invalid_bottle_action"));
}

#[actix_web::test]
async fn notes_are_replaced() {
    let app = actix_test::init_service(in_memory_app()).await;
    let created = register(&app, sample_wine_payload()).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::put()
            .uri(&format!("/api/v1/wines/{}/notes", created.id))
            .set_json(json!({"notes": "Decant for an hour"}))
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: WineResponseBody = actix_test::read_body_json(response).await;
    assert_eq!(body.notes.as_deref(), Some("Decant for an hour"));
}

#[actix_web::test]
async fn refresh_stores_heuristic_date() {
    let app = actix_test::init_service(in_memory_app()).await;
    let created = register(&app, sample_wine_payload()).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri(&format!(
                "/api/v1/wines/{}/suggested-consumption-date",
                created.id
            ))
            .to_request(),
    )
    .await;

    // Red, vintage 2023, one year old in 2024: two years after entry.
    assert_eq!(response.status(), StatusCode::OK);
    let body: WineResponseBody = actix_test::read_body_json(response).await;
    assert_eq!(
        body.suggested_consumption_date.as_deref(),
        Some("2026-01-01T00:00:00.000Z")
    );
    assert_eq!(body.consumption.status, "not-ready");
    // 564.5 days remain from mid-day, rounded up.
    assert_eq!(body.consumption.days_until_optimal, Some(565));
}

#[actix_web::test]
async fn repository_outage_answers_service_unavailable() {
    let mut command = MockCellarCommand::new();
    command
        .expect_register_wine()
        .times(1)
        .return_once(|_| Err(Error::service_unavailable("wine repository unavailable")));
    let app = actix_test::init_service(cellar_app(
        Arc::new(command),
        Arc::new(FixtureCellarQuery),
    ))
    .await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/wines")
            .set_json(sample_wine_payload())
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[actix_web::test]
async fn list_for_owner_without_wines_is_empty() {
    let app = actix_test::init_service(in_memory_app()).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/users/user-2/wines")
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Vec<WineResponseBody> = actix_test::read_body_json(response).await;
    assert!(body.is_empty());
}
