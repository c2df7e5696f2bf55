//! Server construction and middleware wiring.

mod config;
mod settings;

pub use config::ServerConfig;
pub use settings::ServerSettings;

use std::sync::Arc;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use mockable::Clock;

use celleret::Trace;
#[cfg(debug_assertions)]
use celleret::doc::ApiDoc;
use celleret::domain::CellarService;
use celleret::inbound::http::health::{HealthState, api_health, live, ready};
use celleret::inbound::http::state::HttpState;
use celleret::inbound::http::wines::{
    adjust_bottles, get_wine, list_user_wines, refresh_suggested_consumption_date, register_wine,
    set_quantity, update_notes,
};
use celleret::outbound::memory::InMemoryWineRepository;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

/// Wire the cellar service over the in-memory wine repository.
fn build_http_state(clock: Arc<dyn Clock>) -> HttpState {
    let service = Arc::new(CellarService::new(
        Arc::new(InMemoryWineRepository::new()),
        clock,
    ));
    HttpState::new(service.clone(), service)
}

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
    } = deps;

    let api = web::scope("/api/v1")
        .service(register_wine)
        .service(get_wine)
        .service(list_user_wines)
        .service(set_quantity)
        .service(adjust_bottles)
        .service(update_notes)
        .service(refresh_suggested_consumption_date);

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .service(api_health)
        .service(api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    #[cfg(not(debug_assertions))]
    let app = app;

    app
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// OS signal handling is disabled; the caller owns shutdown so it can flip
/// the liveness probe before the server drains.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let ServerConfig { bind_addr, clock } = config;
    let http_state = web::Data::new(build_http_state(clock));

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
        })
    })
    .disable_signals()
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}
