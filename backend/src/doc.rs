//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every cellar and health endpoint together with the
//! error schema wrappers ([`ErrorSchema`], [`ErrorCodeSchema`]) that describe
//! domain errors without coupling the domain to utoipa.
//!
//! The document backs Swagger UI in debug builds and is exported via
//! `cargo run --bin openapi-dump` for external tooling.

use utoipa::OpenApi;

use crate::inbound::http::health::HealthStatusBody;
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use crate::inbound::http::wines::{
    BottlesRequestBody, ConsumptionBody, NotesRequestBody, QuantityRequestBody,
    RegisterWineRequestBody, WineResponseBody,
};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Celleret backend API",
        description = "Backend-for-frontend for managing a personal wine cellar and its consumption windows."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::health::api_health,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
        crate::inbound::http::wines::register_wine,
        crate::inbound::http::wines::get_wine,
        crate::inbound::http::wines::list_user_wines,
        crate::inbound::http::wines::set_quantity,
        crate::inbound::http::wines::adjust_bottles,
        crate::inbound::http::wines::update_notes,
        crate::inbound::http::wines::refresh_suggested_consumption_date,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        HealthStatusBody,
        RegisterWineRequestBody,
        QuantityRequestBody,
        BottlesRequestBody,
        NotesRequestBody,
        ConsumptionBody,
        WineResponseBody,
    )),
    tags(
        (name = "wines", description = "Cellar inventory and consumption windows"),
        (name = "health", description = "Service status and orchestration probes")
    )
)]
pub struct ApiDoc;
