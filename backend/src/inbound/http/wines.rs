//! Cellar wine HTTP handlers.
//!
//! ```text
//! POST /api/v1/wines
//! GET  /api/v1/wines/{wine_id}
//! GET  /api/v1/users/{user_id}/wines
//! PUT  /api/v1/wines/{wine_id}/quantity {"quantity":6}
//! POST /api/v1/wines/{wine_id}/bottles {"action":"remove","amount":1}
//! PUT  /api/v1/wines/{wine_id}/notes {"notes":"Open with lamb"}
//! POST /api/v1/wines/{wine_id}/suggested-consumption-date
//! ```

use actix_web::http::header;
use actix_web::{HttpResponse, get, post, put, web};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::ports::{BottleAdjustment, RegisterWineRequest, WineView};
use crate::domain::{ConsumptionReport, Error, WineId, WineSnapshot};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, parse_bottle_count, parse_optional_rfc3339_timestamp, parse_rfc3339_timestamp,
    parse_user_id, parse_wine_id, parse_wine_type,
};

#[derive(Debug, Deserialize)]
struct WinePath {
    wine_id: String,
}

#[derive(Debug, Deserialize)]
struct OwnerPath {
    user_id: String,
}

/// Request payload for registering a wine.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterWineRequestBody {
    pub user_id: String,
    pub name: String,
    pub vintage: i32,
    pub coupage: String,
    #[serde(rename = "type")]
    #[schema(example = "red")]
    pub wine_type: String,
    #[schema(format = "date-time")]
    pub cellar_entry_date: String,
    pub quantity: i64,
    pub alcohol_content: f64,
    pub denomination: String,
    pub winery: String,
    #[serde(default)]
    #[schema(format = "date-time")]
    pub suggested_consumption_date: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Request payload replacing a wine's bottle count.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuantityRequestBody {
    pub quantity: i64,
}

/// Request payload adding or removing bottles.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BottlesRequestBody {
    #[schema(example = "add")]
    pub action: String,
    pub amount: i64,
}

/// Request payload replacing a wine's tasting notes.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NotesRequestBody {
    pub notes: String,
}

/// Consumption window evaluated when the response was built.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConsumptionBody {
    #[schema(example = "approaching")]
    pub status: String,
    pub days_until_optimal: Option<i64>,
    pub optimal_to_consume: bool,
}

/// Wine as returned by every cellar endpoint.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WineResponseBody {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub vintage: i32,
    pub coupage: String,
    #[serde(rename = "type")]
    pub wine_type: String,
    #[schema(format = "date-time")]
    pub cellar_entry_date: String,
    pub quantity: u32,
    pub alcohol_content: f64,
    pub denomination: String,
    pub winery: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(format = "date-time")]
    pub suggested_consumption_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[schema(format = "date-time")]
    pub created_at: String,
    #[schema(format = "date-time")]
    pub updated_at: String,
    pub consumption: ConsumptionBody,
}

fn timestamp(value: DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Millis, true)
}

impl From<ConsumptionReport> for ConsumptionBody {
    fn from(value: ConsumptionReport) -> Self {
        Self {
            status: value.status.to_string(),
            days_until_optimal: value.days_until_optimal,
            optimal_to_consume: value.optimal_to_consume,
        }
    }
}

impl From<WineView> for WineResponseBody {
    fn from(value: WineView) -> Self {
        let WineSnapshot {
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
            created_at,
            updated_at,
        } = value.wine;
        Self {
            id: id.into(),
            user_id: user_id.into(),
            name,
            vintage,
            coupage,
            wine_type: wine_type.to_string(),
            cellar_entry_date: timestamp(cellar_entry_date),
            quantity,
            alcohol_content,
            denomination,
            winery,
            suggested_consumption_date: suggested_consumption_date.map(timestamp),
            notes,
            created_at: timestamp(created_at),
            updated_at: timestamp(updated_at),
            consumption: value.consumption.into(),
        }
    }
}

fn parse_register_request(body: RegisterWineRequestBody) -> Result<RegisterWineRequest, Error> {
    Ok(RegisterWineRequest {
        user_id: parse_user_id(&body.user_id, FieldName::new("userId"))?,
        wine_type: parse_wine_type(&body.wine_type, FieldName::new("type"))?,
        cellar_entry_date: parse_rfc3339_timestamp(
            &body.cellar_entry_date,
            FieldName::new("cellarEntryDate"),
        )?,
        quantity: parse_bottle_count(body.quantity, FieldName::new("quantity"))?,
        suggested_consumption_date: parse_optional_rfc3339_timestamp(
            body.suggested_consumption_date.as_deref(),
            FieldName::new("suggestedConsumptionDate"),
        )?,
        name: body.name,
        vintage: body.vintage,
        coupage: body.coupage,
        alcohol_content: body.alcohol_content,
        denomination: body.denomination,
        winery: body.winery,
        notes: body.notes,
    })
}

fn parse_adjustment(body: BottlesRequestBody) -> Result<BottleAdjustment, Error> {
    match body.action.as_str() {
        "add" => Ok(BottleAdjustment::Add {
            amount: body.amount,
        }),
        "remove" => Ok(BottleAdjustment::Remove {
            amount: body.amount,
        }),
        other => Err(
            Error::invalid_request("action must be add or remove").with_details(json!({
                "field": "action",
                "value": other,
                "code": "invalid_bottle_action",
            })),
        ),
    }
}

fn wine_id_from(path: web::Path<WinePath>) -> Result<WineId, Error> {
    parse_wine_id(&path.into_inner().wine_id, FieldName::new("wineId"))
}

/// Register a wine in its owner's cellar.
///
/// Responds with `201 Created` and a `Location` header pointing at the new
/// wine.
#[utoipa::path(
    post,
    path = "/api/v1/wines",
    request_body = RegisterWineRequestBody,
    responses(
        (status = 201, description = "Wine registered", body = WineResponseBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["wines"],
    operation_id = "registerWine"
)]
#[post("/wines")]
pub async fn register_wine(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterWineRequestBody>,
) -> ApiResult<HttpResponse> {
    let request = parse_register_request(payload.into_inner())?;
    let view = state.cellar.register_wine(request).await?;
    let body = WineResponseBody::from(view);
    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, format!("/api/v1/wines/{}", body.id)))
        .json(body))
}

/// Fetch a wine with its consumption report.
#[utoipa::path(
    get,
    path = "/api/v1/wines/{wine_id}",
    params(
        ("wine_id" = String, Path, description = "Wine identifier")
    ),
    responses(
        (status = 200, description = "Wine", body = WineResponseBody),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["wines"],
    operation_id = "getWine"
)]
#[get("/wines/{wine_id}")]
pub async fn get_wine(
    state: web::Data<HttpState>,
    path: web::Path<WinePath>,
) -> ApiResult<web::Json<WineResponseBody>> {
    let wine_id = wine_id_from(path)?;
    let view = state.cellar_query.get_wine(&wine_id).await?;
    Ok(web::Json(view.into()))
}

/// List every wine in a user's cellar.
#[utoipa::path(
    get,
    path = "/api/v1/users/{user_id}/wines",
    params(
        ("user_id" = String, Path, description = "Owner identifier")
    ),
    responses(
        (status = 200, description = "Owner's wines", body = [WineResponseBody]),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["wines"],
    operation_id = "listUserWines"
)]
#[get("/users/{user_id}/wines")]
pub async fn list_user_wines(
    state: web::Data<HttpState>,
    path: web::Path<OwnerPath>,
) -> ApiResult<web::Json<Vec<WineResponseBody>>> {
    let user_id = parse_user_id(&path.into_inner().user_id, FieldName::new("userId"))?;
    let views = state.cellar_query.list_wines_for_owner(&user_id).await?;
    Ok(web::Json(views.into_iter().map(Into::into).collect()))
}

/// Overwrite a wine's bottle count.
#[utoipa::path(
    put,
    path = "/api/v1/wines/{wine_id}/quantity",
    request_body = QuantityRequestBody,
    params(
        ("wine_id" = String, Path, description = "Wine identifier")
    ),
    responses(
        (status = 200, description = "Updated wine", body = WineResponseBody),
        (status = 400, description = "Negative quantity", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["wines"],
    operation_id = "setWineQuantity"
)]
#[put("/wines/{wine_id}/quantity")]
pub async fn set_quantity(
    state: web::Data<HttpState>,
    path: web::Path<WinePath>,
    payload: web::Json<QuantityRequestBody>,
) -> ApiResult<web::Json<WineResponseBody>> {
    let wine_id = wine_id_from(path)?;
    let view = state
        .cellar
        .set_quantity(&wine_id, payload.into_inner().quantity)
        .await?;
    Ok(web::Json(view.into()))
}

/// Add or remove bottles.
///
/// Removing more bottles than are held answers `409 Conflict` and leaves the
/// wine untouched.
#[utoipa::path(
    post,
    path = "/api/v1/wines/{wine_id}/bottles",
    request_body = BottlesRequestBody,
    params(
        ("wine_id" = String, Path, description = "Wine identifier")
    ),
    responses(
        (status = 200, description = "Updated wine", body = WineResponseBody),
        (status = 400, description = "Invalid action or amount", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 409, description = "Not enough bottles", body = ErrorSchema)
    ),
    tags = ["wines"],
    operation_id = "adjustWineBottles"
)]
#[post("/wines/{wine_id}/bottles")]
pub async fn adjust_bottles(
    state: web::Data<HttpState>,
    path: web::Path<WinePath>,
    payload: web::Json<BottlesRequestBody>,
) -> ApiResult<web::Json<WineResponseBody>> {
    let wine_id = wine_id_from(path)?;
    let adjustment = parse_adjustment(payload.into_inner())?;
    let view = state.cellar.adjust_bottles(&wine_id, adjustment).await?;
    Ok(web::Json(view.into()))
}

/// Replace a wine's tasting notes.
#[utoipa::path(
    put,
    path = "/api/v1/wines/{wine_id}/notes",
    request_body = NotesRequestBody,
    params(
        ("wine_id" = String, Path, description = "Wine identifier")
    ),
    responses(
        (status = 200, description = "Updated wine", body = WineResponseBody),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["wines"],
    operation_id = "updateWineNotes"
)]
#[put("/wines/{wine_id}/notes")]
pub async fn update_notes(
    state: web::Data<HttpState>,
    path: web::Path<WinePath>,
    payload: web::Json<NotesRequestBody>,
) -> ApiResult<web::Json<WineResponseBody>> {
    let wine_id = wine_id_from(path)?;
    let view = state
        .cellar
        .update_notes(&wine_id, payload.into_inner().notes)
        .await?;
    Ok(web::Json(view.into()))
}

/// Recompute and store the heuristic consumption date.
#[utoipa::path(
    post,
    path = "/api/v1/wines/{wine_id}/suggested-consumption-date",
    params(
        ("wine_id" = String, Path, description = "Wine identifier")
    ),
    responses(
        (status = 200, description = "Updated wine", body = WineResponseBody),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["wines"],
    operation_id = "refreshSuggestedConsumptionDate"
)]
#[post("/wines/{wine_id}/suggested-consumption-date")]
pub async fn refresh_suggested_consumption_date(
    state: web::Data<HttpState>,
    path: web::Path<WinePath>,
) -> ApiResult<web::Json<WineResponseBody>> {
    let wine_id = wine_id_from(path)?;
    let view = state
        .cellar
        .refresh_suggested_consumption_date(&wine_id)
        .await?;
    Ok(web::Json(view.into()))
}

#[cfg(test)]
mod tests;
