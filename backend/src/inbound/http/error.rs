//! Cellar error responses.
//!
//! Stock and quantity rules surface as 400 or 409, missing wines as 404 and
//! repository outages as 503. Anything else is a 500 whose message and
//! details stay in the server log; the client only sees
//! [`INTERNAL_ERROR_MESSAGE`] and the trace id to quote when reporting it.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use tracing::{error, warn};

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

/// Result alias used by the cellar handlers.
pub type ApiResult<T> = Result<T, Error>;

/// Message returned in place of any internal failure.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Conflict => StatusCode::CONFLICT,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Body sent to the client for `error`.
fn public_body(error: &Error) -> Error {
    match error.code() {
        ErrorCode::InternalError => {
            error!(
                trace_id = error.trace_id().unwrap_or_default(),
                message = error.message(),
                "cellar request failed"
            );
            let opaque = Error::internal(INTERNAL_ERROR_MESSAGE);
            match error.trace_id() {
                Some(id) => opaque.with_trace_id(id.to_owned()),
                None => opaque,
            }
        }
        ErrorCode::ServiceUnavailable => {
            warn!(
                trace_id = error.trace_id().unwrap_or_default(),
                message = error.message(),
                "cellar storage unavailable"
            );
            error.clone()
        }
        _ => error.clone(),
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }
        builder.json(public_body(self))
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        error!(error = %err, "actix error promoted to cellar error");
        Error::internal(INTERNAL_ERROR_MESSAGE)
    }
}
