//! Shared validation helpers for inbound HTTP adapters.
//!
//! Every helper reports failures as `invalid_request` errors whose details
//! name the offending field, the rejected value and a machine-readable code.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde_json::json;

use crate::domain::{Error, UserId, WineId, WineType, parse_quantity};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    InvalidIdentifier,
    InvalidTimestamp,
    InvalidWineType,
    InvalidQuantity,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::InvalidIdentifier => "invalid_identifier",
            ErrorCode::InvalidTimestamp => "invalid_timestamp",
            ErrorCode::InvalidWineType => "invalid_wine_type",
            ErrorCode::InvalidQuantity => "invalid_quantity",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &str {
        self.0
    }
}

fn field_error(
    field: FieldName,
    message: impl Into<String>,
    code: ErrorCode,
    value: serde_json::Value,
) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "value": value,
        "code": code.as_str(),
    }))
}

pub(crate) fn parse_wine_id(value: &str, field: FieldName) -> Result<WineId, Error> {
    WineId::new(value).map_err(|err| {
        field_error(
            field,
            err.to_string(),
            ErrorCode::InvalidIdentifier,
            json!(value),
        )
    })
}

pub(crate) fn parse_user_id(value: &str, field: FieldName) -> Result<UserId, Error> {
    UserId::new(value).map_err(|err| {
        field_error(
            field,
            err.to_string(),
            ErrorCode::InvalidIdentifier,
            json!(value),
        )
    })
}

pub(crate) fn parse_rfc3339_timestamp(
    value: &str,
    field: FieldName,
) -> Result<DateTime<Utc>, Error> {
    DateTime::parse_from_rfc3339(value)
        .map(|timestamp| timestamp.with_timezone(&Utc))
        .map_err(|_| {
            field_error(
                field,
                format!("{} must be an RFC 3339 timestamp", field.as_str()),
                ErrorCode::InvalidTimestamp,
                json!(value),
            )
        })
}

pub(crate) fn parse_optional_rfc3339_timestamp(
    value: Option<&str>,
    field: FieldName,
) -> Result<Option<DateTime<Utc>>, Error> {
    value
        .map(|raw| parse_rfc3339_timestamp(raw, field))
        .transpose()
}

pub(crate) fn parse_wine_type(value: &str, field: FieldName) -> Result<WineType, Error> {
    WineType::from_str(value).map_err(|_| {
        field_error(
            field,
            format!(
                "{} must be one of red, white, rose, sparkling",
                field.as_str()
            ),
            ErrorCode::InvalidWineType,
            json!(value),
        )
    })
}

pub(crate) fn parse_bottle_count(value: i64, field: FieldName) -> Result<u32, Error> {
    parse_quantity(value).map_err(|err| {
        field_error(
            field,
            err.to_string(),
            ErrorCode::InvalidQuantity,
            json!(value),
        )
    })
}
