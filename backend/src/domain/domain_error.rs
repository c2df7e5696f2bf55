//! Failures raised by the cellar entities and their identifiers.
//!
//! Every entity mutator validates before touching state, so receiving one of
//! these errors guarantees the entity is unchanged.

use serde_json::json;

use super::Error;

/// Fieldless tag naming a [`DomainError`] variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DomainErrorKind {
    InvalidQuantity,
    InvalidAmount,
    InsufficientStock,
    NotFound,
    InvalidData,
}

/// Domain failure carrying the data needed to describe it.
///
/// # Examples
/// ```
/// use celleret::domain::{DomainError, DomainErrorKind};
///
/// let err = DomainError::insufficient_stock(3, 1);
/// assert_eq!(err.kind(), DomainErrorKind::InsufficientStock);
/// assert_eq!(err.to_string(), "not enough bottles in cellar: requested 3, available 1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// Attempted to set inventory to a count that cannot be stored.
    #[error("quantity cannot be negative or exceed the maximum: {quantity}")]
    InvalidQuantity { quantity: i64 },
    /// Attempted to add or remove a non-positive number of bottles.
    #[error("amount must be positive: {amount}")]
    InvalidAmount { amount: i64 },
    /// Attempted to remove more bottles than the cellar holds.
    #[error("not enough bottles in cellar: requested {requested}, available {available}")]
    InsufficientStock { requested: i64, available: u32 },
    /// A lookup found nothing.
    #[error("{message}")]
    NotFound { message: String },
    /// Input data violates an entity precondition.
    #[error("invalid wine data: {message}")]
    InvalidData { message: String },
}

impl DomainError {
    /// Build [`DomainError::InvalidQuantity`].
    pub fn invalid_quantity(quantity: i64) -> Self {
        Self::InvalidQuantity { quantity }
    }

    /// Build [`DomainError::InvalidAmount`].
    pub fn invalid_amount(amount: i64) -> Self {
        Self::InvalidAmount { amount }
    }

    /// Build [`DomainError::InsufficientStock`].
    pub fn insufficient_stock(requested: i64, available: u32) -> Self {
        Self::InsufficientStock {
            requested,
            available,
        }
    }

    /// Build [`DomainError::NotFound`] for a wine identifier.
    pub fn wine_not_found(wine_id: impl std::fmt::Display) -> Self {
        Self::NotFound {
            message: format!("wine with id {wine_id} not found"),
        }
    }

    /// Build [`DomainError::InvalidData`].
    pub fn invalid_data(message: impl Into<String>) -> Self {
        Self::InvalidData {
            message: message.into(),
        }
    }

    /// Tag identifying the variant.
    pub fn kind(&self) -> DomainErrorKind {
        match self {
            Self::InvalidQuantity { .. } => DomainErrorKind::InvalidQuantity,
            Self::InvalidAmount { .. } => DomainErrorKind::InvalidAmount,
            Self::InsufficientStock { .. } => DomainErrorKind::InsufficientStock,
            Self::NotFound { .. } => DomainErrorKind::NotFound,
            Self::InvalidData { .. } => DomainErrorKind::InvalidData,
        }
    }

    fn code_str(&self) -> &'static str {
        match self.kind() {
            DomainErrorKind::InvalidQuantity => "invalid_quantity",
            DomainErrorKind::InvalidAmount => "invalid_amount",
            DomainErrorKind::InsufficientStock => "insufficient_stock",
            DomainErrorKind::NotFound => "not_found",
            DomainErrorKind::InvalidData => "invalid_data",
        }
    }
}

impl From<DomainError> for Error {
    fn from(value: DomainError) -> Self {
        let message = value.to_string();
        let details = json!({ "code": value.code_str() });
        let error = match &value {
            DomainError::InvalidQuantity { .. }
            | DomainError::InvalidAmount { .. }
            | DomainError::InvalidData { .. } => Error::invalid_request(message),
            DomainError::InsufficientStock { .. } => Error::conflict(message),
            DomainError::NotFound { .. } => Error::not_found(message),
        };
        error.with_details(details)
    }
}
