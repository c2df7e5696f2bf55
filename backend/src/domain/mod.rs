//! Domain entities, services and ports for the wine cellar.
//!
//! Purpose: hold the cellar's business rules free of transport and storage
//! concerns. Entities guard their own invariants; services coordinate them
//! through ports.
//!
//! Public surface:
//! - `Wine`, `WineDraft`, `WineSnapshot`, `WineId`, `WineType`: inventory entity.
//! - `User`, `UserSnapshot`, `UserId`: cellar owner identity.
//! - `OptimalConsumptionCalculator`, `ConsumptionStatus`, `ConsumptionReport`:
//!   consumption-window heuristics.
//! - `CellarService`: implementation of the cellar driving ports.
//! - `DomainError`: entity failures. `Error`: transport-agnostic payload.

mod cellar_service;
mod consumption;
mod domain_error;
pub mod error;
mod identifier;
pub mod ports;
mod trace_id;
mod user;
mod wine;

pub use self::cellar_service::CellarService;
pub use self::consumption::{
    APPROACHING_WINDOW_DAYS, ConsumptionReport, ConsumptionStatus, OptimalConsumptionCalculator,
    add_years, years_to_wait,
};
pub use self::domain_error::{DomainError, DomainErrorKind};
pub use self::error::{Error, ErrorCode};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{User, UserId, UserSnapshot};
pub use self::wine::{Wine, WineDraft, WineId, WineSnapshot, WineType, parse_quantity};
