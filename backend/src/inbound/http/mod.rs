//! HTTP inbound adapter exposing the cellar REST endpoints.

pub mod error;
pub mod health;
pub mod schemas;
pub mod state;
pub mod validation;
pub mod wines;

pub use error::ApiResult;
