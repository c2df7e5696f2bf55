//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - `memory`: process-local repositories backing the BFF until a database
//!   adapter exists.

pub mod memory;
