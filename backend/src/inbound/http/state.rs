//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{CellarCommand, CellarQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub cellar: Arc<dyn CellarCommand>,
    pub cellar_query: Arc<dyn CellarQuery>,
}

impl HttpState {
    /// Construct state from the cellar driving ports.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use celleret::domain::ports::{FixtureCellarCommand, FixtureCellarQuery};
    /// use celleret::inbound::http::state::HttpState;
    ///
    /// let state = HttpState::new(Arc::new(FixtureCellarCommand), Arc::new(FixtureCellarQuery));
    /// let _query = state.cellar_query.clone();
    /// ```
    pub fn new(cellar: Arc<dyn CellarCommand>, cellar_query: Arc<dyn CellarQuery>) -> Self {
        Self {
            cellar,
            cellar_query,
        }
    }
}
