//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`*Repository`) are implemented by outbound adapters; driving
//! ports (`CellarCommand`, `CellarQuery`) are implemented by domain services
//! and consumed by inbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod cellar_command;
mod cellar_query;
mod user_repository;
mod wine_repository;

#[cfg(test)]
pub use cellar_command::MockCellarCommand;
pub use cellar_command::{
    BottleAdjustment, CellarCommand, FixtureCellarCommand, RegisterWineRequest,
};
#[cfg(test)]
pub use cellar_query::MockCellarQuery;
pub use cellar_query::{CellarQuery, FixtureCellarQuery, WineView};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{FixtureUserRepository, UserRepository, UserRepositoryError};
#[cfg(test)]
pub use wine_repository::MockWineRepository;
pub use wine_repository::{FixtureWineRepository, WineRepository, WineRepositoryError};
