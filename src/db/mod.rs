//! Database operations, repository pattern, and persistence layer.

pub mod factory;
pub mod repositories;
pub mod repository;

pub use factory::{RepositoryFactory, RepositoryType};
pub use repository::{BookingRepository, RepositoryError, RepositoryResult};
