//! Engine error taxonomy.

use crate::db::repository::RepositoryError;
use crate::locks::LockStoreError;

/// Errors surfaced by the discovery and booking services.
///
/// The first six variants are domain outcomes with a defined caller-facing
/// meaning; the rest wrap collaborator failures. Nothing in the engine
/// retries: every "try again" decision belongs to the caller.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Requested window does not intersect service hours")]
    OutOfServiceWindow,

    #[error("No single or combo gap fits the party within the window")]
    NoCapacity,

    #[error("Missing idempotency key")]
    MissingIdempotencyKey,

    #[error("Another booking attempt holds this resource")]
    LockConflict,

    #[error("Booking {0} not found")]
    NotFound(String),

    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    #[error("Lock store error: {0}")]
    LockStore(#[from] LockStoreError),

    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}
