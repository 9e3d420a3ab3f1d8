//! Application state for the HTTP server.

use std::sync::Arc;

use crate::db::repository::BookingRepository;
use crate::locks::LockStore;
use crate::services::{BookingCoordinator, EngineSettings};

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Repository instance for storage operations
    pub repository: Arc<dyn BookingRepository>,
    /// Lock/idempotency-cache store
    pub locks: Arc<dyn LockStore>,
    /// Coordinator owning the booking write path
    pub coordinator: Arc<BookingCoordinator>,
}

impl AppState {
    /// Create a new application state with the given collaborators.
    pub fn new(
        repository: Arc<dyn BookingRepository>,
        locks: Arc<dyn LockStore>,
        settings: EngineSettings,
    ) -> Self {
        let coordinator = Arc::new(BookingCoordinator::new(
            repository.clone(),
            locks.clone(),
            settings,
        ));
        Self {
            repository,
            locks,
            coordinator,
        }
    }
}
