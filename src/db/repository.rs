//! Repository trait for abstracting database operations.
//!
//! This trait defines the storage contract the engine depends on, allowing
//! different implementations (relational production store, in-memory local
//! store) to be swapped via dependency injection. Instances are passed
//! explicitly (`Arc<dyn BookingRepository>`); there is no global handle.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;

use crate::models::{Booking, NewBooking, ServiceWindow, Table};

/// Result type for repository operations
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Error type for repository operations
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Query error: {0}")]
    QueryError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Data validation error: {0}")]
    ValidationError(String),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl From<String> for RepositoryError {
    fn from(s: String) -> Self {
        RepositoryError::InternalError(s)
    }
}

impl From<&str> for RepositoryError {
    fn from(s: &str) -> Self {
        RepositoryError::InternalError(s.to_string())
    }
}

/// Repository trait for booking storage operations.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to work with async Rust and allow
/// sharing across threads.
///
/// # Atomicity
/// [`insert_booking`](BookingRepository::insert_booking) writes the booking
/// row and one assignment row per table as a single atomic unit: on any
/// failure the whole write rolls back and no partial state is observable.
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Check if the storage connection is healthy.
    async fn health_check(&self) -> RepositoryResult<bool>;

    // ==================== Reference Data ====================

    /// Operating-hours windows of a restaurant, chronological and
    /// non-overlapping. Empty when the restaurant is closed all day.
    async fn get_service_windows(&self, restaurant_id: &str)
        -> RepositoryResult<Vec<ServiceWindow>>;

    /// IANA timezone of a restaurant; UTC when unset.
    async fn get_timezone(&self, restaurant_id: &str) -> RepositoryResult<Tz>;

    // ==================== Availability ====================

    /// Every table of the sector with no CONFIRMED booking overlapping
    /// `[start, end)`.
    ///
    /// The overlap test is half-open: a booking ending exactly at `start`
    /// does not count as a conflict.
    async fn find_free_tables(
        &self,
        restaurant_id: &str,
        sector_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> RepositoryResult<Vec<Table>>;

    // ==================== Bookings ====================

    /// Atomically insert a booking and its table assignments.
    ///
    /// # Returns
    /// * `Ok(Booking)` - The committed booking with timestamps assigned
    /// * `Err(RepositoryError::Conflict)` - A table is no longer free
    /// * `Err(RepositoryError::ValidationError)` - An unknown table id
    async fn insert_booking(&self, booking: &NewBooking) -> RepositoryResult<Booking>;

    /// Mark a booking CANCELLED (soft delete).
    ///
    /// # Returns
    /// * `Err(RepositoryError::NotFound)` - No booking with that id exists
    async fn cancel_booking(&self, booking_id: &str) -> RepositoryResult<()>;

    /// Whether a booking with the given id exists (any status).
    async fn booking_exists(&self, booking_id: &str) -> RepositoryResult<bool>;

    /// CONFIRMED bookings of a sector starting on the given calendar date
    /// (restaurant timezone), ordered by start instant.
    async fn bookings_for_day(
        &self,
        restaurant_id: &str,
        sector_id: &str,
        date: NaiveDate,
    ) -> RepositoryResult<Vec<Booking>>;
}
