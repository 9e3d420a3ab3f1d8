//! In-memory local repository implementation.
//!
//! This module provides a local implementation of the repository trait
//! suitable for unit testing and local development. All data is stored in
//! memory using HashMap structures, providing fast, deterministic, and
//! isolated execution.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use chrono_tz::Tz;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::db::repository::{BookingRepository, RepositoryError, RepositoryResult};
use crate::models::{Booking, BookingStatus, NewBooking, ServiceWindow, Table};

/// In-memory local repository.
///
/// Stores restaurants, sectors, tables, and bookings in HashMaps behind one
/// `RwLock`, which also gives `insert_booking` its atomicity: validation and
/// the full write happen under a single write guard, so either the booking
/// and all its table assignments land together or nothing does.
#[derive(Clone)]
pub struct LocalRepository {
    data: Arc<RwLock<LocalData>>,
}

#[derive(Default)]
struct LocalData {
    restaurants: HashMap<String, RestaurantRecord>,
    /// sector id -> owning restaurant id
    sectors: HashMap<String, String>,
    tables: HashMap<String, Table>,
    bookings: HashMap<String, Booking>,
    is_healthy: bool,
}

#[derive(Default)]
struct RestaurantRecord {
    timezone: Option<Tz>,
    windows: Vec<ServiceWindow>,
}

impl LocalRepository {
    /// Create a new empty local repository.
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(LocalData {
                is_healthy: true,
                ..Default::default()
            })),
        }
    }

    // ==================== Seed helpers ====================

    /// Register a restaurant. `timezone = None` leaves it on the UTC
    /// default.
    pub fn add_restaurant(&self, restaurant_id: &str, timezone: Option<Tz>) {
        let mut data = self.data.write().unwrap();
        data.restaurants
            .entry(restaurant_id.to_string())
            .or_default()
            .timezone = timezone;
    }

    /// Append an operating-hours window to a restaurant. Windows must be
    /// added in chronological order.
    pub fn add_service_window(&self, restaurant_id: &str, start: NaiveTime, end: NaiveTime) {
        let mut data = self.data.write().unwrap();
        data.restaurants
            .entry(restaurant_id.to_string())
            .or_default()
            .windows
            .push(ServiceWindow::new(start, end));
    }

    /// Register a sector under a restaurant.
    pub fn add_sector(&self, sector_id: &str, restaurant_id: &str) {
        let mut data = self.data.write().unwrap();
        data.sectors
            .insert(sector_id.to_string(), restaurant_id.to_string());
    }

    /// Register a table. The sector must have been added first.
    pub fn add_table(&self, table: Table) {
        let mut data = self.data.write().unwrap();
        data.tables.insert(table.id.clone(), table);
    }

    /// Insert a pre-existing booking, bypassing validation. Test setup only.
    pub fn add_booking(&self, booking: Booking) {
        let mut data = self.data.write().unwrap();
        data.bookings.insert(booking.id.clone(), booking);
    }

    /// Set the health status for testing connection failures.
    pub fn set_healthy(&self, healthy: bool) {
        let mut data = self.data.write().unwrap();
        data.is_healthy = healthy;
    }

    /// Clear all data from the repository.
    pub fn clear(&self) {
        let mut data = self.data.write().unwrap();
        let healthy = data.is_healthy;
        *data = LocalData {
            is_healthy: healthy,
            ..Default::default()
        };
    }

    /// Number of bookings stored, any status.
    pub fn booking_count(&self) -> usize {
        self.data.read().unwrap().bookings.len()
    }

    /// Fetch a stored booking by id.
    pub fn get_booking(&self, booking_id: &str) -> Option<Booking> {
        self.data.read().unwrap().bookings.get(booking_id).cloned()
    }

    // ==================== Internals ====================

    fn check_health(&self) -> RepositoryResult<()> {
        let data = self.data.read().unwrap();
        if !data.is_healthy {
            return Err(RepositoryError::ConnectionError(
                "Database is not healthy".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for LocalRepository {
    fn default() -> Self {
        Self::new()
    }
}

/// Half-open overlap test used for booking conflicts.
fn overlaps(booking: &Booking, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
    booking.start < end && booking.end > start
}

fn table_is_busy(data: &LocalData, table_id: &str, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
    data.bookings.values().any(|b| {
        b.status == BookingStatus::Confirmed
            && b.table_ids.iter().any(|id| id == table_id)
            && overlaps(b, start, end)
    })
}

#[async_trait]
impl BookingRepository for LocalRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        let data = self.data.read().unwrap();
        Ok(data.is_healthy)
    }

    async fn get_service_windows(
        &self,
        restaurant_id: &str,
    ) -> RepositoryResult<Vec<ServiceWindow>> {
        self.check_health()?;
        let data = self.data.read().unwrap();
        Ok(data
            .restaurants
            .get(restaurant_id)
            .map(|r| r.windows.clone())
            .unwrap_or_default())
    }

    async fn get_timezone(&self, restaurant_id: &str) -> RepositoryResult<Tz> {
        self.check_health()?;
        let data = self.data.read().unwrap();
        Ok(data
            .restaurants
            .get(restaurant_id)
            .and_then(|r| r.timezone)
            .unwrap_or(Tz::UTC))
    }

    async fn find_free_tables(
        &self,
        restaurant_id: &str,
        sector_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> RepositoryResult<Vec<Table>> {
        self.check_health()?;
        let data = self.data.read().unwrap();

        if data.sectors.get(sector_id).map(String::as_str) != Some(restaurant_id) {
            return Ok(Vec::new());
        }

        let mut free: Vec<Table> = data
            .tables
            .values()
            .filter(|t| t.sector_id == sector_id)
            .filter(|t| !table_is_busy(&data, &t.id, start, end))
            .cloned()
            .collect();

        free.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(free)
    }

    async fn insert_booking(&self, booking: &NewBooking) -> RepositoryResult<Booking> {
        self.check_health()?;
        let mut data = self.data.write().unwrap();

        if data.bookings.contains_key(&booking.id) {
            return Err(RepositoryError::Conflict(format!(
                "Booking {} already exists",
                booking.id
            )));
        }

        // Validate every assignment before touching state, so a failure
        // leaves no partial write behind.
        for table_id in &booking.table_ids {
            let table = data.tables.get(table_id).ok_or_else(|| {
                RepositoryError::ValidationError(format!("Unknown table {}", table_id))
            })?;
            if table.sector_id != booking.sector_id {
                return Err(RepositoryError::ValidationError(format!(
                    "Table {} does not belong to sector {}",
                    table_id, booking.sector_id
                )));
            }
            if table_is_busy(&data, table_id, booking.start, booking.end) {
                return Err(RepositoryError::Conflict(format!(
                    "Table {} is no longer free",
                    table_id
                )));
            }
        }

        let now = Utc::now();
        let committed = Booking {
            id: booking.id.clone(),
            restaurant_id: booking.restaurant_id.clone(),
            sector_id: booking.sector_id.clone(),
            party_size: booking.party_size,
            start: booking.start,
            end: booking.end,
            duration_minutes: booking.duration_minutes,
            status: BookingStatus::Confirmed,
            table_ids: booking.table_ids.clone(),
            created_at: now,
            updated_at: now,
        };
        data.bookings.insert(committed.id.clone(), committed.clone());

        Ok(committed)
    }

    async fn cancel_booking(&self, booking_id: &str) -> RepositoryResult<()> {
        self.check_health()?;
        let mut data = self.data.write().unwrap();

        let booking = data.bookings.get_mut(booking_id).ok_or_else(|| {
            RepositoryError::NotFound(format!("Booking {} not found", booking_id))
        })?;

        booking.status = BookingStatus::Cancelled;
        booking.updated_at = Utc::now();
        Ok(())
    }

    async fn booking_exists(&self, booking_id: &str) -> RepositoryResult<bool> {
        self.check_health()?;
        let data = self.data.read().unwrap();
        Ok(data.bookings.contains_key(booking_id))
    }

    async fn bookings_for_day(
        &self,
        restaurant_id: &str,
        sector_id: &str,
        date: NaiveDate,
    ) -> RepositoryResult<Vec<Booking>> {
        self.check_health()?;
        let data = self.data.read().unwrap();

        let tz = data
            .restaurants
            .get(restaurant_id)
            .and_then(|r| r.timezone)
            .unwrap_or(Tz::UTC);

        let mut bookings: Vec<Booking> = data
            .bookings
            .values()
            .filter(|b| {
                b.restaurant_id == restaurant_id
                    && b.sector_id == sector_id
                    && b.status == BookingStatus::Confirmed
                    && b.start.with_timezone(&tz).date_naive() == date
            })
            .cloned()
            .collect();

        bookings.sort_by_key(|b| b.start);
        Ok(bookings)
    }
}
