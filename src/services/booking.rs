//! Booking coordinator: lock-serialized, idempotent, atomic commits.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use chrono::{DateTime, NaiveDate, NaiveTime, SecondsFormat, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::db::repository::{BookingRepository, RepositoryError};
use crate::locks::LockStore;
use crate::models::{Booking, BookingStatus, NewBooking, ScoredGap};
use crate::services::discovery::{discover, DiscoverRequest};
use crate::services::error::EngineError;

/// TTL knobs for the write path.
#[derive(Debug, Clone, Copy)]
pub struct EngineSettings {
    /// How long a commit attempt may hold its lock before expiry reclaims it.
    pub lock_ttl: Duration,
    /// How long a committed response answers replays of its idempotency key.
    pub idempotency_ttl: Duration,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            lock_ttl: Duration::from_secs(10),
            idempotency_ttl: Duration::from_secs(60),
        }
    }
}

/// A validated booking request.
#[derive(Debug, Clone)]
pub struct BookingRequest {
    pub restaurant_id: String,
    pub sector_id: String,
    pub date: NaiveDate,
    pub party_size: u32,
    pub duration_minutes: u32,
    pub window_start: Option<NaiveTime>,
    pub window_end: Option<NaiveTime>,
    pub idempotency_key: Option<String>,
}

/// The serialized booking response. This exact shape is what the
/// idempotency cache stores, so replays return byte-identical content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingConfirmation {
    pub id: String,
    pub restaurant_id: String,
    pub sector_id: String,
    pub party_size: u32,
    pub table_ids: Vec<String>,
    pub start: String,
    pub end: String,
    pub duration_minutes: u32,
    pub status: BookingStatus,
    pub created_at: String,
    pub updated_at: String,
}

impl BookingConfirmation {
    fn from_booking(booking: &Booking, tz: Tz) -> Self {
        Self {
            id: booking.id.clone(),
            restaurant_id: booking.restaurant_id.clone(),
            sector_id: booking.sector_id.clone(),
            party_size: booking.party_size,
            table_ids: booking.table_ids.clone(),
            start: format_instant(booking.start, tz),
            end: format_instant(booking.end, tz),
            duration_minutes: booking.duration_minutes,
            status: booking.status,
            created_at: format_instant(booking.created_at, tz),
            updated_at: format_instant(booking.updated_at, tz),
        }
    }
}

/// Result of a booking attempt: the committed (or replayed) response and
/// whether it came from the idempotency cache.
#[derive(Debug, Clone)]
pub struct BookingOutcome {
    pub confirmation: BookingConfirmation,
    pub replayed: bool,
}

/// One day's bookings for a sector.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DaySchedule {
    pub date: NaiveDate,
    pub items: Vec<DayBookingItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayBookingItem {
    pub id: String,
    pub table_ids: Vec<String>,
    pub party_size: u32,
    pub start: String,
    pub end: String,
    pub status: BookingStatus,
}

/// Turns a validated booking request into exactly one committed booking, or
/// a well-defined failure.
///
/// Concurrent attempts on the same `(restaurant, sector, tables, start)`
/// serialize on the lock collaborator; retries of the same request replay
/// from the idempotency cache. The lock is released on every exit path, and
/// the repository insert is atomic, so a half-written booking is never
/// observable.
pub struct BookingCoordinator {
    repo: Arc<dyn BookingRepository>,
    locks: Arc<dyn LockStore>,
    settings: EngineSettings,
}

impl BookingCoordinator {
    pub fn new(
        repo: Arc<dyn BookingRepository>,
        locks: Arc<dyn LockStore>,
        settings: EngineSettings,
    ) -> Self {
        Self {
            repo,
            locks,
            settings,
        }
    }

    /// Attempt to commit a booking for the best-ranked gap in the requested
    /// window.
    pub async fn book(&self, req: &BookingRequest) -> Result<BookingOutcome, EngineError> {
        let key = req
            .idempotency_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or(EngineError::MissingIdempotencyKey)?;
        let cache_key = format!("idem:{}", key);

        if let Some(cached) = self.locks.get_cache(&cache_key).await? {
            let confirmation: BookingConfirmation = serde_json::from_str(&cached)
                .context("corrupt idempotency record")?;
            tracing::info!(booking = %confirmation.id, "replayed booking from idempotency cache");
            return Ok(BookingOutcome {
                confirmation,
                replayed: true,
            });
        }

        let discovery = discover(self.repo.as_ref(), &req.as_discover()).await?;
        let timezone = discovery.timezone;
        let best = discovery
            .candidates
            .into_iter()
            .next()
            .ok_or(EngineError::NoCapacity)?;

        let lock_key = lock_key(&req.restaurant_id, &req.sector_id, &best);
        if !self
            .locks
            .acquire_lock(&lock_key, self.settings.lock_ttl)
            .await?
        {
            return Err(EngineError::LockConflict);
        }

        let result = self.commit(req, &best, timezone, &cache_key).await;

        if let Err(e) = self.locks.release_lock(&lock_key).await {
            tracing::warn!(key = %lock_key, error = %e, "failed to release booking lock");
        }

        let confirmation = result?;
        tracing::info!(booking = %confirmation.id, tables = ?confirmation.table_ids, "booking committed");
        Ok(BookingOutcome {
            confirmation,
            replayed: false,
        })
    }

    /// The locked section: re-verify availability, insert atomically, store
    /// the idempotency record.
    async fn commit(
        &self,
        req: &BookingRequest,
        best: &ScoredGap,
        timezone: Tz,
        cache_key: &str,
    ) -> Result<BookingConfirmation, EngineError> {
        let free = self
            .repo
            .find_free_tables(
                &req.restaurant_id,
                &req.sector_id,
                best.gap.start,
                best.gap.end,
            )
            .await?;
        let free_ids: HashSet<&str> = free.iter().map(|t| t.id.as_str()).collect();
        if !best
            .gap
            .table_ids
            .iter()
            .all(|id| free_ids.contains(id.as_str()))
        {
            // lost the race between discovery and lock acquisition
            return Err(EngineError::NoCapacity);
        }

        let new_booking = NewBooking {
            id: new_booking_id(),
            restaurant_id: req.restaurant_id.clone(),
            sector_id: req.sector_id.clone(),
            party_size: req.party_size,
            start: best.gap.start,
            end: best.gap.end,
            duration_minutes: req.duration_minutes,
            table_ids: best.gap.table_ids.clone(),
        };

        let booking = match self.repo.insert_booking(&new_booking).await {
            Ok(booking) => booking,
            Err(RepositoryError::Conflict(_)) => return Err(EngineError::NoCapacity),
            Err(e) => return Err(e.into()),
        };

        let confirmation = BookingConfirmation::from_booking(&booking, timezone);
        let payload =
            serde_json::to_string(&confirmation).context("serialize booking confirmation")?;
        self.locks
            .set_cache(cache_key, &payload, self.settings.idempotency_ttl)
            .await?;

        Ok(confirmation)
    }
}

impl BookingRequest {
    fn as_discover(&self) -> DiscoverRequest {
        DiscoverRequest {
            restaurant_id: self.restaurant_id.clone(),
            sector_id: self.sector_id.clone(),
            date: self.date,
            party_size: self.party_size,
            duration_minutes: self.duration_minutes,
            window_start: self.window_start,
            window_end: self.window_end,
            limit: None,
        }
    }
}

/// Cancel a booking (soft delete).
pub async fn cancel(repo: &dyn BookingRepository, booking_id: &str) -> Result<(), EngineError> {
    match repo.cancel_booking(booking_id).await {
        Ok(()) => Ok(()),
        Err(RepositoryError::NotFound(_)) => Err(EngineError::NotFound(booking_id.to_string())),
        Err(e) => Err(e.into()),
    }
}

/// List a sector's confirmed bookings for one day, grouped by date.
pub async fn day_bookings(
    repo: &dyn BookingRepository,
    restaurant_id: &str,
    sector_id: &str,
    date: NaiveDate,
) -> Result<Vec<DaySchedule>, EngineError> {
    let timezone = repo.get_timezone(restaurant_id).await?;
    let bookings = repo
        .bookings_for_day(restaurant_id, sector_id, date)
        .await?;

    let items = bookings
        .into_iter()
        .map(|b| DayBookingItem {
            id: b.id,
            table_ids: b.table_ids,
            party_size: b.party_size,
            start: format_instant(b.start, timezone),
            end: format_instant(b.end, timezone),
            status: b.status,
        })
        .collect();

    Ok(vec![DaySchedule { date, items }])
}

fn lock_key(restaurant_id: &str, sector_id: &str, best: &ScoredGap) -> String {
    let mut table_ids = best.gap.table_ids.clone();
    table_ids.sort_unstable();
    format!(
        "lock:{}:{}:{}:{}",
        restaurant_id,
        sector_id,
        table_ids.join("+"),
        best.gap.start.to_rfc3339_opts(SecondsFormat::Secs, true)
    )
}

fn new_booking_id() -> String {
    format!("BK_{}", Uuid::new_v4().simple())
}

fn format_instant(instant: DateTime<Utc>, tz: Tz) -> String {
    instant
        .with_timezone(&tz)
        .to_rfc3339_opts(SecondsFormat::Secs, true)
}
