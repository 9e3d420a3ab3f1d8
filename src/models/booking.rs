//! Reference data and persisted booking entities.

use chrono::{DateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

/// A physical table inside a sector.
///
/// Immutable reference data: the engine only reads tables, it never creates
/// or modifies them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    pub id: String,
    pub sector_id: String,
    pub name: String,
    /// Smallest party this table accepts on its own.
    pub min_size: u32,
    /// Largest party this table seats on its own.
    pub max_size: u32,
}

impl Table {
    /// Whether the table alone can host a party of `party_size`.
    pub fn fits(&self, party_size: u32) -> bool {
        party_size >= self.min_size && party_size <= self.max_size
    }
}

/// One contiguous interval of a restaurant's operating hours.
///
/// A restaurant owns zero or more windows per day; they do not overlap and
/// are kept in chronological order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceWindow {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl ServiceWindow {
    pub fn new(start: NaiveTime, end: NaiveTime) -> Self {
        Self { start, end }
    }
}

/// Lifecycle status of a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    Confirmed,
    Cancelled,
}

/// A committed booking as the storage collaborator persists it.
///
/// Write-once from the engine's perspective: created on a successful commit,
/// later at most flipped to [`BookingStatus::Cancelled`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: String,
    pub restaurant_id: String,
    pub sector_id: String,
    pub party_size: u32,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub duration_minutes: u32,
    pub status: BookingStatus,
    pub table_ids: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for an atomic booking insert: the booking row plus one table
/// assignment per entry in `table_ids`, all-or-nothing.
#[derive(Debug, Clone)]
pub struct NewBooking {
    pub id: String,
    pub restaurant_id: String,
    pub sector_id: String,
    pub party_size: u32,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub duration_minutes: u32,
    pub table_ids: Vec<String>,
}
