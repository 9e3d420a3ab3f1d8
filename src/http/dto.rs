//! Data Transfer Objects for the HTTP API.
//!
//! Wire shapes are camelCase; instants are RFC3339 strings in the
//! restaurant's timezone. Parsing into the service-layer request types
//! happens here so handlers stay declarative.

use chrono::SecondsFormat;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use super::error::AppError;
use crate::models::{time, GapKind};
use crate::services::{BookingRequest, DiscoverRequest, Discovery};

/// Query parameters for `GET /v1/discover`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscoverQuery {
    pub restaurant_id: String,
    pub sector_id: String,
    /// `YYYY-MM-DD`
    pub date: String,
    pub party_size: u32,
    /// Slot duration in minutes
    pub duration: u32,
    /// `HH:MM`, defaults to the day's first opening
    pub window_start: Option<String>,
    /// `HH:MM`, defaults to the day's last closing
    pub window_end: Option<String>,
    pub limit: Option<usize>,
}

impl DiscoverQuery {
    pub fn into_request(self) -> Result<DiscoverRequest, AppError> {
        Ok(DiscoverRequest {
            date: parse_date_param(&self.date)?,
            window_start: parse_time_param(self.window_start.as_deref(), "windowStart")?,
            window_end: parse_time_param(self.window_end.as_deref(), "windowEnd")?,
            restaurant_id: self.restaurant_id,
            sector_id: self.sector_id,
            party_size: self.party_size,
            duration_minutes: self.duration,
            limit: self.limit,
        })
    }
}

/// JSON body for `POST /v1/bookings`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingBody {
    pub restaurant_id: String,
    pub sector_id: String,
    /// `YYYY-MM-DD`
    pub date: String,
    pub party_size: u32,
    /// Slot duration in minutes
    pub duration: u32,
    pub window_start: Option<String>,
    pub window_end: Option<String>,
}

impl BookingBody {
    pub fn into_request(self, idempotency_key: Option<String>) -> Result<BookingRequest, AppError> {
        Ok(BookingRequest {
            date: parse_date_param(&self.date)?,
            window_start: parse_time_param(self.window_start.as_deref(), "windowStart")?,
            window_end: parse_time_param(self.window_end.as_deref(), "windowEnd")?,
            restaurant_id: self.restaurant_id,
            sector_id: self.sector_id,
            party_size: self.party_size,
            duration_minutes: self.duration,
            idempotency_key,
        })
    }
}

/// Query parameters for `GET /v1/bookings/day`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayQuery {
    pub restaurant_id: String,
    pub sector_id: String,
    pub date: String,
}

/// Response for `GET /v1/discover`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscoverResponse {
    pub slot_minutes: u32,
    pub duration_minutes: u32,
    pub candidates: Vec<CandidateDto>,
}

/// One scored candidate on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateDto {
    pub score: f64,
    pub kind: GapKind,
    pub table_ids: Vec<String>,
    pub sector_id: String,
    pub min_size: u32,
    pub max_size: u32,
    pub start: String,
    pub end: String,
}

impl DiscoverResponse {
    pub fn from_discovery(discovery: Discovery) -> Self {
        let tz = discovery.timezone;
        Self {
            slot_minutes: discovery.slot_minutes,
            duration_minutes: discovery.duration_minutes,
            candidates: discovery
                .candidates
                .into_iter()
                .map(|c| CandidateDto {
                    score: c.score,
                    kind: c.gap.kind,
                    table_ids: c.gap.table_ids,
                    sector_id: c.gap.sector_id,
                    min_size: c.gap.min_size,
                    max_size: c.gap.max_size,
                    start: format_instant(c.gap.start, tz),
                    end: format_instant(c.gap.end, tz),
                })
                .collect(),
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub database: String,
}

pub fn parse_date_param(value: &str) -> Result<chrono::NaiveDate, AppError> {
    time::parse_date(value).ok_or_else(|| {
        AppError::BadRequest(format!(
            "Invalid date {:?}, expected YYYY-MM-DD",
            value
        ))
    })
}

fn parse_time_param(
    value: Option<&str>,
    field: &str,
) -> Result<Option<chrono::NaiveTime>, AppError> {
    match value {
        None => Ok(None),
        Some(raw) => time::parse_hhmm(raw)
            .map(Some)
            .ok_or_else(|| {
                AppError::BadRequest(format!("Invalid {} {:?}, expected HH:MM", field, raw))
            }),
    }
}

fn format_instant(instant: chrono::DateTime<chrono::Utc>, tz: Tz) -> String {
    instant
        .with_timezone(&tz)
        .to_rfc3339_opts(SecondsFormat::Secs, true)
}
