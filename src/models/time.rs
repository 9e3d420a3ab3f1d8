//! Calendar/time-of-day helpers shared by the slot planner and services.

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Timelike};
use chrono_tz::Tz;

/// Combine a calendar date with a time-of-day inside an IANA timezone.
///
/// The resulting instant carries the date's year/month/day (interpreted in
/// `tz`), the given hour/minute, and zero seconds and sub-seconds. Returns
/// `None` for local times that do not exist in `tz` (DST gaps); an ambiguous
/// local time resolves to its earlier occurrence.
pub fn combine(date: NaiveDate, time: NaiveTime, tz: Tz) -> Option<DateTime<Tz>> {
    let time = time.with_second(0)?.with_nanosecond(0)?;
    tz.from_local_datetime(&date.and_time(time)).earliest()
}

/// Parse an `HH:MM` wall-clock string.
pub fn parse_hhmm(value: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(value, "%H:%M").ok()
}

/// Parse a `YYYY-MM-DD` calendar date.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}
