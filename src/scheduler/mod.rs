//! Service-window slot planning.
//!
//! Pure functions that turn a restaurant's operating-hours windows plus a
//! requested window into the sequence of fixed-duration candidate slots the
//! discovery pipeline searches. No I/O happens here.

pub mod search;


use chrono::{DateTime, Duration, NaiveTime};
use chrono_tz::Tz;

use crate::models::ServiceWindow;

/// One interval during which the restaurant is closed.
///
/// The complement of the service-window set. `None` bounds mark the open
/// sentinels before the first window and after the last one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClosedInterval {
    pub start: Option<NaiveTime>,
    pub end: Option<NaiveTime>,
}

/// A fixed-duration candidate interval inside a service window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    pub start: DateTime<Tz>,
    pub end: DateTime<Tz>,
}

/// Compute the closed intervals for a set of service windows.
///
/// For `n` non-overlapping, chronologically ordered windows this returns
/// `n + 1` intervals: before the first window, between each consecutive
/// pair, and after the last. With zero windows it returns the single
/// fully-open interval `(None, None)`. Note that [`is_outside_service`]
/// still reports every request as outside in that case, so callers must
/// check it before treating the result as an open range.
pub fn closed_intervals(windows: &[ServiceWindow]) -> Vec<ClosedInterval> {
    let mut closed = Vec::with_capacity(windows.len() + 1);

    let mut cursor: Option<NaiveTime> = None;
    for window in windows {
        closed.push(ClosedInterval {
            start: cursor,
            end: Some(window.start),
        });
        cursor = Some(window.end);
    }
    closed.push(ClosedInterval {
        start: cursor,
        end: None,
    });

    closed
}

/// Whether a requested window falls (entirely or partly) outside service
/// hours.
///
/// True iff any closed interval overlaps the requested `[start, end)` window.
/// An unspecified side leaves the request unbounded on that side, so a
/// one-sided request overlaps everything beyond its single bound.
pub fn is_outside_service(
    closed: &[ClosedInterval],
    start: Option<NaiveTime>,
    end: Option<NaiveTime>,
) -> bool {
    closed.iter().any(|interval| {
        // half-open overlap with None as minus/plus infinity
        let starts_before_request_ends = match (interval.start, end) {
            (Some(lo), Some(hi)) => lo < hi,
            _ => true,
        };
        let request_starts_before_end = match (start, interval.end) {
            (Some(lo), Some(hi)) => lo < hi,
            _ => true,
        };
        starts_before_request_ends && request_starts_before_end
    })
}

/// Generate duration-sized slots covering `include` minus any `excludes`.
///
/// The cursor walks from the include lower bound in steps of `duration`.
/// When a step intersects an exclude interval the step is discarded and the
/// cursor jumps to that exclude's upper bound; no partial or shortened slot
/// is ever emitted at a boundary. A trailing fragment that does not fit
/// entirely inside `include` is dropped, not truncated.
pub fn generate_slots(
    duration: Duration,
    include: (DateTime<Tz>, DateTime<Tz>),
    excludes: &[(DateTime<Tz>, DateTime<Tz>)],
) -> Vec<Slot> {
    let (include_start, include_end) = include;
    let mut slots = Vec::new();

    if duration <= Duration::zero() {
        return slots;
    }

    let mut cursor = include_start;
    loop {
        let slot_start = cursor;
        let slot_end = slot_start + duration;

        if slot_end > include_end {
            break;
        }

        // Half-open intersection test against every exclude; on a hit the
        // cursor jumps past the latest intersecting exclude.
        let blocked_until = excludes
            .iter()
            .filter(|(ex_start, ex_end)| *ex_start < slot_end && slot_start < *ex_end)
            .map(|(_, ex_end)| *ex_end)
            .max();

        if let Some(resume_at) = blocked_until {
            cursor = resume_at;
            continue;
        }

        slots.push(Slot {
            start: slot_start,
            end: slot_end,
        });
        cursor = slot_end;
    }

    slots
}
