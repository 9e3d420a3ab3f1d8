//! Gap discovery: free-table search plus combination assembly.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use chrono_tz::Tz;

use crate::db::repository::BookingRepository;
use crate::models::{time, Gap, GapKind, ScoredGap, ServiceWindow, Table};
use crate::scheduler::{self, search};
use crate::services::error::EngineError;
use crate::services::ranking::rank;

/// How far a combination's aggregate capacity may exceed the party size
/// before the branch is pruned. Bounds the backtracking depth.
const MAX_CAPACITY_OVERSHOOT: u32 = 3;

/// A validated discovery request.
#[derive(Debug, Clone)]
pub struct DiscoverRequest {
    pub restaurant_id: String,
    pub sector_id: String,
    pub date: NaiveDate,
    pub party_size: u32,
    pub duration_minutes: u32,
    pub window_start: Option<NaiveTime>,
    pub window_end: Option<NaiveTime>,
    pub limit: Option<usize>,
}

/// Outcome of a discovery run.
#[derive(Debug, Clone)]
pub struct Discovery {
    pub slot_minutes: u32,
    pub duration_minutes: u32,
    pub timezone: Tz,
    pub candidates: Vec<ScoredGap>,
}

/// Find every gap able to seat the party over `[start, end)`.
///
/// Free tables that fit the party on their own become single gaps. The
/// remaining ("partial") tables feed the backtracking search, which
/// assembles every combination whose aggregate maximum capacity reaches the
/// party size without overshooting it by more than
/// [`MAX_CAPACITY_OVERSHOOT`]. The canonical increasing-index extension of
/// the search guarantees no duplicate table sets.
pub async fn find_gaps(
    repo: &dyn BookingRepository,
    restaurant_id: &str,
    sector_id: &str,
    party_size: u32,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Result<Vec<Gap>, EngineError> {
    let tables = repo
        .find_free_tables(restaurant_id, sector_id, start, end)
        .await?;

    let (full, partial): (Vec<Table>, Vec<Table>) =
        tables.into_iter().partition(|t| t.fits(party_size));

    let max_sum = |path: &[Table]| path.iter().map(|t| t.max_size).sum::<u32>();
    let combos = search::backtrack(
        &partial,
        |path| max_sum(path) > party_size + MAX_CAPACITY_OVERSHOOT,
        |path| !path.is_empty() && max_sum(path) >= party_size,
    );

    let mut gaps: Vec<Gap> = full
        .into_iter()
        .map(|table| Gap {
            kind: GapKind::Single,
            table_ids: vec![table.id],
            sector_id: table.sector_id,
            min_size: table.min_size,
            max_size: table.max_size,
            start,
            end,
        })
        .collect();

    gaps.extend(combos.into_iter().map(|combo| Gap {
        kind: GapKind::Combo,
        table_ids: combo.iter().map(|t| t.id.clone()).collect(),
        sector_id: sector_id.to_string(),
        min_size: combo.iter().map(|t| t.min_size).sum(),
        max_size: combo.iter().map(|t| t.max_size).sum(),
        start,
        end,
    }));

    Ok(gaps)
}

/// Run the full discovery pipeline: slot planning, per-slot gap search,
/// ranking, and trimming.
pub async fn discover(
    repo: &dyn BookingRepository,
    req: &DiscoverRequest,
) -> Result<Discovery, EngineError> {
    if req.party_size == 0 {
        return Err(EngineError::Validation(
            "partySize must be at least 1".to_string(),
        ));
    }
    if req.duration_minutes == 0 {
        return Err(EngineError::Validation(
            "duration must be at least 1 minute".to_string(),
        ));
    }

    let timezone = repo.get_timezone(&req.restaurant_id).await?;
    let windows = repo.get_service_windows(&req.restaurant_id).await?;
    let closed = scheduler::closed_intervals(&windows);

    let (window_start, window_end) = match resolve_window(&windows, req) {
        Some(bounds) => bounds,
        None => return Err(EngineError::OutOfServiceWindow),
    };
    if scheduler::is_outside_service(&closed, Some(window_start), Some(window_end)) {
        return Err(EngineError::OutOfServiceWindow);
    }

    let include_start = combine_or_invalid(req.date, window_start, timezone)?;
    let include_end = combine_or_invalid(req.date, window_end, timezone)?;
    if include_end <= include_start {
        return Err(EngineError::Validation(
            "windowEnd must be after windowStart".to_string(),
        ));
    }

    // Bounded closed intervals become concrete exclusions for the planner;
    // the open-ended sentinels are already covered by the service check.
    let mut excludes = Vec::new();
    for interval in &closed {
        if let (Some(start), Some(end)) = (interval.start, interval.end) {
            excludes.push((
                combine_or_invalid(req.date, start, timezone)?,
                combine_or_invalid(req.date, end, timezone)?,
            ));
        }
    }

    let slots = scheduler::generate_slots(
        Duration::minutes(i64::from(req.duration_minutes)),
        (include_start, include_end),
        &excludes,
    );

    // Slot searches are independent read-only queries, so they run
    // concurrently; results are merged by concatenation in slot order.
    let per_slot = futures::future::try_join_all(slots.iter().map(|slot| {
        find_gaps(
            repo,
            &req.restaurant_id,
            &req.sector_id,
            req.party_size,
            slot.start.with_timezone(&Utc),
            slot.end.with_timezone(&Utc),
        )
    }))
    .await?;
    let gaps: Vec<Gap> = per_slot.into_iter().flatten().collect();

    tracing::debug!(
        restaurant = %req.restaurant_id,
        sector = %req.sector_id,
        slots = slots.len(),
        gaps = gaps.len(),
        "discovery completed"
    );

    let mut candidates = rank(gaps, req.party_size);
    if let Some(limit) = req.limit {
        candidates.truncate(limit);
    }

    Ok(Discovery {
        slot_minutes: req.duration_minutes,
        duration_minutes: req.duration_minutes,
        timezone,
        candidates,
    })
}

/// Default unspecified window sides to the edges of the day's service
/// hours. `None` when no side can be resolved (restaurant closed all day).
fn resolve_window(
    windows: &[ServiceWindow],
    req: &DiscoverRequest,
) -> Option<(NaiveTime, NaiveTime)> {
    let start = req.window_start.or_else(|| windows.first().map(|w| w.start))?;
    let end = req.window_end.or_else(|| windows.last().map(|w| w.end))?;
    Some((start, end))
}

fn combine_or_invalid(
    date: NaiveDate,
    tod: NaiveTime,
    tz: Tz,
) -> Result<DateTime<Tz>, EngineError> {
    time::combine(date, tod, tz).ok_or_else(|| {
        EngineError::Validation(format!("{} {} does not exist in {}", date, tod, tz))
    })
}
