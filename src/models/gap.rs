//! Candidate seating options produced by gap discovery.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Whether a gap is a lone table or a joined combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GapKind {
    Single,
    Combo,
}

/// A candidate seating option for one concrete time interval.
///
/// Gaps are transient: they are produced per discovery call, ranked, and
/// either returned to the caller or committed as a booking. They are never
/// persisted themselves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Gap {
    pub kind: GapKind,
    /// Constituent table ids, unique, in canonical (ascending) order.
    pub table_ids: Vec<String>,
    pub sector_id: String,
    /// Sum of the constituent tables' minimum sizes.
    pub min_size: u32,
    /// Sum of the constituent tables' maximum sizes.
    pub max_size: u32,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// A gap with its fitness score, in `[0.0, 10.0]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredGap {
    #[serde(flatten)]
    pub gap: Gap,
    pub score: f64,
}
