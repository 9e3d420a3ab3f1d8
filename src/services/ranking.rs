//! Gap ranking.

use std::cmp::Ordering;

use crate::models::{Gap, ScoredGap};

/// Score each gap against the party size and sort best-first.
///
/// `diff = max_size - party_size`. A non-negative diff scores `10.0 - diff`,
/// so a perfect fit lands at 10.0 and growing headroom decays the score. A
/// negative diff scores the diff itself; discovery filters those gaps out,
/// but ranking still tolerates them. Scores clamp to `[0.0, 10.0]`. The
/// sort is stable: equal scores keep their input order.
pub fn rank(gaps: Vec<Gap>, party_size: u32) -> Vec<ScoredGap> {
    let mut scored: Vec<ScoredGap> = gaps
        .into_iter()
        .map(|gap| {
            let diff = f64::from(gap.max_size) - f64::from(party_size);
            let raw = if diff >= 0.0 { 10.0 - diff } else { diff };
            ScoredGap {
                gap,
                score: raw.clamp(0.0, 10.0),
            }
        })
        .collect();

    scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    scored
}
