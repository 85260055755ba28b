//! SEC-score: the normalized 0-10 sustainability metric.
//!
//! Piecewise linear in the annual total: 10 at or below the Paris-compatible
//! target, 0 at or above the high-emission ceiling, linear in between.

use crate::averages::PARIS_TARGET_KG;
use crate::rounding::round_to;

/// Totals at or above this score 0
pub const SCORE_CEILING_KG: f64 = 15_000.0;

/// Best possible score
pub const MAX_SCORE: f64 = 10.0;

/// Score a stored or freshly computed annual total (kg CO₂e)
///
/// Monotonically non-increasing in `total_kg`, rounded to one decimal.
pub fn score_for(total_kg: f64) -> f64 {
    debug_assert!(!total_kg.is_nan(), "score_for called with NaN");

    if total_kg <= PARIS_TARGET_KG {
        MAX_SCORE
    } else if total_kg >= SCORE_CEILING_KG {
        0.0
    } else {
        let span = SCORE_CEILING_KG - PARIS_TARGET_KG;
        let score = MAX_SCORE - (total_kg - PARIS_TARGET_KG) / span * MAX_SCORE;
        round_to(score.clamp(0.0, MAX_SCORE), 1)
    }
}
