//! Keyword prediction engine
//!
//! Toy heuristics, intentionally: a uniform random base score in `[0, 1)`
//! with two small additive boosts, one for keywords mentioning "ai" and one
//! for a high global impression volume. Per-call nondeterminism is a
//! documented property of the engine, not a bug; callers who need
//! reproducible output inject a seeded `Rng`.

use std::cmp::Ordering;

use rand::Rng;
use tracing::debug;

use crate::clock::Clock;
use crate::error::{EngineError, EngineResult};
use crate::state::DashboardState;
use crate::{Metric, Prediction};

/// Additive boost for keywords containing "ai" (case-insensitive).
const AI_BOOST: f64 = 0.25;

/// Additive boost when the global mean impressions exceed the volume
/// threshold.
const VOLUME_BOOST: f64 = 0.15;

const VOLUME_THRESHOLD: i64 = 400;

/// Assumed mean impressions when no metrics exist yet.
const DEFAULT_MEAN_IMPRESSIONS: i64 = 300;

/// Split a raw comma-separated keyword string into trimmed, non-empty terms.
pub fn parse_keywords(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Score each keyword and return the predictions sorted descending by score.
///
/// Fails when the keyword list is empty after trimming. The sort is stable,
/// so equal scores keep their input order.
pub fn predict<R: Rng>(
    state: &DashboardState,
    keywords: &[String],
    clock: &dyn Clock,
    rng: &mut R,
) -> EngineResult<Vec<Prediction>> {
    let keywords: Vec<&str> = keywords
        .iter()
        .map(|k| k.trim())
        .filter(|k| !k.is_empty())
        .collect();
    if keywords.is_empty() {
        return Err(EngineError::EmptyKeywords);
    }

    let mean = mean_impressions(&state.metrics);
    debug!("scoring {} keywords (mean impressions: {mean})", keywords.len());

    let mut predictions: Vec<Prediction> = keywords
        .iter()
        .map(|keyword| {
            let mut score: f64 = rng.random();
            if keyword.to_lowercase().contains("ai") {
                score += AI_BOOST;
            }
            if mean > VOLUME_THRESHOLD {
                score += VOLUME_BOOST;
            }

            let predicted_growth_pct = (score * 100.0 * 10.0).round() / 10.0;
            let best_post_hour = estimate_best_hour(&state.metrics, clock, &mut *rng);

            Prediction {
                keyword: (*keyword).to_string(),
                score: (score * 100.0).round() / 100.0,
                predicted_growth_pct,
                best_post_hour,
            }
        })
        .collect();

    predictions.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    Ok(predictions)
}

/// Rounded global mean impressions, defaulting when no metrics exist.
fn mean_impressions(metrics: &[Metric]) -> i64 {
    if metrics.is_empty() {
        return DEFAULT_MEAN_IMPRESSIONS;
    }
    let sum: u64 = metrics.iter().map(|m| u64::from(m.impressions)).sum();
    (sum as f64 / metrics.len() as f64).round() as i64
}

/// Hour of day (0-23) with the historically highest summed impressions.
///
/// Ties go to the lowest hour (first-seen max wins). When every hourly sum is
/// zero the current wall-clock hour is returned; with no metrics at all the
/// estimate is the current hour plus a random offset in `[-2, +1]`, wrapped
/// to the day.
pub fn estimate_best_hour<R: Rng>(metrics: &[Metric], clock: &dyn Clock, rng: &mut R) -> u8 {
    if metrics.is_empty() {
        let offset = rng.random_range(-2..2);
        return ((i32::from(clock.current_hour()) + offset + 24) % 24) as u8;
    }

    let mut sums = [0u64; 24];
    for metric in metrics {
        sums[usize::from(metric.hour.min(23))] += u64::from(metric.impressions);
    }

    let mut best_hour = 0usize;
    let mut best = sums[0];
    for (hour, sum) in sums.iter().enumerate().skip(1) {
        if *sum > best {
            best = *sum;
            best_hour = hour;
        }
    }

    // no variation at all: fall back to the current hour
    if best == 0 {
        return clock.current_hour();
    }

    best_hour as u8
}
