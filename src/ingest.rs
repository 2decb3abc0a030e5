//! Metric ingestion
//!
//! One sample per call, clamped silently into range: out-of-range numbers are
//! user input noise in this demo, not errors worth reporting. The only
//! rejection is the absence of a selected account.

use tracing::debug;

use crate::clock::Clock;
use crate::error::{EngineError, EngineResult};
use crate::state::DashboardState;
use crate::util::uid;
use crate::Metric;

/// Upper clamp for a single sample's impressions.
pub const MAX_IMPRESSIONS: u32 = 10_000_000;

/// Append one impressions/likes/hour sample for an account.
///
/// Fails only when `account_id` is empty (no account selected). Impressions
/// are clamped to `[0, 10_000_000]`, likes to `[0, impressions]` and the hour
/// to `[0, 23]`.
pub fn ingest(
    state: &mut DashboardState,
    account_id: &str,
    impressions: i64,
    likes: i64,
    hour: i64,
    clock: &dyn Clock,
) -> EngineResult<Metric> {
    let account_id = account_id.trim();
    if account_id.is_empty() {
        return Err(EngineError::NoAccountSelected);
    }

    let impressions = impressions.clamp(0, i64::from(MAX_IMPRESSIONS)) as u32;
    let likes = likes.clamp(0, i64::from(impressions)) as u32;
    let hour = hour.clamp(0, 23) as u8;

    let metric = Metric {
        id: uid("m"),
        account_id: account_id.to_string(),
        impressions,
        likes,
        hour,
        ts: clock.now(),
    };

    debug!(
        "ingested metric for {account_id}: {impressions} impressions, {likes} likes, hour {hour}"
    );
    state.metrics.push(metric.clone());
    Ok(metric)
}
