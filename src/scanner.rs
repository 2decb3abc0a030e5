//! Drop scanner
//!
//! Compares each account's latest metric against a rolling baseline and
//! raises an alert (plus an advisory brief) on threshold breach. The alert
//! collection is recomputed from scratch on every pass; briefs regenerate
//! alongside and accumulate. Incremental diffing would change the contract,
//! so the full recompute stays.

use rand::Rng;
use tracing::{debug, info};

use crate::brief;
use crate::clock::Clock;
use crate::state::DashboardState;
use crate::util::uid;
use crate::{Alert, AlertKind, Brief, Metric};

/// How many metrics preceding the latest one feed the baseline mean.
pub const BASELINE_WINDOW: usize = 5;

/// Alerts and briefs produced by one scan pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScanOutcome {
    pub alerts: Vec<Alert>,
    pub briefs: Vec<Brief>,
}

impl ScanOutcome {
    /// True when the pass found no drops (callers surface a notice then).
    pub fn is_quiet(&self) -> bool {
        self.alerts.is_empty()
    }
}

/// Scan every account for a performance drop at or above `threshold` percent.
///
/// Accounts with fewer than two metrics are skipped silently: one sample has
/// no baseline to fall from. The baseline is the mean of up to the five
/// metrics preceding the latest one, using however many are available.
pub fn scan<R: Rng>(
    state: &mut DashboardState,
    threshold: i32,
    keywords: &[String],
    clock: &dyn Clock,
    rng: &mut R,
) -> ScanOutcome {
    // full recompute: prior alerts are discarded, briefs are kept
    state.alerts.clear();
    let mut outcome = ScanOutcome::default();

    for account in &state.accounts {
        let history: Vec<&Metric> = state
            .metrics
            .iter()
            .filter(|m| m.account_id == account.id)
            .collect();
        if history.len() < 2 {
            debug!("{}: insufficient data, skipping", account.id);
            continue;
        }

        let last = history[history.len() - 1];
        let window_start = (history.len() - 1).saturating_sub(BASELINE_WINDOW);
        let window = &history[window_start..history.len() - 1];
        let baseline: f64 = window
            .iter()
            .map(|m| f64::from(m.impressions))
            .sum::<f64>()
            / window.len() as f64;

        let drop_pct = if baseline > 0.0 {
            ((1.0 - f64::from(last.impressions) / baseline) * 100.0).round() as i32
        } else {
            0
        };

        debug!(
            "{}: last {} vs baseline {baseline:.1} -> drop {drop_pct}% (threshold {threshold}%)",
            account.id, last.impressions
        );

        if drop_pct >= threshold {
            let alert = Alert {
                id: uid("alert"),
                account_id: account.id.clone(),
                kind: AlertKind::PerformanceDrop,
                drop_pct,
                last_impressions: last.impressions,
                baseline: baseline.round() as u32,
                ts: clock.now(),
            };
            info!(
                "{}: performance drop of {drop_pct}% detected",
                account.display_name
            );

            let brief = brief::generate(account, &alert, &state.metrics, keywords, clock, rng);
            outcome.alerts.push(alert);
            outcome.briefs.push(brief);
        }
    }

    state.alerts.extend(outcome.alerts.iter().cloned());
    state.briefs.extend(outcome.briefs.iter().cloned());
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::registry;
    use crate::Provider;
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn clock() -> FixedClock {
        FixedClock(Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap())
    }

    fn state_with_series(impressions: &[u32]) -> (DashboardState, String) {
        let mut state = DashboardState::default();
        let account = registry::connect(&mut state, Provider::Instagram, &clock());
        for &value in impressions {
            crate::ingest::ingest(&mut state, &account.id, i64::from(value), 0, 9, &clock())
                .unwrap();
        }
        (state, account.id)
    }

    #[test]
    fn flat_baseline_with_sharp_drop_raises_one_alert() {
        let (mut state, account_id) = state_with_series(&[100, 100, 100, 100, 100, 40]);
        let mut rng = StdRng::seed_from_u64(0);

        let outcome = scan(&mut state, 40, &[], &clock(), &mut rng);

        assert_eq!(outcome.alerts.len(), 1);
        assert_eq!(outcome.briefs.len(), 1);
        let alert = &outcome.alerts[0];
        assert_eq!(alert.account_id, account_id);
        assert_eq!(alert.kind, AlertKind::PerformanceDrop);
        assert_eq!(alert.baseline, 100);
        assert_eq!(alert.drop_pct, 60);
        assert_eq!(alert.last_impressions, 40);
        assert_eq!(outcome.briefs[0].alert_id, alert.id);
        assert_eq!(state.alerts, outcome.alerts);
        assert_eq!(state.briefs, outcome.briefs);
    }

    #[test]
    fn baseline_window_caps_at_five_preceding_metrics() {
        // The 1000-impression outlier is older than the window and ignored.
        let (mut state, _) = state_with_series(&[1000, 100, 100, 100, 100, 100, 40]);
        let mut rng = StdRng::seed_from_u64(0);

        let outcome = scan(&mut state, 40, &[], &clock(), &mut rng);

        assert_eq!(outcome.alerts.len(), 1);
        assert_eq!(outcome.alerts[0].baseline, 100);
        assert_eq!(outcome.alerts[0].drop_pct, 60);
    }

    #[test]
    fn short_history_uses_what_is_available() {
        let (mut state, _) = state_with_series(&[200, 40]);
        let mut rng = StdRng::seed_from_u64(0);

        let outcome = scan(&mut state, 40, &[], &clock(), &mut rng);

        assert_eq!(outcome.alerts.len(), 1);
        assert_eq!(outcome.alerts[0].baseline, 200);
        assert_eq!(outcome.alerts[0].drop_pct, 80);
    }

    #[test]
    fn single_metric_never_alerts() {
        let (mut state, _) = state_with_series(&[100]);
        let mut rng = StdRng::seed_from_u64(0);

        let outcome = scan(&mut state, -1000, &[], &clock(), &mut rng);
        assert!(outcome.is_quiet());
        assert!(state.alerts.is_empty());
        assert!(state.briefs.is_empty());
    }

    #[test]
    fn growing_account_stays_quiet_at_default_threshold() {
        let (mut state, _) = state_with_series(&[100, 100, 300]);
        let mut rng = StdRng::seed_from_u64(0);

        let outcome = scan(&mut state, 40, &[], &clock(), &mut rng);
        assert!(outcome.is_quiet());
    }

    #[test]
    fn zero_baseline_reports_zero_drop() {
        let (mut state, _) = state_with_series(&[0, 0, 0]);
        let mut rng = StdRng::seed_from_u64(0);

        // drop_pct degrades to 0, which still breaches a zero threshold
        let outcome = scan(&mut state, 0, &[], &clock(), &mut rng);
        assert_eq!(outcome.alerts.len(), 1);
        assert_eq!(outcome.alerts[0].drop_pct, 0);
        assert_eq!(outcome.alerts[0].baseline, 0);
    }

    #[test]
    fn rescan_discards_prior_alerts_and_appends_briefs() {
        let (mut state, _) = state_with_series(&[100, 100, 100, 40]);
        let mut rng = StdRng::seed_from_u64(0);

        let first = scan(&mut state, 40, &[], &clock(), &mut rng);
        let second = scan(&mut state, 40, &[], &clock(), &mut rng);

        // alert collection is replaced, not accumulated
        assert_eq!(state.alerts.len(), 1);

        // equal content modulo freshly minted ids
        let a = &first.alerts[0];
        let b = &second.alerts[0];
        assert_ne!(a.id, b.id);
        assert_eq!(
            (a.drop_pct, a.baseline, a.last_impressions, &a.account_id, a.ts),
            (b.drop_pct, b.baseline, b.last_impressions, &b.account_id, b.ts)
        );

        // briefs accumulate, regenerated with identical text
        assert_eq!(state.briefs.len(), 2);
        assert_eq!(state.briefs[0].brief, state.briefs[1].brief);
        assert_eq!(state.briefs[0].prompt, state.briefs[1].prompt);
    }

    #[test]
    fn scans_every_account_independently() {
        let mut state = DashboardState::default();
        let dropping = registry::connect(&mut state, Provider::Instagram, &clock());
        let steady = registry::connect(&mut state, Provider::Twitter, &clock());
        for value in [100i64, 100, 30] {
            crate::ingest::ingest(&mut state, &dropping.id, value, 0, 9, &clock()).unwrap();
        }
        for value in [100i64, 100, 100] {
            crate::ingest::ingest(&mut state, &steady.id, value, 0, 9, &clock()).unwrap();
        }

        let mut rng = StdRng::seed_from_u64(0);
        let outcome = scan(&mut state, 40, &[], &clock(), &mut rng);

        assert_eq!(outcome.alerts.len(), 1);
        assert_eq!(outcome.alerts[0].account_id, dropping.id);
    }
}
