//! Periodic drop scanning
//!
//! Optional timer that re-runs the drop scan on a fixed interval. Each run
//! completes before the next tick is processed, so there is no overlap to
//! guard against. Cancellation means stopping the timer: dropping the handle
//! or calling [`AutoScan::stop`] ends the task and hands the engine back.

use std::time::Duration;

use rand::Rng;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::{Instant, interval_at};
use tracing::{debug, error, info};

use crate::engine::Dashboard;

/// Handle to a running auto-scan task.
pub struct AutoScan<R: Rng + Send + Sync + 'static> {
    shutdown_tx: oneshot::Sender<()>,
    handle: JoinHandle<Dashboard<R>>,
}

impl<R: Rng + Send + Sync + 'static> AutoScan<R> {
    /// Move the engine into a background task that scans every `period`.
    ///
    /// The first scan happens one full period after spawning, matching a
    /// plain interval timer rather than firing immediately.
    pub fn spawn(
        mut dashboard: Dashboard<R>,
        period: Duration,
        threshold: Option<i32>,
        keywords: Vec<String>,
    ) -> Self {
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel::<()>();

        let handle = tokio::spawn(async move {
            debug!("auto-scan started with period {period:?}");
            let mut ticker = interval_at(Instant::now() + period, period);

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        match dashboard.scan(threshold, &keywords).await {
                            Ok(outcome) if outcome.is_quiet() => {
                                debug!("auto-scan: no drops detected");
                            }
                            Ok(outcome) => {
                                info!(
                                    "auto-scan: {} alert(s), {} brief(s)",
                                    outcome.alerts.len(),
                                    outcome.briefs.len()
                                );
                            }
                            Err(e) => error!("auto-scan failed: {e}"),
                        }
                    }

                    _ = &mut shutdown_rx => {
                        debug!("auto-scan: shutdown requested");
                        break;
                    }
                }
            }

            dashboard
        });

        Self {
            shutdown_tx,
            handle,
        }
    }

    /// Stop the timer and get the engine back.
    pub async fn stop(self) -> Result<Dashboard<R>, tokio::task::JoinError> {
        // a receiver that already hung up still means "stop"
        let _ = self.shutdown_tx.send(());
        self.handle.await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::storage::MemoryBackend;
    use crate::Provider;
    use chrono::{TimeZone, Utc};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    async fn dashboard() -> Dashboard<StdRng> {
        let clock = FixedClock(Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap());
        Dashboard::load(
            Box::new(MemoryBackend::new()),
            Box::new(clock),
            StdRng::seed_from_u64(0),
        )
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn periodic_scan_raises_alerts_until_stopped() {
        let mut dashboard = dashboard().await;
        let account = dashboard.connect(Provider::Instagram).await.unwrap();
        for value in [100i64, 100, 100, 30] {
            dashboard.ingest(&account.id, value, 0, 9).await.unwrap();
        }

        let auto = AutoScan::spawn(dashboard, Duration::from_millis(50), Some(40), Vec::new());

        // enough time for at least two passes; the second regenerates the
        // brief alongside the recomputed alert
        tokio::time::sleep(Duration::from_millis(220)).await;
        let dashboard = auto.stop().await.unwrap();

        assert_eq!(dashboard.state().alerts.len(), 1);
        assert!(dashboard.state().briefs.len() >= 2);
        let briefs = &dashboard.state().briefs;
        assert_eq!(briefs[0].brief, briefs[1].brief);
    }

    #[tokio::test]
    async fn stopping_before_the_first_tick_scans_nothing() {
        let auto = AutoScan::spawn(
            dashboard().await,
            Duration::from_secs(60),
            None,
            Vec::new(),
        );
        let dashboard = auto.stop().await.unwrap();
        assert!(dashboard.state().alerts.is_empty());
    }
}
