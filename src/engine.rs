//! Dashboard engine
//!
//! Ties the four operations to the shared state and the storage backend.
//! Control flow follows the dashboard contract: run one operation, persist
//! all collections, let the caller refresh its views. Persistence is a
//! synchronous write-through after every mutation, never batched.

use rand::Rng;
use tracing::{debug, instrument};

use crate::clock::Clock;
use crate::error::EngineResult;
use crate::scanner::ScanOutcome;
use crate::state::DashboardState;
use crate::storage::StoreBackend;
use crate::{ingest, predict, registry, scanner, util};
use crate::{Account, Metric, Prediction, Provider};

/// The analytics engine: explicit state plus injected capabilities.
///
/// The randomness source and the clock are injected so tests can pin
/// outcomes; binaries pass a seeded-from-OS rng and the system clock.
pub struct Dashboard<R: Rng> {
    state: DashboardState,
    backend: Box<dyn StoreBackend>,
    clock: Box<dyn Clock>,
    rng: R,
    drop_threshold: i32,
}

impl<R: Rng> Dashboard<R> {
    /// Load the persisted state and build an engine around it.
    pub async fn load(
        backend: Box<dyn StoreBackend>,
        clock: Box<dyn Clock>,
        rng: R,
    ) -> EngineResult<Self> {
        let state = backend.load().await?;
        debug!(
            accounts = state.accounts.len(),
            metrics = state.metrics.len(),
            "dashboard loaded"
        );
        Ok(Self {
            state,
            backend,
            clock,
            rng,
            drop_threshold: util::get_default_drop_threshold(),
        })
    }

    /// Override the default drop threshold used when `scan` gets `None`.
    pub fn with_drop_threshold(mut self, threshold: i32) -> Self {
        self.drop_threshold = threshold;
        self
    }

    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    /// Connect a mock account. Always succeeds; persists before returning.
    #[instrument(skip(self))]
    pub async fn connect(&mut self, provider: Provider) -> EngineResult<Account> {
        let account = registry::connect(&mut self.state, provider, self.clock.as_ref());
        self.persist().await?;
        Ok(account)
    }

    /// Append one engagement sample and persist.
    #[instrument(skip(self))]
    pub async fn ingest(
        &mut self,
        account_id: &str,
        impressions: i64,
        likes: i64,
        hour: i64,
    ) -> EngineResult<Metric> {
        let metric = ingest::ingest(
            &mut self.state,
            account_id,
            impressions,
            likes,
            hour,
            self.clock.as_ref(),
        )?;
        self.persist().await?;
        Ok(metric)
    }

    /// Score keywords against the current metrics. Read-only: nothing is
    /// persisted.
    #[instrument(skip(self))]
    pub fn predict(&mut self, keywords: &[String]) -> EngineResult<Vec<Prediction>> {
        predict::predict(&self.state, keywords, self.clock.as_ref(), &mut self.rng)
    }

    /// Run a drop scan, regenerate briefs for breaches, persist.
    ///
    /// `threshold` of `None` applies the engine's default (40 unless
    /// overridden). `keywords` feed the generated briefs.
    #[instrument(skip(self))]
    pub async fn scan(
        &mut self,
        threshold: Option<i32>,
        keywords: &[String],
    ) -> EngineResult<ScanOutcome> {
        let threshold = threshold.unwrap_or(self.drop_threshold);
        let outcome = scanner::scan(
            &mut self.state,
            threshold,
            keywords,
            self.clock.as_ref(),
            &mut self.rng,
        );
        self.persist().await?;
        if outcome.is_quiet() {
            debug!("no drops detected");
        }
        Ok(outcome)
    }

    /// Human-readable storage backend statistics.
    pub async fn storage_stats(&self) -> EngineResult<String> {
        Ok(self.backend.get_stats().await?)
    }

    /// Release the storage backend.
    pub async fn close(self) -> EngineResult<()> {
        self.backend.close().await?;
        Ok(())
    }

    async fn persist(&self) -> EngineResult<()> {
        self.backend.save(&self.state).await?;
        Ok(())
    }
}
