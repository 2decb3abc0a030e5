//! Dashboard state: the four collections
//!
//! All operations take this state explicitly instead of touching globals,
//! which keeps unit tests free of shared fixtures. The struct doubles as the
//! persisted snapshot: each field serializes to one named JSON array, and
//! absent fields default to empty on load.

use serde::{Deserialize, Serialize};

use crate::{Account, Alert, Brief, Metric};

/// The four in-memory collections mutated by the dashboard operations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardState {
    #[serde(default)]
    pub accounts: Vec<Account>,

    #[serde(default)]
    pub metrics: Vec<Metric>,

    #[serde(default)]
    pub alerts: Vec<Alert>,

    #[serde(default)]
    pub briefs: Vec<Brief>,
}

impl DashboardState {
    /// Look up an account by id.
    pub fn account(&self, id: &str) -> Option<&Account> {
        self.accounts.iter().find(|a| a.id == id)
    }

    /// Display name for an account id, falling back to the raw id when the
    /// account is unknown.
    pub fn display_name_for<'a>(&'a self, id: &'a str) -> &'a str {
        self.account(id).map_or(id, |a| a.display_name.as_str())
    }

    /// All metrics for one account, in insertion order.
    pub fn metrics_for(&self, account_id: &str) -> Vec<&Metric> {
        self.metrics
            .iter()
            .filter(|m| m.account_id == account_id)
            .collect()
    }

    /// The most recent metrics across all accounts, newest first.
    pub fn recent_metrics(&self, limit: usize) -> Vec<&Metric> {
        self.metrics.iter().rev().take(limit).collect()
    }

    /// All briefs, newest first.
    pub fn recent_briefs(&self) -> Vec<&Brief> {
        self.briefs.iter().rev().collect()
    }
}
