pub mod autoscan;
pub mod brief;
pub mod clock;
pub mod config;
pub mod engine;
pub mod error;
pub mod ingest;
pub mod predict;
pub mod registry;
pub mod scanner;
pub mod state;
pub mod storage;
pub mod util;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Social platform a connected account belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Instagram,
    Youtube,
    Twitter,
}

impl Provider {
    /// Lowercase wire name (matches the serialized form).
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::Instagram => "instagram",
            Provider::Youtube => "youtube",
            Provider::Twitter => "twitter",
        }
    }

    /// Capitalized name used for display labels.
    pub fn capitalized(&self) -> &'static str {
        match self {
            Provider::Instagram => "Instagram",
            Provider::Youtube => "Youtube",
            Provider::Twitter => "Twitter",
        }
    }
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Provider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "instagram" => Ok(Provider::Instagram),
            "youtube" => Ok(Provider::Youtube),
            "twitter" => Ok(Provider::Twitter),
            other => Err(format!(
                "unknown provider '{other}' (expected instagram, youtube or twitter)"
            )),
        }
    }
}

/// A connected social account. Immutable once created, never deleted
/// in-session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: String,
    pub provider: Provider,
    pub provider_account_id: String,
    pub display_name: String,
    pub connected_at: DateTime<Utc>,
}

/// One engagement sample tied to an account. Samples form an append-only
/// sequence per account, ordered by insertion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metric {
    pub id: String,
    #[serde(rename = "accountId")]
    pub account_id: String,
    pub impressions: u32,
    pub likes: u32,
    pub hour: u8,
    pub ts: DateTime<Utc>,
}

/// Kind of alert raised by the drop scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    PerformanceDrop,
}

/// A performance-drop alert. The alert collection is recomputed in full on
/// every scan pass, so alerts never outlive the scan that produced them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub id: String,
    #[serde(rename = "accountId")]
    pub account_id: String,
    #[serde(rename = "type")]
    pub kind: AlertKind,
    /// Relative shortfall of the latest impressions below baseline, rounded
    /// to the nearest integer. Negative when the account is growing.
    pub drop_pct: i32,
    pub last_impressions: u32,
    /// Rounded mean impressions of the baseline window.
    pub baseline: u32,
    pub ts: DateTime<Utc>,
}

/// Templated advisory text bundle generated alongside an alert. Briefs are
/// never deleted and accumulate across scans.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Brief {
    pub id: String,
    #[serde(rename = "alertId")]
    pub alert_id: String,
    #[serde(rename = "accountId")]
    pub account_id: String,
    pub brief: String,
    pub prompt: String,
    pub ts: DateTime<Utc>,
}

/// One ranked keyword prediction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prediction {
    pub keyword: String,
    /// Base random score plus boosts, rounded to 2 decimals.
    pub score: f64,
    /// `score * 100`, rounded to 1 decimal.
    pub predicted_growth_pct: f64,
    pub best_post_hour: u8,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn provider_parses_case_insensitively() {
        assert_eq!(
            Provider::from_str("Instagram").ok(),
            Some(Provider::Instagram)
        );
        assert_eq!(Provider::from_str(" youtube ").ok(), Some(Provider::Youtube));
        assert!(Provider::from_str("myspace").is_err());
    }

    #[test]
    fn alert_kind_serializes_as_performance_drop() {
        let json = serde_json::to_string(&AlertKind::PerformanceDrop).unwrap();
        assert_eq!(json, "\"performance_drop\"");
    }

    #[test]
    fn metric_uses_camel_case_account_reference() {
        let metric = Metric {
            id: "m_0000001".to_string(),
            account_id: "acc_0000001".to_string(),
            impressions: 10,
            likes: 2,
            hour: 9,
            ts: chrono::Utc::now(),
        };
        let json = serde_json::to_value(&metric).unwrap();
        assert_eq!(json["accountId"], "acc_0000001");
    }
}
