//! Advisory brief generator
//!
//! Deterministic, template-based text synthesis: the "AI" here is a fixed
//! template with string interpolation, and it must stay that way. No
//! external generation call is ever made; the assembled prompt is echoed
//! verbatim into the brief so the output documents its own inputs.

use rand::Rng;

use crate::clock::Clock;
use crate::predict::estimate_best_hour;
use crate::util::uid;
use crate::{Account, Alert, Brief, Metric};

/// Keyword pair used when the caller supplies no terms.
const DEFAULT_KEYWORDS: [&str; 2] = ["ai", "trend"];

/// Hashtag fallback when only one keyword was supplied.
const FALLBACK_SECOND_TAG: &str = "viral";

/// How many recent posts the brief summarizes.
const RECENT_POSTS: usize = 3;

/// Build the advisory brief for one alert.
///
/// `metrics` is the full metric collection; the generator picks out the
/// account's three most recent samples itself. At most three keyword terms
/// are used, defaulting to `ai, trend` when none are supplied.
pub fn generate<R: Rng>(
    account: &Account,
    alert: &Alert,
    metrics: &[Metric],
    keywords: &[String],
    clock: &dyn Clock,
    rng: &mut R,
) -> Brief {
    let posts: Vec<&Metric> = metrics
        .iter()
        .filter(|m| m.account_id == account.id)
        .collect();
    let recent = if posts.is_empty() {
        "No recent posts".to_string()
    } else {
        posts
            .iter()
            .rev()
            .take(RECENT_POSTS)
            .map(|p| format!("{} impressions • {} likes • hour:{}", p.impressions, p.likes, p.hour))
            .collect::<Vec<_>>()
            .join("; ")
    };

    let terms: Vec<String> = if keywords.is_empty() {
        DEFAULT_KEYWORDS.iter().map(|s| s.to_string()).collect()
    } else {
        keywords.iter().take(3).map(|k| k.trim().to_string()).collect()
    };
    let top_keywords = terms.join(", ");

    let first_tag: String = terms[0].chars().filter(|c| !c.is_whitespace()).collect();
    let second_tag = terms
        .get(1)
        .cloned()
        .unwrap_or_else(|| FALLBACK_SECOND_TAG.to_string());

    let suggested_time = estimate_best_hour(metrics, clock, rng);

    let prompt = format!(
        "Account: {}\nDrop: {}% below baseline ({} -> {})\nRecent: {}\nKeywords: {}\n\n\
         Please give: diagnosis (1 line); 3 post ideas (title + caption + 2 hashtags); \
         1 quick test; suggested post time.",
        account.display_name,
        alert.drop_pct,
        alert.baseline,
        alert.last_impressions,
        recent,
        top_keywords
    );

    let brief_text = format!(
        "Diagnosis: Engagement dropped {}% likely due to lower impressions or poor timing.\n\n\
         Post Ideas:\n\
         1) Title: Quick Repost Highlight\n   \
         Caption: Re-share your top-performing clip with fresh opening line. Add context and CTA. \
         Hashtags: #{first_tag} #repost\n\
         2) Title: Trending Take\n   \
         Caption: Share a 30s reaction to a trending topic. Ask a question to drive comments. \
         Hashtags: #trend #{second_tag}\n\
         3) Title: Community Poll\n   \
         Caption: Use poll sticker or question to boost interactions; follow up with a reply video. \
         Hashtags: #poll #engage\n\n\
         Quick Test: Boost one recent post for 24 hours with small budget or pin it to top to test uplift.\n\
         Suggested time: {suggested_time}:00 (based on past engagement)\n\n\
         Prompt-used:\n{prompt}",
        alert.drop_pct
    );

    Brief {
        id: uid("brief"),
        alert_id: alert.id.clone(),
        account_id: account.id.clone(),
        brief: brief_text,
        prompt,
        ts: clock.now(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::{AlertKind, Provider};
    use chrono::{TimeZone, Utc};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn account() -> Account {
        Account {
            id: "acc_1".to_string(),
            provider: Provider::Instagram,
            provider_account_id: "instagram_fake_0".to_string(),
            display_name: "Instagram Demo".to_string(),
            connected_at: Utc::now(),
        }
    }

    fn alert() -> Alert {
        Alert {
            id: "alert_1".to_string(),
            account_id: "acc_1".to_string(),
            kind: AlertKind::PerformanceDrop,
            drop_pct: 60,
            last_impressions: 40,
            baseline: 100,
            ts: Utc::now(),
        }
    }

    fn metric(impressions: u32, hour: u8) -> Metric {
        Metric {
            id: uid("m"),
            account_id: "acc_1".to_string(),
            impressions,
            likes: impressions / 10,
            hour,
            ts: Utc::now(),
        }
    }

    fn clock() -> FixedClock {
        FixedClock(Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap())
    }

    fn terms(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn diagnosis_interpolates_drop_percentage() {
        let mut rng = StdRng::seed_from_u64(0);
        let brief = generate(&account(), &alert(), &[], &[], &clock(), &mut rng);
        assert!(brief.brief.contains("Engagement dropped 60%"));
    }

    #[test]
    fn hashtags_come_from_supplied_keywords() {
        let mut rng = StdRng::seed_from_u64(0);
        let brief = generate(
            &account(),
            &alert(),
            &[],
            &terms(&["growth hacking", "memes"]),
            &clock(),
            &mut rng,
        );
        // Whitespace is stripped from the first hashtag
        assert!(brief.brief.contains("#growthhacking #repost"));
        assert!(brief.brief.contains("#trend #memes"));
    }

    #[test]
    fn missing_second_keyword_falls_back_to_viral() {
        let mut rng = StdRng::seed_from_u64(0);
        let brief = generate(
            &account(),
            &alert(),
            &[],
            &terms(&["solo"]),
            &clock(),
            &mut rng,
        );
        assert!(brief.brief.contains("#trend #viral"));
    }

    #[test]
    fn defaults_to_ai_and_trend_pair() {
        let mut rng = StdRng::seed_from_u64(0);
        let brief = generate(&account(), &alert(), &[], &[], &clock(), &mut rng);
        assert!(brief.brief.contains("#ai #repost"));
        assert!(brief.prompt.contains("Keywords: ai, trend"));
    }

    #[test]
    fn prompt_is_echoed_verbatim() {
        let mut rng = StdRng::seed_from_u64(0);
        let brief = generate(&account(), &alert(), &[], &[], &clock(), &mut rng);
        assert!(brief.brief.ends_with(&brief.prompt));
        assert!(brief.brief.contains("Prompt-used:\n"));
    }

    #[test]
    fn summarizes_three_most_recent_posts_newest_first() {
        let metrics = vec![metric(10, 8), metric(20, 9), metric(30, 10), metric(40, 11)];
        let mut rng = StdRng::seed_from_u64(0);
        let brief = generate(&account(), &alert(), &metrics, &[], &clock(), &mut rng);
        assert!(brief.prompt.contains(
            "Recent: 40 impressions • 4 likes • hour:11; \
             30 impressions • 3 likes • hour:10; \
             20 impressions • 2 likes • hour:9"
        ));
    }

    #[test]
    fn placeholder_when_account_has_no_posts() {
        let mut rng = StdRng::seed_from_u64(0);
        let brief = generate(&account(), &alert(), &[], &[], &clock(), &mut rng);
        assert!(brief.prompt.contains("Recent: No recent posts"));
    }

    #[test]
    fn suggested_time_uses_best_hour_estimate() {
        let metrics = vec![metric(5, 2), metric(500, 7)];
        let mut rng = StdRng::seed_from_u64(0);
        let brief = generate(&account(), &alert(), &metrics, &[], &clock(), &mut rng);
        assert!(brief.brief.contains("Suggested time: 7:00"));
    }

    #[test]
    fn references_its_alert_and_account() {
        let mut rng = StdRng::seed_from_u64(0);
        let brief = generate(&account(), &alert(), &[], &[], &clock(), &mut rng);
        assert_eq!(brief.alert_id, "alert_1");
        assert_eq!(brief.account_id, "acc_1");
        assert!(brief.id.starts_with("brief_"));
    }
}
