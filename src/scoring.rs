// src/scoring.rs
//! Relevance scorer: keyword tiers (title beats summary) plus a recency bonus,
//! clamped into the configured score bounds.

use chrono::{DateTime, Utc};

use crate::article::Article;
use crate::config::{FeedConfig, RecencyStep, TierWeights};

/// Result of scoring one article, with the hits that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Relevance {
    pub score: u8,
    /// "<tier>:<keyword>@title" or "<tier>:<keyword>@summary"
    pub matched: Vec<String>,
    pub reasons: Vec<String>,
}

/// Score an article against the config at the given instant.
pub fn score(article: &Article, config: &FeedConfig, now: DateTime<Utc>) -> u8 {
    score_breakdown(article, config, now).score
}

pub fn score_breakdown(article: &Article, config: &FeedConfig, now: DateTime<Utc>) -> Relevance {
    let weights = &config.scoring;
    let tiers = &config.relevance_keywords;
    let title = article.title.to_lowercase();
    let summary = article.summary.to_lowercase();

    let mut rel = Relevance::default();
    let mut raw = 0u32;
    for (name, keywords, tw) in [
        ("high", &tiers.high_weight, weights.high),
        ("medium", &tiers.medium_weight, weights.medium),
        ("low", &tiers.low_weight, weights.low),
    ] {
        raw = raw.saturating_add(tier_points(name, keywords, tw, &title, &summary, &mut rel.matched));
    }

    let bonus = recency_bonus(article.published_at(), now, &weights.recency);
    if bonus > 0 {
        rel.reasons.push(format!("recency:+{bonus}"));
    }
    raw = raw.saturating_add(bonus);

    let (min_score, max_score) = weights.bounds();
    let clamped = if raw < min_score {
        rel.reasons.push(format!("floor:{min_score}"));
        min_score
    } else if raw > max_score {
        rel.reasons.push(format!("cap:{max_score}"));
        max_score
    } else {
        raw
    };
    rel.score = u8::try_from(clamped).unwrap_or(u8::MAX);
    rel
}

/// Each keyword counts once: from the title if present there, else from the summary.
fn tier_points(
    tier: &str,
    keywords: &[String],
    weights: TierWeights,
    title: &str,
    summary: &str,
    matched: &mut Vec<String>,
) -> u32 {
    let mut points = 0u32;
    for kw in keywords {
        let kw = kw.to_lowercase();
        if title.contains(&kw) {
            points = points.saturating_add(weights.title);
            matched.push(format!("{tier}:{kw}@title"));
        } else if summary.contains(&kw) {
            points = points.saturating_add(weights.summary);
            matched.push(format!("{tier}:{kw}@summary"));
        }
    }
    points
}

/// Bonus for the first step whose age limit the article is still under.
/// Unknown publish time earns nothing; a future timestamp counts as brand new.
pub fn recency_bonus(
    published: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
    steps: &[RecencyStep],
) -> u32 {
    let Some(published) = published else {
        return 0;
    };
    let age_secs = (now - published).num_seconds();
    steps
        .iter()
        .find(|s| age_secs < i64::from(s.max_age_hours) * 3600)
        .map(|s| s.bonus)
        .unwrap_or(0)
}
