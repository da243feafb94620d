// src/pipeline.rs
//! Batch pipeline: score + classify every article, dedup once, partition.
//! Pure apart from logging and metrics; "now" is always passed in.

use chrono::{DateTime, Utc};
use metrics::{counter, gauge};
use tracing::{info, warn};

use crate::article::Article;
use crate::classify::classify_article;
use crate::config::FeedConfig;
use crate::dedup::{dedup_with_stats, DedupStats};
use crate::metrics::ensure_metrics_described;
use crate::partition::{partition, OutputSets};
use crate::scoring::{score_breakdown, Relevance};

// Dev logging gate: KITCHEN_DEV_LOG=1 AND dev env (debug build or KITCHEN_ENV in {local,development,dev})
pub(crate) fn dev_logging_enabled() -> bool {
    let on = std::env::var("KITCHEN_DEV_LOG").ok().as_deref() == Some("1");
    if !on {
        return false;
    }
    if cfg!(debug_assertions) {
        return true;
    }
    matches!(
        std::env::var("KITCHEN_ENV")
            .unwrap_or_default()
            .to_ascii_lowercase()
            .as_str(),
        "local" | "development" | "dev"
    )
}

pub(crate) fn truncate_vec<T: ToString>(v: &[T], max: usize) -> Vec<String> {
    v.iter().take(max).map(|x| x.to_string()).collect()
}

/// Per-article scoring trace. Logs the article id, never the text.
fn dev_log_relevance(article: &Article, rel: &Relevance) {
    info!(
        target: "relevance",
        id = %article.id,
        score = rel.score,
        matched = ?truncate_vec(&rel.matched, 5),
        reasons = ?truncate_vec(&rel.reasons, 5),
        "scored"
    );
}

/// Assign `relevance_score`, `industries` and `vendors`.
pub fn enrich(article: &mut Article, config: &FeedConfig, now: DateTime<Utc>) -> Relevance {
    let rel = score_breakdown(article, config, now);
    article.relevance_score = rel.score;
    classify_article(article, config);
    rel
}

/// Enrich and deduplicate; returns the survivors in input order.
pub fn process(
    articles: Vec<Article>,
    config: &FeedConfig,
    now: DateTime<Utc>,
) -> (Vec<Article>, DedupStats) {
    let dev_log = dev_logging_enabled();
    let mut enriched = articles;
    for article in enriched.iter_mut() {
        let rel = enrich(article, config, now);
        if dev_log {
            dev_log_relevance(article, &rel);
        }
    }
    dedup_with_stats(enriched)
}

/// Full core run over whatever articles the fetch stage delivered.
pub fn run(articles: Vec<Article>, config: &FeedConfig, now: DateTime<Utc>) -> OutputSets {
    ensure_metrics_described();

    let raw = articles.len();
    if raw == 0 {
        warn!(target: "pipeline", "no articles received; writing empty feeds");
    }
    let (kept, stats) = process(articles, config, now);

    counter!("news_articles_raw_total").increment(raw as u64);
    counter!("news_dedup_exact_total").increment(stats.exact_removed as u64);
    counter!("news_dedup_fuzzy_total").increment(stats.fuzzy_removed as u64);
    counter!("news_articles_kept_total").increment(kept.len() as u64);
    gauge!("news_pipeline_last_run_ts").set(now.timestamp() as f64);

    info!(
        target: "pipeline",
        raw,
        exact_removed = stats.exact_removed,
        fuzzy_removed = stats.fuzzy_removed,
        kept = kept.len(),
        "deduplicated"
    );

    let sets = partition(&kept, config, now);
    info!(
        target: "pipeline",
        main = sets.main.len(),
        industries = sets.industries.len(),
        vendors = sets.vendors.len(),
        "partitioned"
    );
    sets
}
