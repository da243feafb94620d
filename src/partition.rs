// src/partition.rs
//! Slices the deduplicated set into the documents the static site reads:
//! the main feed, one feed per industry, one per vendor, and run metadata
//! with a per-feed health summary.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::collections::BTreeMap;

use crate::article::{format_timestamp, Article};
use crate::config::FeedConfig;

pub const MAX_ARTICLES_PER_OUTPUT: usize = 100;
pub const VENDORS: [&str; 2] = ["adobe", "salesforce"];
pub const NEXT_UPDATE_HOURS: i64 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedStatus {
    Ok,
    Empty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedHealth {
    pub status: FeedStatus,
    pub articles: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    pub last_updated: String,
    pub article_count: usize,
    pub feed_health: BTreeMap<String, FeedHealth>,
    pub next_update_approx: String,
}

/// Every document of one run. All sets are independent views over the same articles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputSets {
    pub main: Vec<Article>,
    pub industries: BTreeMap<String, Vec<Article>>,
    pub vendors: BTreeMap<String, Vec<Article>>,
    pub metadata: Metadata,
}

pub fn partition(articles: &[Article], config: &FeedConfig, now: DateTime<Utc>) -> OutputSets {
    let main = rank(articles.iter());

    let industries = config
        .industry_keywords
        .keys()
        .map(|label| {
            let subset = articles.iter().filter(|a| a.industries.contains(label));
            (label.clone(), rank(subset))
        })
        .collect();

    let vendors = VENDORS
        .iter()
        .map(|&vendor| {
            let subset = articles.iter().filter(|a| has_vendor_affinity(a, vendor));
            (vendor.to_string(), rank(subset))
        })
        .collect();

    OutputSets {
        main,
        industries,
        vendors,
        metadata: metadata(articles, config, now),
    }
}

/// Vendor feeds take both first-party sources and keyword matches.
pub fn has_vendor_affinity(article: &Article, vendor: &str) -> bool {
    article.source_category == vendor || article.vendors.contains(vendor)
}

/// Highest score first; equal scores list the older article first. Capped.
pub fn rank<'a>(articles: impl Iterator<Item = &'a Article>) -> Vec<Article> {
    let mut out: Vec<Article> = articles.cloned().collect();
    out.sort_by_cached_key(sort_key);
    out.truncate(MAX_ARTICLES_PER_OUTPUT);
    out
}

// Unparseable publish times sort after parseable ones; the raw string keeps the order total.
fn sort_key(a: &Article) -> (Reverse<u8>, bool, Option<DateTime<Utc>>, String) {
    let published = a.published_at();
    (
        Reverse(a.relevance_score),
        published.is_none(),
        published,
        a.published.clone(),
    )
}

pub fn feed_health(articles: &[Article], config: &FeedConfig) -> BTreeMap<String, FeedHealth> {
    let mut per_source: BTreeMap<&str, usize> = BTreeMap::new();
    for a in articles {
        *per_source.entry(a.source.as_str()).or_insert(0) += 1;
    }

    config
        .all_feeds()
        .map(|feed| {
            let count = per_source
                .get(feed.display_name().as_str())
                .copied()
                .unwrap_or(0);
            let status = if count > 0 {
                FeedStatus::Ok
            } else {
                FeedStatus::Empty
            };
            (
                feed.name.clone(),
                FeedHealth {
                    status,
                    articles: count,
                },
            )
        })
        .collect()
}

pub fn metadata(articles: &[Article], config: &FeedConfig, now: DateTime<Utc>) -> Metadata {
    Metadata {
        last_updated: format_timestamp(now),
        article_count: articles.len(),
        feed_health: feed_health(articles, config),
        next_update_approx: format_timestamp(now + Duration::hours(NEXT_UPDATE_HOURS)),
    }
}
