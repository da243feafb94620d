// src/ingest/mod.rs
pub mod http;
pub mod providers;
pub mod types;

use chrono::{DateTime, Utc};
use futures::stream::{self, StreamExt};
use metrics::counter;
use once_cell::sync::OnceCell;
use regex::Regex;

use crate::article::{article_id, format_timestamp, parse_timestamp, Article};
use crate::config::{FeedConfig, FeedDescriptor, FetchSettings};
use crate::ingest::providers::parse_feed;
use crate::ingest::types::{FeedFetcher, RawEntry};

pub const MAX_TITLE_CHARS: usize = 300;
pub const MAX_SUMMARY_CHARS: usize = 280;
pub const MAX_TAGS: usize = 5;
pub const MAX_TAG_CHARS: usize = 50;

/// Strip tags, decode entities, collapse whitespace.
pub fn clean_html(s: &str) -> String {
    if s.is_empty() {
        return String::new();
    }
    static RE_TAGS: OnceCell<Regex> = OnceCell::new();
    let re_tags = RE_TAGS.get_or_init(|| Regex::new(r"<[^>]+>").expect("tag regex"));
    let out = re_tags.replace_all(s, " ");
    let out = html_escape::decode_html_entities(&out);

    static RE_WS: OnceCell<Regex> = OnceCell::new();
    let re_ws = RE_WS.get_or_init(|| Regex::new(r"\s+").expect("whitespace regex"));
    re_ws.replace_all(&out, " ").trim().to_string()
}

/// Titles over the cap keep their first 297 chars plus "...".
pub fn truncate_title(title: String) -> String {
    if title.chars().count() <= MAX_TITLE_CHARS {
        return title;
    }
    let head: String = title.chars().take(MAX_TITLE_CHARS - 3).collect();
    format!("{head}...")
}

/// Summaries over the cap are cut back to the last whole word, plus "...".
pub fn truncate_summary(summary: String) -> String {
    if summary.chars().count() <= MAX_SUMMARY_CHARS {
        return summary;
    }
    let head: String = summary.chars().take(MAX_SUMMARY_CHARS - 3).collect();
    let head = match head.rfind(' ') {
        Some(i) => &head[..i],
        None => head.as_str(),
    };
    format!("{head}...")
}

/// Articles older than `max_age` are dropped; an unparseable date counts as recent.
pub fn is_recent(published: &str, now: DateTime<Utc>, max_age: chrono::Duration) -> bool {
    match parse_timestamp(published) {
        Some(ts) => ts > now - max_age,
        None => true,
    }
}

/// First usable image: media:content, media:thumbnail, image enclosure, inline <img>.
pub fn extract_image(entry: &RawEntry) -> Option<String> {
    for m in &entry.media {
        let typed_image = m.mime.as_deref().unwrap_or("image").contains("image");
        if !m.url.is_empty() && (typed_image || m.medium.as_deref() == Some("image")) {
            return Some(m.url.clone());
        }
    }

    if let Some(first) = entry.thumbnails.first() {
        return Some(first.clone()).filter(|u| !u.is_empty());
    }

    for enc in &entry.enclosures {
        if enc.mime.as_deref().unwrap_or_default().contains("image") {
            return Some(enc.url.clone()).filter(|u| !u.is_empty());
        }
    }

    let html = entry.summary.as_deref().unwrap_or_default();
    if !html.is_empty() {
        static RE_IMG: OnceCell<Regex> = OnceCell::new();
        let re_img = RE_IMG.get_or_init(|| {
            Regex::new(r#"<img[^>]+src=["']([^"']+)["']"#).expect("img regex")
        });
        if let Some(caps) = re_img.captures(html) {
            let url = &caps[1];
            if url.starts_with("http") && !url.ends_with(".gif") {
                return Some(url.to_string());
            }
        }
    }
    None
}

/// Turn a raw feed entry into an article. `None` when the entry has no link or title.
pub fn normalize_entry(
    entry: &RawEntry,
    feed: &FeedDescriptor,
    now: DateTime<Utc>,
) -> Option<Article> {
    let url = entry.link.as_deref().unwrap_or_default().trim();
    if url.is_empty() {
        return None;
    }
    let title = entry.title.as_deref().unwrap_or_default().trim();
    if title.is_empty() {
        return None;
    }
    let title = truncate_title(clean_html(title));

    let published = [&entry.published, &entry.updated]
        .into_iter()
        .flatten()
        .find_map(|raw| parse_timestamp(raw))
        .unwrap_or(now);

    let summary = [&entry.summary, &entry.content]
        .into_iter()
        .flatten()
        .find(|v| !v.is_empty())
        .map(|v| truncate_summary(clean_html(v)))
        .unwrap_or_default();

    let tags = entry
        .tags
        .iter()
        .take(MAX_TAGS)
        .map(|t| t.trim())
        .filter(|t| !t.is_empty() && t.chars().count() < MAX_TAG_CHARS)
        .map(str::to_string)
        .collect();

    Some(Article {
        id: article_id(url),
        title,
        url: url.to_string(),
        source: feed.display_name(),
        source_category: feed.category.clone(),
        published: format_timestamp(published),
        summary,
        image_url: extract_image(entry),
        tags,
        industries: Default::default(),
        vendors: Default::default(),
        relevance_score: 0,
    })
}

/// Fetch, parse and normalize one feed. Errors are logged and yield no articles.
pub async fn fetch_feed<F: FeedFetcher + ?Sized>(
    fetcher: &F,
    feed: &FeedDescriptor,
    settings: &FetchSettings,
    now: DateTime<Utc>,
) -> Vec<Article> {
    let body = match tokio::time::timeout(settings.timeout, fetcher.fetch(&feed.url)).await {
        Ok(Ok(body)) => body,
        Ok(Err(e)) => {
            tracing::warn!(target: "ingest", error = ?e, feed = %feed.name, fetcher = fetcher.name(), "feed fetch error");
            counter!("news_fetch_errors_total").increment(1);
            return Vec::new();
        }
        Err(_) => {
            tracing::warn!(target: "ingest", feed = %feed.name, timeout_secs = settings.timeout.as_secs(), "feed fetch timed out");
            counter!("news_fetch_errors_total").increment(1);
            return Vec::new();
        }
    };

    let entries = match parse_feed(&body) {
        Ok(v) => v,
        Err(e) => {
            tracing::warn!(target: "ingest", error = ?e, feed = %feed.name, "malformed feed");
            counter!("news_fetch_errors_total").increment(1);
            return Vec::new();
        }
    };

    let articles: Vec<Article> = entries
        .iter()
        .take(settings.max_articles_per_feed)
        .filter_map(|e| normalize_entry(e, feed, now))
        .filter(|a| is_recent(&a.published, now, settings.max_article_age))
        .collect();

    tracing::info!(target: "ingest", feed = %feed.name, entries = entries.len(), kept = articles.len(), "feed fetched");
    articles
}

/// Fetch every configured feed with bounded concurrency. Output keeps config order,
/// so the (order dependent) dedup stays reproducible for the same inputs.
pub async fn fetch_all<F: FeedFetcher + ?Sized>(
    fetcher: &F,
    config: &FeedConfig,
    settings: &FetchSettings,
    now: DateTime<Utc>,
) -> Vec<Article> {
    crate::metrics::ensure_metrics_described();
    let per_feed: Vec<Vec<Article>> = stream::iter(config.all_feeds())
        .map(|feed| fetch_feed(fetcher, feed, settings, now))
        .buffered(settings.concurrency.max(1))
        .collect()
        .await;
    per_feed.into_iter().flatten().collect()
}
