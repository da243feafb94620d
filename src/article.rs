// src/article.rs
//! Normalized article record shared by the ingest layer, the pipeline and the JSON output.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use time::format_description::well_known::Rfc2822;
use time::OffsetDateTime;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub id: String,
    pub title: String,
    pub url: String,
    pub source: String,
    pub source_category: String,
    /// RFC 3339 with UTC offset, e.g. "2025-03-04T09:30:00+00:00".
    pub published: String,
    pub summary: String,
    pub image_url: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub industries: BTreeSet<String>,
    /// Filled by the classifier, consumed by the vendor partitions, never written out.
    #[serde(skip)]
    pub vendors: BTreeSet<String>,
    #[serde(default)]
    pub relevance_score: u8,
}

impl Article {
    pub fn new(url: &str, title: &str, published: DateTime<Utc>) -> Self {
        Self {
            id: article_id(url),
            title: title.to_string(),
            url: url.to_string(),
            source: String::new(),
            source_category: String::new(),
            published: format_timestamp(published),
            summary: String::new(),
            image_url: None,
            tags: Vec::new(),
            industries: BTreeSet::new(),
            vendors: BTreeSet::new(),
            relevance_score: 0,
        }
    }

    pub fn with_summary(mut self, summary: &str) -> Self {
        self.summary = summary.to_string();
        self
    }

    pub fn with_source(mut self, source: &str, category: &str) -> Self {
        self.source = source.to_string();
        self.source_category = category.to_string();
        self
    }

    pub fn with_score(mut self, score: u8) -> Self {
        self.relevance_score = score;
        self
    }

    /// `None` when `published` does not parse.
    pub fn published_at(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.published)
    }

    /// Lower-cased "title summary" used by the classifier.
    pub fn search_text(&self) -> String {
        format!("{} {}", self.title, self.summary).to_lowercase()
    }
}

/// Stable article id: first 12 hex chars of SHA-256 over the canonical URL.
pub fn article_id(url: &str) -> String {
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    hasher.update(url.as_bytes());
    let digest = hasher.finalize();
    let mut out = String::with_capacity(12);
    for b in digest.iter().take(6) {
        use std::fmt::Write as _;
        let _ = write!(&mut out, "{:02x}", b);
    }
    out
}

pub fn format_timestamp(dt: DateTime<Utc>) -> String {
    dt.to_rfc3339()
}

/// Parse the date formats feeds actually use: RFC 3339 / ISO-8601, RFC 2822,
/// and offset-less ISO-8601 (read as UTC).
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Some(dt) = OffsetDateTime::parse(s, &Rfc2822)
        .ok()
        .and_then(|odt| DateTime::from_timestamp(odt.unix_timestamp(), odt.nanosecond()))
    {
        return Some(dt);
    }
    // chrono is more lenient with obsolete zone names ("EST", "GMT")
    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(naive.and_utc());
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn id_is_twelve_hex_chars_and_stable() {
        let a = article_id("https://example.com/post/1");
        let b = article_id("https://example.com/post/1");
        let c = article_id("https://example.com/post/2");
        assert_eq!(a.len(), 12);
        assert!(a.chars().all(|ch| ch.is_ascii_hexdigit()));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn parses_common_feed_dates() {
        let want = Utc.with_ymd_and_hms(2025, 3, 4, 9, 30, 0).unwrap();
        assert_eq!(parse_timestamp("2025-03-04T09:30:00+00:00"), Some(want));
        assert_eq!(parse_timestamp("2025-03-04T10:30:00+01:00"), Some(want));
        assert_eq!(parse_timestamp("Tue, 04 Mar 2025 09:30:00 +0000"), Some(want));
        assert_eq!(parse_timestamp("Tue, 04 Mar 2025 09:30:00 GMT"), Some(want));
        assert_eq!(parse_timestamp("2025-03-04T09:30:00"), Some(want));
        assert_eq!(parse_timestamp("yesterday-ish"), None);
        assert_eq!(parse_timestamp("  "), None);
    }

    #[test]
    fn vendors_are_not_serialized() {
        let now = Utc.with_ymd_and_hms(2025, 3, 4, 9, 30, 0).unwrap();
        let mut a = Article::new("https://x.test/a", "Title", now).with_source("Feed", "adobe");
        a.vendors.insert("adobe".into());
        a.industries.insert("retail".into());
        let v = serde_json::to_value(&a).unwrap();
        assert!(v.get("vendors").is_none());
        assert_eq!(v["industries"], serde_json::json!(["retail"]));
        assert_eq!(v["published"], "2025-03-04T09:30:00+00:00");
        assert_eq!(v["image_url"], serde_json::Value::Null);
    }
}
