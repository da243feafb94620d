// src/output.rs
//! Persists one pipeline run as the static JSON documents the site reads.

use anyhow::{bail, Context, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::config::is_valid_label;
use crate::partition::OutputSets;

pub const MAIN_FEED_FILE: &str = "main-feed.json";
pub const METADATA_FILE: &str = "metadata.json";

pub fn industry_file(label: &str) -> String {
    format!("industry-{label}.json")
}

pub fn vendor_file(vendor: &str) -> String {
    format!("vendor-{vendor}.json")
}

/// Pretty JSON, parent directory created on demand.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).with_context(|| format!("creating {}", parent.display()))?;
    }
    let body = serde_json::to_string_pretty(value)
        .with_context(|| format!("serializing {}", path.display()))?;
    std::fs::write(path, body).with_context(|| format!("writing {}", path.display()))
}

fn put<T: Serialize + ?Sized>(dir: &Path, name: &str, value: &T, written: &mut Vec<PathBuf>) -> Result<()> {
    let path = dir.join(name);
    write_json(&path, value)?;
    written.push(path);
    Ok(())
}

/// Write every output set into `dir`. Returns the files written, main feed first.
pub fn write_outputs(dir: &Path, sets: &OutputSets) -> Result<Vec<PathBuf>> {
    if let Some(bad) = sets.industries.keys().find(|l| !is_valid_label(l)) {
        bail!("refusing to write industry file for label {bad:?}");
    }
    std::fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;

    let mut written = Vec::new();
    put(dir, MAIN_FEED_FILE, &sets.main, &mut written)?;
    for (label, articles) in &sets.industries {
        put(dir, &industry_file(label), articles, &mut written)?;
    }
    for (vendor, articles) in &sets.vendors {
        put(dir, &vendor_file(vendor), articles, &mut written)?;
    }
    put(dir, METADATA_FILE, &sets.metadata, &mut written)?;

    tracing::info!(target: "output", dir = %dir.display(), files = written.len(), "outputs written");
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::article::Article;
    use crate::config::{FeedConfig, FeedDescriptor};
    use crate::partition::partition;
    use chrono::{TimeZone, Utc};
    use std::collections::BTreeMap;

    #[test]
    fn writes_all_documents() {
        let now = Utc.with_ymd_and_hms(2025, 9, 1, 10, 0, 0).unwrap();
        let mut cfg = FeedConfig::default();
        cfg.industry_keywords = BTreeMap::from([("retail".to_string(), vec!["shop".to_string()])]);
        cfg.feeds = BTreeMap::from([(
            "adobe".to_string(),
            vec![FeedDescriptor::new("GN - Adobe", "https://a.test/rss", "adobe")],
        )]);
        let mut a = Article::new("https://a.test/1", "Shop news", now)
            .with_source("Adobe", "adobe")
            .with_score(40);
        a.industries.insert("retail".into());
        a.vendors.insert("adobe".into());

        let sets = partition(&[a], &cfg, now);
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("data");
        let files = write_outputs(&dir, &sets).unwrap();

        let names: Vec<String> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            names,
            vec![
                "main-feed.json",
                "industry-retail.json",
                "vendor-adobe.json",
                "vendor-salesforce.json",
                "metadata.json"
            ]
        );

        let main: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(dir.join(MAIN_FEED_FILE)).unwrap())
                .unwrap();
        let first = &main[0];
        assert_eq!(first["relevance_score"], 40);
        assert_eq!(first["industries"][0], "retail");
        assert!(first.get("vendors").is_none());

        let sf: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(dir.join("vendor-salesforce.json")).unwrap())
                .unwrap();
        assert_eq!(sf, serde_json::json!([]));

        let meta: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(dir.join(METADATA_FILE)).unwrap())
                .unwrap();
        assert_eq!(meta["article_count"], 1);
        assert_eq!(meta["feed_health"]["GN - Adobe"]["status"], "ok");
    }

    #[test]
    fn path_like_industry_label_is_refused() {
        let now = Utc.with_ymd_and_hms(2025, 9, 1, 10, 0, 0).unwrap();
        let cfg = FeedConfig {
            industry_keywords: BTreeMap::from([("../escape".to_string(), vec!["x".to_string()])]),
            ..FeedConfig::default()
        };
        let sets = partition(&[], &cfg, now);
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("data");
        assert!(write_outputs(&dir, &sets).is_err());
        assert!(!dir.exists());
    }
}
