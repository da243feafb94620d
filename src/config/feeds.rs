// src/config/feeds.rs
use anyhow::{anyhow, bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use super::weights::ScoringWeights;

pub const ENV_FEED_CONFIG_PATH: &str = "FEED_CONFIG_PATH";
const DEFAULT_TOML_PATH: &str = "config/feed_config.toml";
const DEFAULT_JSON_PATH: &str = "config/feed_config.json";

/// Prefix used by grouped aggregator feeds ("GN - Adobe Experience Cloud").
pub const GROUP_PREFIX: &str = "GN - ";

/// Feed name as it appears in `Article::source`.
pub fn strip_group_prefix(name: &str) -> String {
    name.replace(GROUP_PREFIX, "")
}

/// Industry labels become file names (`industry-<label>.json`): `[a-z0-9_-]+` only.
pub fn is_valid_label(label: &str) -> bool {
    !label.is_empty()
        && label
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'_' || b == b'-')
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelevanceKeywords {
    pub high_weight: Vec<String>,
    pub medium_weight: Vec<String>,
    pub low_weight: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedDescriptor {
    pub name: String,
    pub url: String,
    pub category: String,
}

impl FeedDescriptor {
    pub fn new(name: &str, url: &str, category: &str) -> Self {
        Self {
            name: name.to_string(),
            url: url.to_string(),
            category: category.to_string(),
        }
    }

    pub fn display_name(&self) -> String {
        strip_group_prefix(&self.name)
    }
}

/// Immutable run configuration. Maps are ordered so runs are reproducible.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    pub relevance_keywords: RelevanceKeywords,
    pub industry_keywords: BTreeMap<String, Vec<String>>,
    pub vendor_keywords: BTreeMap<String, Vec<String>>,
    pub feeds: BTreeMap<String, Vec<FeedDescriptor>>,
    pub scoring: ScoringWeights,
}

impl FeedConfig {
    /// Parse from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let cfg: FeedConfig = toml::from_str(s).context("parsing feed config toml")?;
        cfg.cleaned()
    }

    /// Parse from a JSON string (the layout the static site repo ships).
    pub fn from_json_str(s: &str) -> Result<Self> {
        let cfg: FeedConfig = serde_json::from_str(s).context("parsing feed config json")?;
        cfg.cleaned()
    }

    /// All feed descriptors in group order.
    pub fn all_feeds(&self) -> impl Iterator<Item = &FeedDescriptor> {
        self.feeds.values().flatten()
    }

    pub fn feed_count(&self) -> usize {
        self.feeds.values().map(Vec::len).sum()
    }

    fn cleaned(mut self) -> Result<Self> {
        if let Some(bad) = self.industry_keywords.keys().find(|l| !is_valid_label(l)) {
            bail!("industry label {bad:?} must match [a-z0-9_-]+");
        }
        let tiers = &mut self.relevance_keywords;
        for tier in [
            &mut tiers.high_weight,
            &mut tiers.medium_weight,
            &mut tiers.low_weight,
        ] {
            clean_keywords(tier);
        }
        for kws in self.industry_keywords.values_mut() {
            clean_keywords(kws);
        }
        for kws in self.vendor_keywords.values_mut() {
            clean_keywords(kws);
        }
        self.scoring.sanitize();
        Ok(self)
    }
}

/// Trim keywords and drop empty ones (an empty keyword would match every article).
/// Order is kept: classification short-circuits on the first hit.
fn clean_keywords(items: &mut Vec<String>) {
    let before = items.len();
    items.retain_mut(|k| {
        let t = k.trim();
        if t.len() != k.len() {
            *k = t.to_string();
        }
        !k.is_empty()
    });
    if items.len() != before {
        tracing::warn!(
            target: "config",
            dropped = before - items.len(),
            "empty keywords dropped from feed config"
        );
    }
}

/// Load the feed config from an explicit path. Supports TOML or JSON formats.
pub fn load_config_from(path: &Path) -> Result<FeedConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("reading feed config from {}", path.display()))?;
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();
    parse_config(&content, ext.as_str())
        .with_context(|| format!("feed config at {}", path.display()))
}

/// Load the feed config using env var + fallbacks:
/// 1) $FEED_CONFIG_PATH
/// 2) config/feed_config.toml
/// 3) config/feed_config.json
pub fn load_config_default() -> Result<FeedConfig> {
    if let Ok(p) = std::env::var(ENV_FEED_CONFIG_PATH) {
        let pb = PathBuf::from(p);
        if pb.exists() {
            return load_config_from(&pb);
        }
        return Err(anyhow!("FEED_CONFIG_PATH points to non-existent path"));
    }
    for candidate in [DEFAULT_TOML_PATH, DEFAULT_JSON_PATH] {
        let pb = PathBuf::from(candidate);
        if pb.exists() {
            return load_config_from(&pb);
        }
    }
    Err(anyhow!(
        "no feed config found (set {ENV_FEED_CONFIG_PATH} or create {DEFAULT_TOML_PATH})"
    ))
}

fn parse_config(s: &str, hint_ext: &str) -> Result<FeedConfig> {
    match hint_ext {
        "toml" => FeedConfig::from_toml_str(s),
        "json" => FeedConfig::from_json_str(s),
        // No usable extension: JSON documents start with an object brace.
        _ if s.trim_start().starts_with('{') => FeedConfig::from_json_str(s),
        _ => FeedConfig::from_toml_str(s),
    }
}
