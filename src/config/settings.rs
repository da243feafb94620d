// src/config/settings.rs
use std::path::PathBuf;
use std::time::Duration;

pub const ENV_DATA_DIR: &str = "KITCHEN_DATA_DIR";
pub const ENV_FETCH_CONCURRENCY: &str = "KITCHEN_FETCH_CONCURRENCY";
pub const ENV_FETCH_TIMEOUT_SECS: &str = "KITCHEN_FETCH_TIMEOUT_SECS";
pub const ENV_METRICS_PATH: &str = "KITCHEN_METRICS_PATH";

pub const DEFAULT_DATA_DIR: &str = "data";
pub const DEFAULT_FETCH_CONCURRENCY: usize = 8;
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 15;
pub const MAX_ARTICLES_PER_FEED: usize = 30;
pub const MAX_ARTICLE_AGE_DAYS: i64 = 7;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchSettings {
    pub concurrency: usize,
    pub timeout: Duration,
    pub max_articles_per_feed: usize,
    pub max_article_age: chrono::Duration,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_FETCH_CONCURRENCY,
            timeout: Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS),
            max_articles_per_feed: MAX_ARTICLES_PER_FEED,
            max_article_age: chrono::Duration::days(MAX_ARTICLE_AGE_DAYS),
        }
    }
}

/// Settings for one batch run (call `dotenvy::dotenv()` first to pick up `.env`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSettings {
    pub data_dir: PathBuf,
    pub metrics_path: Option<PathBuf>,
    pub fetch: FetchSettings,
}

impl Default for RunSettings {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            metrics_path: None,
            fetch: FetchSettings::default(),
        }
    }
}

impl RunSettings {
    pub fn from_env() -> Self {
        let mut s = Self::default();
        if let Some(dir) = non_empty(std::env::var(ENV_DATA_DIR).ok()) {
            s.data_dir = PathBuf::from(dir);
        }
        s.metrics_path = non_empty(std::env::var(ENV_METRICS_PATH).ok()).map(PathBuf::from);
        if let Some(n) = parse_positive_env(std::env::var(ENV_FETCH_CONCURRENCY).ok()) {
            s.fetch.concurrency = n as usize;
        }
        if let Some(secs) = parse_positive_env(std::env::var(ENV_FETCH_TIMEOUT_SECS).ok()) {
            s.fetch.timeout = Duration::from_secs(secs);
        }
        s
    }
}

fn non_empty(raw: Option<String>) -> Option<String> {
    raw.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

// parse optional positive integer env; zero or garbage falls back to the default
fn parse_positive_env(raw: Option<String>) -> Option<u64> {
    raw.and_then(|s| s.trim().parse::<u64>().ok())
        .filter(|v| *v > 0)
}
