// src/ingest/types.rs
use anyhow::Result;

/// One feed entry as parsed, before normalization. Text fields are raw (may hold HTML).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawEntry {
    pub title: Option<String>,
    pub link: Option<String>,
    pub published: Option<String>,
    pub updated: Option<String>,
    pub summary: Option<String>,
    pub content: Option<String>,
    pub media: Vec<MediaRef>,
    pub thumbnails: Vec<String>,
    pub enclosures: Vec<MediaRef>,
    pub tags: Vec<String>,
}

/// `media:content` or `<enclosure>` reference.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MediaRef {
    pub url: String,
    pub mime: Option<String>,
    pub medium: Option<String>,
}

/// Source of raw feed documents (HTTP in production, fixtures in tests).
#[async_trait::async_trait]
pub trait FeedFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String>;
    fn name(&self) -> &'static str;
}
