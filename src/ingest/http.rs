// src/ingest/http.rs
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::time::Duration;

use crate::ingest::types::FeedFetcher;

pub const USER_AGENT: &str =
    "TheMarketingKitchen/1.0 (+https://github.com; news aggregator for internal marketing team)";

/// Plain reqwest fetcher. The client-level timeout backs up the per-feed one.
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .context("building feed http client")?;
        Ok(Self { client })
    }
}

#[async_trait]
impl FeedFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .with_context(|| format!("GET {url}"))?
            .error_for_status()
            .with_context(|| format!("GET {url}"))?;
        resp.text().await.context("feed http .text()")
    }

    fn name(&self) -> &'static str {
        "http"
    }
}
