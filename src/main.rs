//! Marketing Kitchen — batch entrypoint.
//! Fetches every configured feed once, runs the pipeline and writes the JSON outputs.
//!
//! See `README.md` for configuration and environment variables.

use anyhow::{Context, Result};
use chrono::Utc;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use marketing_kitchen::config::{load_config_default, RunSettings};
use marketing_kitchen::ingest::{self, http::HttpFetcher};
use marketing_kitchen::metrics::Metrics;
use marketing_kitchen::{output, pipeline};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("marketing_kitchen=info,warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env in local/dev; no-op when absent.
    let _ = dotenvy::dotenv();
    init_tracing();

    let metrics = match Metrics::init() {
        Ok(m) => Some(m),
        Err(e) => {
            tracing::warn!(error = ?e, "metrics recorder not installed");
            None
        }
    };

    let settings = RunSettings::from_env();
    let config = load_config_default().context("loading feed config")?;
    tracing::info!(
        feeds = config.feed_count(),
        data_dir = %settings.data_dir.display(),
        concurrency = settings.fetch.concurrency,
        "starting run"
    );

    let now = Utc::now();
    let fetcher = HttpFetcher::new(settings.fetch.timeout)?;
    let articles = ingest::fetch_all(&fetcher, &config, &settings.fetch, now).await;

    let sets = pipeline::run(articles, &config, now);
    let files = output::write_outputs(&settings.data_dir, &sets)?;
    tracing::info!(
        files = files.len(),
        articles = sets.metadata.article_count,
        main = sets.main.len(),
        "run complete"
    );

    if let (Some(m), Some(path)) = (metrics.as_ref(), settings.metrics_path.as_deref()) {
        if let Err(e) = m.write_to(path) {
            tracing::warn!(error = ?e, "metrics dump failed");
        }
    }
    Ok(())
}
