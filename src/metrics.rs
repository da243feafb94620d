// src/metrics.rs
use anyhow::{Context, Result};
use metrics::{describe_counter, describe_gauge, describe_histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;
use std::path::Path;

/// One-time metrics registration (so series show up in the rendered output).
pub fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!(
            "news_fetch_errors_total",
            "Feeds that failed to fetch, timed out or did not parse."
        );
        describe_counter!(
            "news_articles_raw_total",
            "Normalized articles handed to the pipeline."
        );
        describe_counter!(
            "news_dedup_exact_total",
            "Articles removed as same-URL duplicates."
        );
        describe_counter!(
            "news_dedup_fuzzy_total",
            "Articles removed as near-identical titles."
        );
        describe_counter!(
            "news_articles_kept_total",
            "Articles surviving deduplication."
        );
        describe_histogram!("news_parse_ms", "Feed parse time in milliseconds.");
        describe_gauge!(
            "news_pipeline_last_run_ts",
            "Unix ts when the pipeline last ran."
        );
    });
}

pub struct Metrics {
    pub handle: PrometheusHandle,
}

impl Metrics {
    /// Install the Prometheus recorder for this process.
    pub fn init() -> Result<Self> {
        let handle = PrometheusBuilder::new()
            .install_recorder()
            .context("prometheus: install recorder")?;
        ensure_metrics_described();
        Ok(Self { handle })
    }

    pub fn render(&self) -> String {
        self.handle.render()
    }

    /// Dump the exposition text for a node-exporter textfile collector.
    pub fn write_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        std::fs::write(path, self.render())
            .with_context(|| format!("writing metrics to {}", path.display()))
    }
}
