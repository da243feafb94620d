// src/lib.rs
// Public library surface for the binary and integration tests.

pub mod article;
pub mod config;
pub mod metrics;

// Core: score, classify, dedup, partition
pub mod classify;
pub mod dedup;
pub mod partition;
pub mod pipeline;
pub mod scoring;

// I/O around the core
pub mod ingest;
pub mod output;

// ---- Re-exports for stable public API ----
pub use crate::article::Article;
pub use crate::config::{load_config_default, load_config_from, FeedConfig, RunSettings};
pub use crate::dedup::{dedup, DedupStats};
pub use crate::partition::{partition, Metadata, OutputSets};
pub use crate::pipeline::run;
pub use crate::scoring::{score, Relevance};
