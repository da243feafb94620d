// src/config/mod.rs
//! Feed configuration (keyword tiers, industry/vendor maps, feed groups, scoring
//! weights) and per-run settings read from the environment.

pub mod feeds;
pub mod settings;
pub mod weights;

pub use feeds::{
    is_valid_label, load_config_default, load_config_from, strip_group_prefix, FeedConfig, FeedDescriptor,
    RelevanceKeywords, GROUP_PREFIX,
};
pub use settings::{FetchSettings, RunSettings};
pub use weights::{RecencyStep, ScoringWeights, TierWeights};
