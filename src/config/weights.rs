// src/config/weights.rs
use serde::{Deserialize, Serialize};

/// Points a keyword earns depending on where it was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierWeights {
    pub title: u32,
    pub summary: u32,
}

impl TierWeights {
    pub const fn new(title: u32, summary: u32) -> Self {
        Self { title, summary }
    }
}

/// Recency bonus applied when an article is younger than `max_age_hours`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecencyStep {
    pub max_age_hours: u32,
    pub bonus: u32,
}

/// Optional `[scoring]` section. Every field falls back to the stock weights.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    pub high: TierWeights,
    pub medium: TierWeights,
    pub low: TierWeights,
    /// Checked in order; the first step whose age limit is not reached wins.
    pub recency: Vec<RecencyStep>,
    pub min_score: u32,
    pub max_score: u32,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            high: TierWeights::new(45, 15),
            medium: TierWeights::new(24, 8),
            low: TierWeights::new(9, 3),
            recency: vec![
                RecencyStep {
                    max_age_hours: 6,
                    bonus: 15,
                },
                RecencyStep {
                    max_age_hours: 12,
                    bonus: 10,
                },
                RecencyStep {
                    max_age_hours: 24,
                    bonus: 5,
                },
            ],
            min_score: 10,
            max_score: 100,
        }
    }
}

pub const SCORE_FLOOR: u32 = 10;
pub const SCORE_CEILING: u32 = 100;

impl ScoringWeights {
    /// Configured bounds forced into `SCORE_FLOOR..=SCORE_CEILING`, min never above max.
    pub fn bounds(&self) -> (u32, u32) {
        let min = self.min_score.clamp(SCORE_FLOOR, SCORE_CEILING);
        let max = self.max_score.clamp(min, SCORE_CEILING);
        (min, max)
    }

    /// Normalize a `[scoring]` section read from a config file.
    pub(crate) fn sanitize(&mut self) {
        let (min, max) = self.bounds();
        if (min, max) != (self.min_score, self.max_score) {
            tracing::warn!(
                target: "config",
                min_score = self.min_score,
                max_score = self.max_score,
                min,
                max,
                "score bounds clamped"
            );
        }
        self.min_score = min;
        self.max_score = max;

        // a title hit must always outweigh the same hit in the summary
        let stock = ScoringWeights::default();
        for (name, tier, fallback) in [
            ("high", &mut self.high, stock.high),
            ("medium", &mut self.medium, stock.medium),
            ("low", &mut self.low, stock.low),
        ] {
            if tier.title <= tier.summary {
                tracing::warn!(
                    target: "config",
                    tier = name,
                    title = tier.title,
                    summary = tier.summary,
                    "title weight must exceed summary weight; using stock weights"
                );
                *tier = fallback;
            }
        }

        self.recency.sort_by_key(|s| s.max_age_hours);
    }
}
