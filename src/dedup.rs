// src/dedup.rs
//! Two-pass deduplication.
//!
//! 1. Exact: articles sharing an `id` (same canonical URL seen through several
//!    feeds) collapse to the highest-scored one. Ties keep the first seen.
//! 2. Fuzzy: title token sets are compared with Jaccard similarity against the
//!    already accepted articles, in order. The first accepted article above
//!    [`FUZZY_THRESHOLD`] absorbs the newcomer (replaced only on a strictly
//!    higher score). Titles with fewer than [`MIN_FUZZY_TOKENS`] distinct tokens
//!    never take part in the comparison.
//!
//! The fuzzy pass is greedy and order dependent: the same input order always
//! gives the same output.

use once_cell::sync::OnceCell;
use regex::Regex;
use std::collections::{HashMap, HashSet};

use crate::article::Article;

pub const FUZZY_THRESHOLD: f64 = 0.85;
pub const MIN_FUZZY_TOKENS: usize = 3;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DedupStats {
    pub input: usize,
    pub exact_removed: usize,
    pub fuzzy_removed: usize,
}

impl DedupStats {
    pub fn kept(&self) -> usize {
        self.input - self.exact_removed - self.fuzzy_removed
    }
}

pub fn dedup(articles: Vec<Article>) -> Vec<Article> {
    dedup_with_stats(articles).0
}

pub fn dedup_with_stats(articles: Vec<Article>) -> (Vec<Article>, DedupStats) {
    let input = articles.len();
    let exact = dedup_exact(articles);
    let after_exact = exact.len();
    let fuzzy = dedup_fuzzy(exact);
    let stats = DedupStats {
        input,
        exact_removed: input - after_exact,
        fuzzy_removed: after_exact - fuzzy.len(),
    };
    (fuzzy, stats)
}

/// Keep one article per id, in first-seen order of each id.
pub fn dedup_exact(articles: Vec<Article>) -> Vec<Article> {
    let mut slot_of: HashMap<String, usize> = HashMap::with_capacity(articles.len());
    let mut out: Vec<Article> = Vec::with_capacity(articles.len());
    for article in articles {
        match slot_of.get(&article.id) {
            Some(&i) => {
                if article.relevance_score > out[i].relevance_score {
                    out[i] = article;
                }
            }
            None => {
                slot_of.insert(article.id.clone(), out.len());
                out.push(article);
            }
        }
    }
    out
}

/// Greedy near-duplicate collapse on title tokens.
pub fn dedup_fuzzy(articles: Vec<Article>) -> Vec<Article> {
    let mut slots: Vec<(Article, HashSet<String>)> = Vec::with_capacity(articles.len());
    for article in articles {
        let words = title_tokens(&article.title);
        if words.len() < MIN_FUZZY_TOKENS {
            slots.push((article, words));
            continue;
        }

        let hit = slots.iter().position(|(_, existing)| {
            existing.len() >= MIN_FUZZY_TOKENS && jaccard(&words, existing) > FUZZY_THRESHOLD
        });
        match hit {
            Some(i) => {
                if article.relevance_score > slots[i].0.relevance_score {
                    slots[i] = (article, words);
                }
            }
            None => slots.push((article, words)),
        }
    }
    slots.into_iter().map(|(a, _)| a).collect()
}

/// Distinct lower-cased word tokens (`\w+`, Unicode aware).
pub fn title_tokens(title: &str) -> HashSet<String> {
    static RE_WORD: OnceCell<Regex> = OnceCell::new();
    let re = RE_WORD.get_or_init(|| Regex::new(r"(?u)\w+").expect("word regex"));
    let lower = title.to_lowercase();
    re.find_iter(&lower).map(|m| m.as_str().to_string()).collect()
}

/// |A ∩ B| / |A ∪ B|; two empty sets are 0.0.
pub fn jaccard(a: &HashSet<String>, b: &HashSet<String>) -> f64 {
    let inter = a.intersection(b).count();
    let union = a.len() + b.len() - inter;
    if union == 0 {
        return 0.0;
    }
    inter as f64 / union as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn art(url: &str, title: &str, score: u8) -> Article {
        let t = Utc.with_ymd_and_hms(2025, 5, 1, 8, 0, 0).unwrap();
        Article::new(url, title, t).with_score(score)
    }

    fn toks(s: &str) -> HashSet<String> {
        title_tokens(s)
    }

    #[test]
    fn tokens_split_on_non_word_chars() {
        let t = toks("Salesforce launches Agentforce 3.0!");
        let mut v: Vec<_> = t.into_iter().collect();
        v.sort();
        assert_eq!(v, vec!["0", "3", "agentforce", "launches", "salesforce"]);
        assert_eq!(toks("Hello hello HELLO").len(), 1);
    }

    #[test]
    fn jaccard_edges() {
        assert_eq!(jaccard(&HashSet::new(), &HashSet::new()), 0.0);
        assert_eq!(jaccard(&toks("a b c"), &toks("a b c")), 1.0);
        assert!((jaccard(&toks("a b c d"), &toks("a b c e")) - 0.6).abs() < 1e-9);
    }

    #[test]
    fn exact_keeps_highest_score_in_first_slot() {
        let out = dedup_exact(vec![
            art("https://a", "first", 25),
            art("https://b", "other", 30),
            art("https://a", "second", 40),
            art("https://a", "third", 40),
        ]);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].title, "second");
        assert_eq!(out[1].title, "other");
    }

    #[test]
    fn fuzzy_replaces_on_strictly_higher_score_only() {
        let base = "Adobe launches new generative AI tools for marketers today";
        let near = "Adobe launches new generative AI tools for marketers";
        // 8 shared / 9 total ≈ 0.89
        assert!(jaccard(&toks(base), &toks(near)) > FUZZY_THRESHOLD);

        let kept = dedup_fuzzy(vec![art("https://1", base, 30), art("https://2", near, 30)]);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].url, "https://1");

        let kept = dedup_fuzzy(vec![art("https://1", base, 30), art("https://2", near, 31)]);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].url, "https://2");
    }

    #[test]
    fn short_titles_are_never_compared() {
        let kept = dedup_fuzzy(vec![
            art("https://1", "Adobe Summit", 10),
            art("https://2", "Adobe Summit", 90),
            art("https://3", "adobe, summit!", 50),
        ]);
        assert_eq!(kept.len(), 3);
    }

    #[test]
    fn first_match_wins_not_best_match() {
        // c is above threshold against both a and b; it must merge into a (first slot).
        let a = "one two three four five six seven eight nine ten";
        let b = "one two three four five six seven eight nine eleven";
        let c = "one two three four five six seven eight nine ten eleven";
        assert!(jaccard(&toks(a), &toks(b)) <= FUZZY_THRESHOLD);
        assert!(jaccard(&toks(c), &toks(a)) > FUZZY_THRESHOLD);
        assert!(jaccard(&toks(c), &toks(b)) > FUZZY_THRESHOLD);

        let kept = dedup_fuzzy(vec![
            art("https://a", a, 10),
            art("https://b", b, 10),
            art("https://c", c, 99),
        ]);
        let urls: Vec<_> = kept.iter().map(|x| x.url.as_str()).collect();
        assert_eq!(urls, vec!["https://c", "https://b"]);
    }

    #[test]
    fn stats_count_each_pass() {
        let (out, stats) = dedup_with_stats(vec![
            art("https://a", "Marketing budgets shrink in second quarter", 20),
            art("https://a", "Marketing budgets shrink in second quarter", 10),
            art("https://b", "Marketing budgets shrink in the second quarter", 30),
            art("https://c", "Completely unrelated headline about retail", 15),
        ]);
        assert_eq!(out.len(), 2);
        assert_eq!(
            stats,
            DedupStats {
                input: 4,
                exact_removed: 1,
                fuzzy_removed: 1
            }
        );
        assert_eq!(stats.kept(), 2);
        assert_eq!(out[0].url, "https://b");
    }
}
