// src/classify.rs
//! Industry / vendor classification by keyword containment.

use std::collections::{BTreeMap, BTreeSet};

use crate::article::Article;
use crate::config::FeedConfig;

/// Labels whose keyword list has at least one substring hit in `text`.
/// `text` must already be lower-cased.
pub fn classify_text(text: &str, keyword_map: &BTreeMap<String, Vec<String>>) -> BTreeSet<String> {
    keyword_map
        .iter()
        .filter(|(_, keywords)| keywords.iter().any(|kw| text.contains(&kw.to_lowercase())))
        .map(|(label, _)| label.clone())
        .collect()
}

pub fn classify(article: &Article, keyword_map: &BTreeMap<String, Vec<String>>) -> BTreeSet<String> {
    classify_text(&article.search_text(), keyword_map)
}

/// Assign industries and vendors in place.
pub fn classify_article(article: &mut Article, config: &FeedConfig) {
    let text = article.search_text();
    article.industries = classify_text(&text, &config.industry_keywords);
    article.vendors = classify_text(&text, &config.vendor_keywords);
}
