// src/ingest/providers/atom.rs
use anyhow::{Context, Result};
use quick_xml::de::from_str;
use serde::Deserialize;

use super::rss::{thumbnail_urls, MediaThumbnail};
use crate::ingest::types::{MediaRef, RawEntry};

#[derive(Debug, Deserialize)]
struct Feed {
    #[serde(default, rename = "entry")]
    entry: Vec<Entry>,
}

#[derive(Debug, Deserialize)]
struct Entry {
    title: Option<TextNode>,
    #[serde(default)]
    link: Vec<Link>,
    published: Option<String>,
    updated: Option<String>,
    summary: Option<TextNode>,
    // <content> and <media:content> share a local name
    #[serde(default)]
    content: Vec<ContentNode>,
    #[serde(default)]
    category: Vec<Category>,
    #[serde(default, rename = "thumbnail", alias = "media:thumbnail")]
    media_thumbnail: Vec<MediaThumbnail>,
}

/// Atom text constructs carry a `type` attribute next to the text.
#[derive(Debug, Deserialize)]
struct TextNode {
    #[serde(rename = "$text", default)]
    value: String,
}

#[derive(Debug, Deserialize)]
struct ContentNode {
    #[serde(rename = "$text", default)]
    value: Option<String>,
    #[serde(rename = "@url", default)]
    url: Option<String>,
    #[serde(rename = "@type", default)]
    mime: Option<String>,
    #[serde(rename = "@medium", default)]
    medium: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Link {
    #[serde(rename = "@href", default)]
    href: Option<String>,
    #[serde(rename = "@rel", default)]
    rel: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Category {
    #[serde(rename = "@term", default)]
    term: Option<String>,
}

/// The entry's own page: `rel="alternate"` or no rel at all.
fn alternate_link(links: &[Link]) -> Option<String> {
    links
        .iter()
        .find(|l| matches!(l.rel.as_deref(), None | Some("alternate")))
        .or_else(|| links.first())
        .and_then(|l| l.href.clone())
}

/// Text body first, then anything carrying a url as media.
fn split_content(nodes: Vec<ContentNode>) -> (Option<String>, Vec<MediaRef>) {
    let mut text = None;
    let mut media = Vec::new();
    for node in nodes {
        match node.url {
            Some(url) => media.push(MediaRef {
                url,
                mime: node.mime,
                medium: node.medium,
            }),
            None if text.is_none() => text = node.value.filter(|v| !v.trim().is_empty()),
            None => {}
        }
    }
    (text, media)
}

pub fn parse_atom(xml: &str) -> Result<Vec<RawEntry>> {
    let feed: Feed = from_str(xml).context("parsing atom xml")?;
    Ok(feed
        .entry
        .into_iter()
        .map(|e| {
            let (content, media) = split_content(e.content);
            RawEntry {
                link: alternate_link(&e.link),
                title: e.title.map(|t| t.value),
                published: e.published,
                updated: e.updated,
                summary: e.summary.map(|t| t.value),
                content,
                media,
                thumbnails: thumbnail_urls(e.media_thumbnail),
                enclosures: Vec::new(),
                tags: e.category.into_iter().filter_map(|c| c.term).collect(),
            }
        })
        .collect())
}
