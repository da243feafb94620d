// src/ingest/providers/rss.rs
//! RSS 2.0 (`rss/channel/item`) and RSS 1.0 / RDF (`rdf:RDF/item`).

use anyhow::{Context, Result};
use quick_xml::de::from_str;
use serde::Deserialize;

use crate::ingest::types::{MediaRef, RawEntry};

#[derive(Debug, Deserialize)]
struct Rss {
    #[serde(default)]
    channel: Option<Channel>,
    // RDF puts items next to the channel, not inside it
    #[serde(default, rename = "item")]
    item: Vec<Item>,
}

#[derive(Debug, Default, Deserialize)]
struct Channel {
    #[serde(default, rename = "item")]
    item: Vec<Item>,
}

// Element names arrive without their namespace prefix; the aliases cover
// deserializers that keep it.
#[derive(Debug, Deserialize)]
struct Item {
    title: Option<String>,
    link: Option<String>,
    #[serde(rename = "pubDate")]
    pub_date: Option<String>,
    #[serde(rename = "date", alias = "dc:date")]
    dc_date: Option<String>,
    description: Option<String>,
    #[serde(rename = "encoded", alias = "content:encoded")]
    content_encoded: Option<String>,
    #[serde(default)]
    category: Vec<Category>,
    #[serde(default)]
    enclosure: Vec<Enclosure>,
    #[serde(default, rename = "content", alias = "media:content")]
    media_content: Vec<MediaContent>,
    #[serde(default, rename = "thumbnail", alias = "media:thumbnail")]
    media_thumbnail: Vec<MediaThumbnail>,
}

#[derive(Debug, Deserialize)]
struct Category {
    #[serde(rename = "$text", default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Enclosure {
    #[serde(rename = "@url", default)]
    url: Option<String>,
    #[serde(rename = "@type", default)]
    mime: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct MediaContent {
    #[serde(rename = "@url", default)]
    pub(super) url: Option<String>,
    #[serde(rename = "@type", default)]
    pub(super) mime: Option<String>,
    #[serde(rename = "@medium", default)]
    pub(super) medium: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct MediaThumbnail {
    #[serde(rename = "@url", default)]
    pub(super) url: Option<String>,
}

pub(super) fn media_refs(items: Vec<MediaContent>) -> Vec<MediaRef> {
    items
        .into_iter()
        .map(|m| MediaRef {
            url: m.url.unwrap_or_default(),
            mime: m.mime,
            medium: m.medium,
        })
        .collect()
}

pub(super) fn thumbnail_urls(items: Vec<MediaThumbnail>) -> Vec<String> {
    items
        .into_iter()
        .map(|t| t.url.unwrap_or_default())
        .collect()
}

pub fn parse_rss(xml: &str) -> Result<Vec<RawEntry>> {
    let rss: Rss = from_str(xml).context("parsing rss xml")?;
    let mut items = rss.channel.map(|c| c.item).unwrap_or_default();
    items.extend(rss.item);

    Ok(items
        .into_iter()
        .map(|it| RawEntry {
            title: it.title,
            link: it.link,
            published: it.pub_date.or(it.dc_date),
            updated: None,
            summary: it.description,
            content: it.content_encoded,
            media: media_refs(it.media_content),
            thumbnails: thumbnail_urls(it.media_thumbnail),
            enclosures: it
                .enclosure
                .into_iter()
                .map(|e| MediaRef {
                    url: e.url.unwrap_or_default(),
                    mime: e.mime,
                    medium: None,
                })
                .collect(),
            tags: it.category.into_iter().filter_map(|c| c.text).collect(),
        })
        .collect())
}
