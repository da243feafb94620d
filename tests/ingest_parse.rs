// tests/ingest_parse.rs
use chrono::{TimeZone, Utc};
use marketing_kitchen::config::FeedDescriptor;
use marketing_kitchen::ingest::normalize_entry;
use marketing_kitchen::ingest::providers::parse_feed;

const RSS: &str = include_str!("fixtures/marketing_rss.xml");
const ATOM: &str = include_str!("fixtures/atom.xml");
const RDF: &str = include_str!("fixtures/rdf.xml");

#[test]
fn rss_items_are_extracted() {
    let entries = parse_feed(RSS).expect("rss parses");
    assert_eq!(entries.len(), 5);

    let first = &entries[0];
    assert_eq!(
        first.title.as_deref(),
        Some("Salesforce launches Agentforce for retail brands")
    );
    assert_eq!(first.link.as_deref(), Some("https://news.test/agentforce-retail"));
    assert_eq!(first.published.as_deref(), Some("Mon, 01 Sep 2025 08:00:00 GMT"));
    assert_eq!(first.tags, vec!["AI".to_string(), "CRM".to_string()]);
    assert_eq!(first.media.len(), 1);
    assert_eq!(first.media[0].url, "https://img.test/agentforce.jpg");

    let bank = &entries[2];
    assert_eq!(bank.published.as_deref(), Some("2025-08-31T12:00:00Z"));
    assert!(bank.summary.is_none());
    assert!(bank.content.as_deref().unwrap_or_default().contains("<em>bank</em>"));
    assert_eq!(bank.enclosures[0].mime.as_deref(), Some("image/png"));

    assert!(entries[4].link.is_none());
}

#[test]
fn atom_entries_use_alternate_link() {
    let entries = parse_feed(ATOM).expect("atom parses");
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].link.as_deref(), Some("https://blog.test/firefly"));
    assert_eq!(entries[0].tags, vec!["AI".to_string()]);
    assert_eq!(entries[0].thumbnails, vec!["https://img.test/firefly-thumb.jpg".to_string()]);
    assert_eq!(entries[1].link.as_deref(), Some("https://blog.test/experience-cloud"));
    assert_eq!(entries[1].published.as_deref(), Some("2025-08-30T10:00:00+02:00"));
    assert!(entries[1]
        .content
        .as_deref()
        .unwrap_or_default()
        .contains("Long form body."));
}

#[test]
fn rdf_items_sit_beside_the_channel() {
    let entries = parse_feed(RDF).expect("rdf parses");
    assert_eq!(entries.len(), 1);
    assert_eq!(
        entries[0].title.as_deref(),
        Some("Retail shopper trends & the omnichannel shift")
    );
    assert_eq!(entries[0].published.as_deref(), Some("2025-09-01T06:30:00Z"));
}

#[test]
fn normalized_rss_article_is_clean() {
    let now = Utc.with_ymd_and_hms(2025, 9, 1, 10, 0, 0).unwrap();
    let feed = FeedDescriptor::new("GN - Salesforce", "https://feeds.test/sf.rss", "salesforce");
    let entries = parse_feed(RSS).unwrap();

    let a = normalize_entry(&entries[0], &feed, now).expect("has link and title");
    assert_eq!(a.source, "Salesforce");
    assert_eq!(a.published, "2025-09-01T08:00:00+00:00");
    assert_eq!(a.summary, "The new CRM agents help shopper campaigns scale.");
    assert_eq!(a.image_url.as_deref(), Some("https://img.test/agentforce.jpg"));

    let bank = normalize_entry(&entries[2], &feed, now).unwrap();
    assert_eq!(bank.summary, "Numbers for the bank sector.");
    assert_eq!(bank.image_url.as_deref(), Some("https://img.test/bank.png"));

    assert!(normalize_entry(&entries[4], &feed, now).is_none());
}

#[test]
fn garbage_is_an_error_not_a_panic() {
    assert!(parse_feed("<rss><channel><item><title>unterminated").is_err());
    assert!(parse_feed("{\"not\": \"xml\"}").is_err());
}
