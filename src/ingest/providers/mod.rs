// src/ingest/providers/mod.rs
pub mod atom;
pub mod rss;

use anyhow::{bail, Result};
use metrics::histogram;
use quick_xml::events::Event;
use quick_xml::Reader;

use crate::ingest::types::RawEntry;

/// Parse an RSS 2.0, RSS 1.0 (RDF) or Atom document into raw entries.
pub fn parse_feed(xml: &str) -> Result<Vec<RawEntry>> {
    let t0 = std::time::Instant::now();
    let xml_clean = scrub_html_entities_for_xml(xml);

    let entries = match root_element(&xml_clean).as_deref() {
        Some("rss") | Some("RDF") => rss::parse_rss(&xml_clean)?,
        Some("feed") => atom::parse_atom(&xml_clean)?,
        Some(other) => bail!("unsupported feed root element <{other}>"),
        None => bail!("document has no root element"),
    };

    let ms = t0.elapsed().as_secs_f64() * 1_000.0;
    histogram!("news_parse_ms").record(ms);
    Ok(entries)
}

/// Local name of the first element ("rss", "RDF", "feed").
fn root_element(xml: &str) -> Option<String> {
    let mut reader = Reader::from_str(xml);
    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) => {
                return Some(String::from_utf8_lossy(e.local_name().as_ref()).into_owned());
            }
            Ok(Event::Eof) | Err(_) => return None,
            Ok(_) => {}
        }
    }
}

/// HTML entities that feeds leak into XML without declaring them.
fn scrub_html_entities_for_xml(s: &str) -> String {
    s.replace("&nbsp;", " ")
        .replace("&ndash;", "-")
        .replace("&mdash;", "-")
        .replace("&ldquo;", "\"")
        .replace("&rdquo;", "\"")
        .replace("&lsquo;", "'")
        .replace("&rsquo;", "'")
        .replace("&hellip;", "...")
        .replace("&copy;", "(c)")
        .replace("&reg;", "(R)")
        .replace("&trade;", "(TM)")
}
