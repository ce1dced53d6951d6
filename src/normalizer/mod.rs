mod atom;
mod channel;

use scraper::Html;

use crate::app::{Result, RssReaderError};
use crate::domain::{FeedMeta, Record};

#[derive(Clone)]
pub struct Normalizer;

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Normalizer {
    pub fn new() -> Self {
        Self
    }

    /// Parse a feed document into its metadata and one record per entry, in
    /// feed order. Any entry lacking a required field fails the whole feed.
    ///
    /// RSS is read with the `rss` crate so publication dates keep the exact
    /// text the feed published; anything else (Atom, JSON Feed) goes through
    /// feed-rs.
    pub fn normalize(&self, body: &[u8]) -> Result<(FeedMeta, Vec<Record>)> {
        match rss::Channel::read_from(body) {
            Ok(rss_channel) => channel::normalize(&rss_channel),
            Err(e) => {
                tracing::debug!(error = %e, "Not an RSS channel, trying feed-rs");
                atom::normalize(body)
            }
        }
    }
}

/// Entity-fixed `value`, or `MissingField` when it is absent or blank.
fn required(value: Option<&str>, field: &'static str) -> Result<String> {
    value
        .map(fix_entities)
        .filter(|v| !v.trim().is_empty())
        .ok_or(RssReaderError::MissingField { field })
}

/// Record content: markup stripped, entities fixed.
fn content(summary: Option<&str>) -> String {
    fix_entities(&strip_html(summary.unwrap_or_default()))
}

/// Decode the two entities feeds commonly leave double-escaped.
pub fn fix_entities(text: &str) -> String {
    text.replace("&#39;", "'").replace("&amp;", "&")
}

/// Drop all markup and concatenate the text runs.
pub fn strip_html(html: &str) -> String {
    Html::parse_fragment(html).root_element().text().collect()
}
