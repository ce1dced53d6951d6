use feed_rs::model::Entry;
use feed_rs::parser;

use super::{content, fix_entities, required};
use crate::app::{Result, RssReaderError};
use crate::domain::{FeedMeta, Record};

pub(super) fn normalize(body: &[u8]) -> Result<(FeedMeta, Vec<Record>)> {
    let feed = parser::parse(body).map_err(|e| RssReaderError::FeedParse(e.to_string()))?;

    let meta = FeedMeta {
        title: required(feed.title.as_ref().map(|t| t.content.as_str()), "feed title")?,
        subtitle: feed.description.map(|d| fix_entities(&d.content)),
        image_url: feed.logo.or(feed.icon).map(|image| image.uri),
    };

    let records = feed
        .entries
        .iter()
        .map(normalize_entry)
        .collect::<Result<Vec<_>>>()?;

    Ok((meta, records))
}

fn normalize_entry(entry: &Entry) -> Result<Record> {
    // feed-rs only keeps parsed timestamps; RFC 3339 is what Atom carries.
    let date = entry.published.or(entry.updated).map(|dt| dt.to_rfc3339());

    let summary = entry
        .summary
        .as_ref()
        .map(|s| s.content.as_str())
        .or_else(|| entry.content.as_ref().and_then(|c| c.body.as_deref()));

    Ok(Record {
        title: required(entry.title.as_ref().map(|t| t.content.as_str()), "title")?,
        date: required(date.as_deref(), "date")?,
        link: required(entry.links.first().map(|l| l.href.as_str()), "link")?,
        image_link: image_link(entry),
        content: content(summary),
    })
}

/// URL of the entry's first media attachment. `None` when the entry has no
/// media at all.
fn image_link(entry: &Entry) -> Option<String> {
    let media = entry.media.first()?;
    media
        .content
        .first()
        .and_then(|c| c.url.as_ref())
        .map(|url| url.to_string())
        .or_else(|| media.thumbnails.first().map(|t| t.image.uri.clone()))
}
