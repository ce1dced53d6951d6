use rss::{Channel, Item};

use super::{content, fix_entities, required};
use crate::app::Result;
use crate::domain::{FeedMeta, Record};

pub(super) fn normalize(channel: &Channel) -> Result<(FeedMeta, Vec<Record>)> {
    let meta = FeedMeta {
        title: required(Some(channel.title()), "feed title")?,
        subtitle: Some(channel.description())
            .filter(|d| !d.trim().is_empty())
            .map(fix_entities),
        image_url: channel.image().map(|image| image.url().to_string()),
    };

    let records = channel
        .items()
        .iter()
        .map(normalize_item)
        .collect::<Result<Vec<_>>>()?;

    Ok((meta, records))
}

fn normalize_item(item: &Item) -> Result<Record> {
    Ok(Record {
        title: required(item.title(), "title")?,
        // Kept verbatim: the text is the cache key.
        date: required(item.pub_date(), "date")?,
        link: required(item.link(), "link")?,
        image_link: image_link(item),
        content: content(item.description().or(item.content())),
    })
}

/// First `media:content` URL, then `media:thumbnail`, then the enclosure.
/// `None` when the item carries no attachment at all.
fn image_link(item: &Item) -> Option<String> {
    let media = item.extensions().get("media");
    let first_url = |name: &str| {
        media
            .and_then(|m| m.get(name))
            .and_then(|list| list.iter().find_map(|ext| ext.attrs().get("url")))
            .cloned()
    };

    first_url("content")
        .or_else(|| first_url("thumbnail"))
        .or_else(|| item.enclosure().map(|e| e.url().to_string()))
}
