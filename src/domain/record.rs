use serde::{Deserialize, Serialize};

/// One normalized feed entry.
///
/// `image_link` is `None` when the entry has no media attachment. Renderers
/// branch on that instead of treating it as empty text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Record {
    pub title: String,
    pub date: String,
    pub link: String,
    pub image_link: Option<String>,
    pub content: String,
}

/// A row replayed from the cache. Date is the lookup key and the image link
/// is never cached, so neither is carried here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedNews {
    pub title: String,
    pub link: String,
    pub content: String,
}

impl From<&Record> for CachedNews {
    fn from(record: &Record) -> Self {
        Self {
            title: record.title.clone(),
            link: record.link.clone(),
            content: record.content.clone(),
        }
    }
}
