use serde::Serialize;

use super::Record;

/// Channel-level data of a fetched feed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FeedMeta {
    pub title: String,
    pub subtitle: Option<String>,
    pub image_url: Option<String>,
}

/// A feed with the records that are going to be rendered.
#[derive(Debug, Clone)]
pub struct News {
    pub meta: FeedMeta,
    pub records: Vec<Record>,
}

impl News {
    pub fn new(meta: FeedMeta, records: Vec<Record>) -> Self {
        Self { meta, records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Borrowed view used for the JSON document.
    pub fn document(&self) -> NewsDocument<'_> {
        NewsDocument {
            feed: &self.meta.title,
            news: &self.records,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct NewsDocument<'a> {
    pub feed: &'a str,
    pub news: &'a [Record],
}
