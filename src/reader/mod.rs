use std::sync::Arc;

use url::Url;

use crate::app::Result;
use crate::config::{Labels, PdfConfig};
use crate::domain::{News, Record};
use crate::fetcher::Fetcher;
use crate::normalizer::Normalizer;
use crate::render::{json, Fb2Document, OutputFormat, PdfRenderer, TextRenderer};
use crate::store::CacheStore;

/// Keep the first `limit` records; a non-positive limit keeps everything.
pub fn apply_limit(mut records: Vec<Record>, limit: i64) -> Vec<Record> {
    if limit > 0 {
        let limit = usize::try_from(limit).unwrap_or(usize::MAX);
        records.truncate(limit);
    }
    records
}

/// Fetch → normalize → cache → limit → render.
pub struct FeedReader {
    fetcher: Arc<dyn Fetcher + Send + Sync>,
    store: Arc<dyn CacheStore + Send + Sync>,
    normalizer: Normalizer,
    labels: Labels,
    pdf: PdfConfig,
}

impl FeedReader {
    pub fn new(
        fetcher: Arc<dyn Fetcher + Send + Sync>,
        store: Arc<dyn CacheStore + Send + Sync>,
        labels: Labels,
        pdf: PdfConfig,
    ) -> Self {
        Self {
            fetcher,
            store,
            normalizer: Normalizer::new(),
            labels,
            pdf,
        }
    }

    /// Fetch the feed at `link`, cache every entry and return the first
    /// `limit` of them. The cache always receives the whole feed.
    pub async fn fetch_news(&self, link: &str, limit: i64) -> Result<News> {
        let url = Url::parse(link)?;
        let body = self.fetcher.fetch(url.as_str()).await?;
        let (meta, records) = self.normalizer.normalize(&body)?;
        tracing::info!(feed = %meta.title, entries = records.len(), "Feed normalized");

        for record in &records {
            self.store.write_record(record)?;
        }

        let records = apply_limit(records, limit);
        tracing::info!(shown = records.len(), limit, "News selected");

        Ok(News::new(meta, records))
    }

    /// Render fetched news. Formats that go to a file return `None`.
    pub async fn fetch_and_render(
        &self,
        link: &str,
        limit: i64,
        format: &OutputFormat,
    ) -> Result<Option<String>> {
        let news = self.fetch_news(link, limit).await?;

        match format {
            OutputFormat::Text => Ok(Some(TextRenderer::new(self.labels.clone()).render(&news))),
            OutputFormat::Json { path: None } => Ok(Some(json::to_json(&news)?)),
            OutputFormat::Json { path: Some(path) } => {
                json::write_json(&news, path)?;
                Ok(None)
            }
            OutputFormat::Fb2 { path } => {
                Fb2Document::from_news(&news).write_to_file(path)?;
                Ok(None)
            }
            OutputFormat::Pdf { path } => {
                PdfRenderer::from_news(&news, &self.pdf)?.write_to_file(path)?;
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::RssReaderError;
    use crate::store::SqliteStore;
    use async_trait::async_trait;

    /// The `pubDate` text every item of `THREE_ITEMS` carries.
    const FIXTURE_DATE: &str = "Mon, 01 Jan 2024 00:00:00 GMT";

    const THREE_ITEMS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>Fixture Feed</title>
    <description>Three items on one day</description>
    <item>
      <title>First</title>
      <link>https://example.com/1</link>
      <pubDate>Mon, 01 Jan 2024 00:00:00 GMT</pubDate>
      <description>One</description>
    </item>
    <item>
      <title>Second</title>
      <link>https://example.com/2</link>
      <pubDate>Mon, 01 Jan 2024 00:00:00 GMT</pubDate>
      <description>Two</description>
    </item>
    <item>
      <title>Third</title>
      <link>https://example.com/3</link>
      <pubDate>Mon, 01 Jan 2024 00:00:00 GMT</pubDate>
      <description>Three</description>
    </item>
  </channel>
</rss>"#;

    struct FixtureFetcher(&'static str);

    #[async_trait]
    impl Fetcher for FixtureFetcher {
        async fn fetch(&self, _url: &str) -> Result<Vec<u8>> {
            Ok(self.0.as_bytes().to_vec())
        }
    }

    struct FailingFetcher;

    #[async_trait]
    impl Fetcher for FailingFetcher {
        async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
            Err(RssReaderError::FeedParse(format!("unreachable: {}", url)))
        }
    }

    fn reader(
        fetcher: Arc<dyn Fetcher + Send + Sync>,
    ) -> (tempfile::TempDir, Arc<SqliteStore>, FeedReader) {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(SqliteStore::open(dir.path().join("news.db"), Labels::default()).unwrap());
        let reader = FeedReader::new(
            fetcher,
            store.clone(),
            Labels::default(),
            PdfConfig::default(),
        );
        (dir, store, reader)
    }

    fn records(n: usize) -> Vec<Record> {
        (0..n)
            .map(|i| Record {
                title: format!("t{}", i),
                date: FIXTURE_DATE.into(),
                link: format!("https://example.com/{}", i),
                image_link: None,
                content: String::new(),
            })
            .collect()
    }

    #[test]
    fn test_apply_limit() {
        assert_eq!(apply_limit(records(3), 0).len(), 3);
        assert_eq!(apply_limit(records(3), -5).len(), 3);
        assert_eq!(apply_limit(records(3), 2).len(), 2);
        assert_eq!(apply_limit(records(3), 10).len(), 3);
        assert_eq!(apply_limit(records(3), 1)[0].title, "t0");
    }

    #[test]
    fn test_limit_truncates_output_but_caches_everything() {
        let (_dir, store, reader) = reader(Arc::new(FixtureFetcher(THREE_ITEMS)));
        let news = tokio_test::block_on(reader.fetch_news("https://example.com/rss", 2)).unwrap();

        let titles: Vec<_> = news.records.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["First", "Second"]);

        assert_eq!(news.records[0].date, FIXTURE_DATE);
        assert_eq!(store.list_tables().unwrap(), vec![FIXTURE_DATE.to_string()]);
        assert_eq!(store.read_rows(FIXTURE_DATE).unwrap().len(), 3);
    }

    #[test]
    fn test_non_positive_limit_returns_all() {
        let (_dir, _store, reader) = reader(Arc::new(FixtureFetcher(THREE_ITEMS)));
        let all = tokio_test::block_on(reader.fetch_news("https://example.com/rss", 0)).unwrap();
        let negative =
            tokio_test::block_on(reader.fetch_news("https://example.com/rss", -1)).unwrap();
        assert_eq!(all.len(), 3);
        assert_eq!(negative.len(), 3);
    }

    #[tokio::test]
    async fn test_text_output_with_limit() {
        let (_dir, store, reader) = reader(Arc::new(FixtureFetcher(THREE_ITEMS)));
        let text = reader
            .fetch_and_render("https://example.com/rss", 2, &OutputFormat::Text)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(text.matches("Fixture Feed").count(), 1);
        assert_eq!(text.lines().filter(|l| l.starts_with("Title: ")).count(), 2);

        let dates = store.list_tables().unwrap();
        assert_eq!(dates.len(), 1);
        assert_eq!(store.read_rows(&dates[0]).unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_json_output_round_trips() {
        let (_dir, _store, reader) = reader(Arc::new(FixtureFetcher(THREE_ITEMS)));
        let text = reader
            .fetch_and_render(
                "https://example.com/rss",
                2,
                &OutputFormat::Json { path: None },
            )
            .await
            .unwrap()
            .unwrap();

        let json: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(json["feed"], "Fixture Feed");
        let news = json["news"].as_array().unwrap();
        assert_eq!(news.len(), 2);
        for item in news {
            let object = item.as_object().unwrap();
            for key in ["title", "date", "link", "image-link", "content"] {
                assert!(object.contains_key(key), "missing {}", key);
            }
            assert_eq!(object.len(), 5);
        }
    }

    #[tokio::test]
    async fn test_file_formats_return_none() {
        let (dir, _store, reader) = reader(Arc::new(FixtureFetcher(THREE_ITEMS)));
        let formats = [
            OutputFormat::Json {
                path: Some(dir.path().join("news.json")),
            },
            OutputFormat::Fb2 {
                path: dir.path().join("news.fb2"),
            },
            OutputFormat::Pdf {
                path: dir.path().join("news.pdf"),
            },
        ];

        for format in &formats {
            let output = reader
                .fetch_and_render("https://example.com/rss", 0, format)
                .await
                .unwrap();
            assert!(output.is_none());
        }

        assert!(dir.path().join("news.json").exists());
        assert!(dir.path().join("news.fb2").exists());
        assert!(dir.path().join("news.pdf").exists());
    }

    #[tokio::test]
    async fn test_repeated_fetch_duplicates_cache_rows() {
        let (_dir, store, reader) = reader(Arc::new(FixtureFetcher(THREE_ITEMS)));
        let news = reader.fetch_news("https://example.com/rss", 1).await.unwrap();
        reader.fetch_news("https://example.com/rss", 1).await.unwrap();

        assert_eq!(store.read_rows(&news.records[0].date).unwrap().len(), 6);
    }

    #[tokio::test]
    async fn test_invalid_url_is_rejected() {
        let (_dir, store, reader) = reader(Arc::new(FixtureFetcher(THREE_ITEMS)));
        let result = reader.fetch_news("not a url", 0).await;

        assert!(matches!(result, Err(RssReaderError::InvalidUrl(_))));
        assert!(store.list_tables().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_fetch_failure_caches_nothing() {
        let (_dir, store, reader) = reader(Arc::new(FailingFetcher));
        let result = reader.fetch_news("https://example.com/rss", 0).await;

        assert!(result.is_err());
        assert!(store.list_tables().unwrap().is_empty());
    }
}
