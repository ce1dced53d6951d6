pub mod sqlite;

use crate::app::Result;
use crate::domain::{CachedNews, Record};

pub use sqlite::SqliteStore;

/// Per-date news cache.
///
/// Rows are only ever appended; date keys are never removed.
pub trait CacheStore {
    /// Register `date` as a cache key. Idempotent.
    fn ensure_table(&self, date: &str) -> Result<()>;
    /// Append one row under `date`, registering the key first if needed.
    fn write(&self, date: &str, title: &str, link: &str, content: &str) -> Result<()>;
    /// Every registered date key, oldest first.
    fn list_tables(&self) -> Result<Vec<String>>;
    /// Rows cached under `date`, in insertion order.
    fn read_rows(&self, date: &str) -> Result<Vec<CachedNews>>;
    /// Rows cached under `date` as labelled text.
    fn read(&self, date: &str) -> Result<String>;

    fn write_record(&self, record: &Record) -> Result<()> {
        self.write(&record.date, &record.title, &record.link, &record.content)
    }
}
