use std::fs;
use std::path::{Path, PathBuf};

use rusqlite::{params, Connection, OptionalExtension, Transaction};
use rusqlite_migration::{Migrations, M};

use crate::app::{Result, RssReaderError};
use crate::config::Labels;
use crate::domain::CachedNews;
use crate::store::CacheStore;

/// SQLite-backed news cache.
///
/// No connection is held between calls: every operation opens the file,
/// runs inside one transaction, commits and closes.
pub struct SqliteStore {
    path: PathBuf,
    labels: Labels,
}

impl SqliteStore {
    pub fn open<P: AsRef<Path>>(path: P, labels: Labels) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let store = Self { path, labels };
        store.run_migrations()?;
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn run_migrations(&self) -> Result<()> {
        let migrations = Migrations::new(vec![M::up(include_str!(
            "../../migrations/001-initial/up.sql"
        ))]);

        let mut conn = self.connect()?;
        migrations.to_latest(&mut conn)?;
        Ok(())
    }

    fn connect(&self) -> Result<Connection> {
        let conn = Connection::open(&self.path)?;
        conn.execute_batch("PRAGMA foreign_keys = ON")?;
        Ok(conn)
    }

    /// Run `f` in a transaction on a fresh connection. The transaction is
    /// committed whether or not `f` fails; `f`'s error wins over a commit
    /// error.
    fn with_transaction<T>(&self, f: impl FnOnce(&Transaction<'_>) -> Result<T>) -> Result<T> {
        let mut conn = self.connect()?;
        let tx = conn.transaction()?;
        let result = f(&tx);
        let committed = tx.commit();

        match (result, committed) {
            (Err(e), _) => Err(e),
            (Ok(_), Err(e)) => Err(e.into()),
            (Ok(value), Ok(())) => Ok(value),
        }
    }

    fn insert_date(tx: &Transaction<'_>, date: &str) -> Result<()> {
        tx.execute(
            "INSERT OR IGNORE INTO cache_dates (date) VALUES (?1)",
            params![date],
        )?;
        Ok(())
    }

    fn date_exists(tx: &Transaction<'_>, date: &str) -> Result<bool> {
        let found = tx
            .query_row(
                "SELECT 1 FROM cache_dates WHERE date = ?1",
                params![date],
                |_| Ok(()),
            )
            .optional()?;
        Ok(found.is_some())
    }

    fn select_rows(tx: &Transaction<'_>, date: &str) -> Result<Vec<CachedNews>> {
        let mut stmt = tx.prepare(
            "SELECT title, link, content FROM cached_news WHERE date = ?1 ORDER BY id",
        )?;

        let rows = stmt
            .query_map(params![date], |row| {
                Ok(CachedNews {
                    title: row.get(0)?,
                    link: row.get(1)?,
                    content: row.get(2)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(rows)
    }

    fn format_rows(&self, rows: &[CachedNews]) -> String {
        let labels = &self.labels;
        let mut out = String::new();
        for row in rows {
            out.push_str(&Labels::line(&labels.title, &row.title));
            out.push_str(&Labels::line(&labels.link, &row.link));
            out.push_str(&Labels::line(&labels.content, &row.content));
            out.push_str(&labels.separator);
            out.push_str("\n\n");
        }
        out
    }
}

impl CacheStore for SqliteStore {
    fn ensure_table(&self, date: &str) -> Result<()> {
        tracing::debug!(date, "Ensuring cache key");
        self.with_transaction(|tx| Self::insert_date(tx, date))
    }

    fn write(&self, date: &str, title: &str, link: &str, content: &str) -> Result<()> {
        tracing::debug!(date, title, "Caching news");
        self.with_transaction(|tx| {
            Self::insert_date(tx, date)?;
            tx.execute(
                "INSERT INTO cached_news (date, title, link, content) VALUES (?1, ?2, ?3, ?4)",
                params![date, title, link, content],
            )?;
            Ok(())
        })
    }

    fn list_tables(&self) -> Result<Vec<String>> {
        self.with_transaction(|tx| {
            let mut stmt = tx.prepare("SELECT date FROM cache_dates ORDER BY id")?;
            let dates = stmt
                .query_map([], |row| row.get(0))?
                .collect::<std::result::Result<Vec<String>, _>>()?;
            Ok(dates)
        })
    }

    fn read_rows(&self, date: &str) -> Result<Vec<CachedNews>> {
        self.with_transaction(|tx| Self::select_rows(tx, date))
    }

    fn read(&self, date: &str) -> Result<String> {
        tracing::info!(date, "Reading cached news");
        let rows = self.with_transaction(|tx| {
            if !Self::date_exists(tx, date)? {
                return Err(RssReaderError::DateNotCached(date.to_string()));
            }
            Self::select_rows(tx, date)
        })?;

        Ok(self.format_rows(&rows))
    }
}
