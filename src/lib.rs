//! # rss-reader
//!
//! A command-line RSS reader with a local, per-date news cache.
//!
//! ## Architecture
//!
//! ```text
//! Fetcher → Normalizer → CacheStore → Renderer
//! ```
//!
//! Every fetched entry is cached under its publication date, whatever
//! `--limit` says; only the rendered output is truncated.
//!
//! ## Quick Start
//!
//! ```bash
//! # Print the three newest items
//! rss-reader https://news.yahoo.com/rss/ --limit 3
//!
//! # JSON instead of text
//! rss-reader https://news.yahoo.com/rss/ --json
//!
//! # Documents
//! rss-reader https://news.yahoo.com/rss/ --to-fb2 news.fb2
//! rss-reader https://news.yahoo.com/rss/ --to-pdf news.pdf
//!
//! # Cached news
//! rss-reader --list-dates
//! rss-reader --date "Mon, 01 Jan 2024 00:00:00 GMT"
//!
//! # Log of previous runs
//! rss-reader --verbose
//! ```

/// Application context and error handling.
///
/// [`AppContext`](app::AppContext) wires configuration, the cache store and
/// the feed reader together.
pub mod app;

/// Command-line interface using clap.
pub mod cli;

/// Configuration loaded from `~/.config/rss-reader/config.toml`.
///
/// Holds the cache path, logging settings, HTTP user agent and the labels
/// used by the text output.
pub mod config;

/// Core domain models.
///
/// - [`Record`](domain::Record): one normalized feed entry
/// - [`FeedMeta`](domain::FeedMeta): channel title, subtitle and image
/// - [`CachedNews`](domain::CachedNews): a row replayed from the cache
pub mod domain;

/// Feed fetching.
///
/// - [`Fetcher`](fetcher::Fetcher): async trait for feed sources
/// - [`HttpFetcher`](fetcher::HttpFetcher): reqwest-based implementation
pub mod fetcher;

/// File-backed tracing setup.
pub mod logging;

/// Feed parsing and normalization into [`Record`](domain::Record)s.
pub mod normalizer;

/// Fetch, cache and render in one call.
pub mod reader;

/// Text, JSON, FB2 and PDF output.
pub mod render;

/// SQLite news cache.
///
/// - [`CacheStore`](store::CacheStore): cache operations
/// - [`SqliteStore`](store::SqliteStore): SQLite implementation
pub mod store;
