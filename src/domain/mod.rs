pub mod feed;
pub mod record;

pub use feed::{FeedMeta, News, NewsDocument};
pub use record::{CachedNews, Record};
