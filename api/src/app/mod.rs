//! Application layer
//!
//! Contains use cases and service orchestration.
//! Services coordinate between domain entities and ports.

pub mod article_service;
pub mod feed_service;

pub use article_service::{ArticleReceipt, ArticleService};
pub use feed_service::{Feed, FeedItem, FeedService, FEED_ITEM_LIMIT};
