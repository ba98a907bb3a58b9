//! HTTP handlers
//!
//! Axum request handlers for the API endpoints.

pub mod articles;
pub mod cors;
pub mod feed;
pub mod home;

pub use articles::add_article;
pub use cors::{cors_headers, preflight};
pub use feed::rss_feed;
pub use home::{health, home};
