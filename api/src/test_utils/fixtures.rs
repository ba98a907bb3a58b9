//! Test fixtures
//!
//! Factory functions for creating test data with sensible defaults.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::config::Config;
use crate::domain::entities::{Article, ArticleId};
use crate::domain::ports::ArticleRepository;
use crate::AppState;

pub const TEST_API_KEY: &str = "test-api-key";

/// Create a stored article with the given url and creation time
pub fn test_article(url: &str, created_at: DateTime<Utc>) -> Article {
    Article {
        id: ArticleId::generate(),
        url: Some(url.to_string()),
        title: Some(format!("Title for {}", url)),
        content: Some(format!("<p>Saved from {}</p>", url)),
        created_at: Some(created_at),
    }
}

/// Configuration with defaults and the test API key
pub fn test_config() -> Config {
    let mut config = Config::from_lookup(|_| None);
    config.add_article_api_key = Some(TEST_API_KEY.to_string());
    config
}

/// Application state over the given repository (or none, for an unavailable store)
pub fn test_state(articles: Option<Arc<dyn ArticleRepository>>) -> AppState {
    AppState::new(test_config(), articles)
}
