//! Article domain entity
//!
//! An article is a saved link with an optional title and HTML content.
//! Articles are created by the ingest endpoint and republished by the RSS feed.

use chrono::{DateTime, Utc};
use rand::distributions::Alphanumeric;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Title used when an article has none
pub const DEFAULT_TITLE: &str = "Sin Título";

/// Length of generated document ids (matches Firestore auto ids)
const ARTICLE_ID_LEN: usize = 20;

/// Store-assigned identifier for an article
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArticleId(pub String);

impl ArticleId {
    /// Generate a new random 20-character alphanumeric id
    pub fn generate() -> Self {
        let id = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(ARTICLE_ID_LEN)
            .map(char::from)
            .collect();
        Self(id)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for ArticleId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for ArticleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An article as read back from the store
///
/// The collection is schemaless, so every field other than the id may be missing.
#[derive(Debug, Clone, PartialEq)]
pub struct Article {
    pub id: ArticleId,
    pub url: Option<String>,
    pub title: Option<String>,
    pub content: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

impl Article {
    /// Title to display, falling back to the placeholder
    pub fn display_title(&self) -> &str {
        match self.title.as_deref() {
            Some(title) if !title.is_empty() => title,
            _ => DEFAULT_TITLE,
        }
    }
}

/// Data for creating a new article
#[derive(Debug, Clone, PartialEq)]
pub struct NewArticle {
    pub url: String,
    pub title: String,
    pub content: String,
}

impl NewArticle {
    /// Build a new article, applying defaults for missing title and content
    pub fn new(
        url: Option<String>,
        title: Option<String>,
        content: Option<String>,
    ) -> Result<Self, DomainError> {
        let url = url
            .filter(|u| !u.is_empty())
            .ok_or_else(|| DomainError::Validation("url is required".to_string()))?;

        Ok(Self {
            url,
            title: title
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| DEFAULT_TITLE.to_string()),
            content: content.unwrap_or_default(),
        })
    }
}
