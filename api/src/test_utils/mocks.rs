//! Mock implementations of port traits
//!
//! These are in-memory implementations that can be configured for testing.
//! They store data in memory and allow tests to verify behavior.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use crate::domain::entities::{Article, ArticleId, NewArticle};
use crate::domain::ports::ArticleRepository;
use crate::error::DomainError;

// ============================================================================
// In-Memory Article Repository
// ============================================================================

#[derive(Default)]
pub struct InMemoryArticleRepository {
    articles: Arc<RwLock<Vec<Article>>>,
    calls: AtomicUsize,
}

impl InMemoryArticleRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate with an article for testing
    pub fn with_article(self, article: Article) -> Self {
        self.articles.write().unwrap().push(article);
        self
    }

    /// Snapshot of stored articles in insertion order
    pub fn articles(&self) -> Vec<Article> {
        self.articles.read().unwrap().clone()
    }

    /// Number of repository calls made so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ArticleRepository for InMemoryArticleRepository {
    async fn create(&self, article: &NewArticle) -> Result<ArticleId, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut articles = self.articles.write().unwrap();

        // Mimic a server clock that never goes backwards between writes.
        let now = Utc::now();
        let created_at = match articles.iter().filter_map(|a| a.created_at).max() {
            Some(latest) if latest >= now => latest + Duration::milliseconds(1),
            _ => now,
        };

        let id = ArticleId::generate();
        articles.push(Article {
            id: id.clone(),
            url: Some(article.url.clone()),
            title: Some(article.title.clone()),
            content: Some(article.content.clone()),
            created_at: Some(created_at),
        });

        Ok(id)
    }

    async fn find_recent(&self, limit: usize) -> Result<Vec<Article>, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut articles = self.articles.read().unwrap().clone();
        articles.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        articles.truncate(limit);
        Ok(articles)
    }
}

// ============================================================================
// Failing Article Repository
// ============================================================================

/// Repository whose every call fails with a database error
pub struct FailingArticleRepository {
    message: String,
}

impl FailingArticleRepository {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

#[async_trait]
impl ArticleRepository for FailingArticleRepository {
    async fn create(&self, _article: &NewArticle) -> Result<ArticleId, DomainError> {
        Err(DomainError::Database(self.message.clone()))
    }

    async fn find_recent(&self, _limit: usize) -> Result<Vec<Article>, DomainError> {
        Err(DomainError::Database(self.message.clone()))
    }
}
