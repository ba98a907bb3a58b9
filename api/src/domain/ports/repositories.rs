//! Repository port traits
//!
//! These traits define the interface for data persistence.
//! Implementations are provided by adapters (e.g., Firestore).

use async_trait::async_trait;

use crate::domain::entities::{Article, ArticleId, NewArticle};
use crate::error::DomainError;

/// Repository for Article entities
#[async_trait]
pub trait ArticleRepository: Send + Sync {
    /// Store a new article and return its generated id
    ///
    /// The creation timestamp is assigned by the store.
    async fn create(&self, article: &NewArticle) -> Result<ArticleId, DomainError>;

    /// Find the most recent articles, newest first
    async fn find_recent(&self, limit: usize) -> Result<Vec<Article>, DomainError>;
}
