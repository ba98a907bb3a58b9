//! Article service
//!
//! Validates article submissions and stores them.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::entities::{ArticleId, NewArticle};
use crate::domain::ports::ArticleRepository;
use crate::error::AppError;

/// The stored article as echoed back to the submitter
///
/// `created_at` is taken from this process's clock when the write returns.
/// The value persisted by the store is assigned server-side and is not read back.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleReceipt {
    pub id: ArticleId,
    pub url: String,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Service for ingesting articles
pub struct ArticleService<AR>
where
    AR: ArticleRepository + ?Sized,
{
    articles: Arc<AR>,
}

impl<AR> ArticleService<AR>
where
    AR: ArticleRepository + ?Sized,
{
    pub fn new(articles: Arc<AR>) -> Self {
        Self { articles }
    }

    /// Validate and store a submitted article
    pub async fn add_article(
        &self,
        url: Option<String>,
        title: Option<String>,
        content: Option<String>,
    ) -> Result<ArticleReceipt, AppError> {
        let article = NewArticle::new(url, title, content)?;

        let id = self.articles.create(&article).await?;
        tracing::info!(article_id = %id, url = %article.url, "Article added");

        Ok(ArticleReceipt {
            id,
            url: article.url,
            title: article.title,
            content: article.content,
            created_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::DEFAULT_TITLE;
    use crate::error::DomainError;
    use crate::test_utils::{FailingArticleRepository, InMemoryArticleRepository};

    #[tokio::test]
    async fn test_add_article_applies_defaults() {
        let repo = Arc::new(InMemoryArticleRepository::new());
        let service = ArticleService::new(repo.clone());

        let receipt = service
            .add_article(Some("http://x".to_string()), None, None)
            .await
            .unwrap();

        assert_eq!(receipt.url, "http://x");
        assert_eq!(receipt.title, DEFAULT_TITLE);
        assert_eq!(receipt.content, "");
        assert!(!receipt.id.as_str().is_empty());

        let stored = repo.articles();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].id, receipt.id);
        assert_eq!(stored[0].title.as_deref(), Some(DEFAULT_TITLE));
    }

    #[tokio::test]
    async fn test_add_article_rejects_missing_url() {
        let repo = Arc::new(InMemoryArticleRepository::new());
        let service = ArticleService::new(repo.clone());

        let result = service
            .add_article(None, Some("No link".to_string()), None)
            .await;

        assert!(matches!(
            result,
            Err(AppError::Domain(DomainError::Validation(_)))
        ));
        assert_eq!(repo.calls(), 0);
    }

    #[tokio::test]
    async fn test_add_article_surfaces_store_failure() {
        let service = ArticleService::new(Arc::new(FailingArticleRepository::new(
            "permission denied",
        )));

        let result = service
            .add_article(Some("http://x".to_string()), None, None)
            .await;

        match result {
            Err(AppError::Domain(DomainError::Database(msg))) => {
                assert_eq!(msg, "permission denied")
            }
            other => panic!("Expected database error, got {:?}", other),
        }
    }

    #[test]
    fn test_receipt_serializes_camel_case() {
        let receipt = ArticleReceipt {
            id: ArticleId("abc".to_string()),
            url: "http://x".to_string(),
            title: "t".to_string(),
            content: String::new(),
            created_at: Utc::now(),
        };

        let value = serde_json::to_value(&receipt).unwrap();
        assert_eq!(value["id"], "abc");
        let created_at = value["createdAt"].as_str().unwrap();
        assert!(created_at.ends_with('Z'));
        assert!(DateTime::parse_from_rfc3339(created_at).is_ok());
    }
}
