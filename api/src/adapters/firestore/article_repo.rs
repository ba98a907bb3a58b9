//! Firestore adapter for ArticleRepository

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use super::client::{
    Document, FieldTransform, FirestoreClient, Precondition, StructuredQuery, Value, Write,
};
use crate::domain::entities::{Article, ArticleId, NewArticle};
use crate::domain::ports::ArticleRepository;
use crate::error::DomainError;

const FIELD_URL: &str = "url";
const FIELD_TITLE: &str = "title";
const FIELD_CONTENT: &str = "content";
const FIELD_CREATED_AT: &str = "createdAt";

/// Firestore implementation of ArticleRepository
pub struct FirestoreArticleRepository {
    client: Arc<FirestoreClient>,
    collection: String,
}

impl FirestoreArticleRepository {
    pub fn new(client: Arc<FirestoreClient>, collection: String) -> Self {
        Self { client, collection }
    }
}

#[async_trait]
impl ArticleRepository for FirestoreArticleRepository {
    async fn create(&self, article: &NewArticle) -> Result<ArticleId, DomainError> {
        let id = ArticleId::generate();

        let write = Write {
            update: Document {
                name: self.client.document_name(&self.collection, id.as_str()),
                fields: article_fields(article),
            },
            update_transforms: vec![FieldTransform::request_time(FIELD_CREATED_AT)],
            current_document: Some(Precondition { exists: false }),
        };

        self.client.commit(vec![write]).await?;

        Ok(id)
    }

    async fn find_recent(&self, limit: usize) -> Result<Vec<Article>, DomainError> {
        let query = StructuredQuery::latest(&self.collection, FIELD_CREATED_AT, limit);
        let documents = self.client.run_query(query).await?;

        Ok(documents.iter().map(article_from_document).collect())
    }
}

fn article_fields(article: &NewArticle) -> HashMap<String, Value> {
    HashMap::from([
        (FIELD_URL.to_string(), Value::string(&article.url)),
        (FIELD_TITLE.to_string(), Value::string(&article.title)),
        (FIELD_CONTENT.to_string(), Value::string(&article.content)),
    ])
}

fn article_from_document(document: &Document) -> Article {
    let text = |name: &str| {
        document
            .field(name)
            .and_then(Value::as_str)
            .map(str::to_string)
    };

    Article {
        id: ArticleId(document.id().to_string()),
        url: text(FIELD_URL),
        title: text(FIELD_TITLE),
        content: text(FIELD_CONTENT),
        created_at: document.field(FIELD_CREATED_AT).and_then(Value::as_timestamp),
    }
}
