//! Article handlers
//!
//! Endpoint for submitting articles to the feed.

use axum::{body::Bytes, extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::app::ArticleReceipt;
use crate::error::AppError;
use crate::AppState;

pub const SUCCESS_MESSAGE: &str = "Artículo añadido con éxito.";

/// Request body for POST /api/add_article
#[derive(Debug, Deserialize)]
pub struct AddArticleRequest {
    pub url: Option<String>,
    pub title: Option<String>,
    pub content: Option<String>,
}

/// Response body for POST /api/add_article
#[derive(Serialize)]
pub struct AddArticleResponse {
    pub message: &'static str,
    pub article: ArticleReceipt,
}

/// POST /api/add_article
///
/// Stores a new article. Authentication is enforced by middleware.
/// The body is parsed here rather than with the `Json` extractor so that
/// every malformed payload is reported as a 400 with the parser message.
pub async fn add_article(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<AddArticleResponse>, AppError> {
    let service = state
        .article_service
        .as_ref()
        .ok_or(AppError::Unavailable)?;

    let request: AddArticleRequest = serde_json::from_slice(&body)
        .map_err(|e| AppError::BadRequest(format!("Invalid JSON in request body: {}", e)))?;

    let article = service
        .add_article(request.url, request.title, request.content)
        .await?;

    Ok(Json(AddArticleResponse {
        message: SUCCESS_MESSAGE,
        article,
    }))
}
