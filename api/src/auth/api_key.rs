//! API key authentication middleware

use axum::{body::Body, extract::State, http::Request, middleware::Next, response::Response};
use sha2::{Digest, Sha256};

use crate::error::AppError;
use crate::AppState;

/// Extract the API key from the Authorization header
///
/// The key is the first space-separated word after `Bearer `.
fn extract_api_key(request: &Request<Body>) -> Option<&str> {
    request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .and_then(|key| key.split(' ').next())
}

/// Hash an API key using SHA-256
pub fn hash_api_key(api_key: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(api_key.as_bytes());
    hex::encode(hasher.finalize())
}

/// Compare keys by digest so the comparison time does not depend on a shared prefix
fn keys_match(provided: &str, expected: &str) -> bool {
    hash_api_key(provided) == hash_api_key(expected)
}

/// Authentication middleware for article ingestion
///
/// Rejects the request when no ingest key is configured, when the
/// Authorization header is not a Bearer token, or when the token does not
/// match the configured key.
pub async fn require_api_key(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let Some(expected) = state.config.add_article_api_key.as_deref() else {
        tracing::warn!("Rejected ingest request: ADD_ARTICLE_API_KEY is not configured");
        return Err(AppError::Unauthorized);
    };

    let provided = extract_api_key(&request).ok_or(AppError::Unauthorized)?;

    if !keys_match(provided, expected) {
        tracing::warn!("Rejected ingest request: invalid API key");
        return Err(AppError::InvalidApiKey);
    }

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request_with_auth(value: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().uri("/api/add_article");
        if let Some(value) = value {
            builder = builder.header("Authorization", value);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[test]
    fn test_extract_bearer_key() {
        let request = request_with_auth(Some("Bearer secret-key"));
        assert_eq!(extract_api_key(&request), Some("secret-key"));
    }

    #[test]
    fn test_extract_ignores_trailing_words() {
        let request = request_with_auth(Some("Bearer secret-key extra words"));
        assert_eq!(extract_api_key(&request), Some("secret-key"));

        let request = request_with_auth(Some("Bearer "));
        assert_eq!(extract_api_key(&request), Some(""));
    }

    #[test]
    fn test_extract_rejects_other_schemes() {
        assert_eq!(extract_api_key(&request_with_auth(Some("Basic abc"))), None);
        assert_eq!(extract_api_key(&request_with_auth(Some("Bearer"))), None);
        assert_eq!(extract_api_key(&request_with_auth(None)), None);
    }

    #[test]
    fn test_hash_api_key_is_hex_sha256() {
        let hash = hash_api_key("secret");
        assert_eq!(hash.len(), 64);
        assert_eq!(
            hash,
            "2bb80d537b1da3e38bd30361aa855686bde0eacd7162fef6a25fe97bf527a25b"
        );
    }

    #[test]
    fn test_keys_match() {
        assert!(keys_match("secret", "secret"));
        assert!(!keys_match("secret", "Secret"));
        assert!(!keys_match("", "secret"));
    }
}
