//! Feed handlers
//!
//! Public RSS endpoint. Failures are answered with a minimal RSS document
//! so feed readers always receive parseable XML.

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};

use crate::config::Config;
use crate::error::AppError;
use crate::feed::{render_error_feed, render_rss};
use crate::AppState;

const RSS_CONTENT_TYPE: &str = "application/rss+xml; charset=utf-8";
const ERROR_CONTENT_TYPE: &str = "application/xml";
const FEED_PATH: &str = "/api/rss_feed";

/// GET /api/rss_feed
///
/// Returns the 50 most recent articles as RSS 2.0.
pub async fn rss_feed(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let self_link = feed_self_link(&state.config, &headers);

    let result = match state.feed_service.as_ref() {
        Some(service) => match service.generate_feed(&self_link).await {
            Ok(feed) => render_rss(&feed).map_err(AppError::from),
            Err(e) => Err(e),
        },
        None => Err(AppError::Unavailable),
    };

    match result {
        Ok(xml) => ([(header::CONTENT_TYPE, RSS_CONTENT_TYPE)], xml).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to generate RSS feed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                [(header::CONTENT_TYPE, ERROR_CONTENT_TYPE)],
                render_error_feed(&e.to_string()),
            )
                .into_response()
        }
    }
}

/// Absolute URL of the feed, always https
///
/// Uses the configured public base URL, else the forwarded or direct Host header.
fn feed_self_link(config: &Config, headers: &HeaderMap) -> String {
    let base = config
        .public_base_url
        .clone()
        .or_else(|| request_host(headers))
        .unwrap_or_else(|| "localhost".to_string());

    format!("{}{}", force_https(base.trim_end_matches('/')), FEED_PATH)
}

fn request_host(headers: &HeaderMap) -> Option<String> {
    ["x-forwarded-host", "host"].iter().find_map(|name| {
        headers
            .get(*name)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    })
}

fn force_https(base: &str) -> String {
    if let Some(rest) = base.strip_prefix("http://") {
        format!("https://{}", rest)
    } else if base.starts_with("https://") {
        base.to_string()
    } else {
        format!("https://{}", base)
    }
}
