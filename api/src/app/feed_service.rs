//! Feed service
//!
//! Builds the RSS feed model from the most recent articles.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::config::FeedSettings;
use crate::domain::entities::Article;
use crate::domain::ports::ArticleRepository;
use crate::error::AppError;

/// Maximum number of entries in the feed
pub const FEED_ITEM_LIMIT: usize = 50;

/// Link used for entries without a url
const MISSING_LINK: &str = "#";

/// A feed ready to be rendered
#[derive(Debug, Clone)]
pub struct Feed {
    pub title: String,
    pub description: String,
    pub language: String,
    /// Absolute https URL of the feed itself
    pub self_link: String,
    pub generated_at: DateTime<Utc>,
    pub items: Vec<FeedItem>,
}

/// One feed entry, derived from one article
#[derive(Debug, Clone, PartialEq)]
pub struct FeedItem {
    pub title: String,
    pub link: String,
    /// Permanent identifier: the url when present, else the article id
    pub guid: String,
    pub pub_date: DateTime<Utc>,
    /// HTML content
    pub content: String,
}

impl FeedItem {
    /// Map an article to a feed entry, using `now` when it has no creation time
    ///
    /// An empty url counts as missing.
    pub fn from_article(article: Article, now: DateTime<Utc>) -> Self {
        let title = article.display_title().to_string();
        let url = article.url.filter(|u| !u.is_empty());
        let guid = url.clone().unwrap_or_else(|| article.id.to_string());

        Self {
            title,
            link: url.unwrap_or_else(|| MISSING_LINK.to_string()),
            guid,
            pub_date: article.created_at.unwrap_or(now),
            content: article.content.unwrap_or_default(),
        }
    }
}

/// Service for generating the article feed
pub struct FeedService<AR>
where
    AR: ArticleRepository + ?Sized,
{
    articles: Arc<AR>,
    settings: FeedSettings,
}

impl<AR> FeedService<AR>
where
    AR: ArticleRepository + ?Sized,
{
    pub fn new(articles: Arc<AR>, settings: FeedSettings) -> Self {
        Self { articles, settings }
    }

    /// Generate the feed of the most recent articles, newest first
    pub async fn generate_feed(&self, self_link: &str) -> Result<Feed, AppError> {
        let articles = self.articles.find_recent(FEED_ITEM_LIMIT).await?;
        let now = Utc::now();

        let items: Vec<FeedItem> = articles
            .into_iter()
            .map(|article| FeedItem::from_article(article, now))
            .collect();

        tracing::debug!(items = items.len(), "Generated feed");

        Ok(Feed {
            title: self.settings.title.clone(),
            description: self.settings.description.clone(),
            language: self.settings.language.clone(),
            self_link: self_link.to_string(),
            generated_at: now,
            items,
        })
    }
}
