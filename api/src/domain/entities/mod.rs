//! Domain entities
//!
//! Pure domain models representing core business concepts.

pub mod article;

pub use article::{Article, ArticleId, NewArticle, DEFAULT_TITLE};
