//! Firestore adapters
//!
//! Implementations of repository traits on top of the Firestore REST API.

pub mod article_repo;
pub mod auth;
pub mod client;

pub use article_repo::FirestoreArticleRepository;
pub use client::FirestoreClient;
