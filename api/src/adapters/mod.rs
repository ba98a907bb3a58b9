//! Adapters layer
//!
//! Implementations of port traits for external systems.

pub mod firestore;

pub use firestore::{FirestoreArticleRepository, FirestoreClient};
