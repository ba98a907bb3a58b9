//! Authentication
//!
//! Bearer API key checks for the ingest endpoint.

pub mod api_key;

pub use api_key::require_api_key;
