//! Test utilities
//!
//! Manual mock implementations, test fixtures and an RSS reader for assertions.

pub mod fixtures;
pub mod mocks;
pub mod rss;

pub use fixtures::*;
pub use mocks::*;
pub use rss::*;
