//! Feed module
//!
//! RSS rendering of the article feed.

pub mod renderer;

pub use renderer::{render_error_feed, render_rss};
