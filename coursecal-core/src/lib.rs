//! Core of coursecal.
//!
//! Rewrites a TimeEdit course calendar feed using the CSV export published
//! next to it:
//! - `source` resolves the feed URL and derives the CSV export's URL
//! - `table` reads the CSV: column roles, course code legend, event records
//! - `sort` and `rewrite` pair both sources by start order and rewrite the feed
//! - `pipeline` runs everything end to end

pub mod config;
pub mod error;
pub mod fetch;
pub mod ics;
pub mod pipeline;
pub mod rewrite;
pub mod sort;
pub mod source;
pub mod table;
mod time;

pub use config::RewriteConfig;
pub use error::{RewriteError, RewriteResult};
pub use fetch::{Fetcher, HttpFetcher};
pub use pipeline::{RewrittenFeed, rewrite_documents, rewrite_url};
pub use rewrite::RewriteSummary;
pub use url::Url;
