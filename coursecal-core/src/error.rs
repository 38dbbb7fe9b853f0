//! Error types for the rewrite pipeline.

use thiserror::Error;

/// Errors that abort a rewrite run.
#[derive(Error, Debug)]
pub enum RewriteError {
    #[error("Expected a correct URL, was: {0}")]
    InvalidUrl(String),

    #[error("Expected a {expected} URL, was: {url}")]
    UntrustedSource { expected: String, url: String },

    #[error("Expected response to be 'OK' for {url}, was '{status}'")]
    FetchStatus { url: String, status: u16 },

    #[error("Failed to fetch {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Course code legend is missing from the CSV export")]
    EmptyLegend,

    #[error("Course is not available for event #{index} (starting {start})")]
    MissingCourse { index: usize, start: String },

    #[error("ICS parse error: {0}")]
    IcsParse(String),

    #[error("CSV parse error: {0}")]
    CsvParse(#[from] csv::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl RewriteError {
    /// Whether the failure came from talking to the upstream schedule host.
    pub fn is_fetch(&self) -> bool {
        matches!(self, Self::FetchStatus { .. } | Self::Fetch { .. })
    }

    /// Whether the failure was caused by the caller's input URL.
    pub fn is_bad_request(&self) -> bool {
        matches!(self, Self::InvalidUrl(_) | Self::UntrustedSource { .. })
    }
}

/// Result type alias for rewrite operations.
pub type RewriteResult<T> = Result<T, RewriteError>;
