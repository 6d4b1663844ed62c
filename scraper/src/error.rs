//! Typed errors for the scraper library.

use thiserror::Error;

/// Errors that end a scraping run or an export.
///
/// Missing markup is not an error: detail fields fall back to `None` and a
/// failed search page counts as an empty page.
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// Transport-level failure (DNS, connect, read, timeout)
    #[error("HTTP request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Could not build the HTTP client
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// Invalid configuration value
    #[error("invalid value for {key}: {reason}")]
    Config { key: String, reason: String },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ScrapeError>;
