// src/error.rs
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ScrapeError>;

/// Errors surfaced by a collection run.
///
/// A missing field on an otherwise valid page is never an error; it is
/// replaced with the `"N/A"` sentinel during extraction.
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// Rejected before any network activity
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Any request-level failure; aborts the whole run
    #[error("collection failed: {0}")]
    Collection(#[from] CollectionError),
}

#[derive(Debug, Error)]
pub enum CollectionError {
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned HTTP {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("could not read body of {url}: {source}")]
    Body {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} has no job content block")]
    MissingContent { url: String },

    #[error("invalid URL {url}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}
