// src/error.rs
use thiserror::Error;

/// Everything a page scrape can fail with.
///
/// Transport and status errors always reach the caller. `Layout` and `Parse`
/// mean the page did not look the way the scraper expects; the best-effort
/// scrapers turn those into an empty table instead.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Page layout not recognised: {0}")]
    Layout(String),

    #[error("Could not parse {what}: {value:?}")]
    Parse { what: &'static str, value: String },

    #[error("Invalid selector {0:?}")]
    Selector(String),

    #[error("No saved page for {0}")]
    Missing(String),

    #[error("Table shape error: {0}")]
    Shape(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ScrapeError {
    pub fn layout(msg: impl Into<String>) -> Self {
        ScrapeError::Layout(msg.into())
    }

    pub fn parse(what: &'static str, value: impl Into<String>) -> Self {
        ScrapeError::Parse { what, value: value.into() }
    }

    /// True for errors that mean "the page did not match", as opposed to
    /// "the page could not be fetched".
    pub fn is_layout(&self) -> bool {
        matches!(self, ScrapeError::Layout(_) | ScrapeError::Parse { .. })
    }
}

pub type Result<T> = std::result::Result<T, ScrapeError>;
