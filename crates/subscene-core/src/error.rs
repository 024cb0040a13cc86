//! Error types for the Subscene scraper
//!
//! This module defines all error types used throughout the library.

use thiserror::Error;

/// Error type for Subscene scraper operations
#[derive(Error, Debug)]
pub enum SubsceneError {
    /// HTTP request failed (transport error, DNS failure, timeout)
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The page did not match any expected Subscene layout
    #[error("Failed to parse HTML: {0}")]
    Parse(String),

    /// Invalid URL or search term
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Rate limited by the server (HTTP 429 after retries)
    #[error("Rate limited - too many requests")]
    RateLimited,

    /// Requested resource was not found (HTTP 404, stale identifier)
    #[error("Resource not found: {0}")]
    NotFound(String),
}

/// Result type alias for Subscene scraper operations
pub type Result<T> = std::result::Result<T, SubsceneError>;
