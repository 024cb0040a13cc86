//! Main Subscene Scraper API
//!
//! This module provides the high-level API for scraping subscene.com.
//! It combines the HTTP client with parsers to provide a simple interface
//! for searching, listing subtitles, and downloading subtitle archives.

use crate::client::SubsceneClient;
use crate::error::{Result, SubsceneError};
use crate::parser::{is_site_relative, parse_search_results, parse_subtitle_listing};
use crate::types::{ProductionEntry, QueryResult, SubtitleEntry};

/// Main scraper API for subscene.com
///
/// Provides methods for searching productions, listing their subtitles,
/// and downloading subtitle archives. All operations are asynchronous,
/// stateless single round trips; nothing is retained between calls.
///
/// # Example
/// ```no_run
/// use subscene_core::{QueryResult, SubsceneScraper};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let scraper = SubsceneScraper::new()?;
///
///     match scraper.query("Inception").await? {
///         QueryResult::Productions(groups) => {
///             println!("Found {} production groups", groups.len());
///         }
///         QueryResult::Subtitles(entries) => {
///             println!("Direct hit with {} subtitles", entries.len());
///         }
///     }
///
///     Ok(())
/// }
/// ```
pub struct SubsceneScraper {
    client: SubsceneClient,
}

impl SubsceneScraper {
    /// Create a new scraper with default configuration.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created.
    ///
    /// # Example
    /// ```
    /// use subscene_core::SubsceneScraper;
    ///
    /// let scraper = SubsceneScraper::new().expect("Failed to create scraper");
    /// ```
    pub fn new() -> Result<Self> {
        let client = SubsceneClient::new()?;
        Ok(Self { client })
    }

    /// Create a new scraper with a custom client.
    ///
    /// This is useful for testing or when you need custom client
    /// configuration (base URL, request rate, timeout).
    ///
    /// # Arguments
    /// * `client` - Pre-configured SubsceneClient instance
    pub fn with_client(client: SubsceneClient) -> Self {
        Self { client }
    }

    /// Search Subscene for a term.
    ///
    /// Depending on how ambiguous the term is, the site answers with either
    /// a disambiguation page of grouped productions or a subtitle listing
    /// directly; the returned [`QueryResult`] tag tells the caller which.
    ///
    /// # Arguments
    /// * `term` - Search term
    ///
    /// # Returns
    /// * `Ok(QueryResult::Productions)` - grouped productions to pick from
    /// * `Ok(QueryResult::Subtitles)` - subtitles for the single match
    /// * `Err(SubsceneError::InvalidUrl)` if the term is empty or
    ///   whitespace-only
    /// * `Err(SubsceneError::Parse)` if the page matches neither shape
    ///
    /// # Example
    /// ```no_run
    /// use subscene_core::SubsceneScraper;
    ///
    /// # async fn example() -> Result<(), subscene_core::SubsceneError> {
    /// let scraper = SubsceneScraper::new()?;
    /// let result = scraper.query("Inception").await?;
    /// if let Some(groups) = result.as_productions() {
    ///     for group in groups {
    ///         println!("{}: {} matches", group.label, group.entries.len());
    ///     }
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn query(&self, term: &str) -> Result<QueryResult> {
        // Validate term is not empty or whitespace-only
        let trimmed = term.trim();
        if trimmed.is_empty() {
            return Err(SubsceneError::InvalidUrl(
                "Search term cannot be empty".to_string(),
            ));
        }

        let path = search_path(trimmed);
        let html = self.client.fetch(&path).await?;
        parse_search_results(&html)
    }

    /// List all subtitles for a production.
    ///
    /// # Arguments
    /// * `production` - A production obtained from a previous [`query`](Self::query)
    ///
    /// # Returns
    /// * `Ok(Vec<SubtitleEntry>)` - subtitles in page order, empty when the
    ///   production currently has none
    /// * `Err(SubsceneError::InvalidUrl)` if the production's URL is not a
    ///   site-relative path
    /// * `Err(SubsceneError::Parse)` if the listing table is missing
    ///
    /// # Example
    /// ```no_run
    /// use subscene_core::{ProductionEntry, SubsceneScraper};
    ///
    /// # async fn example() -> Result<(), subscene_core::SubsceneError> {
    /// let scraper = SubsceneScraper::new()?;
    /// let production = ProductionEntry {
    ///     name: "Inception (2010)".to_string(),
    ///     url: "/subtitles/inception".to_string(),
    /// };
    /// let subtitles = scraper.query_for_production(&production).await?;
    /// for entry in subtitles {
    ///     println!("{} [{}]", entry.name, entry.language);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn query_for_production(
        &self,
        production: &ProductionEntry,
    ) -> Result<Vec<SubtitleEntry>> {
        validate_entry_url(&production.url)?;

        let html = self.client.fetch(&production.url).await?;
        parse_subtitle_listing(&html)
    }

    /// Download a subtitle archive.
    ///
    /// Returns the raw response body byte-for-byte, typically a compressed
    /// archive containing the subtitle files. Unpacking and persisting the
    /// archive is the caller's job.
    ///
    /// # Arguments
    /// * `subtitle` - A subtitle entry obtained from [`query`](Self::query)
    ///   or [`query_for_production`](Self::query_for_production)
    ///
    /// # Returns
    /// * `Ok(Vec<u8>)` - the raw archive bytes
    /// * `Err(SubsceneError::InvalidUrl)` if the entry's URL is not a
    ///   site-relative path
    /// * `Err(SubsceneError::NotFound)` if the identifier has gone stale
    ///   since the listing was fetched
    pub async fn download(&self, subtitle: &SubtitleEntry) -> Result<Vec<u8>> {
        validate_entry_url(&subtitle.url)?;

        self.client.fetch_bytes(&subtitle.url).await
    }
}

/// Build the search request path for a term.
fn search_path(term: &str) -> String {
    format!(
        "/subtitles/searchbytitle?query={}",
        urlencoding::encode(term)
    )
}

/// Reject entry identifiers that cannot resolve to a request URL.
fn validate_entry_url(url: &str) -> Result<()> {
    if is_site_relative(url) {
        Ok(())
    } else {
        Err(SubsceneError::InvalidUrl(url.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_scraper_creation() {
        let scraper = SubsceneScraper::new();
        assert!(scraper.is_ok());
    }

    #[test]
    fn test_search_path_encodes_term() {
        assert_eq!(
            search_path("Inception"),
            "/subtitles/searchbytitle?query=Inception"
        );
        assert_eq!(
            search_path("The Big Bang Theory"),
            "/subtitles/searchbytitle?query=The%20Big%20Bang%20Theory"
        );
    }

    #[tokio::test]
    async fn test_query_empty_term() {
        let scraper = SubsceneScraper::new().unwrap();
        let result = scraper.query("").await;

        match result {
            Err(SubsceneError::InvalidUrl(msg)) => {
                assert!(msg.contains("empty"));
            }
            _ => panic!("Expected InvalidUrl error"),
        }
    }

    #[tokio::test]
    async fn test_query_whitespace_term() {
        let scraper = SubsceneScraper::new().unwrap();
        let result = scraper.query("   ").await;

        match result {
            Err(SubsceneError::InvalidUrl(msg)) => {
                assert!(msg.contains("empty"));
            }
            _ => panic!("Expected InvalidUrl error"),
        }
    }

    #[tokio::test]
    async fn test_query_for_production_rejects_bad_url() {
        let scraper = SubsceneScraper::new().unwrap();
        let production = ProductionEntry {
            name: "Bad".to_string(),
            url: "https://elsewhere.example/x".to_string(),
        };

        let result = scraper.query_for_production(&production).await;
        assert!(matches!(result, Err(SubsceneError::InvalidUrl(_))));
    }

    #[tokio::test]
    async fn test_download_rejects_bad_url() {
        let scraper = SubsceneScraper::new().unwrap();
        let subtitle = SubtitleEntry {
            name: "Bad".to_string(),
            language: "English".to_string(),
            url: "".to_string(),
        };

        let result = scraper.download(&subtitle).await;
        assert!(matches!(result, Err(SubsceneError::InvalidUrl(_))));
    }

    proptest! {
        #[test]
        fn test_search_path_is_clean_ascii(term in ".*") {
            let path = search_path(&term);
            prop_assert!(path.is_ascii());
            prop_assert!(!path.contains(char::is_whitespace));
            prop_assert!(path.starts_with("/subtitles/searchbytitle?query="));
        }
    }
}
