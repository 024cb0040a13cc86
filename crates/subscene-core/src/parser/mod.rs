//! HTML parsers for Subscene pages
//!
//! This module contains parsers for extracting data from Subscene HTML pages:
//! - `search`: Parse the search results page (disambiguation or direct hit)
//! - `subtitles`: Parse a subtitle listing page

pub mod search;
pub mod subtitles;

// Re-export main parsing functions
pub use search::{is_site_relative, parse_search_results};
pub use subtitles::parse_subtitle_listing;

/// Collapse whitespace runs in scraped text into single spaces.
///
/// Text nodes on Subscene pages carry the indentation of the surrounding
/// markup, so raw `text()` output is full of newlines and tabs.
pub(crate) fn normalize_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
