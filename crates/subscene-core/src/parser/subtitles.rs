//! Subtitle listing parser for Subscene
//!
//! Parses HTML from a production's subtitle listing page. The same table
//! layout appears when a search redirects straight to a listing, so the
//! search parser reuses these functions.

use scraper::{ElementRef, Html, Selector};

use crate::error::{Result, SubsceneError};
use crate::types::SubtitleEntry;

use super::normalize_text;
use super::search::is_site_relative;

/// Parse a subtitle listing page.
///
/// # Arguments
/// * `html` - Raw HTML content of the listing page
///
/// # Returns
/// * `Ok(Vec<SubtitleEntry>)` with parsed rows - empty when the production
///   currently has no subtitles, which is a success, not an error
/// * `Err(SubsceneError::Parse)` when the listing table is missing entirely
pub fn parse_subtitle_listing(html: &str) -> Result<Vec<SubtitleEntry>> {
    let document = Html::parse_document(html);

    if !has_subtitle_table(&document)? {
        return Err(SubsceneError::Parse(
            "subtitle listing table not found".to_string(),
        ));
    }

    parse_subtitle_rows(&document)
}

/// Check whether the document contains the subtitle listing table.
///
/// Distinguishes "listing with zero rows" (valid) from "no listing at all"
/// (layout change or error page).
pub(crate) fn has_subtitle_table(document: &Html) -> Result<bool> {
    let table_selector = Selector::parse("table")
        .map_err(|e| SubsceneError::Parse(format!("Invalid selector: {:?}", e)))?;
    Ok(document.select(&table_selector).next().is_some())
}

/// Check whether the document contains actual subtitle listing rows.
///
/// Stricter than [`has_subtitle_table`]: pages unrelated to subtitles
/// (interstitials, error pages) can carry incidental layout tables, so
/// direct-hit detection keys on the listing's own row cells.
pub(crate) fn has_subtitle_rows(document: &Html) -> Result<bool> {
    let cell_selector = Selector::parse("table td.a1")
        .map_err(|e| SubsceneError::Parse(format!("Invalid selector: {:?}", e)))?;
    Ok(document.select(&cell_selector).next().is_some())
}

/// Parse all subtitle rows in the document's listing table.
pub(crate) fn parse_subtitle_rows(document: &Html) -> Result<Vec<SubtitleEntry>> {
    // Each row links the subtitle page from the first column, with the
    // language and release name in successive spans
    let row_selector = Selector::parse("table td.a1 a")
        .map_err(|e| SubsceneError::Parse(format!("Invalid selector: {:?}", e)))?;

    let mut entries = Vec::new();
    for link in document.select(&row_selector) {
        if let Some(entry) = parse_subtitle_item(&link) {
            entries.push(entry);
        }
    }

    Ok(entries)
}

/// Parse a single subtitle row link. Rows missing pieces are skipped.
fn parse_subtitle_item(link: &ElementRef) -> Option<SubtitleEntry> {
    let url = link.value().attr("href")?.to_string();
    if !is_site_relative(&url) {
        return None;
    }

    let span_selector = Selector::parse("span").ok()?;
    let mut spans = link.select(&span_selector);

    let language = normalize_text(&spans.next()?.text().collect::<String>());
    let name = normalize_text(&spans.next()?.text().collect::<String>());
    if language.is_empty() || name.is_empty() {
        return None;
    }

    Some(SubtitleEntry {
        name,
        language,
        url,
    })
}
