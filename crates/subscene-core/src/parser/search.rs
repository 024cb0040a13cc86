//! Search results parser for Subscene
//!
//! Parses HTML from the search results page. Subscene answers an ambiguous
//! term with a disambiguation page (grouped production lists under section
//! headings) and an unambiguous term with a subtitle listing directly, so
//! this parser has to recognize both shapes.

use scraper::{ElementRef, Html, Selector};

use crate::error::{Result, SubsceneError};
use crate::types::{ProductionEntry, ProductionGroup, QueryResult};

use super::normalize_text;
use super::subtitles::{has_subtitle_rows, parse_subtitle_rows};

/// Marker text Subscene shows when a search matches nothing.
const NO_RESULTS_MARKER: &str = "No results found";

/// Check that a scraped href is a well-formed site-relative path.
///
/// Subscene identifiers are absolute paths like `/subtitles/inception` or
/// `/subtitle/123456`. Anything else (empty href, javascript links, full
/// URLs to other hosts) cannot be resolved against the site base URL.
///
/// # Examples
/// ```
/// use subscene_core::parser::is_site_relative;
///
/// assert!(is_site_relative("/subtitles/inception"));
/// assert!(is_site_relative("/subtitle/123456"));
/// assert!(!is_site_relative("https://elsewhere.example/x"));
/// assert!(!is_site_relative(""));
/// ```
pub fn is_site_relative(url: &str) -> bool {
    // A leading slash followed by printable non-space ASCII only
    regex_lite::Regex::new(r"^/[!-~]+$")
        .map(|re| re.is_match(url))
        .unwrap_or(false)
}

/// Parse a Subscene search results page.
///
/// # Arguments
/// * `html` - Raw HTML content of the search results page
///
/// # Returns
/// * `Ok(QueryResult::Productions)` for a disambiguation page (empty when the
///   page explicitly reports no results)
/// * `Ok(QueryResult::Subtitles)` when the site redirected straight to a
///   subtitle listing
/// * `Err(SubsceneError::Parse)` when the page matches neither shape
pub fn parse_search_results(html: &str) -> Result<QueryResult> {
    let document = Html::parse_document(html);

    let container_selector = Selector::parse("div.search-result")
        .map_err(|e| SubsceneError::Parse(format!("Invalid selector: {:?}", e)))?;

    if let Some(container) = document.select(&container_selector).next() {
        return parse_disambiguation(&container).map(QueryResult::Productions);
    }

    // No disambiguation container: an unambiguous term makes the site
    // redirect straight to the production's subtitle listing. A bare table
    // is not enough evidence (interstitial pages carry layout tables), so
    // the page must show actual listing row cells.
    if has_subtitle_rows(&document)? {
        return parse_subtitle_rows(&document).map(QueryResult::Subtitles);
    }

    Err(SubsceneError::Parse(
        "page matched neither a search result list nor a subtitle listing".to_string(),
    ))
}

/// Parse the grouped sections of a disambiguation page.
///
/// The container holds alternating `h2` headings (grouping labels) and `ul`
/// lists of matching productions. Groups come back in page order.
fn parse_disambiguation(container: &ElementRef) -> Result<Vec<ProductionGroup>> {
    let mut groups: Vec<ProductionGroup> = Vec::new();
    let mut current_label: Option<String> = None;

    for child in container.children() {
        let Some(element) = ElementRef::wrap(child) else {
            continue;
        };

        match element.value().name() {
            "h2" => {
                current_label = Some(normalize_text(&element.text().collect::<String>()));
            }
            "ul" => {
                let entries = parse_production_list(&element)?;
                if entries.is_empty() {
                    continue;
                }
                let label = current_label.take().unwrap_or_default();
                groups.push(ProductionGroup { label, entries });
            }
            _ => {}
        }
    }

    if !groups.is_empty() {
        return Ok(groups);
    }

    // An explicit no-results page is a valid empty answer. A container with
    // neither entries nor the marker means the layout changed under us.
    let container_text = normalize_text(&container.text().collect::<String>());
    if container_text.contains(NO_RESULTS_MARKER) {
        Ok(Vec::new())
    } else {
        Err(SubsceneError::Parse(
            "search result container had no recognizable sections".to_string(),
        ))
    }
}

/// Parse one `ul` of production links.
fn parse_production_list(list: &ElementRef) -> Result<Vec<ProductionEntry>> {
    let item_selector = Selector::parse("li")
        .map_err(|e| SubsceneError::Parse(format!("Invalid selector: {:?}", e)))?;

    let mut entries = Vec::new();
    for item in list.select(&item_selector) {
        if let Some(entry) = parse_production_item(&item) {
            entries.push(entry);
        }
    }

    Ok(entries)
}

/// Parse a single production item. Items missing a usable link are skipped.
fn parse_production_item(item: &ElementRef) -> Option<ProductionEntry> {
    let link_selector = Selector::parse(".title a").ok()?;
    let link = item.select(&link_selector).next()?;

    let url = link.value().attr("href")?.to_string();
    if !is_site_relative(&url) {
        return None;
    }

    let name = normalize_text(&link.text().collect::<String>());
    if name.is_empty() {
        return None;
    }

    Some(ProductionEntry { name, url })
}
