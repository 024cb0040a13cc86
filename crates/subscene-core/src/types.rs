//! Data types for the Subscene scraper
//!
//! This module contains all the core data structures used throughout the
//! library. All types implement Serialize and Deserialize so results can be
//! passed straight to JSON-speaking hosts.

use serde::{Deserialize, Serialize};

/// One matched title in a search disambiguation list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductionEntry {
    /// Display name of the production (e.g., "Inception (2010)")
    pub name: String,
    /// Site-relative URL of the production's subtitle listing
    pub url: String,
}

/// One downloadable subtitle listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubtitleEntry {
    /// Release name of the subtitle (e.g., "Inception.2010.720p")
    pub name: String,
    /// Subtitle language as displayed on the site (e.g., "English")
    pub language: String,
    /// Site-relative URL used to download the subtitle archive
    pub url: String,
}

/// One grouped section of a search disambiguation page
///
/// Subscene groups matching productions under section headings (year or
/// category labels). Groups keep the order they appear in on the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductionGroup {
    /// Section heading text (e.g., "2010" or "Exact")
    pub label: String,
    /// Productions listed under this heading, in page order
    pub entries: Vec<ProductionEntry>,
}

/// Result of a Subscene search
///
/// Subscene answers an ambiguous term with a disambiguation page of grouped
/// productions, and an unambiguous term with a subtitle listing directly.
/// The variant tells the caller which page came back; the payload of the
/// other shape does not exist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "items")]
pub enum QueryResult {
    /// Disambiguation page: grouped productions, one group per page section
    Productions(Vec<ProductionGroup>),
    /// Direct-hit page: subtitle listing for the single matching production
    Subtitles(Vec<SubtitleEntry>),
}

impl QueryResult {
    /// Returns the production groups if this is a disambiguation result.
    pub fn as_productions(&self) -> Option<&[ProductionGroup]> {
        match self {
            QueryResult::Productions(groups) => Some(groups),
            QueryResult::Subtitles(_) => None,
        }
    }

    /// Returns the subtitle entries if this is a direct-hit result.
    pub fn as_subtitles(&self) -> Option<&[SubtitleEntry]> {
        match self {
            QueryResult::Subtitles(entries) => Some(entries),
            QueryResult::Productions(_) => None,
        }
    }

    /// True when the search came back as a disambiguation page.
    pub fn is_productions(&self) -> bool {
        matches!(self, QueryResult::Productions(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_production_entry_serialization() {
        let entry = ProductionEntry {
            name: "Inception (2010)".to_string(),
            url: "/subtitles/inception".to_string(),
        };

        let json = serde_json::to_string(&entry).unwrap();
        let deserialized: ProductionEntry = serde_json::from_str(&json).unwrap();

        assert_eq!(deserialized, entry);
    }

    #[test]
    fn test_subtitle_entry_serialization() {
        let entry = SubtitleEntry {
            name: "Inception.2010.720p".to_string(),
            language: "English".to_string(),
            url: "/subtitle/123456".to_string(),
        };

        let json = serde_json::to_string(&entry).unwrap();
        let deserialized: SubtitleEntry = serde_json::from_str(&json).unwrap();

        assert_eq!(deserialized, entry);
    }

    #[test]
    fn test_query_result_tagged_serialization() {
        let result = QueryResult::Subtitles(vec![]);
        let json = serde_json::to_string(&result).unwrap();
        assert_eq!(json, r#"{"kind":"Subtitles","items":[]}"#);
    }

    #[test]
    fn test_query_result_accessors_match_variant() {
        let productions = QueryResult::Productions(vec![ProductionGroup {
            label: "2010".to_string(),
            entries: vec![ProductionEntry {
                name: "Inception".to_string(),
                url: "/subtitles/inception".to_string(),
            }],
        }]);

        assert!(productions.is_productions());
        assert!(productions.as_productions().is_some());
        assert!(productions.as_subtitles().is_none());

        let subtitles = QueryResult::Subtitles(vec![]);
        assert!(!subtitles.is_productions());
        assert!(subtitles.as_subtitles().is_some());
        assert!(subtitles.as_productions().is_none());
    }

    #[test]
    fn test_production_groups_keep_order() {
        let groups = vec![
            ProductionGroup {
                label: "Exact".to_string(),
                entries: vec![],
            },
            ProductionGroup {
                label: "Popular".to_string(),
                entries: vec![],
            },
        ];

        let result = QueryResult::Productions(groups);
        let labels: Vec<_> = result
            .as_productions()
            .unwrap()
            .iter()
            .map(|g| g.label.as_str())
            .collect();
        assert_eq!(labels, ["Exact", "Popular"]);
    }
}
