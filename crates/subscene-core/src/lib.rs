//! Subscene Scraper Core Library
//!
//! This crate provides the core scraping functionality for subscene.com.
//!
//! # Features
//! - Search for productions by term, with automatic handling of the site's
//!   disambiguation vs direct-hit answer shapes
//! - List subtitles for a matched production
//! - Download subtitle archives as raw bytes
//! - Rate-limited HTTP client to avoid the server's anti-scraping throttle

pub mod client;
pub mod error;
pub mod parser;
pub mod scraper;
pub mod types;

// Re-export main types for convenience
pub use client::{ClientConfig, RateLimiter, SubsceneClient};
pub use error::{Result, SubsceneError};
pub use scraper::SubsceneScraper;
pub use types::{ProductionEntry, ProductionGroup, QueryResult, SubtitleEntry};
