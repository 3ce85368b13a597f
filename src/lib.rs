//! StreamVault - movie & TV discovery from the terminal
//!
//! Queries OMDb for title metadata and YouTube for trailers, deduplicates
//! and filters the results, and shapes them into display-ready collections.
//!
//! # Modules
//!
//! - `models` - Domain entities (titles, trailers, search pages)
//! - `api` - Upstream clients (OMDb, YouTube)
//! - `cache` - Per-request in-flight memoization
//! - `pages` - Page modes and aggregation functions
//! - `images` - Best-effort high-res poster URL transform
//! - `config` - Credentials and config file
//! - `cli` / `commands` - Presentation seam

pub mod api;
pub mod cache;
pub mod cli;
pub mod commands;
pub mod config;
pub mod images;
pub mod models;
pub mod pages;

// Re-export commonly used types
pub use api::{OmdbClient, OmdbError, YoutubeClient};
pub use cache::{CacheKey, RequestCache};
pub use models::{MediaType, SearchPage, SourceRating, TitleDetail, TitleSummary, TrailerRef};
pub use pages::{BrowsePage, DetailPage, PageContext, PageMode, Rail, SortKey};
