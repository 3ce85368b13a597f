//! Data structures and types for StreamVault
//!
//! Contains the shared models used across the application:
//! - **Titles**: OMDb search summaries and full title details
//! - **Trailers**: YouTube trailer references
//! - **Search**: one page of search results as returned upstream

use serde::{Deserialize, Serialize};
use std::fmt;

/// Marker OMDb uses for any field it has no data for, posters included.
pub const UNAVAILABLE: &str = "N/A";

// =============================================================================
// Title Models (OMDb)
// =============================================================================

/// Media type discriminator for titles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Movie,
    Series,
    Episode,
}

impl MediaType {
    /// Parse the OMDb `Type` field. Anything unrecognized (OMDb also has
    /// "game") is treated as a movie rather than dropped.
    pub fn from_omdb(s: &str) -> Self {
        match s {
            "series" => MediaType::Series,
            "episode" => MediaType::Episode,
            _ => MediaType::Movie,
        }
    }

    /// Value for the OMDb `type` query parameter
    pub fn as_param(&self) -> &'static str {
        match self {
            MediaType::Movie => "movie",
            MediaType::Series => "series",
            MediaType::Episode => "episode",
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaType::Movie => write!(f, "Movie"),
            MediaType::Series => write!(f, "Series"),
            MediaType::Episode => write!(f, "Episode"),
        }
    }
}

/// One title as returned by an OMDb search
///
/// `imdb_id` is the unique key: any collection shown to a user is deduped
/// on it. OMDb years are strings ("2010", "2008–2013") and stay that way.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TitleSummary {
    pub imdb_id: String,
    pub title: String,
    pub year: String,
    pub media_type: MediaType,
    pub poster: String,
}

impl TitleSummary {
    /// Whether this title has a usable poster. Titles without one are
    /// excluded from grids and sliders (but not from detail pages).
    pub fn has_poster(&self) -> bool {
        !self.poster.trim().is_empty() && self.poster != UNAVAILABLE
    }
}

impl fmt::Display for TitleSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}) [{}] {}",
            self.title, self.year, self.media_type, self.imdb_id
        )
    }
}

/// A rating from one review source ("Internet Movie Database", "Metacritic", ...)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceRating {
    pub source: String,
    pub value: String,
}

/// Full title record from an OMDb detail lookup
///
/// Every string field may hold the literal "N/A"; check with [`is_known`]
/// before rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TitleDetail {
    pub imdb_id: String,
    pub title: String,
    pub year: String,
    pub media_type: MediaType,
    pub poster: String,
    pub rated: String,
    pub released: String,
    pub runtime: String,
    pub genres: Vec<String>,
    pub director: String,
    pub writer: String,
    pub actors: String,
    pub plot: String,
    pub language: String,
    pub country: String,
    pub awards: String,
    pub ratings: Vec<SourceRating>,
    pub imdb_rating: String,
    pub imdb_votes: String,
    pub box_office: String,
}

impl TitleDetail {
    /// Summary view of this detail, for reuse in slider/grid collections
    pub fn summary(&self) -> TitleSummary {
        TitleSummary {
            imdb_id: self.imdb_id.clone(),
            title: self.title.clone(),
            year: self.year.clone(),
            media_type: self.media_type,
            poster: self.poster.clone(),
        }
    }

    /// Whether this title has a usable poster
    pub fn has_poster(&self) -> bool {
        !self.poster.trim().is_empty() && self.poster != UNAVAILABLE
    }
}

impl fmt::Display for TitleDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.title, self.year)?;
        if is_known(&self.imdb_rating) {
            write!(f, " - ⭐ {}", self.imdb_rating)?;
        }
        Ok(())
    }
}

/// Whether an OMDb string field carries real data (non-empty and not "N/A")
pub fn is_known(value: &str) -> bool {
    !value.trim().is_empty() && value != UNAVAILABLE
}

// =============================================================================
// Trailer Models (YouTube)
// =============================================================================

/// Reference to a YouTube trailer. Lookup is best-effort; absence of a
/// trailer is a normal terminal state, never an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrailerRef {
    pub video_id: String,
    pub title: String,
    pub channel: String,
}

impl TrailerRef {
    /// Watch URL for this trailer
    pub fn watch_url(&self) -> String {
        format!("https://www.youtube.com/watch?v={}", self.video_id)
    }
}

impl fmt::Display for TrailerRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.title, self.channel)
    }
}

// =============================================================================
// Search Models
// =============================================================================

/// One page of OMDb search results
///
/// OMDb signals "no matches" with a 200 response carrying
/// `Response: "False"` and an error string; that surfaces here as
/// `success == false` with empty items, not as a client error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchPage {
    pub items: Vec<TitleSummary>,
    pub total_count: u32,
    pub success: bool,
    pub error: Option<String>,
}

// =============================================================================
// Unit Tests
// =============================================================================
