//! OMDb API client
//!
//! Provides title search and full detail lookups.
//! API docs: https://www.omdbapi.com/
//!
//! Without an API key the client runs in degraded mode and serves a
//! deterministic placeholder result set so the rest of the app stays
//! exercisable.

use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::models::{MediaType, SearchPage, SourceRating, TitleDetail, TitleSummary, UNAVAILABLE};

/// OMDb API error types
#[derive(Error, Debug)]
pub enum OmdbError {
    /// OMDb answered 200 with its `Response: "False"` sentinel on a detail
    /// lookup; the id is unknown. Recoverable, not a transport failure.
    #[error("title not found")]
    NotFound,

    #[error("OMDb API error: HTTP {0}")]
    Status(u16),

    #[error("invalid response: {0}")]
    InvalidResponse(String),

    #[error("request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),
}

/// OMDb API client
#[derive(Debug, Clone)]
pub struct OmdbClient {
    api_key: Option<String>,
    base_url: String,
    client: reqwest::Client,
}

impl OmdbClient {
    /// Create a new OMDb client. `None` for the key enables degraded mode.
    pub fn new(api_key: Option<String>) -> Self {
        Self::with_base_url(api_key, "https://www.omdbapi.com")
    }

    /// Create a client with a custom base URL (for testing)
    pub fn with_base_url(api_key: Option<String>, base_url: impl Into<String>) -> Self {
        Self {
            api_key,
            base_url: base_url.into(),
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(10))
                .build()
                .unwrap_or_default(),
        }
    }

    /// Whether the client has a real credential
    pub fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }

    /// Search titles by free-text query, with optional type and year filters.
    ///
    /// A 200 response with `Response: "False"` (no matches, bad query) maps
    /// to an unsuccessful [`SearchPage`] with empty items; only transport
    /// problems and non-2xx statuses are errors.
    pub async fn search_titles(
        &self,
        query: &str,
        media_type: Option<MediaType>,
        year: Option<&str>,
        page: u32,
    ) -> Result<SearchPage, OmdbError> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Ok(placeholder_search(query, year));
        };

        let mut params: Vec<(&str, String)> = vec![
            ("apikey", api_key.to_string()),
            ("s", query.to_string()),
            ("page", page.to_string()),
        ];
        if let Some(t) = media_type {
            params.push(("type", t.as_param().to_string()));
        }
        if let Some(y) = year {
            params.push(("y", y.to_string()));
        }

        let raw: SearchResponseRaw = self.get(&params).await?;
        Ok(raw.into_page())
    }

    /// Look up the full record for one title by IMDb id.
    ///
    /// Malformed ids are not validated locally; OMDb answers them with its
    /// not-found sentinel, which becomes [`OmdbError::NotFound`].
    pub async fn get_title_detail(&self, imdb_id: &str) -> Result<TitleDetail, OmdbError> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Ok(placeholder_detail(imdb_id));
        };

        let params: Vec<(&str, String)> = vec![
            ("apikey", api_key.to_string()),
            ("i", imdb_id.to_string()),
            ("plot", "full".to_string()),
        ];

        let raw: DetailResponseRaw = self.get(&params).await?;
        if raw.response != "True" {
            return Err(OmdbError::NotFound);
        }
        Ok(raw.into_detail())
    }

    /// Make a GET request against the OMDb endpoint and parse the body
    async fn get<T: for<'de> Deserialize<'de>>(
        &self,
        params: &[(&str, String)],
    ) -> Result<T, OmdbError> {
        let response = self
            .client
            .get(&self.base_url)
            .query(params)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(OmdbError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        serde_json::from_str(&body)
            .map_err(|e| OmdbError::InvalidResponse(format!("JSON parse error: {}", e)))
    }
}

// =============================================================================
// Degraded Mode Placeholders
// =============================================================================

/// Deterministic placeholder search results used when no API key is set.
/// Always 4 titles with ids tt1 through tt4.
fn placeholder_search(query: &str, year: Option<&str>) -> SearchPage {
    let recent = year.unwrap_or("2025");
    let mock = |n: u32, year: &str, media_type: MediaType| TitleSummary {
        imdb_id: format!("tt{}", n),
        title: format!("Mock {} {}", query, n),
        year: year.to_string(),
        media_type,
        poster: UNAVAILABLE.to_string(),
    };

    SearchPage {
        items: vec![
            mock(1, recent, MediaType::Movie),
            mock(2, recent, MediaType::Series),
            mock(3, "2024", MediaType::Movie),
            mock(4, "2024", MediaType::Series),
        ],
        total_count: 4,
        success: true,
        error: None,
    }
}

/// Placeholder detail record used when no API key is set
fn placeholder_detail(imdb_id: &str) -> TitleDetail {
    TitleDetail {
        imdb_id: imdb_id.to_string(),
        title: "Mock Movie Detail".to_string(),
        year: "2025".to_string(),
        media_type: MediaType::Movie,
        poster: UNAVAILABLE.to_string(),
        rated: "PG-13".to_string(),
        released: "01 Jan 2025".to_string(),
        runtime: "120 min".to_string(),
        genres: vec!["Drama".to_string()],
        director: "Mock Director".to_string(),
        writer: "Mock Writer".to_string(),
        actors: "Mock Actor".to_string(),
        plot: "This is a mock plot for testing without an API key.".to_string(),
        language: "English".to_string(),
        country: "USA".to_string(),
        awards: UNAVAILABLE.to_string(),
        ratings: Vec::new(),
        imdb_rating: "8.5".to_string(),
        imdb_votes: UNAVAILABLE.to_string(),
        box_office: UNAVAILABLE.to_string(),
    }
}

// =============================================================================
// Response Structures (internal deserialization)
// =============================================================================

#[derive(Debug, Deserialize)]
struct SearchResponseRaw {
    #[serde(rename = "Search", default)]
    search: Vec<TitleSummaryRaw>,
    #[serde(rename = "totalResults", default)]
    total_results: Option<String>,
    #[serde(rename = "Response", default)]
    response: String,
    #[serde(rename = "Error", default)]
    error: Option<String>,
}

impl SearchResponseRaw {
    fn into_page(self) -> SearchPage {
        let success = self.response == "True";
        SearchPage {
            items: self.search.into_iter().map(|r| r.into_summary()).collect(),
            total_count: self
                .total_results
                .and_then(|t| t.parse().ok())
                .unwrap_or(0),
            success,
            error: self.error,
        }
    }
}

#[derive(Debug, Deserialize)]
struct TitleSummaryRaw {
    #[serde(rename = "Title", default)]
    title: String,
    #[serde(rename = "Year", default)]
    year: String,
    #[serde(rename = "imdbID", default)]
    imdb_id: String,
    #[serde(rename = "Type", default)]
    kind: String,
    #[serde(rename = "Poster", default)]
    poster: String,
}

impl TitleSummaryRaw {
    fn into_summary(self) -> TitleSummary {
        TitleSummary {
            imdb_id: self.imdb_id,
            title: self.title,
            year: self.year,
            media_type: MediaType::from_omdb(&self.kind),
            poster: self.poster,
        }
    }
}

#[derive(Debug, Deserialize)]
struct DetailResponseRaw {
    #[serde(rename = "Title", default)]
    title: String,
    #[serde(rename = "Year", default)]
    year: String,
    #[serde(rename = "imdbID", default)]
    imdb_id: String,
    #[serde(rename = "Type", default)]
    kind: String,
    #[serde(rename = "Poster", default)]
    poster: String,
    #[serde(rename = "Rated", default)]
    rated: String,
    #[serde(rename = "Released", default)]
    released: String,
    #[serde(rename = "Runtime", default)]
    runtime: String,
    #[serde(rename = "Genre", default)]
    genre: String,
    #[serde(rename = "Director", default)]
    director: String,
    #[serde(rename = "Writer", default)]
    writer: String,
    #[serde(rename = "Actors", default)]
    actors: String,
    #[serde(rename = "Plot", default)]
    plot: String,
    #[serde(rename = "Language", default)]
    language: String,
    #[serde(rename = "Country", default)]
    country: String,
    #[serde(rename = "Awards", default)]
    awards: String,
    #[serde(rename = "Ratings", default)]
    ratings: Vec<RatingRaw>,
    #[serde(rename = "imdbRating", default)]
    imdb_rating: String,
    #[serde(rename = "imdbVotes", default)]
    imdb_votes: String,
    #[serde(rename = "BoxOffice", default)]
    box_office: String,
    #[serde(rename = "Response", default)]
    response: String,
}

impl DetailResponseRaw {
    fn into_detail(self) -> TitleDetail {
        // OMDb sends genres as one comma-separated string
        let genres = if self.genre.is_empty() || self.genre == UNAVAILABLE {
            Vec::new()
        } else {
            self.genre.split(", ").map(str::to_string).collect()
        };

        TitleDetail {
            imdb_id: self.imdb_id,
            title: self.title,
            year: self.year,
            media_type: MediaType::from_omdb(&self.kind),
            poster: self.poster,
            rated: self.rated,
            released: self.released,
            runtime: self.runtime,
            genres,
            director: self.director,
            writer: self.writer,
            actors: self.actors,
            plot: self.plot,
            language: self.language,
            country: self.country,
            awards: self.awards,
            ratings: self
                .ratings
                .into_iter()
                .map(|r| SourceRating {
                    source: r.source,
                    value: r.value,
                })
                .collect(),
            imdb_rating: self.imdb_rating,
            imdb_votes: self.imdb_votes,
            box_office: self.box_office,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RatingRaw {
    #[serde(rename = "Source", default)]
    source: String,
    #[serde(rename = "Value", default)]
    value: String,
}
