//! Page aggregation
//!
//! One function per page mode. Each declares the upstream calls its mode
//! needs, issues them concurrently, then merges results with
//! dedup-by-imdb-id (first occurrence wins) and the poster filter before
//! shaping the final payload. A failed search branch degrades to an empty
//! collection and never takes sibling branches down; only single-title
//! detail resolution propagates failure to the page level.
//!
//! All upstream access goes through [`PageContext`], which routes every call
//! through the per-render [`RequestCache`].

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{Datelike, Utc};
use futures::future::join_all;
use serde::Serialize;

use crate::api::{OmdbClient, OmdbError, YoutubeClient};
use crate::cache::{CacheKey, RequestCache};
use crate::models::{MediaType, SearchPage, TitleDetail, TitleSummary, TrailerRef};

/// Result of a cached upstream call. Errors are shared so every caller of a
/// memoized operation receives the same failure.
pub type FetchResult<T> = Result<T, Arc<OmdbError>>;

/// Fixed ids for the home page hero slider
const FEATURED_IDS: [&str; 4] = ["tt0816692", "tt1375666", "tt0468569", "tt0133093"];

/// Pages spanned by the releases-by-year fetch
const RELEASE_PAGES: u32 = 3;

/// Cap for the "Best of {year}" rail
const BEST_OF_LIMIT: usize = 20;

// =============================================================================
// Page Modes
// =============================================================================

/// Collection ordering selector for the by-sort mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    Popular,
}

/// Discrete page-level intent, selected from query parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageMode {
    Home,
    Search(String),
    ByType(MediaType),
    BySort(SortKey),
}

impl PageMode {
    /// Select a mode from query parameters. Precedence: free-text query,
    /// then media type, then sort, otherwise home.
    pub fn from_params(
        query: Option<&str>,
        media_type: Option<&str>,
        sort: Option<&str>,
    ) -> Self {
        if let Some(q) = query.map(str::trim).filter(|q| !q.is_empty()) {
            return PageMode::Search(q.to_string());
        }
        match media_type {
            Some("series") => return PageMode::ByType(MediaType::Series),
            Some("movie") => return PageMode::ByType(MediaType::Movie),
            _ => {}
        }
        if sort == Some("popular") {
            return PageMode::BySort(SortKey::Popular);
        }
        PageMode::Home
    }
}

// =============================================================================
// Shaped Payloads
// =============================================================================

/// A titled row of titles, ready for a grid or slider
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rail {
    pub title: String,
    pub items: Vec<TitleSummary>,
}

/// Shaped payload for every browsing mode
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BrowsePage {
    /// Hero slider content; only the home mode fills this
    pub featured: Vec<TitleDetail>,
    pub rails: Vec<Rail>,
}

/// Shaped payload for a single-title page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailPage {
    pub detail: TitleDetail,
    pub trailer: Option<TrailerRef>,
}

// =============================================================================
// Page Context
// =============================================================================

/// Everything one page render needs: the upstream clients plus a fresh
/// [`RequestCache`]. Construct one per render; dropping it drops the cache.
pub struct PageContext {
    omdb: OmdbClient,
    youtube: YoutubeClient,
    cache: RequestCache,
}

impl PageContext {
    pub fn new(omdb: OmdbClient, youtube: YoutubeClient) -> Self {
        Self {
            omdb,
            youtube,
            cache: RequestCache::new(),
        }
    }

    pub fn cache(&self) -> &RequestCache {
        &self.cache
    }

    /// Cached title search
    pub async fn search(
        &self,
        query: &str,
        media_type: Option<MediaType>,
        year: Option<&str>,
        page: u32,
    ) -> FetchResult<SearchPage> {
        let key = CacheKey::new(
            "search",
            format!(
                "{}|{}|{}|{}",
                query,
                media_type.map(|t| t.as_param()).unwrap_or(""),
                year.unwrap_or(""),
                page
            ),
        );
        let omdb = self.omdb.clone();
        let query = query.to_string();
        let year = year.map(str::to_string);
        self.cache
            .get_or_fetch(key, move || async move {
                omdb.search_titles(&query, media_type, year.as_deref(), page)
                    .await
                    .map_err(Arc::new)
            })
            .await
    }

    /// Cached detail lookup
    pub async fn detail(&self, imdb_id: &str) -> FetchResult<TitleDetail> {
        let key = CacheKey::new("detail", imdb_id);
        let omdb = self.omdb.clone();
        let imdb_id = imdb_id.to_string();
        self.cache
            .get_or_fetch(key, move || async move {
                omdb.get_title_detail(&imdb_id).await.map_err(Arc::new)
            })
            .await
    }

    /// Cached trailer lookup; `None` is memoized like any other outcome
    pub async fn trailer(&self, title: &str, year: &str) -> Option<TrailerRef> {
        let key = CacheKey::new("trailer", format!("{}|{}", title, year));
        let youtube = self.youtube.clone();
        let title = title.to_string();
        let year = year.to_string();
        self.cache
            .get_or_fetch(key, move || async move {
                youtube.find_trailer(&title, &year).await
            })
            .await
    }
}

// =============================================================================
// Merge Helpers
// =============================================================================

/// Drop duplicate ids, keeping the first occurrence and its position
pub fn dedup_by_id(items: Vec<TitleSummary>) -> Vec<TitleSummary> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.imdb_id.clone()))
        .collect()
}

/// Keep only titles with a usable poster (grid/slider invariant)
pub fn with_posters(items: Vec<TitleSummary>) -> Vec<TitleSummary> {
    items.into_iter().filter(|item| item.has_poster()).collect()
}

/// Degrade a failed or unsuccessful search branch to an empty collection
fn items_or_empty(result: FetchResult<SearchPage>) -> Vec<TitleSummary> {
    result.map(|page| page.items).unwrap_or_default()
}

/// Build a display rail: dedup first, then the poster filter
fn rail(title: impl Into<String>, items: Vec<TitleSummary>) -> Rail {
    Rail {
        title: title.into(),
        items: with_posters(dedup_by_id(items)),
    }
}

/// Build a capped rail: dedup, cut to `limit`, then the poster filter.
/// The cap applies to the deduped sequence, so a poster-less entry inside
/// the cap shrinks the rail rather than pulling in entries from beyond it.
fn capped_rail(title: impl Into<String>, items: Vec<TitleSummary>, limit: usize) -> Rail {
    let mut items = dedup_by_id(items);
    items.truncate(limit);
    Rail {
        title: title.into(),
        items: with_posters(items),
    }
}

/// Current calendar year, drives the "{year} Releases" rails
pub fn current_year() -> i32 {
    Utc::now().year()
}

// =============================================================================
// Aggregation Functions (one per mode)
// =============================================================================

/// Entry point the presentation layer binds to
pub async fn render_page(ctx: &PageContext, mode: &PageMode) -> BrowsePage {
    match mode {
        PageMode::Home => home_page(ctx).await,
        PageMode::Search(query) => search_results_page(ctx, query).await,
        PageMode::ByType(MediaType::Movie) => movies_page(ctx).await,
        PageMode::ByType(_) => series_page(ctx).await,
        PageMode::BySort(SortKey::Popular) => popular_page(ctx).await,
    }
}

/// Home: featured detail fan-out, current-year multi-page releases, and
/// three topical searches, all in flight at once.
pub async fn home_page(ctx: &PageContext) -> BrowsePage {
    let year = current_year();
    let (featured, releases, marvel, netflix, star_wars, series) = tokio::join!(
        featured_titles(ctx),
        releases_by_year(ctx, year),
        ctx.search("Marvel", None, None, 1),
        ctx.search("Netflix", None, None, 1),
        ctx.search("Star Wars", None, None, 1),
        ctx.search("series", Some(MediaType::Series), None, 1),
    );

    let best_of = capped_rail(
        format!("Best of {}", year - 1),
        items_or_empty(star_wars),
        BEST_OF_LIMIT,
    );

    BrowsePage {
        featured,
        rails: vec![
            rail(format!("{} Releases", year), releases),
            best_of,
            rail("Marvel Universe", items_or_empty(marvel)),
            rail("Popular TV Shows", items_or_empty(series)),
            rail("Netflix Originals", items_or_empty(netflix)),
        ],
    }
}

/// Search mode: one query, one rail
pub async fn search_results_page(ctx: &PageContext, query: &str) -> BrowsePage {
    let result = ctx.search(query, None, None, 1).await;
    BrowsePage {
        featured: Vec::new(),
        rails: vec![rail(
            format!("Results for \"{}\"", query),
            items_or_empty(result),
        )],
    }
}

/// TV shows mode
pub async fn series_page(ctx: &PageContext) -> BrowsePage {
    let year = current_year().to_string();
    let (popular, new_series, hbo) = tokio::join!(
        ctx.search("series", Some(MediaType::Series), None, 1),
        ctx.search(&year, Some(MediaType::Series), None, 1),
        ctx.search("HBO", Some(MediaType::Series), None, 1),
    );

    BrowsePage {
        featured: Vec::new(),
        rails: vec![
            rail("Popular TV Shows", items_or_empty(popular)),
            rail(format!("New Series {}", year), items_or_empty(new_series)),
            rail("HBO Originals", items_or_empty(hbo)),
        ],
    }
}

/// Movies mode
pub async fn movies_page(ctx: &PageContext) -> BrowsePage {
    let year = current_year().to_string();
    let (popular, new_movies, action, comedy) = tokio::join!(
        ctx.search("movie", Some(MediaType::Movie), None, 1),
        ctx.search(&year, Some(MediaType::Movie), None, 1),
        ctx.search("action", Some(MediaType::Movie), None, 1),
        ctx.search("comedy", Some(MediaType::Movie), None, 1),
    );

    BrowsePage {
        featured: Vec::new(),
        rails: vec![
            rail("Popular Movies", items_or_empty(popular)),
            rail(format!("{} Releases", year), items_or_empty(new_movies)),
            rail("Action & Adventure", items_or_empty(action)),
            rail("Comedies", items_or_empty(comedy)),
        ],
    }
}

/// Popular sort mode
pub async fn popular_page(ctx: &PageContext) -> BrowsePage {
    let (trending, top_rated, classics) = tokio::join!(
        ctx.search("best", None, None, 1),
        ctx.search("top", None, None, 1),
        ctx.search("classic", None, None, 1),
    );

    BrowsePage {
        featured: Vec::new(),
        rails: vec![
            rail("Trending Now", items_or_empty(trending)),
            rail("Top Rated", items_or_empty(top_rated)),
            rail("Classics", items_or_empty(classics)),
        ],
    }
}

/// Single-title page. Detail failure (including NotFound) is the page's
/// terminal state; the trailer fallback makes at most two lookup attempts.
pub async fn title_page(ctx: &PageContext, imdb_id: &str) -> Result<DetailPage, Arc<OmdbError>> {
    // First trailer attempt runs on the id before the detail resolves
    let (detail, trailer) = tokio::join!(ctx.detail(imdb_id), ctx.trailer(imdb_id, ""));
    let detail = detail?;

    let trailer = match trailer {
        Some(t) => Some(t),
        None => ctx.trailer(&detail.title, &detail.year).await,
    };

    Ok(DetailPage { detail, trailer })
}

/// Fetch N pages of the given year's releases concurrently, concatenate in
/// page order (call-site order, never completion order), then dedup.
pub async fn releases_by_year(ctx: &PageContext, year: i32) -> Vec<TitleSummary> {
    let query = year.to_string();
    let fetches = (1..=RELEASE_PAGES).map(|page| ctx.search(&query, None, None, page));
    let pages = join_all(fetches).await;

    let mut all = Vec::new();
    for page in pages {
        all.extend(items_or_empty(page));
    }
    dedup_by_id(all)
}

/// Resolve the fixed featured ids; failed or poster-less entries are
/// dropped since this feeds the slider.
async fn featured_titles(ctx: &PageContext) -> Vec<TitleDetail> {
    let fetches = FEATURED_IDS.iter().map(|id| ctx.detail(id));
    join_all(fetches)
        .await
        .into_iter()
        .filter_map(Result::ok)
        .filter(|detail| detail.has_poster())
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================
