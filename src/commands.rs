//! CLI Command Handlers
//!
//! Thin presentation seam over the aggregation layer: each handler builds a
//! fresh `PageContext` (one render, one cache), runs the mode's aggregation
//! function and renders the shaped payload as text or JSON.

use crate::api::{OmdbClient, OmdbError, YoutubeClient};
use crate::cli::{ConfigCmd, ExitCode, Output, SearchCmd, TitleCmd};
use crate::config::Config;
use crate::images::high_res_poster;
use crate::models::{is_known, TitleDetail};
use crate::pages::{self, BrowsePage, PageContext, PageMode, SortKey};

/// Build the per-render context from configured credentials, announcing
/// degraded mode up front
fn page_context(output: &Output) -> PageContext {
    let config = Config::load();
    let omdb = OmdbClient::new(config.omdb_api_key);
    let youtube = YoutubeClient::new(config.youtube_api_key);

    if !omdb.has_credential() {
        output.info("No OMDb key configured; serving placeholder data.");
    }
    if !youtube.has_credential() {
        output.info("No YouTube key configured; trailer lookup disabled.");
    }

    PageContext::new(omdb, youtube)
}

// =============================================================================
// Browsing Commands
// =============================================================================

pub async fn browse_cmd(output: &Output) -> ExitCode {
    output.info("Loading home page...");
    run_mode(PageMode::Home, output).await
}

pub async fn search_cmd(cmd: SearchCmd, output: &Output) -> ExitCode {
    output.info(format!("Searching for: {}", cmd.query));
    run_mode(PageMode::Search(cmd.query), output).await
}

pub async fn series_cmd(output: &Output) -> ExitCode {
    output.info("Loading TV shows...");
    run_mode(PageMode::ByType(crate::models::MediaType::Series), output).await
}

pub async fn movies_cmd(output: &Output) -> ExitCode {
    output.info("Loading movies...");
    run_mode(PageMode::ByType(crate::models::MediaType::Movie), output).await
}

pub async fn popular_cmd(output: &Output) -> ExitCode {
    output.info("Loading popular titles...");
    run_mode(PageMode::BySort(SortKey::Popular), output).await
}

async fn run_mode(mode: PageMode, output: &Output) -> ExitCode {
    let ctx = page_context(output);
    let page = pages::render_page(&ctx, &mode).await;

    if output.json {
        if let Err(e) = output.print_json(&page) {
            return output.error(format!("Failed to serialize: {}", e), ExitCode::Error);
        }
    } else {
        render_browse(&page);
    }
    ExitCode::Success
}

fn render_browse(page: &BrowsePage) {
    if !page.featured.is_empty() {
        println!("== Featured ==");
        for detail in &page.featured {
            println!("  ★ {}", detail.summary());
        }
    }

    for rail in &page.rails {
        println!();
        println!("== {} ==", rail.title);
        if rail.items.is_empty() {
            // explicit empty state, distinct from any loading message
            println!("  No results.");
        } else {
            for item in &rail.items {
                println!("  {}", item);
            }
        }
    }
}

// =============================================================================
// Config Command
// =============================================================================

/// Show credential status, or persist any keys passed via flags
pub fn config_cmd(cmd: ConfigCmd, output: &Output) -> ExitCode {
    let mut config = Config::load();

    if !config.update_keys(cmd.omdb_key, cmd.youtube_key) {
        let status = |key: &Option<String>| if key.is_some() { "configured" } else { "not set" };
        println!("OMDb key:    {}", status(&config.omdb_api_key));
        println!("YouTube key: {}", status(&config.youtube_api_key));
        return ExitCode::Success;
    }

    match config.save() {
        Ok(()) => {
            output.info("Configuration saved.");
            ExitCode::Success
        }
        Err(e) => output.error(format!("Failed to save config: {}", e), ExitCode::Error),
    }
}

// =============================================================================
// Title Command
// =============================================================================

pub async fn title_cmd(cmd: TitleCmd, output: &Output) -> ExitCode {
    let ctx = page_context(output);
    output.info(format!("Looking up: {}", cmd.id));

    match pages::title_page(&ctx, &cmd.id).await {
        Ok(page) => {
            if output.json {
                if let Err(e) = output.print_json(&page) {
                    return output.error(format!("Failed to serialize: {}", e), ExitCode::Error);
                }
            } else {
                render_detail(&page.detail);
                if let Some(trailer) = &page.trailer {
                    println!();
                    println!("Trailer: {} ({})", trailer, trailer.watch_url());
                }
            }
            ExitCode::Success
        }
        Err(e) if matches!(*e, OmdbError::NotFound) => output.error(
            format!(
                "Title {} not found. Run `streamvault browse` to get back home.",
                cmd.id
            ),
            ExitCode::NotFound,
        ),
        Err(e) => output.error(format!("Detail lookup failed: {}", e), ExitCode::NetworkError),
    }
}

fn render_detail(detail: &TitleDetail) {
    println!("{} ({}) [{}]", detail.title, detail.year, detail.media_type);

    let mut meta = Vec::new();
    for value in [&detail.rated, &detail.runtime, &detail.released] {
        if is_known(value) {
            meta.push(value.as_str());
        }
    }
    if !meta.is_empty() {
        println!("{}", meta.join(" • "));
    }

    if is_known(&detail.imdb_rating) {
        let votes = if is_known(&detail.imdb_votes) {
            format!(" ({} votes)", detail.imdb_votes)
        } else {
            String::new()
        };
        println!("⭐ {}/10{}", detail.imdb_rating, votes);
    }

    if !detail.genres.is_empty() {
        println!("Genres: {}", detail.genres.join(", "));
    }
    if is_known(&detail.plot) {
        println!();
        println!("{}", detail.plot);
        println!();
    }

    for (label, value) in [
        ("Director", &detail.director),
        ("Writer", &detail.writer),
        ("Cast", &detail.actors),
        ("Language", &detail.language),
        ("Country", &detail.country),
        ("Box Office", &detail.box_office),
        ("Awards", &detail.awards),
    ] {
        if is_known(value) {
            println!("{}: {}", label, value);
        }
    }

    if !detail.ratings.is_empty() {
        println!("Ratings:");
        for rating in &detail.ratings {
            println!("  {}: {}", rating.source, rating.value);
        }
    }

    println!("Poster: {}", high_res_poster(&detail.poster));
    println!("IMDb: https://www.imdb.com/title/{}", detail.imdb_id);
}
