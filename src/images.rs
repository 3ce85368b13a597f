//! Poster image URL helpers
//!
//! OMDb poster URLs embed IMDb/Amazon resize parameters (e.g. `_SX300`).
//! Rewriting them yields a higher-resolution variant most of the time, but
//! nothing guarantees the derived URL exists, so this is a best-effort
//! transform with the original URL as fallback.

use regex::Regex;

use crate::models::UNAVAILABLE;

/// Served for titles with no usable poster
pub const PLACEHOLDER_POSTER: &str = "/placeholder.png";

/// Derive a higher-resolution variant of an OMDb poster URL
pub fn high_res_poster(url: &str) -> String {
    if url.trim().is_empty() || url == UNAVAILABLE {
        return PLACEHOLDER_POSTER.to_string();
    }

    if url.contains("amazon.com") || url.contains("imdb.com") {
        // Swap the trailing transformation block, e.g.
        // ...@@._V1_SX300.jpg -> ...@@._V1_FMjpg_UX1000_.jpg
        if let Ok(re) = Regex::new(r"_V1_.*\.jpg$") {
            if re.is_match(url) {
                return re.replace(url, "_V1_FMjpg_UX1000_.jpg").into_owned();
            }
        }
        return url.to_string();
    }

    // Other hosts: bump explicit _SX/_SY resize hints if present
    let mut out = url.to_string();
    if let Ok(re) = Regex::new(r"_SX\d+") {
        out = re.replace(&out, "_SX1080").into_owned();
    }
    if let Ok(re) = Regex::new(r"_SY\d+") {
        out = re.replace(&out, "_SY1080").into_owned();
    }
    out
}
