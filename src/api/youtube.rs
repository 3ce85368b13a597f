//! YouTube Data API client
//!
//! Single concern: find the official trailer for a title. Trailer lookup is
//! best-effort everywhere it is used, so this client never returns an error:
//! missing key, transport failure, non-2xx, unparseable body and zero hits
//! all resolve to `None`.

use std::time::Duration;

use serde::Deserialize;

use crate::models::TrailerRef;

/// YouTube search client restricted to "official trailer" lookups
#[derive(Debug, Clone)]
pub struct YoutubeClient {
    api_key: Option<String>,
    base_url: String,
    client: reqwest::Client,
}

impl YoutubeClient {
    /// Create a new client. `None` for the key disables trailer lookup.
    pub fn new(api_key: Option<String>) -> Self {
        Self::with_base_url(api_key, "https://www.googleapis.com/youtube/v3")
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

    /// Search for the official trailer of `title` (`year` may be empty).
    /// Returns at most one video; `None` is a normal terminal state.
    pub async fn find_trailer(&self, title: &str, year: &str) -> Option<TrailerRef> {
        let api_key = self.api_key.as_deref()?;

        let search_query = format!("{} {} official trailer", title, year);
        let url = format!("{}/search", self.base_url);
        let params: Vec<(&str, String)> = vec![
            ("part", "snippet".to_string()),
            ("maxResults", "1".to_string()),
            ("q", search_query.trim().to_string()),
            ("type", "video".to_string()),
            ("videoType", "official".to_string()),
            ("key", api_key.to_string()),
        ];

        let response = self.client.get(&url).query(&params).send().await.ok()?;
        if !response.status().is_success() {
            return None;
        }

        let data: SearchResponseRaw = response.json().await.ok()?;
        data.items.into_iter().next().and_then(|v| v.into_trailer())
    }
}

// =============================================================================
// Response Structures (internal deserialization)
// =============================================================================

#[derive(Debug, Deserialize)]
struct SearchResponseRaw {
    #[serde(default)]
    items: Vec<VideoRaw>,
}

#[derive(Debug, Deserialize)]
struct VideoRaw {
    id: VideoIdRaw,
    snippet: SnippetRaw,
}

impl VideoRaw {
    fn into_trailer(self) -> Option<TrailerRef> {
        Some(TrailerRef {
            video_id: self.id.video_id?,
            title: self.snippet.title,
            channel: self.snippet.channel_title,
        })
    }
}

#[derive(Debug, Deserialize)]
struct VideoIdRaw {
    #[serde(rename = "videoId")]
    video_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SnippetRaw {
    #[serde(default)]
    title: String,
    #[serde(rename = "channelTitle", default)]
    channel_title: String,
}
