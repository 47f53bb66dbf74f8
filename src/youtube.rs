use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::models::VideoResult;

#[derive(Debug, Error)]
pub enum VideoError {
    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("status={status} body={body}")]
    Status { status: u16, body: String },
    #[error("could not decode search response: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    id: VideoId,
    snippet: Snippet,
}

#[derive(Debug, Deserialize)]
struct VideoId {
    #[serde(rename = "videoId")]
    video_id: String,
}

#[derive(Debug, Deserialize)]
struct Snippet {
    title: String,
    thumbnails: Thumbnails,
}

#[derive(Debug, Deserialize)]
struct Thumbnails {
    medium: Thumbnail,
}

#[derive(Debug, Deserialize)]
struct Thumbnail {
    url: String,
}

/// Looks up one short how-to video for a recipe's search keywords.
pub struct YouTubeClient {
    client: Client,
    api_key: Option<String>,
    base_url: String,
}

impl YouTubeClient {
    pub fn new(client: Client, api_key: Option<String>, base_url: String) -> Self {
        Self { client, api_key, base_url }
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(config.provider_timeout).build()?;
        Ok(Self::new(client, config.youtube_api_key.clone(), config.youtube_api_base.clone()))
    }

    /// `Ok(None)` when no key is configured or the search came back empty.
    pub async fn search(&self, keywords: &str) -> Result<Option<VideoResult>, VideoError> {
        let Some(api_key) = self.api_key.as_deref() else {
            warn!("YouTube API key not provided");
            return Ok(None);
        };

        let url = format!("{}/search", self.base_url.trim_end_matches('/'));
        let query = format!("{keywords} recipe under 5 minutes");
        info!("🎬 Searching videos for: {}", query);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("part", "snippet"),
                ("maxResults", "1"),
                ("q", query.as_str()),
                ("type", "video"),
                ("videoDuration", "short"),
                ("key", api_key),
            ])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(VideoError::Status { status: status.as_u16(), body });
        }

        let parsed: SearchResponse = serde_json::from_str(&body)?;
        Ok(parsed.items.into_iter().next().map(|item| VideoResult {
            id: item.id.video_id,
            title: item.snippet.title,
            thumbnail: item.snippet.thumbnails.medium.url,
        }))
    }
}
