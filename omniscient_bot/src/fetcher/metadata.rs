use std::time::Duration;

use serde::Deserialize;

use super::{ContentFetcher, FetchError};
use crate::types::VideoId;

const VIDEOS_ENDPOINT: &str = "https://www.googleapis.com/youtube/v3/videos";

/// Descriptions longer than this get cut off with an ellipsis.
const MAX_DESCRIPTION_CHARS: usize = 300;

#[derive(Debug, Deserialize)]
struct VideosResponse {
    #[serde(default)]
    items: Vec<VideoItem>,
}

#[derive(Debug, Deserialize)]
struct VideoItem {
    snippet: Snippet,
}

#[derive(Debug, Deserialize)]
struct Snippet {
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
}

/// Fetches a video's title and description from the YouTube Data API.
pub struct MetadataFetcher {
    client: reqwest::Client,
    api_key: String,
}

impl MetadataFetcher {
    pub fn new(api_key: String) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .connect_timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self { client, api_key })
    }
}

impl ContentFetcher for MetadataFetcher {
    async fn fetch(&self, id: &VideoId) -> Result<String, FetchError> {
        let response = self
            .client
            .get(VIDEOS_ENDPOINT)
            .query(&[
                ("part", "snippet"),
                ("id", id.as_str()),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .await
            .map_err(|e| {
                log::warn!("Transport error fetching metadata for {}: {}", id, e);
                FetchError::Network
            })?;

        let body = response.text().await.map_err(|e| {
            log::warn!("Failed reading metadata response for {}: {}", id, e);
            FetchError::Network
        })?;

        let parsed: VideosResponse = serde_json::from_str(&body).map_err(|e| {
            log::warn!("Malformed metadata response for {}: {}", id, e);
            FetchError::Malformed
        })?;

        let Some(item) = parsed.items.first() else {
            return Err(FetchError::NotFound);
        };

        Ok(render_snippet(&item.snippet.title, &item.snippet.description))
    }
}

fn render_snippet(title: &str, description: &str) -> String {
    let description = truncate_description(description);
    format!("**Video Title:** {}\n**Description:** {}", title, description)
}

fn truncate_description(description: &str) -> String {
    if description.chars().count() <= MAX_DESCRIPTION_CHARS {
        return description.to_string();
    }

    let mut truncated: String = description.chars().take(MAX_DESCRIPTION_CHARS).collect();
    truncated.push_str("...");
    truncated
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rendering_a_snippet() {
        assert_eq!(
            render_snippet("Test Video", "A test video."),
            "**Video Title:** Test Video\n**Description:** A test video."
        );
    }

    #[test]
    fn long_descriptions_truncated() {
        let long = "x".repeat(500);
        let rendered = truncate_description(&long);
        assert_eq!(rendered.chars().count(), 303);
        assert!(rendered.ends_with("..."));

        let exactly = "y".repeat(300);
        assert_eq!(truncate_description(&exactly), exactly);
    }

    #[test]
    fn empty_items_means_not_found() {
        let parsed: VideosResponse = serde_json::from_str(r#"{"items": []}"#).unwrap();
        assert!(parsed.items.is_empty());

        // Items absent entirely also deserializes to an empty list.
        let parsed: VideosResponse = serde_json::from_str(r#"{}"#).unwrap();
        assert!(parsed.items.is_empty());
    }

    #[test]
    fn snippet_deserialization() {
        let body = r#"{"items":[{"snippet":{"title":"Test Video","description":"A test video.","channelTitle":"someone"}}]}"#;
        let parsed: VideosResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.items[0].snippet.title, "Test Video");
        assert_eq!(parsed.items[0].snippet.description, "A test video.");
    }
}
