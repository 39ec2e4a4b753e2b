//! Client for fetching YouTube caption tracks. There is no official
//! API for this; we scrape the watch page for its caption track list
//! and then fetch the timedtext XML the same way the web player does.

use std::{fmt::Display, sync::LazyLock, time::Duration};

use regex::Regex;
use url::Url;

use crate::types::VideoId;

/// One timed fragment of spoken captions.
#[derive(Debug, Clone, PartialEq)]
pub struct CaptionFragment {
    pub text: String,
    pub start: f64,
    pub duration: f64,
}

#[derive(Debug)]
pub enum TranscriptError {
    /// The video exists but has no caption tracks.
    TranscriptsDisabled,
    /// The video is gone, private, or never existed.
    VideoUnavailable,
    Network(reqwest::Error),
    /// We got a response but couldn't make sense of it.
    Malformed,
}

impl Display for TranscriptError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TranscriptError::TranscriptsDisabled => {
                write!(f, "captions are disabled for this video")
            }
            TranscriptError::VideoUnavailable => write!(f, "video is unavailable"),
            TranscriptError::Network(e) => write!(f, "network error: {}", e),
            TranscriptError::Malformed => write!(f, "unexpected response shape"),
        }
    }
}

impl std::error::Error for TranscriptError {}

impl From<reqwest::Error> for TranscriptError {
    fn from(value: reqwest::Error) -> Self {
        TranscriptError::Network(value)
    }
}

/// First caption track's base URL inside the player response JSON
/// embedded in the watch page.
static CAPTION_TRACK_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""captionTracks":\[\{"baseUrl":"([^"]+)""#).expect("Regex will always be valid")
});

/// `<text start="0.0" dur="1.0">words</text>` fragments of the
/// timedtext document.
static TIMEDTEXT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)<text start="([0-9.]+)" dur="([0-9.]+)"[^>]*>(.*?)</text>"#)
        .expect("Regex will always be valid")
});

pub struct TranscriptClient {
    client: reqwest::Client,
}

impl TranscriptClient {
    pub fn new() -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .connect_timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self { client })
    }

    /// Fetch the video's captions as an ordered list of timed fragments.
    pub async fn fetch(&self, id: &VideoId) -> Result<Vec<CaptionFragment>, TranscriptError> {
        let watch_page = self
            .client
            .get(format!("https://www.youtube.com/watch?v={}", id))
            .header("Accept-Language", "en-US,en;q=0.9")
            .send()
            .await?
            .text()
            .await?;

        if watch_page.contains(r#""status":"ERROR""#)
            || watch_page.contains(r#""status":"LOGIN_REQUIRED""#)
        {
            return Err(TranscriptError::VideoUnavailable);
        }

        let Some(captures) = CAPTION_TRACK_REGEX.captures(&watch_page) else {
            return Err(TranscriptError::TranscriptsDisabled);
        };

        let base_url = captures
            .get(1)
            .expect("Regex has a capture group")
            .as_str()
            .replace("\\u0026", "&")
            .replace("\\/", "/");

        let base_url = Url::parse(&base_url).map_err(|_| TranscriptError::Malformed)?;

        let timedtext = self
            .client
            .get(base_url)
            .send()
            .await?
            .text()
            .await?;

        let fragments = parse_timedtext(&timedtext)?;
        if fragments.is_empty() {
            return Err(TranscriptError::Malformed);
        }

        Ok(fragments)
    }
}

fn parse_timedtext(document: &str) -> Result<Vec<CaptionFragment>, TranscriptError> {
    let mut fragments = Vec::new();

    for captures in TIMEDTEXT_REGEX.captures_iter(document) {
        let start: f64 = captures
            .get(1)
            .expect("Regex has a capture group")
            .as_str()
            .parse()
            .map_err(|_| TranscriptError::Malformed)?;
        let duration: f64 = captures
            .get(2)
            .expect("Regex has a capture group")
            .as_str()
            .parse()
            .map_err(|_| TranscriptError::Malformed)?;
        let raw_text = captures.get(3).expect("Regex has a capture group").as_str();

        // The timedtext endpoint escapes entities twice, so things
        // like &amp;#39; are common. Decode in two passes.
        let text = html_escape::decode_html_entities(raw_text);
        let text = html_escape::decode_html_entities(&text).trim().to_string();

        if text.is_empty() {
            continue;
        }

        fragments.push(CaptionFragment {
            text,
            start,
            duration,
        });
    }

    Ok(fragments)
}
