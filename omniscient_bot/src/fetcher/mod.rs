//! Per-video content fetching. Two strategies exist: asking the Data
//! API for the video's metadata, or summarizing its captions. A
//! deployment runs exactly one of them.

use std::{fmt::Display, future::Future};

use crate::types::VideoId;

mod metadata;
pub use metadata::MetadataFetcher;

mod captions;
pub use captions::CaptionFetcher;

/// Why fetching content for a video failed. Every variant maps to a
/// user-facing reason string via [`Display`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchError {
    /// Transport-level failure talking to YouTube.
    Network,
    /// The API answered, but with no items for this ID.
    NotFound,
    /// The response didn't have the shape we expected.
    Malformed,
    /// No captions could be fetched for this video, for any reason.
    CaptionsUnavailable,
}

impl Display for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchError::Network => {
                write!(f, "Error contacting YouTube. Please try again later.")
            }
            FetchError::NotFound => {
                write!(f, "Video not found. It may have been removed or made private.")
            }
            FetchError::Malformed => write!(f, "Unexpected response from YouTube."),
            FetchError::CaptionsUnavailable => {
                write!(f, "Captions are unavailable for this video.")
            }
        }
    }
}

impl std::error::Error for FetchError {}

/// Something that can turn a video ID into rendered reply text.
pub trait ContentFetcher {
    fn fetch(
        &self,
        id: &VideoId,
    ) -> impl Future<Output = Result<String, FetchError>> + Send;
}

/// The fetcher actually wired into the dispatcher; which variant gets
/// constructed is decided by configuration at startup.
pub enum Fetcher {
    Metadata(MetadataFetcher),
    Captions(CaptionFetcher),
}

impl ContentFetcher for Fetcher {
    async fn fetch(&self, id: &VideoId) -> Result<String, FetchError> {
        match self {
            Fetcher::Metadata(fetcher) => fetcher.fetch(id).await,
            Fetcher::Captions(fetcher) => fetcher.fetch(id).await,
        }
    }
}
