use std::fmt::Display;

/// A canonical YouTube video identifier, as extracted from a link.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub struct VideoId(String);

impl VideoId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        self.as_ref()
    }
}

impl AsRef<str> for VideoId {
    fn as_ref(&self) -> &str {
        self.0.as_ref()
    }
}

impl Display for VideoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.0, f)
    }
}

/// Classification of a single URL found in a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkVerdict {
    /// A YouTube link with a recognizable video ID.
    Video(VideoId),
    /// Looks like YouTube, but no video ID could be extracted.
    /// Embed-style links land here too.
    UnresolvableVideoUrl,
    /// Some other website entirely.
    NotYoutube,
}

/// What became of one processed link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Rendered reply text, ready to be joined with its siblings.
    Valid(String),
    /// The link couldn't be processed; `reason` is user-facing.
    Invalid { url: String, reason: String },
}
