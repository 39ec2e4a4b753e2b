use std::sync::LazyLock;

use regex::Regex;

use crate::types::{LinkVerdict, VideoId};

/// Anything that looks like a URL: a scheme followed by non-whitespace.
static URL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"https?://\S+").expect("Regex will always be valid"));

/// The YouTube URL shapes we know how to pull a video ID out of:
/// `youtube.com/watch?v=<id>` and the `youtu.be/<id>` short form.
/// Anchored so that lookalike subdomains don't match. Embed-style
/// URLs (`youtube.com/embed/<id>`) are deliberately not recognized.
static VIDEO_ID_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:https?://)?(?:www\.)?(?:youtube\.com/watch\?v=|youtu\.be/)([A-Za-z0-9_-]+)")
        .expect("Regex will always be valid")
});

/// Find every URL in the text, in order of first appearance.
/// Duplicates are kept; deduplication is not our business.
pub fn extract_urls(text: &str) -> Vec<&str> {
    URL_REGEX.find_iter(text).map(|m| m.as_str()).collect()
}

/// Pull a video ID out of a YouTube URL, if it has one.
pub fn extract_video_id(url: &str) -> Option<VideoId> {
    VIDEO_ID_REGEX
        .captures(url)
        .and_then(|captures| captures.get(1))
        .map(|id| VideoId::new(id.as_str()))
}

/// Decide what kind of link this is. YouTube-ness is judged the same
/// way a human skimming chat would: does it mention the site at all.
pub fn classify(url: &str) -> LinkVerdict {
    if !url.contains("youtube.com") && !url.contains("youtu.be") {
        return LinkVerdict::NotYoutube;
    }

    match extract_video_id(url) {
        Some(id) => LinkVerdict::Video(id),
        None => LinkVerdict::UnresolvableVideoUrl,
    }
}
