use super::{ContentFetcher, FetchError};
use crate::{
    nlp::{restore_punctuation, summarize, SpellingModel},
    transcript::{CaptionFragment, TranscriptClient},
    types::VideoId,
};

/// Fetches a video's captions and boils them down to a short summary
/// via the cleanup pipeline: spelling, punctuation, then LSA.
pub struct CaptionFetcher {
    transcripts: TranscriptClient,
    spelling: SpellingModel,
    summary_sentences: usize,
}

impl CaptionFetcher {
    pub fn new(summary_sentences: usize) -> Result<Self, reqwest::Error> {
        Ok(Self {
            transcripts: TranscriptClient::new()?,
            spelling: SpellingModel::from_embedded_dictionary(),
            summary_sentences,
        })
    }

    /// Run the whole cleanup pipeline over raw caption fragments.
    fn digest(&self, fragments: &[CaptionFragment]) -> String {
        let raw = fragments
            .iter()
            .map(|fragment| fragment.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");

        let corrected = self.spelling.correct_text(&raw);
        let cleaned = restore_punctuation(&corrected);
        summarize(&cleaned, self.summary_sentences)
    }
}

impl ContentFetcher for CaptionFetcher {
    async fn fetch(&self, id: &VideoId) -> Result<String, FetchError> {
        let fragments = match self.transcripts.fetch(id).await {
            Ok(fragments) => fragments,
            Err(e) => {
                // Disabled, unavailable, network trouble: all the same
                // to the user. No captions, no summary.
                log::warn!("No captions for {}: {}", id, e);
                return Err(FetchError::CaptionsUnavailable);
            }
        };

        let summary = self.digest(&fragments);
        if summary.is_empty() {
            return Err(FetchError::CaptionsUnavailable);
        }

        Ok(format!("**Summary:** {}", summary))
    }
}
