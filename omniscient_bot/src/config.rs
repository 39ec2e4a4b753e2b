use bot_commons::token_from_env;

/// Which kind of digest to produce for each video. The two strategies
/// are alternative deployments of the same bot, never both at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchStrategy {
    /// Reply with the video's title and description from the Data API.
    #[default]
    Metadata,
    /// Reply with a summary of the video's captions.
    Captions,
}

/// Runtime configuration for the bot. Built once at startup and
/// passed around; there is no global mutable state.
#[derive(Debug, Clone)]
pub struct Config {
    pub bot_token: String,
    /// Only required for [`FetchStrategy::Metadata`].
    pub youtube_api_key: Option<String>,
    /// At most this many links are processed per message.
    pub max_links: usize,
    /// Target sentence count for caption summaries.
    pub summary_sentences: usize,
    pub strategy: FetchStrategy,
}

impl Config {
    pub const DEFAULT_MAX_LINKS: usize = 5;
    pub const DEFAULT_SUMMARY_SENTENCES: usize = 5;

    /// Read configuration from the environment.
    ///
    /// # Panics
    ///
    /// Panics if `OMNISCIENT_BOT_TOKEN` is missing, or if the metadata
    /// strategy is selected without a `YOUTUBE_API_KEY`.
    #[must_use]
    pub fn from_env() -> Self {
        let bot_token =
            token_from_env("OMNISCIENT_BOT_TOKEN").expect("OMNISCIENT_BOT_TOKEN is not set!");

        let strategy = match std::env::var("FETCH_STRATEGY").ok().as_deref() {
            Some("captions") => FetchStrategy::Captions,
            Some("metadata") | None => FetchStrategy::Metadata,
            Some(other) => {
                log::warn!("Unknown FETCH_STRATEGY {:?}, using metadata", other);
                FetchStrategy::Metadata
            }
        };

        let youtube_api_key = token_from_env("YOUTUBE_API_KEY");
        if strategy == FetchStrategy::Metadata {
            assert!(
                youtube_api_key.is_some(),
                "YOUTUBE_API_KEY is required for the metadata strategy!"
            );
        }

        Self {
            bot_token,
            youtube_api_key,
            max_links: parse_env_or("MAX_LINKS", Self::DEFAULT_MAX_LINKS),
            summary_sentences: parse_env_or(
                "SUMMARY_SENTENCES",
                Self::DEFAULT_SUMMARY_SENTENCES,
            ),
            strategy,
        }
    }
}

fn parse_env_or(var: &str, default: usize) -> usize {
    match std::env::var(var) {
        Ok(value) => value.trim().parse().unwrap_or_else(|_| {
            log::warn!("Could not parse {} as a number, using {}", var, default);
            default
        }),
        Err(_) => default,
    }
}
