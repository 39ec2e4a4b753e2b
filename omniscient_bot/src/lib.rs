//! Source code for the Omniscient Bot, a Telegram bot that watches
//! chats for YouTube links and replies with a digest of each video:
//! either its title and description, or a summary of its captions.

/// Runtime configuration, read from the environment.
mod config;
pub use config::{Config, FetchStrategy};

/// Types used throughout.
mod types;
pub use types::{Outcome, VideoId};

/// URL extraction from message text, and YouTube link classification.
mod links;

/// Per-video content fetching: metadata or caption summaries.
pub mod fetcher;

/// Client for YouTube's caption tracks.
mod transcript;
pub use transcript::{CaptionFragment, TranscriptClient, TranscriptError};

/// Caption cleanup: spelling, punctuation, summarization.
pub mod nlp;

/// Functions that handle events from Telegram.
mod handlers;
pub use handlers::plan_replies;

/// Entry function that starts the bot.
mod entry;
pub use entry::*;
