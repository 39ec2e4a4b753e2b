use std::sync::Arc;

use teloxide::{dptree::deps, prelude::*};

use crate::{
    config::{Config, FetchStrategy},
    fetcher::{CaptionFetcher, Fetcher, MetadataFetcher},
    handlers::{generate_bot_commands, handle_message},
};

/// # Panics
///
/// Panics if required configuration is missing from the environment,
/// or if startup requests to Telegram fail.
pub async fn entry() {
    let config = Config::from_env();

    let bot = Bot::new(config.bot_token.clone());

    bot.set_my_commands(generate_bot_commands())
        .await
        .expect("Failed to set bot commands!");

    let fetcher = match config.strategy {
        FetchStrategy::Metadata => {
            let api_key = config
                .youtube_api_key
                .clone()
                .expect("Metadata strategy requires an API key");
            Fetcher::Metadata(
                MetadataFetcher::new(api_key).expect("Failed to build the HTTP client!"),
            )
        }
        FetchStrategy::Captions => Fetcher::Captions(
            CaptionFetcher::new(config.summary_sentences)
                .expect("Failed to build the HTTP client!"),
        ),
    };

    let fetcher = Arc::new(fetcher);
    let config = Arc::new(config);

    log::info!("Creating the handler...");

    let handler = dptree::entry().branch(Update::filter_message().endpoint(handle_message));

    log::info!("Watching for YouTube links.");

    Dispatcher::builder(bot, handler)
        .default_handler(|_| async {})
        .dependencies(deps![config, fetcher])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    log::info!("The all-seeing eye has closed.");
}
