//! Shared bootstrap and convenience bits for the bots in this
//! workspace, because writing the same startup boilerplate twice
//! is twice too many times.

use std::future::Future;

use teloxide::{prelude::Requester, types::ChatId, Bot, RequestError};

/// Initialize logging and run the `closure` in an async runtime.
/// Logging is enabled by default on level `info` unless overridden
/// by environment variable `RUST_LOG`. This uses the crate
/// [pretty_env_logger][] internally, see its documentation for more details.
///
/// [pretty_env_logger]: https://docs.rs/pretty_env_logger
pub fn start_everything(closure: impl Future<Output = ()>) {
    let log_level = std::env::var_os("RUST_LOG")
        .unwrap_or_else(|| std::ffi::OsString::from("info"))
        .into_string()
        .unwrap_or_else(|_| String::from("info"));

    // Journald stamps its own timestamps; don't double up on them.
    let running_as_systemd_service = std::env::var_os("JOURNAL_STREAM").is_some();

    let mut builder = match running_as_systemd_service {
        true => pretty_env_logger::formatted_builder(),
        false => pretty_env_logger::formatted_timed_builder(),
    };

    builder.parse_filters(&log_level);

    if builder.try_init().is_err() {
        log::error!("Tried to init logger twice!");
    }

    log::info!("Logging is up. Waking a bot...");

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .expect("Failed to build the tokio runtime!")
        .block_on(closure);
}

/// Read a bot token (or any other secret) from the environment,
/// trimming whitespace. Returns [`None`] if the variable is unset,
/// not unicode, or empty after trimming.
#[must_use]
pub fn token_from_env(var: &str) -> Option<String> {
    let value = std::env::var(var).ok()?;
    let value = value.trim();

    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

pub trait BotStuff {
    /// Show the "typing..." indicator in a chat. Useful before doing
    /// something that takes a while, so the chat doesn't look dead.
    fn typing(&self, to_where: ChatId) -> impl Future<Output = Result<(), RequestError>> + Send;
}

impl BotStuff for Bot {
    async fn typing(&self, to_where: ChatId) -> Result<(), RequestError> {
        self.send_chat_action(to_where, teloxide::types::ChatAction::Typing)
            .await?;
        Ok(())
    }
}
