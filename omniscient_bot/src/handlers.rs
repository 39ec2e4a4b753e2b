use std::sync::Arc;

use teloxide::{
    prelude::*,
    sugar::request::RequestReplyExt,
    types::{BotCommand, Me},
    RequestError,
};

use bot_commons::BotStuff;

use crate::{
    config::Config,
    fetcher::{ContentFetcher, Fetcher},
    links::{classify, extract_urls},
    types::{LinkVerdict, Outcome},
};

static INVALID_HEADER: &str = "The following links could not be processed:";
static NOT_YOUTUBE_REASON: &str = "Not a YouTube link.";
static INVALID_URL_REASON: &str = "Invalid YouTube URL.";

static HELP: &str = "\
Send me a message with YouTube links and I'll reply with a digest of \
each video. Up to 5 links per message; the rest get skipped.

/meow - say hi to the bot";

/// Work out every reply this message deserves, in sending order:
/// the skip notice (if links were dropped), then one reply for all
/// valid links, then one reply for all invalid ones. An empty vec
/// means stay silent.
pub async fn plan_replies<F: ContentFetcher>(
    text: &str,
    fetcher: &F,
    max_links: usize,
) -> Vec<String> {
    let urls = extract_urls(text);
    if urls.is_empty() {
        return Vec::new();
    }

    let skipped = urls.len().saturating_sub(max_links);

    let mut valid = Vec::new();
    let mut invalid = Vec::new();

    for url in urls.into_iter().take(max_links) {
        match process_link(url, fetcher).await {
            Outcome::Valid(rendered) => valid.push(rendered),
            Outcome::Invalid { url, reason } => invalid.push((url, reason)),
        }
    }

    let mut replies = Vec::new();

    if skipped > 0 {
        replies.push(format!(
            "Max links summarized reached. {} YouTube link(s) were skipped \
             because only the first {} links are processed per message.",
            skipped, max_links
        ));
    }

    if !valid.is_empty() {
        replies.push(valid.join("\n\n"));
    }

    if !invalid.is_empty() {
        let mut report = String::from(INVALID_HEADER);
        for (url, reason) in &invalid {
            report.push_str(&format!("\n**{}** - {}", url, reason));
        }
        replies.push(report);
    }

    replies
}

/// Process one link all the way to an outcome. Failures never escape
/// this boundary; they become an [`Outcome::Invalid`] instead, so one
/// broken link can't take down its siblings.
async fn process_link<F: ContentFetcher>(url: &str, fetcher: &F) -> Outcome {
    match classify(url) {
        LinkVerdict::NotYoutube => Outcome::Invalid {
            url: url.to_string(),
            reason: NOT_YOUTUBE_REASON.to_string(),
        },
        LinkVerdict::UnresolvableVideoUrl => Outcome::Invalid {
            url: url.to_string(),
            reason: INVALID_URL_REASON.to_string(),
        },
        LinkVerdict::Video(id) => match fetcher.fetch(&id).await {
            Ok(rendered) => Outcome::Valid(rendered),
            Err(e) => {
                log::warn!("Processing {} failed: {}", url, e);
                Outcome::Invalid {
                    url: url.to_string(),
                    reason: e.to_string(),
                }
            }
        },
    }
}

pub fn generate_bot_commands() -> Vec<BotCommand> {
    vec![BotCommand {
        command: "meow".to_string(),
        description: "Say hi to the bot.".to_string(),
    }]
}

/// Returns `true` if a command was parsed and responded to.
async fn handle_command(
    bot: &Bot,
    me: &Me,
    message: &Message,
    text: &str,
) -> Result<bool, RequestError> {
    if !text.starts_with('/') {
        return Ok(false);
    }

    let Some(command) = text.split_whitespace().next() else {
        return Ok(false);
    };

    let username = format!("@{}", me.username());
    let command = command.trim_end_matches(username.as_str()).to_lowercase();

    match command.as_str() {
        "/meow" => {
            bot.send_message(message.chat.id, "🐱 Yes yes, how may I help you?")
                .reply_to(message.id)
                .await?;
            Ok(true)
        }
        "/start" if message.chat.is_private() => {
            bot.send_message(message.chat.id, HELP).await?;
            Ok(true)
        }
        _ => Ok(false),
    }
}

/// Whether this author should be ignored outright. Other bots don't
/// get digests, which also keeps us from ever replying to ourselves.
/// A missing author (channel posts and the like) doesn't count as a
/// bot.
fn authored_by_bot(from: Option<&teloxide::types::User>) -> bool {
    from.is_some_and(|user| user.is_bot)
}

pub async fn handle_message(
    bot: Bot,
    me: Me,
    message: Message,
    config: Arc<Config>,
    fetcher: Arc<Fetcher>,
) -> Result<(), RequestError> {
    if authored_by_bot(message.from.as_ref()) {
        return Ok(());
    }

    let Some(text) = message.text() else {
        return Ok(());
    };

    if handle_command(&bot, &me, &message, text).await? {
        return Ok(());
    }

    if extract_urls(text).is_empty() {
        return Ok(());
    }

    // Fetching can take a while; let the chat know we're on it.
    bot.typing(message.chat.id).await?;

    for reply in plan_replies(text, fetcher.as_ref(), config.max_links).await {
        bot.send_message(message.chat.id, reply).await?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetcher::FetchError;
    use crate::types::VideoId;

    /// A fetcher that renders a fixed metadata snippet for any ID,
    /// except IDs it is told to fail on.
    struct StubFetcher {
        reply: String,
        fail_with: Option<FetchError>,
    }

    impl StubFetcher {
        fn returning(reply: &str) -> Self {
            Self {
                reply: reply.to_string(),
                fail_with: None,
            }
        }

        fn failing(error: FetchError) -> Self {
            Self {
                reply: String::new(),
                fail_with: Some(error),
            }
        }
    }

    impl ContentFetcher for StubFetcher {
        async fn fetch(&self, _id: &VideoId) -> Result<String, FetchError> {
            match self.fail_with {
                Some(error) => Err(error),
                None => Ok(self.reply.clone()),
            }
        }
    }

    fn metadata_stub() -> StubFetcher {
        StubFetcher::returning("**Video Title:** Test Video\n**Description:** A test video.")
    }

    #[test]
    fn bot_authors_ignored_human_authors_processed() {
        let user = |is_bot: bool| -> teloxide::types::User {
            serde_json::from_value(serde_json::json!({
                "id": 1234,
                "is_bot": is_bot,
                "first_name": "Test",
            }))
            .expect("a minimal Telegram user deserializes")
        };

        let bot_author = user(true);
        let human_author = user(false);

        assert!(authored_by_bot(Some(&bot_author)));
        assert!(!authored_by_bot(Some(&human_author)));
        // Channel posts carry no author at all; those still get
        // processed.
        assert!(!authored_by_bot(None));
    }

    #[tokio::test]
    async fn no_links_no_replies() {
        let replies = plan_replies("just a normal message", &metadata_stub(), 5).await;
        assert!(replies.is_empty());

        let replies = plan_replies("", &metadata_stub(), 5).await;
        assert!(replies.is_empty());
    }

    #[tokio::test]
    async fn two_valid_links_one_reply() {
        let text = "Check these: https://www.youtube.com/watch?v=dQw4w9WgXcQ \
                    and https://youtu.be/dQw4w9WgXcQ";
        let replies = plan_replies(text, &metadata_stub(), 5).await;

        assert_eq!(
            replies,
            vec![
                "**Video Title:** Test Video\n**Description:** A test video.\n\n\
                 **Video Title:** Test Video\n**Description:** A test video."
                    .to_string()
            ]
        );
    }

    #[tokio::test]
    async fn mixed_links_split_into_valid_and_invalid_replies() {
        let text = "Check these: https://www.youtube.com/watch?v=dQw4w9WgXcQ \
                    https://www.example.com/ \
                    https://youtu.be/dQw4w9WgXcQ \
                    https://invalid.youtube.com/watch?v=invalid";
        let stub = StubFetcher::returning("**Summary:** Test Summary");
        let replies = plan_replies(text, &stub, 5).await;

        assert_eq!(replies.len(), 2);
        assert_eq!(
            replies[0],
            "**Summary:** Test Summary\n\n**Summary:** Test Summary"
        );
        assert_eq!(
            replies[1],
            "The following links could not be processed:\n\
             **https://www.example.com/** - Not a YouTube link.\n\
             **https://invalid.youtube.com/watch?v=invalid** - Invalid YouTube URL."
        );
    }

    #[tokio::test]
    async fn max_links_respected_with_skip_notice_first() {
        let links: Vec<String> = (0..10)
            .map(|i| format!("https://www.youtube.com/watch?v=video{}", i))
            .collect();
        let text = links.join(" ");
        let stub = StubFetcher::returning("**Summary:** Test Summary");

        let replies = plan_replies(&text, &stub, 5).await;

        assert_eq!(replies.len(), 2);
        assert_eq!(
            replies[0],
            "Max links summarized reached. 5 YouTube link(s) were skipped \
             because only the first 5 links are processed per message."
        );
        assert_eq!(
            replies[1],
            ["**Summary:** Test Summary"; 5].join("\n\n")
        );
    }

    #[tokio::test]
    async fn fetch_failures_become_invalid_outcomes() {
        let text = "https://www.youtube.com/watch?v=dQw4w9WgXcQ";

        let replies =
            plan_replies(text, &StubFetcher::failing(FetchError::NotFound), 5).await;
        assert_eq!(replies.len(), 1);
        assert!(replies[0].starts_with(INVALID_HEADER));
        assert!(replies[0].contains("not found"));

        let replies =
            plan_replies(text, &StubFetcher::failing(FetchError::Network), 5).await;
        assert!(replies[0].contains("contacting"));

        let replies =
            plan_replies(text, &StubFetcher::failing(FetchError::CaptionsUnavailable), 5)
                .await;
        assert!(replies[0].contains("Captions are unavailable"));
    }

    #[tokio::test]
    async fn non_youtube_links_never_reach_the_fetcher() {
        // A fetcher that would blow up the test if called.
        struct PanickingFetcher;
        impl ContentFetcher for PanickingFetcher {
            async fn fetch(&self, _id: &VideoId) -> Result<String, FetchError> {
                panic!("fetch must not be called for non-video links");
            }
        }

        let replies = plan_replies(
            "look at https://www.example.com/watch?v=dQw4w9WgXcQ",
            &PanickingFetcher,
            5,
        )
        .await;

        assert_eq!(replies.len(), 1);
        assert!(replies[0].contains("Not a YouTube link."));
    }
}
