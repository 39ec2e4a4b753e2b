//! The Void Cat. It naps, it connects to Telegram, and if you poke it
//! with /ping it will begrudgingly confirm that it is, in fact, awake.

use teloxide::{
    prelude::*,
    sugar::request::RequestReplyExt,
    types::{BotCommand, Me},
    RequestError,
};

use bot_commons::*;

static HELP: &str =
    "This cat mostly naps. Poke it with /ping if you want proof that it's alive.";

async fn handle_message(bot: Bot, me: Me, msg: Message) -> Result<(), RequestError> {
    let Some(text) = msg.text() else {
        return Ok(());
    };

    // The cat watches everything, even if it rarely reacts.
    log::debug!("Received message: {}", text);

    let Some(first_word) = text.split_whitespace().next() else {
        return Ok(());
    };

    let username = format!("@{}", me.username());
    let command = first_word.trim_end_matches(username.as_str()).to_lowercase();

    match command.as_str() {
        "/ping" => {
            bot.send_message(msg.chat.id, "Yea Yea I am awake")
                .reply_to(msg.id)
                .await?;
        }
        "/start" if msg.chat.is_private() => {
            bot.send_message(msg.chat.id, HELP).reply_to(msg.id).await?;
        }
        _ => {}
    }

    Ok(())
}

async fn run() {
    let token = token_from_env("VOID_CAT_BOT_TOKEN").expect("VOID_CAT_BOT_TOKEN is not set!");

    let bot = Bot::new(token);

    bot.set_my_commands(vec![BotCommand {
        command: "ping".to_string(),
        description: "Check whether the cat is awake.".to_string(),
    }])
    .await
    .expect("Failed to set bot commands!");

    log::info!("Napping in the void.");

    let handler = dptree::entry().branch(Update::filter_message().endpoint(handle_message));

    Dispatcher::builder(bot, handler)
        .default_handler(|_| async {})
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    log::info!("The void has reclaimed the cat.");
}

fn main() {
    if std::env::var_os("RUST_LOG").is_none() {
        std::env::set_var("RUST_LOG", "WARN,void_cat_bot=debug");
    }
    start_everything(run());
}
