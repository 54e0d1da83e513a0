use std::path::Path;

use anyhow::Context;

use dnd_helper_bot::bot;
use dnd_helper_bot::config::Config;
use dnd_helper_bot::logging;
use dnd_helper_bot::state::AppState;
use dnd_helper_bot::transport::TelegramTransport;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load(Path::new("config.toml")).context("Failed to load configuration")?;
    logging::init(&config.data_dir);

    let transport = TelegramTransport::new(&config.bot_token);
    let state = AppState::initialize(config);

    println!("🎲 D&D Helper Bot is starting... Press Ctrl+C to stop.");
    bot::run(state, transport).await;

    Ok(())
}
