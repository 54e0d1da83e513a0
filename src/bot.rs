//! Update loop and command routing.
//!
//! Long-polls the transport for inbound messages; commands select a
//! section or print static help, everything else goes through the
//! dispatcher's free-text path.

use std::sync::Arc;
use std::time::Duration;

use crate::content::texts;
use crate::section::Section;
use crate::state::AppState;
use crate::transport::telegram::{Message, TelegramTransport};

const POLL_ERROR_BACKOFF_SECS: u64 = 3;

/// Run the bot until the process is stopped.
pub async fn run(state: Arc<AppState>, transport: TelegramTransport) {
    let mut offset = 0i64;
    tracing::info!("D&D helper bot is polling for updates");

    loop {
        let updates = match transport.get_updates(offset).await {
            Ok(updates) => updates,
            Err(err) => {
                tracing::warn!("getUpdates failed, backing off: {}", err);
                tokio::time::sleep(Duration::from_secs(POLL_ERROR_BACKOFF_SECS)).await;
                continue;
            }
        };

        for update in updates {
            offset = offset.max(update.update_id + 1);
            if let Some(message) = update.message {
                handle_message(&state, &transport, message).await;
            }
        }
    }
}

async fn handle_message(state: &AppState, transport: &TelegramTransport, message: Message) {
    let Some(text) = message.text else {
        return;
    };
    let text = text.trim();
    if text.is_empty() {
        return;
    }

    let chat_id = message.chat.id;
    // Direct chats carry a sender; fall back to the chat id otherwise.
    let user_id = message.from.map(|u| u.id).unwrap_or(chat_id);

    if text.starts_with('/') {
        route_command(state, transport, user_id, chat_id, text).await;
    } else {
        state
            .dispatcher
            .handle_text(user_id, chat_id, text, transport)
            .await;
    }
}

async fn route_command(
    state: &AppState,
    transport: &TelegramTransport,
    user_id: i64,
    chat_id: i64,
    command: &str,
) {
    let name = command
        .trim_start_matches('/')
        .split(['@', ' '])
        .next()
        .unwrap_or_default();

    match name {
        "start" => {
            state
                .dispatcher
                .deliver(chat_id, texts::START_TEXT, false, transport)
                .await;
        }
        "help" => {
            state
                .dispatcher
                .deliver(chat_id, texts::HELP_TEXT, true, transport)
                .await;
        }
        _ => match Section::from_command(command) {
            Some(section) => {
                state
                    .dispatcher
                    .select_section(user_id, chat_id, section, transport)
                    .await;
            }
            None => {
                tracing::debug!("Unknown command: {}", command);
                state
                    .dispatcher
                    .deliver(chat_id, texts::HELP_TEXT, true, transport)
                    .await;
            }
        },
    }
}
