//! Outbound chat transport contract and message segmentation.

pub mod telegram;

use async_trait::async_trait;

use crate::errors::DeliveryError;

pub use telegram::TelegramTransport;

/// Maximum text length the transport accepts per message.
pub const MAX_MESSAGE_LEN: usize = 4096;

/// Outbound side of the chat platform.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    /// Send one message to a chat. `formatted` requests rich rendering;
    /// the transport may reject it with [`DeliveryError::Format`].
    async fn send_text(
        &self,
        chat_id: i64,
        text: &str,
        formatted: bool,
    ) -> Result<(), DeliveryError>;
}

/// Split text into segments of at most `max_chars` characters,
/// breaking on line boundaries where possible. Concatenating the
/// segments reproduces the input exactly.
pub fn split_message(text: &str, max_chars: usize) -> Vec<String> {
    debug_assert!(max_chars > 0);
    if text.chars().count() <= max_chars {
        return vec![text.to_string()];
    }

    let mut segments = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for line in text.split_inclusive('\n') {
        let line_len = line.chars().count();

        if current_len + line_len <= max_chars {
            current.push_str(line);
            current_len += line_len;
            continue;
        }

        if current_len > 0 {
            segments.push(std::mem::take(&mut current));
            current_len = 0;
        }

        if line_len <= max_chars {
            current.push_str(line);
            current_len = line_len;
        } else {
            // A single line longer than the limit: hard split on char
            // boundaries.
            let chars: Vec<char> = line.chars().collect();
            for piece in chars.chunks(max_chars) {
                let piece: String = piece.iter().collect();
                if piece.chars().count() == max_chars {
                    segments.push(piece);
                } else {
                    current_len = piece.chars().count();
                    current = piece;
                }
            }
        }
    }

    if !current.is_empty() {
        segments.push(current);
    }

    segments
}
