//! Error types, one enum per failure boundary.
//!
//! All runtime failures are local-recoverable: retrieval and embedding
//! errors degrade to empty grounding, generation errors degrade to a
//! user-facing message, delivery errors degrade to a plain retry. None
//! of them abort the process.

use thiserror::Error;

use crate::content::texts;

/// Failure while loading configuration at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("TELEGRAM_BOT_TOKEN is not set. Create a .env file or set the environment variable.")]
    MissingBotToken,
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

/// Failure while embedding a query text.
#[derive(Debug, Error)]
pub enum EmbeddingError {
    #[error("embedding endpoint unreachable: {0}")]
    Connectivity(String),
    #[error("embedding endpoint returned status {0}")]
    BadStatus(u16),
    #[error("embedding response malformed: {0}")]
    Malformed(String),
}

/// Failure while querying a vector collection.
///
/// Returned up to the dispatcher, which applies the empty-grounding
/// policy; never surfaced to the user.
#[derive(Debug, Error)]
pub enum RetrievalError {
    #[error("vector index for domain '{0}' is not initialized")]
    Unavailable(&'static str),
    #[error("query embedding failed: {0}")]
    Embedding(#[from] EmbeddingError),
    #[error("vector index query failed: {0}")]
    Store(String),
}

/// Failure while requesting a completion.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("generation endpoint unreachable: {0}")]
    Connectivity(String),
    /// Non-success status with no transport-level exception. Rendered
    /// by the dispatcher with its own generic message, not here.
    #[error("generation endpoint returned status {0}")]
    BadStatus(u16),
    #[error("generation failed: {0}")]
    Other(String),
}

impl GenerationError {
    /// The user-facing text manufactured by the client itself.
    ///
    /// Connectivity and other failures produce a friendly localized
    /// string here, with the raw detail embedded in the latter.
    /// `BadStatus` returns `None`: the caller renders its own generic
    /// "no response" message for that case.
    pub fn user_message(&self) -> Option<String> {
        match self {
            GenerationError::Connectivity(_) => Some(texts::GENERATION_UNREACHABLE_TEXT.to_string()),
            GenerationError::Other(detail) => Some(format!("{} {detail}", texts::GENERATION_ERROR_PREFIX)),
            GenerationError::BadStatus(_) => None,
        }
    }
}

/// Failure reported by the chat transport when sending a message.
#[derive(Debug, Error)]
pub enum DeliveryError {
    /// The transport rejected the formatting of the outbound text.
    #[error("formatting rejected by transport: {0}")]
    Format(String),
    #[error("message too long: {len} > {max}")]
    TooLong { len: usize, max: usize },
    #[error("transport error: {0}")]
    Transport(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connectivity_failure_carries_fixed_user_text() {
        let err = GenerationError::Connectivity("dns failure".to_string());
        assert_eq!(
            err.user_message().as_deref(),
            Some(texts::GENERATION_UNREACHABLE_TEXT)
        );
    }

    #[test]
    fn other_failure_embeds_detail() {
        let err = GenerationError::Other("body decode failed".to_string());
        let msg = err.user_message().unwrap();
        assert!(msg.contains("body decode failed"));
        assert!(msg.starts_with(texts::GENERATION_ERROR_PREFIX));
    }

    #[test]
    fn bad_status_is_rendered_by_the_caller() {
        assert!(GenerationError::BadStatus(503).user_message().is_none());
    }
}
