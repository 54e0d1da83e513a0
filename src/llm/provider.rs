use async_trait::async_trait;

use crate::errors::{EmbeddingError, GenerationError};

/// Non-streaming text completion against an external endpoint.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Send one prompt, receive the full completion. At most one
    /// request per call; the implementation bounds the wait itself.
    async fn complete(&self, prompt: &str) -> Result<String, GenerationError>;
}

/// Text to vector conversion against an external endpoint.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    async fn embed(&self, input: &str) -> Result<Vec<f32>, EmbeddingError>;
}
