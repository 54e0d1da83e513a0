//! Ollama HTTP client: text generation and query embedding.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};

use crate::config::Config;
use crate::errors::{EmbeddingError, GenerationError};
use super::provider::{CompletionProvider, EmbeddingProvider};

const GENERATION_TEMPERATURE: f64 = 0.8;

#[derive(Clone)]
pub struct OllamaClient {
    base_url: String,
    text_model: String,
    embedding_model: String,
    generation_timeout: Duration,
    embedding_timeout: Duration,
    client: Client,
}

impl OllamaClient {
    pub fn new(config: &Config) -> Self {
        Self {
            base_url: config.ollama_base_url.trim_end_matches('/').to_string(),
            text_model: config.text_model.clone(),
            embedding_model: config.embedding_model.clone(),
            generation_timeout: Duration::from_secs(config.generation_timeout_secs),
            embedding_timeout: Duration::from_secs(config.embedding_timeout_secs),
            client: Client::new(),
        }
    }
}

#[async_trait]
impl CompletionProvider for OllamaClient {
    async fn complete(&self, prompt: &str) -> Result<String, GenerationError> {
        let url = format!("{}/api/generate", self.base_url);
        let body = json!({
            "model": self.text_model,
            "prompt": prompt,
            "stream": false,
            "temperature": GENERATION_TEMPERATURE,
        });

        let response = self
            .client
            .post(&url)
            .timeout(self.generation_timeout)
            .json(&body)
            .send()
            .await
            .map_err(|err| {
                if err.is_connect() {
                    GenerationError::Connectivity(err.to_string())
                } else {
                    GenerationError::Other(err.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(GenerationError::BadStatus(status.as_u16()));
        }

        let payload: Value = response
            .json()
            .await
            .map_err(|err| GenerationError::Other(err.to_string()))?;

        Ok(payload
            .get("response")
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .trim()
            .to_string())
    }
}

#[async_trait]
impl EmbeddingProvider for OllamaClient {
    async fn embed(&self, input: &str) -> Result<Vec<f32>, EmbeddingError> {
        let url = format!("{}/api/embeddings", self.base_url);
        let body = json!({
            "model": self.embedding_model,
            "prompt": input,
        });

        let response = self
            .client
            .post(&url)
            .timeout(self.embedding_timeout)
            .json(&body)
            .send()
            .await
            .map_err(|err| EmbeddingError::Connectivity(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(EmbeddingError::BadStatus(status.as_u16()));
        }

        let payload: Value = response
            .json()
            .await
            .map_err(|err| EmbeddingError::Malformed(err.to_string()))?;

        parse_embedding(&payload)
    }
}

fn parse_embedding(payload: &Value) -> Result<Vec<f32>, EmbeddingError> {
    let values = payload
        .get("embedding")
        .and_then(|v| v.as_array())
        .ok_or_else(|| EmbeddingError::Malformed("missing embedding array".to_string()))?;

    let mut embedding = Vec::with_capacity(values.len());
    for value in values {
        let number = value
            .as_f64()
            .ok_or_else(|| EmbeddingError::Malformed("non-numeric embedding value".to_string()))?;
        embedding.push(number as f32);
    }

    if embedding.is_empty() {
        return Err(EmbeddingError::Malformed("empty embedding".to_string()));
    }

    Ok(embedding)
}
