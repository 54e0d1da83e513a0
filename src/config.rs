//! Runtime configuration.
//!
//! Values come from an optional `config.toml` next to the binary,
//! overridden by environment variables. Only the bot token has no
//! default and must be provided through the environment.

use std::env;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::errors::ConfigError;

const DEFAULT_OLLAMA_BASE_URL: &str = "http://localhost:11434";
const DEFAULT_TEXT_MODEL: &str = "gpt-oss:120b-cloud";
const DEFAULT_EMBEDDING_MODEL: &str = "nomic-embed-text";
const DEFAULT_DATA_DIR: &str = "./data";
const DEFAULT_TOP_K: usize = 5;
const DEFAULT_GENERATION_TIMEOUT_SECS: u64 = 120;
const DEFAULT_EMBEDDING_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct Config {
    pub bot_token: String,
    pub ollama_base_url: String,
    pub text_model: String,
    pub embedding_model: String,
    pub data_dir: PathBuf,
    pub top_k: usize,
    pub generation_timeout_secs: u64,
    pub embedding_timeout_secs: u64,
}

/// On-disk shape of `config.toml`; every field optional.
#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    ollama_base_url: Option<String>,
    text_model: Option<String>,
    embedding_model: Option<String>,
    data_dir: Option<PathBuf>,
    top_k: Option<usize>,
    generation_timeout_secs: Option<u64>,
    embedding_timeout_secs: Option<u64>,
}

impl Config {
    /// Load configuration from `config.toml` (if present) and the
    /// environment. Environment variables win over file values.
    pub fn load(config_path: &Path) -> Result<Config, ConfigError> {
        let file = if config_path.exists() {
            let raw = std::fs::read_to_string(config_path).map_err(|source| ConfigError::Io {
                path: config_path.display().to_string(),
                source,
            })?;
            toml::from_str::<FileConfig>(&raw).map_err(|source| ConfigError::Parse {
                path: config_path.display().to_string(),
                source,
            })?
        } else {
            FileConfig::default()
        };

        let bot_token = env::var("TELEGRAM_BOT_TOKEN")
            .ok()
            .filter(|t| !t.is_empty())
            .ok_or(ConfigError::MissingBotToken)?;

        Ok(Config {
            bot_token,
            ollama_base_url: env::var("OLLAMA_BASE_URL")
                .ok()
                .or(file.ollama_base_url)
                .unwrap_or_else(|| DEFAULT_OLLAMA_BASE_URL.to_string()),
            text_model: env::var("OLLAMA_TEXT_MODEL")
                .ok()
                .or(file.text_model)
                .unwrap_or_else(|| DEFAULT_TEXT_MODEL.to_string()),
            embedding_model: env::var("OLLAMA_EMBEDDING_MODEL")
                .ok()
                .or(file.embedding_model)
                .unwrap_or_else(|| DEFAULT_EMBEDDING_MODEL.to_string()),
            data_dir: env::var("DND_HELPER_DATA_DIR")
                .ok()
                .map(PathBuf::from)
                .or(file.data_dir)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR)),
            top_k: file.top_k.unwrap_or(DEFAULT_TOP_K),
            generation_timeout_secs: file
                .generation_timeout_secs
                .unwrap_or(DEFAULT_GENERATION_TIMEOUT_SECS),
            embedding_timeout_secs: file
                .embedding_timeout_secs
                .unwrap_or(DEFAULT_EMBEDDING_TIMEOUT_SECS),
        })
    }

    /// Directory holding the per-domain vector index files.
    pub fn index_dir(&self) -> PathBuf {
        self.data_dir.join("index")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> Config {
        Config {
            bot_token: "test-token".to_string(),
            ollama_base_url: DEFAULT_OLLAMA_BASE_URL.to_string(),
            text_model: DEFAULT_TEXT_MODEL.to_string(),
            embedding_model: DEFAULT_EMBEDDING_MODEL.to_string(),
            data_dir: PathBuf::from("./data"),
            top_k: DEFAULT_TOP_K,
            generation_timeout_secs: DEFAULT_GENERATION_TIMEOUT_SECS,
            embedding_timeout_secs: DEFAULT_EMBEDDING_TIMEOUT_SECS,
        }
    }

    #[test]
    fn index_dir_is_under_data_dir() {
        let config = test_config();
        assert_eq!(config.index_dir(), PathBuf::from("./data/index"));
    }

    #[test]
    fn file_config_parses_partial_toml() {
        let file: FileConfig = toml::from_str("top_k = 3\ntext_model = \"llama3\"").unwrap();
        assert_eq!(file.top_k, Some(3));
        assert_eq!(file.text_model.as_deref(), Some("llama3"));
        assert!(file.data_dir.is_none());
    }
}
