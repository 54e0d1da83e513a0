//! Application state wiring.
//!
//! All mutable state and external clients are constructed here once at
//! startup and shared by `Arc`; nothing lives in module-level globals.

use std::sync::Arc;

use crate::config::Config;
use crate::content::ReferenceData;
use crate::dispatch::Dispatcher;
use crate::llm::{CompletionProvider, EmbeddingProvider, OllamaClient};
use crate::retrieval::Retriever;
use crate::session::SessionStore;

pub struct AppState {
    pub config: Arc<Config>,
    pub sessions: Arc<SessionStore>,
    pub dispatcher: Dispatcher,
}

impl AppState {
    pub fn initialize(config: Config) -> Arc<Self> {
        let config = Arc::new(config);
        let sessions = Arc::new(SessionStore::new());

        let ollama = Arc::new(OllamaClient::new(&config));
        let embedder: Arc<dyn EmbeddingProvider> = ollama.clone();
        let llm: Arc<dyn CompletionProvider> = ollama;

        let retriever = Arc::new(Retriever::new(config.index_dir(), embedder, config.top_k));
        let reference = Arc::new(ReferenceData::new(config.data_dir.clone()));

        let dispatcher = Dispatcher::new(sessions.clone(), retriever, llm, reference);

        Arc::new(AppState {
            config,
            sessions,
            dispatcher,
        })
    }
}
