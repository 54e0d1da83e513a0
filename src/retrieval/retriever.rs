//! Grounding-document retrieval for the RAG-eligible domains.
//!
//! Resolves a per-domain index handle lazily, caches successful opens
//! for the process lifetime, embeds the query via the embedding
//! provider and returns up to `top_k` document texts in the store's
//! similarity order.
//!
//! Failures are returned as explicit `RetrievalError` values; the
//! dispatcher maps all of them to empty grounding. Nothing here is
//! surfaced to the user.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::errors::RetrievalError;
use crate::llm::EmbeddingProvider;
use crate::section::RagDomain;
use super::index::SqliteVectorIndex;

pub struct Retriever {
    index_dir: PathBuf,
    embedder: Arc<dyn EmbeddingProvider>,
    top_k: usize,
    handles: Mutex<HashMap<RagDomain, Arc<SqliteVectorIndex>>>,
}

impl Retriever {
    pub fn new(
        index_dir: impl Into<PathBuf>,
        embedder: Arc<dyn EmbeddingProvider>,
        top_k: usize,
    ) -> Self {
        Self {
            index_dir: index_dir.into(),
            embedder,
            top_k,
            handles: Mutex::new(HashMap::new()),
        }
    }

    /// Up to `top_k` grounding documents for a free-text query.
    ///
    /// `Ok(vec![])` means the collection exists but matched nothing —
    /// a normal outcome. An uninitialized domain or a failing
    /// embedding/store call comes back as an error for the caller to
    /// degrade on.
    pub async fn query(
        &self,
        domain: RagDomain,
        text: &str,
    ) -> Result<Vec<String>, RetrievalError> {
        let index = self.resolve(domain).await?;

        let count = index
            .count()
            .await
            .map_err(|err| RetrievalError::Store(err.to_string()))?;
        if count == 0 {
            tracing::debug!("Collection '{}' is empty, no grounding", domain.as_str());
            return Ok(Vec::new());
        }

        let embedding = self.embedder.embed(text).await?;

        let matches = index
            .search(&embedding, self.top_k)
            .await
            .map_err(|err| RetrievalError::Store(err.to_string()))?;

        tracing::debug!(
            "Retrieved {} grounding documents from '{}'",
            matches.len(),
            domain.as_str()
        );
        Ok(matches.into_iter().map(|m| m.content).collect())
    }

    /// Resolve the index handle for a domain, caching successful opens.
    /// A missing index file is re-probed on each call so that a domain
    /// seeded after startup becomes available without a restart.
    async fn resolve(&self, domain: RagDomain) -> Result<Arc<SqliteVectorIndex>, RetrievalError> {
        let mut handles = self.handles.lock().await;
        if let Some(index) = handles.get(&domain) {
            return Ok(Arc::clone(index));
        }

        let path = self
            .index_dir
            .join(format!("{}.db", domain.collection_name()));
        if !path.exists() {
            return Err(RetrievalError::Unavailable(domain.as_str()));
        }

        let index = SqliteVectorIndex::open(&path)
            .await
            .map(Arc::new)
            .map_err(|err| RetrievalError::Store(err.to_string()))?;
        handles.insert(domain, Arc::clone(&index));
        Ok(index)
    }
}
