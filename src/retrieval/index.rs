//! SQLite-backed vector index, one file per knowledge domain.
//!
//! Stores document text plus a serialized embedding and answers
//! similarity queries by brute-force cosine scoring. No external
//! server required; adequate for reference collections of a few
//! hundred documents per domain.

use std::path::{Path, PathBuf};

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::{Row, SqlitePool};

/// A similarity match returned by [`SqliteVectorIndex::search`].
#[derive(Debug, Clone)]
pub struct DocumentMatch {
    pub content: String,
    /// Cosine similarity, higher is better.
    pub score: f32,
}

pub struct SqliteVectorIndex {
    pool: SqlitePool,
    #[allow(dead_code)]
    db_path: PathBuf,
}

impl SqliteVectorIndex {
    /// Open an existing index. Fails if the file does not exist, which
    /// the caller treats as "domain never initialized".
    pub async fn open(db_path: impl Into<PathBuf>) -> Result<Self, sqlx::Error> {
        Self::connect(db_path.into(), false).await
    }

    /// Create (or open) an index, initializing the schema. Used by the
    /// seeding path and by tests.
    pub async fn create(db_path: impl Into<PathBuf>) -> Result<Self, sqlx::Error> {
        Self::connect(db_path.into(), true).await
    }

    async fn connect(db_path: PathBuf, create_if_missing: bool) -> Result<Self, sqlx::Error> {
        if !create_if_missing && !db_path.exists() {
            return Err(sqlx::Error::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("index file not found: {}", db_path.display()),
            )));
        }

        let options = SqliteConnectOptions::new()
            .filename(&db_path)
            .create_if_missing(create_if_missing)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal);

        let pool = SqlitePoolOptions::new()
            .min_connections(1)
            .max_connections(4)
            .connect_with(options)
            .await?;

        let index = Self { pool, db_path };
        index.init_schema().await?;
        Ok(index)
    }

    async fn init_schema(&self) -> Result<(), sqlx::Error> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS documents (
                doc_id TEXT PRIMARY KEY,
                content TEXT NOT NULL,
                embedding BLOB NOT NULL
            )",
        )
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Insert or replace one document with its embedding.
    pub async fn insert(
        &self,
        doc_id: &str,
        content: &str,
        embedding: &[f32],
    ) -> Result<(), sqlx::Error> {
        let blob = serialize_embedding(embedding);
        sqlx::query(
            "INSERT OR REPLACE INTO documents (doc_id, content, embedding) VALUES (?1, ?2, ?3)",
        )
        .bind(doc_id)
        .bind(content)
        .bind(&blob)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Top-`limit` documents by cosine similarity to the query vector.
    ///
    /// An empty collection yields an empty result, which is a normal
    /// outcome. Ordering for equal scores follows the scan order and is
    /// stable for identical queries over unchanged data.
    pub async fn search(
        &self,
        query_embedding: &[f32],
        limit: usize,
    ) -> Result<Vec<DocumentMatch>, sqlx::Error> {
        let rows = sqlx::query("SELECT content, embedding FROM documents ORDER BY doc_id")
            .fetch_all(&self.pool)
            .await?;

        let mut scored: Vec<DocumentMatch> = rows
            .iter()
            .filter_map(|row| {
                let embedding_bytes: Vec<u8> = row.get("embedding");
                if embedding_bytes.is_empty() {
                    return None;
                }
                let stored = deserialize_embedding(&embedding_bytes);
                Some(DocumentMatch {
                    content: row.get("content"),
                    score: cosine_similarity(query_embedding, &stored),
                })
            })
            .collect();

        scored.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        scored.truncate(limit);
        Ok(scored)
    }

    pub async fn count(&self) -> Result<usize, sqlx::Error> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM documents")
            .fetch_one(&self.pool)
            .await?;
        Ok(count as usize)
    }

    #[allow(dead_code)]
    pub fn path(&self) -> &Path {
        &self.db_path
    }
}

/// Little-endian f32 serialization of an embedding.
fn serialize_embedding(embedding: &[f32]) -> Vec<u8> {
    embedding.iter().flat_map(|f| f.to_le_bytes()).collect()
}

fn deserialize_embedding(bytes: &[u8]) -> Vec<f32> {
    bytes
        .chunks_exact(4)
        .map(|chunk| f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
        .collect()
}

fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    let denom = norm_a * norm_b;

    if denom <= f32::EPSILON {
        0.0
    } else {
        dot / denom
    }
}
