//! Vector retrieval for grounding language-model answers.

pub mod index;
pub mod retriever;

pub use index::{DocumentMatch, SqliteVectorIndex};
pub use retriever::Retriever;
