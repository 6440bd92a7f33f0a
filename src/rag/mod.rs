//! Retrieval over stored meeting documents.
//!
//! [`Embedder`] turns text into vectors, [`VectorStore`] keeps them and
//! ranks them against a query, and [`QueryCache`] remembers recent
//! retrievals until the stored content changes.

mod cache;
mod embedding;
mod store;

pub use cache::{normalize_query, QueryCache, DEFAULT_CAPACITY};
pub use embedding::{Embedder, HashingEmbedder, DEFAULT_DIMENSION};
pub use store::{
    cosine_similarity, Metadata, PersistentStore, QueryMatch, StoredDocument, VectorStore,
    FILENAME_KEY,
};
