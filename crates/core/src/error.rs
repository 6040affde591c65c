//! Error types surfaced by the retrieval core.
//!
//! Only index construction failures and out-of-range item lookups reach callers.
//! Embedder failures never appear here; they are absorbed into
//! [`VectorStore::Unavailable`](crate::vector::VectorStore::Unavailable) and
//! zero vector scores.

use thiserror::Error;

/// Failure reported by a [`Tokenizer`](crate::bm25::Tokenizer) implementation.
#[derive(Debug, Error)]
#[error("tokenization failed: {0}")]
pub struct TokenizeError(pub String);

/// Failure reported by an [`Embedder`](crate::embedding::Embedder) implementation.
#[derive(Debug, Error)]
pub enum EmbedError {
    /// The embedding model could not be loaded or is not configured.
    #[error("embedder unavailable: {0}")]
    Unavailable(String),
    /// The model returned output of an unexpected shape.
    #[error("embedding shape mismatch: {0}")]
    Shape(String),
    /// Any other model failure.
    #[error("embedding failed: {0}")]
    Failed(String),
}

/// Errors returned by [`HybridIndex`](crate::index::HybridIndex).
#[derive(Debug, Error)]
pub enum IndexError {
    /// Corpus statistics could not be built; the index was not created.
    #[error("index construction failed: {0}")]
    Construction(String),
    /// The tokenizer failed while tokenizing the corpus; the index was not created.
    #[error(transparent)]
    Tokenize(#[from] TokenizeError),
    /// `get_item` was called with an index outside `0..len`.
    #[error("item index {index} out of range (corpus has {len} items)")]
    OutOfRange { index: usize, len: usize },
}
