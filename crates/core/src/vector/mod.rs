//! Dense vector similarity over the knowledge base.

/// Dot product, cosine similarity, and L2 normalization kernels.
pub mod distance;
/// Embedding matrix and the `Available | Unavailable` vector store.
pub mod store;

pub use store::{EmbeddingMatrix, VectorStore};
