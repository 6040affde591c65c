//! # hybridqa-core
//!
//! Hybrid retrieval over a small, static question/answer knowledge base:
//! BM25 lexical scoring, dense-vector cosine similarity, and a weighted
//! fusion ranker.
//!
//! This is the core library crate with zero async dependencies. The index is
//! built once and is immutable afterwards; searches take `&self` and can run
//! concurrently from any number of threads.
//!
//! ```text
//! KnowledgeItem[] ─┬─ Tokenizer → stopword filter → InvertedIndex (BM25)
//!                  └─ Embedder → L2 normalize → VectorStore (Available | Unavailable)
//! query ─ lexical scores ┐
//!       ─ vector scores  ┴→ fuse(mode, alpha, beta) → top_k → SearchHit[]
//! ```

/// BM25 lexical search: tokenizer capability, inverted index, and Okapi BM25 scoring.
pub mod bm25;
/// Global configuration constants: BM25 tunables, fusion defaults, and limits.
pub mod config;
/// Embedding capability trait and the feature-hashing embedder.
pub mod embedding;
/// Error types: construction, tokenization, embedding, and range errors.
pub mod error;
/// Swappable shared handle for rebuilding the index.
pub mod handle;
/// The immutable hybrid index and its builder.
pub mod index;
/// Knowledge items and the JSON-lines loader.
pub mod knowledge;
/// Search primitives: options, hits, and hybrid fusion.
pub mod search;
/// Stopword set and loader.
pub mod stopwords;
/// Dense vector store and similarity kernels.
pub mod vector;

pub use error::{EmbedError, IndexError, TokenizeError};
pub use handle::SharedIndex;
pub use index::{HybridIndex, IndexBuilder, IndexStats};
pub use knowledge::{load_knowledge, parse_knowledge, KnowledgeItem};
pub use search::{SearchHit, SearchMode, SearchOptions};
pub use stopwords::Stopwords;
