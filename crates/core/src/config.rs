//! Global configuration constants for hybridqa.
//!
//! All scoring tunables, fusion defaults, and input limits are defined here.
//! These are compile-time constants; runtime configuration is handled via CLI
//! arguments and environment variables in the `hybridqa` binary.

/// BM25 Okapi term frequency saturation parameter.
///
/// Controls how quickly term frequency saturates. Higher values allow TF to grow more.
/// Typical range: 1.2–2.0. Default: 1.5.
pub const BM25_K1: f32 = 1.5;

/// BM25 Okapi document length normalization parameter.
///
/// Controls the impact of document length on scoring. 0.0 = no normalization,
/// 1.0 = full normalization. Standard value is 0.75.
pub const BM25_B: f32 = 0.75;

/// Default weight of the lexical (BM25) score in hybrid fusion.
pub const DEFAULT_ALPHA: f32 = 0.6;

/// Default weight of the vector (cosine) score in hybrid fusion.
///
/// Not required to sum to 1 with [`DEFAULT_ALPHA`]; weights are never renormalized.
pub const DEFAULT_BETA: f32 = 0.4;

/// Default number of results returned per query.
pub const DEFAULT_TOPK: usize = 5;

/// Default dimension of the feature-hashing embedder.
pub const DEFAULT_EMBEDDING_DIM: usize = 256;

/// Maximum accepted embedding dimension for the feature-hashing embedder.
pub const MAX_EMBEDDING_DIM: usize = 4096;

/// Maximum length of a query string in bytes accepted at the CLI boundary.
pub const MAX_QUERY_LEN: usize = 4096;

/// Default path of the JSON-lines knowledge base.
pub const DEFAULT_KB_PATH: &str = "data/kb.jsonl";

/// Default path of the stopword list (one token per line).
pub const DEFAULT_STOPWORDS_PATH: &str = "data/stopwords.txt";
