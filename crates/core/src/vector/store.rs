//! Dense vector store over the knowledge base.
//!
//! Built best-effort: if there is no embedder, or the embedder fails or
//! returns a malformed matrix, the store is [`VectorStore::Unavailable`] and
//! every vector score is 0.0. Callers observe the tag, never an error.

use super::distance::{dot_product_f32, l2_normalize};
use crate::embedding::Embedder;
use std::fmt;
use std::sync::Arc;

/// Row-major N×D matrix of unit-L2-norm embeddings, one row per item.
///
/// All rows live contiguously in a single arena.
#[derive(Debug, Clone, PartialEq)]
pub struct EmbeddingMatrix {
    data: Vec<f32>,
    rows: usize,
    dimension: usize,
}

impl EmbeddingMatrix {
    /// Build from raw rows, L2-normalizing each one.
    ///
    /// Fails when rows are ragged or zero-width.
    pub fn from_rows(rows: Vec<Vec<f32>>) -> Result<Self, String> {
        let dimension = rows.first().map_or(0, Vec::len);
        if dimension == 0 && !rows.is_empty() {
            return Err("embedder returned zero-width vectors".into());
        }
        let mut data = Vec::with_capacity(rows.len() * dimension);
        for (i, mut row) in rows.into_iter().enumerate() {
            if row.len() != dimension {
                return Err(format!(
                    "row {} has dimension {}, expected {}",
                    i,
                    row.len(),
                    dimension
                ));
            }
            l2_normalize(&mut row);
            data.extend_from_slice(&row);
        }
        let rows = if dimension == 0 { 0 } else { data.len() / dimension };
        Ok(Self {
            data,
            rows,
            dimension,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Row `i` as a slice.
    pub fn row(&self, i: usize) -> &[f32] {
        let start = i * self.dimension;
        &self.data[start..start + self.dimension]
    }

    /// Dot product of a (normalized) query against every row.
    pub fn similarities(&self, query: &[f32]) -> Vec<f32> {
        (0..self.rows)
            .map(|i| dot_product_f32(self.row(i), query))
            .collect()
    }
}

/// Vector store state: embeddings plus the embedder that produced them, or
/// the reason they are missing.
#[derive(Clone)]
pub enum VectorStore {
    Available {
        embedder: Arc<dyn Embedder>,
        matrix: EmbeddingMatrix,
    },
    Unavailable {
        reason: String,
    },
}

impl VectorStore {
    /// Embed every text once and normalize the rows.
    ///
    /// Never fails: any problem yields `Unavailable` with the reason logged.
    pub fn build(embedder: Option<Arc<dyn Embedder>>, texts: &[String]) -> Self {
        let Some(embedder) = embedder else {
            return Self::unavailable("no embedder configured");
        };
        if texts.is_empty() {
            return Self::unavailable("knowledge base is empty");
        }

        let rows = match embedder.encode(texts) {
            Ok(rows) => rows,
            Err(e) => return Self::unavailable(e.to_string()),
        };
        if rows.len() != texts.len() {
            return Self::unavailable(format!(
                "embedder returned {} rows for {} texts",
                rows.len(),
                texts.len()
            ));
        }

        match EmbeddingMatrix::from_rows(rows) {
            Ok(matrix) => {
                tracing::info!(
                    "Vector store ready: {} rows x {} dims",
                    matrix.rows(),
                    matrix.dimension()
                );
                Self::Available { embedder, matrix }
            }
            Err(reason) => Self::unavailable(reason),
        }
    }

    fn unavailable(reason: impl Into<String>) -> Self {
        let reason = reason.into();
        tracing::warn!("Vector store unavailable, vector scores will be 0: {}", reason);
        Self::Unavailable { reason }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Self::Available { .. })
    }

    /// Embedding dimension, if available.
    pub fn dimension(&self) -> Option<usize> {
        match self {
            Self::Available { matrix, .. } => Some(matrix.dimension()),
            Self::Unavailable { .. } => None,
        }
    }

    /// Cosine similarity of `query` against every item, as a dense vector of length `n`.
    ///
    /// Returns all zeros without calling the embedder when unavailable, and
    /// all zeros when the query embedding fails or has the wrong dimension.
    pub fn scores(&self, query: &str, n: usize) -> Vec<f32> {
        let (embedder, matrix) = match self {
            Self::Available { embedder, matrix } => (embedder, matrix),
            Self::Unavailable { .. } => return vec![0.0; n],
        };

        let mut qv = match embedder.encode_one(query) {
            Ok(qv) => qv,
            Err(e) => {
                tracing::warn!("Query embedding failed, vector scores zeroed: {}", e);
                return vec![0.0; n];
            }
        };
        if qv.len() != matrix.dimension() {
            tracing::warn!(
                "Query embedding has dimension {}, expected {}; vector scores zeroed",
                qv.len(),
                matrix.dimension()
            );
            return vec![0.0; n];
        }
        l2_normalize(&mut qv);
        matrix.similarities(&qv)
    }
}

impl fmt::Debug for VectorStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Available { matrix, .. } => f
                .debug_struct("Available")
                .field("rows", &matrix.rows())
                .field("dimension", &matrix.dimension())
                .finish(),
            Self::Unavailable { reason } => f
                .debug_struct("Unavailable")
                .field("reason", reason)
                .finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EmbedError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Embeds each text as a fixed vector keyed by its first character.
    struct Table {
        calls: AtomicUsize,
    }

    impl Embedder for Table {
        fn encode(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbedError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(texts
                .iter()
                .map(|t| match t.chars().next() {
                    Some('a') => vec![3.0, 0.0],
                    Some('b') => vec![0.0, 2.0],
                    _ => vec![1.0, 1.0],
                })
                .collect())
        }
    }

    struct Broken;

    impl Embedder for Broken {
        fn encode(&self, _texts: &[String]) -> Result<Vec<Vec<f32>>, EmbedError> {
            Err(EmbedError::Unavailable("model missing".into()))
        }
    }

    struct ShortRows;

    impl Embedder for ShortRows {
        fn encode(&self, _texts: &[String]) -> Result<Vec<Vec<f32>>, EmbedError> {
            Ok(vec![vec![1.0]])
        }
    }

    fn texts(ts: &[&str]) -> Vec<String> {
        ts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_rows_are_normalized() {
        let e: Arc<dyn Embedder> = Arc::new(Table {
            calls: AtomicUsize::new(0),
        });
        let store = VectorStore::build(Some(e), &texts(&["apple", "banana", "cherry"]));
        let VectorStore::Available { matrix, .. } = &store else {
            panic!("expected available store, got {store:?}");
        };
        assert_eq!(matrix.rows(), 3);
        for i in 0..3 {
            let norm = dot_product_f32(matrix.row(i), matrix.row(i));
            assert!((norm - 1.0).abs() < 1e-6, "row {i} norm {norm}");
        }
    }

    #[test]
    fn test_scores_are_cosine() {
        let e: Arc<dyn Embedder> = Arc::new(Table {
            calls: AtomicUsize::new(0),
        });
        let store = VectorStore::build(Some(e), &texts(&["apple", "banana", "cherry"]));
        let scores = store.scores("avocado", 3);
        assert!((scores[0] - 1.0).abs() < 1e-6);
        assert!(scores[1].abs() < 1e-6);
        assert!((scores[2] - std::f32::consts::FRAC_1_SQRT_2).abs() < 1e-6);
    }

    #[test]
    fn test_no_embedder_is_unavailable() {
        let store = VectorStore::build(None, &texts(&["a"]));
        assert!(!store.is_available());
        assert_eq!(store.scores("a", 1), vec![0.0]);
    }

    #[test]
    fn test_failing_embedder_is_unavailable() {
        let store = VectorStore::build(Some(Arc::new(Broken)), &texts(&["a", "b"]));
        match &store {
            VectorStore::Unavailable { reason } => assert!(reason.contains("model missing")),
            other => panic!("expected unavailable, got {other:?}"),
        }
        assert_eq!(store.scores("a", 2), vec![0.0, 0.0]);
    }

    #[test]
    fn test_row_count_mismatch_is_unavailable() {
        let store = VectorStore::build(Some(Arc::new(ShortRows)), &texts(&["a", "b"]));
        assert!(!store.is_available());
    }

    #[test]
    fn test_empty_corpus_is_unavailable() {
        let e: Arc<dyn Embedder> = Arc::new(Table {
            calls: AtomicUsize::new(0),
        });
        let store = VectorStore::build(Some(e), &[]);
        assert!(!store.is_available());
        assert!(store.scores("a", 0).is_empty());
    }

    #[test]
    fn test_unavailable_never_calls_embedder() {
        let table = Arc::new(Table {
            calls: AtomicUsize::new(0),
        });
        let store = VectorStore::build(Some(table.clone()), &[]);
        store.scores("query", 0);
        assert_eq!(table.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_ragged_rows_rejected() {
        assert!(EmbeddingMatrix::from_rows(vec![vec![1.0, 0.0], vec![1.0]]).is_err());
        assert!(EmbeddingMatrix::from_rows(vec![vec![]]).is_err());
    }
}
