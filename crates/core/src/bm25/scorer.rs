//! BM25 Okapi scoring engine.
//!
//! Scores every document against a tokenized query using the BM25 formula
//! with configurable `k1` and `b` parameters (defaults in [`crate::config`]).

use crate::bm25::inverted_index::InvertedIndex;
use crate::config;

/// BM25 tunables.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bm25Params {
    /// Term frequency saturation.
    pub k1: f32,
    /// Document length normalization.
    pub b: f32,
}

impl Default for Bm25Params {
    fn default() -> Self {
        Self {
            k1: config::BM25_K1,
            b: config::BM25_B,
        }
    }
}

/// Inverse document frequency: `ln(1 + (N - df + 0.5) / (df + 0.5))`, floored at 0.
pub fn idf(doc_count: usize, document_frequency: usize) -> f32 {
    let n = doc_count as f32;
    let df = document_frequency as f32;
    ((n - df + 0.5) / (df + 0.5) + 1.0).ln().max(0.0)
}

/// BM25 Okapi scores for a query against every document in the index.
///
/// Returns a dense vector of length N indexed by document position. Repeated
/// query tokens contribute once per occurrence. An empty query, or one whose
/// tokens never occur in the corpus, yields all zeros.
pub fn get_scores<T: AsRef<str>>(
    index: &InvertedIndex,
    params: Bm25Params,
    query_tokens: &[T],
) -> Vec<f32> {
    let mut scores = vec![0.0f32; index.doc_count()];
    if query_tokens.is_empty() || scores.is_empty() {
        return scores;
    }

    let n = index.doc_count();
    let avgdl = index.average_doc_length();
    let Bm25Params { k1, b } = params;

    for token in query_tokens {
        let Some(postings) = index.postings(token.as_ref()) else {
            continue;
        };
        let idf = idf(n, postings.len());

        for posting in postings {
            let dl = index.doc_length(posting.doc_id) as f32;
            let tf = posting.term_frequency as f32;
            // A posting implies a non-empty document, so avgdl > 0 here.
            let tf_norm = (tf * (k1 + 1.0)) / (tf + k1 * (1.0 - b + b * dl / avgdl));
            scores[posting.doc_id as usize] += idf * tf_norm;
        }
    }

    scores
}
