//! BM25 lexical search: tokenizer capability, inverted index, and Okapi BM25 scoring.

/// Inverted index: term → postings list, document lengths.
pub mod inverted_index;
/// BM25 Okapi scoring over the whole corpus.
pub mod scorer;
/// Tokenizer trait, default Unicode tokenizer, and stopword filtering.
pub mod tokenizer;

pub use inverted_index::{InvertedIndex, Posting};
pub use scorer::{get_scores, idf, Bm25Params};
pub use tokenizer::{analyze, StopFilter, Tokenizer, UnicodeTokenizer};
