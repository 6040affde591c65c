//! Inverted index for BM25 lexical scoring.
//!
//! Maps terms to postings lists (document position + term frequency). Built
//! once from the tokenized corpus; there is no incremental update path, a
//! changed corpus means a new index.

use std::collections::HashMap;

/// A single entry in a term's postings list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Posting {
    /// Document position in the corpus.
    pub doc_id: u32,
    /// Number of times the term appears in this document.
    pub term_frequency: u32,
}

/// Inverted index mapping terms to postings lists.
///
/// Document lengths are tracked for BM25 length normalization. Postings are
/// appended in ascending `doc_id` order.
#[derive(Debug, Default)]
pub struct InvertedIndex {
    /// term → list of postings
    index: HashMap<String, Vec<Posting>>,
    /// doc_id → document length (number of filtered tokens)
    doc_lengths: Vec<u32>,
    /// Sum of all document lengths (for average calculation)
    total_doc_length: u64,
}

impl InvertedIndex {
    /// Build the index from per-document token sequences, in corpus order.
    pub fn build<T: AsRef<str>>(documents: &[Vec<T>]) -> Self {
        let mut idx = Self {
            index: HashMap::new(),
            doc_lengths: Vec::with_capacity(documents.len()),
            total_doc_length: 0,
        };
        for tokens in documents {
            idx.push_document(tokens);
        }
        idx
    }

    fn push_document<T: AsRef<str>>(&mut self, tokens: &[T]) {
        let doc_id = self.doc_lengths.len() as u32;
        let doc_len = tokens.len() as u32;
        self.doc_lengths.push(doc_len);
        self.total_doc_length += doc_len as u64;

        // Count term frequencies for this doc
        let mut tf_map: HashMap<&str, u32> = HashMap::new();
        for token in tokens {
            *tf_map.entry(token.as_ref()).or_insert(0) += 1;
        }

        for (term, tf) in tf_map {
            self.index.entry(term.to_string()).or_default().push(Posting {
                doc_id,
                term_frequency: tf,
            });
        }
    }

    /// Number of documents in the corpus (N).
    pub fn doc_count(&self) -> usize {
        self.doc_lengths.len()
    }

    /// Number of distinct terms.
    pub fn vocabulary_size(&self) -> usize {
        self.index.len()
    }

    /// Postings for `term`, if any document contains it.
    pub fn postings(&self, term: &str) -> Option<&[Posting]> {
        self.index.get(term).map(Vec::as_slice)
    }

    /// Number of documents containing `term`.
    pub fn document_frequency(&self, term: &str) -> usize {
        self.postings(term).map_or(0, <[Posting]>::len)
    }

    /// Token count of document `doc_id`.
    pub fn doc_length(&self, doc_id: u32) -> u32 {
        self.doc_lengths.get(doc_id as usize).copied().unwrap_or(0)
    }

    /// Returns the average document length across the corpus.
    pub fn average_doc_length(&self) -> f32 {
        if self.doc_lengths.is_empty() {
            return 0.0;
        }
        self.total_doc_length as f32 / self.doc_lengths.len() as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn docs(texts: &[&str]) -> Vec<Vec<String>> {
        texts
            .iter()
            .map(|t| t.split_whitespace().map(str::to_string).collect())
            .collect()
    }

    #[test]
    fn test_build_indexes_terms() {
        let idx = InvertedIndex::build(&docs(&["quick brown fox"]));
        assert_eq!(idx.doc_count(), 1);
        assert!(idx.postings("quick").is_some());
        assert!(idx.postings("brown").is_some());
        assert!(idx.postings("fox").is_some());
        assert!(idx.postings("dog").is_none());
    }

    #[test]
    fn test_term_frequency() {
        let idx = InvertedIndex::build(&docs(&["hello hello hello world"]));
        let postings = idx.postings("hello").unwrap();
        assert_eq!(postings.len(), 1);
        assert_eq!(postings[0].term_frequency, 3);
    }

    #[test]
    fn test_document_frequency() {
        let idx = InvertedIndex::build(&docs(&[
            "rust programming language",
            "python programming language",
            "rust memory",
        ]));
        assert_eq!(idx.doc_count(), 3);
        assert_eq!(idx.document_frequency("programming"), 2);
        assert_eq!(idx.document_frequency("memory"), 1);
        assert_eq!(idx.document_frequency("java"), 0);
        assert_eq!(idx.vocabulary_size(), 5);
    }

    #[test]
    fn test_postings_in_doc_order() {
        let idx = InvertedIndex::build(&docs(&["a b", "b", "c", "b a"]));
        let ids: Vec<u32> = idx.postings("b").unwrap().iter().map(|p| p.doc_id).collect();
        assert_eq!(ids, [0, 1, 3]);
    }

    #[test]
    fn test_average_doc_length() {
        let empty: Vec<Vec<String>> = Vec::new();
        assert_eq!(InvertedIndex::build(&empty).average_doc_length(), 0.0);
        let idx = InvertedIndex::build(&docs(&["one two three", "four five six seven eight"]));
        assert!((idx.average_doc_length() - 4.0).abs() < 1e-6);
    }

    #[test]
    fn test_empty_documents_keep_positions() {
        let idx = InvertedIndex::build(&docs(&["", "solo"]));
        assert_eq!(idx.doc_count(), 2);
        assert_eq!(idx.doc_length(0), 0);
        assert_eq!(idx.doc_length(1), 1);
        assert_eq!(idx.postings("solo").unwrap()[0].doc_id, 1);
    }
}
