//! The hybrid retrieval index.
//!
//! A [`HybridIndex`] owns a snapshot of the knowledge base together with
//! everything derived from it: the BM25 inverted index, the vector store, the
//! compiled stopword filter, and the tokenizer used for queries. It is built once by
//! [`IndexBuilder`] and never mutated afterwards, so `&HybridIndex` can be
//! shared across threads and searched concurrently without locking.

use crate::bm25::{
    analyze, get_scores, Bm25Params, InvertedIndex, StopFilter, Tokenizer, UnicodeTokenizer,
};
use crate::embedding::Embedder;
use crate::error::IndexError;
use crate::knowledge::KnowledgeItem;
use crate::search::{fuse, top_k, SearchHit, SearchMode, SearchOptions};
use crate::stopwords::Stopwords;
use crate::vector::VectorStore;
use serde::Serialize;
use std::sync::Arc;

/// Configures and builds a [`HybridIndex`].
pub struct IndexBuilder {
    items: Vec<KnowledgeItem>,
    stopwords: Stopwords,
    tokenizer: Arc<dyn Tokenizer>,
    embedder: Option<Arc<dyn Embedder>>,
    params: Bm25Params,
}

impl IndexBuilder {
    /// Starts a builder over `items` with no stopwords, the Unicode tokenizer,
    /// default BM25 parameters, and no embedder.
    pub fn new(items: Vec<KnowledgeItem>) -> Self {
        Self {
            items,
            stopwords: Stopwords::new(),
            tokenizer: Arc::new(UnicodeTokenizer),
            embedder: None,
            params: Bm25Params::default(),
        }
    }

    pub fn stopwords(mut self, stopwords: Stopwords) -> Self {
        self.stopwords = stopwords;
        self
    }

    pub fn tokenizer(mut self, tokenizer: Arc<dyn Tokenizer>) -> Self {
        self.tokenizer = tokenizer;
        self
    }

    /// Embedder used for the vector store. Without one the store is unavailable.
    pub fn embedder(mut self, embedder: Arc<dyn Embedder>) -> Self {
        self.embedder = Some(embedder);
        self
    }

    pub fn bm25_params(mut self, params: Bm25Params) -> Self {
        self.params = params;
        self
    }

    /// Tokenize the corpus, compute BM25 statistics, and embed every item.
    ///
    /// Tokenizer failure (on a stopword or a document) and invalid corpus
    /// statistics abort the build.
    /// Embedder problems only leave the vector store unavailable.
    pub fn build(self) -> Result<HybridIndex, IndexError> {
        let Self {
            items,
            stopwords,
            tokenizer,
            embedder,
            params,
        } = self;

        if !params.k1.is_finite() || params.k1 < 0.0 {
            return Err(IndexError::Construction(format!(
                "k1 must be finite and non-negative, got {}",
                params.k1
            )));
        }
        if !params.b.is_finite() || !(0.0..=1.0).contains(&params.b) {
            return Err(IndexError::Construction(format!(
                "b must be within [0, 1], got {}",
                params.b
            )));
        }
        if let Some((pos, item)) = items.iter().enumerate().find(|(i, it)| it.index != *i) {
            return Err(IndexError::Construction(format!(
                "item at position {} carries index {}; indices must be contiguous from 0",
                pos, item.index
            )));
        }
        if items.len() > u32::MAX as usize {
            return Err(IndexError::Construction(format!(
                "corpus of {} items exceeds the supported maximum",
                items.len()
            )));
        }

        let stop_filter = StopFilter::compile(tokenizer.as_ref(), &stopwords)?;
        let documents = items
            .iter()
            .map(|it| analyze(tokenizer.as_ref(), &stop_filter, &it.lexical_text()))
            .collect::<Result<Vec<_>, _>>()?;
        let lexical = InvertedIndex::build(&documents);

        let texts: Vec<String> = items.iter().map(KnowledgeItem::embedding_text).collect();
        let vectors = VectorStore::build(embedder, &texts);

        let index = HybridIndex {
            items,
            stop_filter,
            tokenizer,
            params,
            lexical,
            vectors,
        };
        let stats = index.stats();
        tracing::info!(
            items = stats.items,
            vocabulary = stats.vocabulary,
            avg_doc_len = stats.avg_doc_len,
            vector_dimension = ?stats.vector_dimension,
            "Built hybrid index"
        );
        Ok(index)
    }
}

/// Summary of a built index.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndexStats {
    pub items: usize,
    pub vocabulary: usize,
    pub avg_doc_len: f32,
    /// Embedding width when the vector store is available.
    pub vector_dimension: Option<usize>,
    /// Why the vector store is unavailable, if it is.
    pub vector_unavailable_reason: Option<String>,
}

/// Immutable hybrid BM25 + vector index over one knowledge base snapshot.
pub struct HybridIndex {
    items: Vec<KnowledgeItem>,
    stop_filter: StopFilter,
    tokenizer: Arc<dyn Tokenizer>,
    params: Bm25Params,
    lexical: InvertedIndex,
    vectors: VectorStore,
}

impl HybridIndex {
    pub fn builder(items: Vec<KnowledgeItem>) -> IndexBuilder {
        IndexBuilder::new(items)
    }

    /// Number of items (N).
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[KnowledgeItem] {
        &self.items
    }

    /// The item at `index`.
    pub fn get_item(&self, index: usize) -> Result<&KnowledgeItem, IndexError> {
        self.items.get(index).ok_or(IndexError::OutOfRange {
            index,
            len: self.items.len(),
        })
    }

    pub fn vector_store(&self) -> &VectorStore {
        &self.vectors
    }

    pub fn bm25_params(&self) -> Bm25Params {
        self.params
    }

    pub fn stats(&self) -> IndexStats {
        IndexStats {
            items: self.items.len(),
            vocabulary: self.lexical.vocabulary_size(),
            avg_doc_len: self.lexical.average_doc_length(),
            vector_dimension: self.vectors.dimension(),
            vector_unavailable_reason: match &self.vectors {
                VectorStore::Unavailable { reason } => Some(reason.clone()),
                VectorStore::Available { .. } => None,
            },
        }
    }

    /// Query tokens after stopword filtering.
    ///
    /// A tokenizer failure at query time is logged and treated as an empty query.
    pub fn query_tokens(&self, query: &str) -> Vec<String> {
        analyze(self.tokenizer.as_ref(), &self.stop_filter, query).unwrap_or_else(|e| {
            tracing::warn!("Query tokenization failed, lexical scores zeroed: {}", e);
            Vec::new()
        })
    }

    /// BM25 score of `query` against every item.
    pub fn lexical_scores(&self, query: &str) -> Vec<f32> {
        get_scores(&self.lexical, self.params, &self.query_tokens(query))
    }

    /// Cosine similarity of `query` against every item (zeros when unavailable).
    pub fn vector_scores(&self, query: &str) -> Vec<f32> {
        self.vectors.scores(query, self.items.len())
    }

    /// Rank items for `query`.
    ///
    /// Never fails: degraded capabilities only show up as zero component scores.
    /// In lexical mode the query is not embedded and every `vector_score` is 0.0.
    pub fn search(&self, query: &str, opts: &SearchOptions) -> Vec<SearchHit> {
        if opts.topk == 0 {
            return Vec::new();
        }

        let lexical = self.lexical_scores(query);
        let vector = match opts.mode {
            SearchMode::Lexical => vec![0.0; self.items.len()],
            SearchMode::Vector | SearchMode::Hybrid => self.vector_scores(query),
        };
        let fused = fuse(opts.mode, &lexical, &vector, opts.alpha, opts.beta);

        let hits: Vec<SearchHit> = top_k(&fused, opts.topk)
            .into_iter()
            .map(|i| SearchHit {
                index: i,
                score: fused[i],
                lexical_score: lexical[i],
                vector_score: vector[i],
            })
            .collect();

        tracing::debug!(
            mode = %opts.mode,
            topk = opts.topk,
            hits = hits.len(),
            "search complete"
        );
        hits
    }
}

impl std::fmt::Debug for HybridIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HybridIndex")
            .field("items", &self.items.len())
            .field("vocabulary", &self.lexical.vocabulary_size())
            .field("params", &self.params)
            .field("vectors", &self.vectors)
            .finish()
    }
}
