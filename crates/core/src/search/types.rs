//! Search request and result types.

use crate::config;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Which signal drives the final ranking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    /// BM25 score only. The query is not embedded.
    #[serde(alias = "bm25")]
    Lexical,
    /// Cosine similarity only (all zeros when the vector store is unavailable).
    Vector,
    /// `alpha * lexical + beta * vector`.
    #[default]
    Hybrid,
}

impl SearchMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchMode::Lexical => "lexical",
            SearchMode::Vector => "vector",
            SearchMode::Hybrid => "hybrid",
        }
    }
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Unknown search mode name.
#[derive(Debug, Error)]
#[error("unknown search mode '{0}' (expected lexical, bm25, vector, or hybrid)")]
pub struct ParseModeError(pub String);

impl FromStr for SearchMode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lexical" | "bm25" => Ok(SearchMode::Lexical),
            "vector" => Ok(SearchMode::Vector),
            "hybrid" => Ok(SearchMode::Hybrid),
            _ => Err(ParseModeError(s.to_string())),
        }
    }
}

/// Per-query knobs. Weights are used as given, never validated or renormalized.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SearchOptions {
    pub mode: SearchMode,
    /// Maximum number of hits; 0 returns nothing.
    pub topk: usize,
    /// Lexical weight in hybrid mode.
    pub alpha: f32,
    /// Vector weight in hybrid mode.
    pub beta: f32,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            mode: SearchMode::Hybrid,
            topk: config::DEFAULT_TOPK,
            alpha: config::DEFAULT_ALPHA,
            beta: config::DEFAULT_BETA,
        }
    }
}

impl SearchOptions {
    pub fn with_mode(mut self, mode: SearchMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_topk(mut self, topk: usize) -> Self {
        self.topk = topk;
        self
    }

    pub fn with_weights(mut self, alpha: f32, beta: f32) -> Self {
        self.alpha = alpha;
        self.beta = beta;
        self
    }
}

/// One ranked item with its fused score and both component scores.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    /// Position of the item in the knowledge base.
    pub index: usize,
    /// Score used for ranking.
    pub score: f32,
    /// BM25 score.
    pub lexical_score: f32,
    /// Cosine similarity (0.0 when not computed).
    pub vector_score: f32,
}
