//! Embedding capability.
//!
//! [`Embedder`] is the seam for whatever model turns text into dense vectors.
//! The core only requires that it is deterministic for a fixed model and
//! returns one row per input text. [`HashEmbedder`] is a local, model-free
//! implementation based on feature hashing.

/// FNV-1a feature hashing embedder.
pub mod hash;

pub use hash::HashEmbedder;

use crate::error::EmbedError;

/// Encodes texts into dense float vectors, one row per input.
pub trait Embedder: Send + Sync {
    /// Returns a `texts.len() × D` matrix as a list of rows.
    fn encode(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbedError>;

    /// Encode a single text.
    fn encode_one(&self, text: &str) -> Result<Vec<f32>, EmbedError> {
        self.encode(&[text.to_string()])?
            .pop()
            .ok_or_else(|| EmbedError::Shape("embedder returned no rows for one input".into()))
    }
}
