//! Deterministic feature-hashing embedder.
//!
//! Each lowercased character unigram and adjacent bigram is hashed with
//! FNV-1a into one of `dimension` buckets; one hash bit picks the sign. Texts
//! sharing characters and short phrases land close in cosine space, which is
//! enough to rank paraphrases in CJK or Latin text without a neural model.

use super::Embedder;
use crate::config;
use crate::error::EmbedError;

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// Weight of a bigram feature relative to a unigram.
const BIGRAM_WEIGHT: f32 = 1.5;

/// Feature-hashing embedder over character n-grams.
#[derive(Debug, Clone, Copy)]
pub struct HashEmbedder {
    dimension: usize,
}

impl HashEmbedder {
    /// Creates an embedder producing `dimension`-wide vectors.
    ///
    /// Returns `EmbedError::Unavailable` when the dimension is zero or above
    /// [`config::MAX_EMBEDDING_DIM`].
    pub fn new(dimension: usize) -> Result<Self, EmbedError> {
        if dimension == 0 || dimension > config::MAX_EMBEDDING_DIM {
            return Err(EmbedError::Unavailable(format!(
                "dimension must be in 1..={}, got {}",
                config::MAX_EMBEDDING_DIM,
                dimension
            )));
        }
        Ok(Self { dimension })
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    fn embed(&self, text: &str) -> Vec<f32> {
        let mut v = vec![0.0f32; self.dimension];
        let chars: Vec<char> = text
            .to_lowercase()
            .chars()
            .filter(|c| c.is_alphanumeric())
            .collect();

        for &c in &chars {
            self.accumulate(&mut v, &[c], 1.0);
        }
        for pair in chars.windows(2) {
            self.accumulate(&mut v, pair, BIGRAM_WEIGHT);
        }
        v
    }

    fn accumulate(&self, v: &mut [f32], gram: &[char], weight: f32) {
        let h = fnv1a(gram);
        let bucket = (h % self.dimension as u64) as usize;
        let sign = if (h >> 63) & 1 == 0 { 1.0 } else { -1.0 };
        v[bucket] += sign * weight;
    }
}

impl Default for HashEmbedder {
    fn default() -> Self {
        Self {
            dimension: config::DEFAULT_EMBEDDING_DIM,
        }
    }
}

impl Embedder for HashEmbedder {
    fn encode(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbedError> {
        Ok(texts.iter().map(|t| self.embed(t)).collect())
    }
}

fn fnv1a(gram: &[char]) -> u64 {
    let mut hash = FNV_OFFSET;
    let mut buf = [0u8; 4];
    for c in gram {
        for &byte in c.encode_utf8(&mut buf).as_bytes() {
            hash ^= byte as u64;
            hash = hash.wrapping_mul(FNV_PRIME);
        }
    }
    hash
}
