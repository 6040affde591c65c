//! Search primitives: request options, ranked hits, and hybrid fusion.

/// Weighted score fusion and deterministic top-k selection.
pub mod hybrid;
/// `SearchMode`, `SearchOptions`, and `SearchHit`.
pub mod types;

pub use hybrid::{fuse, top_k};
pub use types::{ParseModeError, SearchHit, SearchMode, SearchOptions};
