//! Swappable handle to the current index.
//!
//! The index itself is immutable. Rebuilding the knowledge base means building
//! a fresh [`HybridIndex`] and swapping it in; readers holding the previous
//! snapshot keep using it until they drop their `Arc`.

use crate::index::HybridIndex;
use crate::search::{SearchHit, SearchOptions};
use parking_lot::RwLock;
use std::sync::Arc;

/// Cloneable, thread-safe reference to the live index.
#[derive(Clone)]
pub struct SharedIndex {
    current: Arc<RwLock<Arc<HybridIndex>>>,
}

impl SharedIndex {
    pub fn new(index: HybridIndex) -> Self {
        Self {
            current: Arc::new(RwLock::new(Arc::new(index))),
        }
    }

    /// Snapshot of the live index. The lock is held only for the `Arc` clone.
    pub fn current(&self) -> Arc<HybridIndex> {
        Arc::clone(&self.current.read())
    }

    /// Atomically replace the live index, returning the previous one.
    pub fn replace(&self, index: HybridIndex) -> Arc<HybridIndex> {
        let next_len = index.len();
        let prev = std::mem::replace(&mut *self.current.write(), Arc::new(index));
        tracing::info!("Swapped index: {} -> {} items", prev.len(), next_len);
        prev
    }

    /// Search the live index.
    pub fn search(&self, query: &str, opts: &SearchOptions) -> Vec<SearchHit> {
        self.current().search(query, opts)
    }
}
