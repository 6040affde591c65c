//! Score fusion and top-k selection.
//!
//! Both signals arrive as dense per-item vectors of equal length. Fusion is a
//! plain weighted sum; scores are not min-max normalized and weights are not
//! renormalized. Ranking is descending by fused score with ties broken by
//! ascending item position, so output order is fully deterministic.

use crate::search::types::SearchMode;
use ordered_float::OrderedFloat;
use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// Combine lexical and vector score vectors according to `mode`.
///
/// - `Lexical`: the lexical vector as-is
/// - `Vector`: the vector scores as-is
/// - `Hybrid`: `alpha * lexical + beta * vector`
pub fn fuse(mode: SearchMode, lexical: &[f32], vector: &[f32], alpha: f32, beta: f32) -> Vec<f32> {
    debug_assert_eq!(lexical.len(), vector.len());
    match mode {
        SearchMode::Lexical => lexical.to_vec(),
        SearchMode::Vector => vector.to_vec(),
        SearchMode::Hybrid => lexical
            .iter()
            .zip(vector)
            .map(|(&l, &v)| alpha * l + beta * v)
            .collect(),
    }
}

/// Ranking key: higher score first, then lower position.
type RankKey = (OrderedFloat<f32>, Reverse<usize>);

/// Positions of the `k` best scores, best first.
///
/// Equal scores order by ascending position. `k == 0` yields nothing;
/// `k >= scores.len()` ranks everything.
pub fn top_k(scores: &[f32], k: usize) -> Vec<usize> {
    if k == 0 || scores.is_empty() {
        return Vec::new();
    }
    let k = k.min(scores.len());

    // Partial sort: O(n log k) via min-heap of size k
    let mut heap: BinaryHeap<Reverse<RankKey>> = BinaryHeap::with_capacity(k + 1);
    for (i, &score) in scores.iter().enumerate() {
        heap.push(Reverse((OrderedFloat(score), Reverse(i))));
        if heap.len() > k {
            heap.pop();
        }
    }
    let mut ranked: Vec<RankKey> = heap.into_iter().map(|Reverse(key)| key).collect();
    ranked.sort_unstable_by(|a, b| b.cmp(a));
    ranked.into_iter().map(|(_, Reverse(i))| i).collect()
}
