use std::cmp::Ordering;
use std::collections::BinaryHeap;

use serde::{Deserialize, Serialize};

use crate::error::MatchError;
use crate::models::{PairKey, PairScore};

/// Which end of the score range counts as "top"
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionOrder {
    /// Smallest scores first
    #[default]
    Lowest,
    /// Largest scores first
    Highest,
}

/// Heap entry ordered by rank: "less" means ranked ahead.
/// Equal scores fall back to ascending pair key.
#[derive(Debug, Clone, Copy)]
struct Ranked {
    key: PairKey,
    score: f64,
    order: SelectionOrder,
}

impl PartialEq for Ranked {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Ranked {}

impl PartialOrd for Ranked {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Ranked {
    fn cmp(&self, other: &Self) -> Ordering {
        let by_score = match self.order {
            SelectionOrder::Lowest => self.score.total_cmp(&other.score),
            SelectionOrder::Highest => other.score.total_cmp(&self.score),
        };
        by_score.then_with(|| self.key.cmp(&other.key))
    }
}

/// Select the `k` best-ranked pairs, returned in rank order.
///
/// Keeps at most `k` entries in a max-heap whose top is the worst retained
/// entry, so the cost is O(M log K) over M candidates. The result does not
/// depend on the order of `candidates`.
///
/// # Errors
/// `SelectionUnderflow` when `k` exceeds the number of candidates.
pub fn select_top_k(
    candidates: Vec<PairScore>,
    k: usize,
    order: SelectionOrder,
) -> Result<Vec<PairScore>, MatchError> {
    if k > candidates.len() {
        return Err(MatchError::SelectionUnderflow {
            requested: k,
            available: candidates.len(),
        });
    }
    if k == 0 {
        return Ok(Vec::new());
    }

    let mut heap: BinaryHeap<Ranked> = BinaryHeap::with_capacity(k + 1);
    for candidate in candidates {
        let item = Ranked {
            key: candidate.key,
            score: candidate.score,
            order,
        };
        if heap.len() < k {
            heap.push(item);
        } else if let Some(worst) = heap.peek() {
            if item < *worst {
                let _ = heap.pop();
                heap.push(item);
            }
        }
    }

    Ok(heap
        .into_sorted_vec()
        .into_iter()
        .map(|r| PairScore {
            key: r.key,
            score: r.score,
        })
        .collect())
}
