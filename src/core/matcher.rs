use std::collections::{BTreeMap, HashSet};
use std::time::Instant;

use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::core::{
    scoring::score_pair,
    selection::{select_top_k, SelectionOrder},
};
use crate::error::{MatchError, ScoreError};
use crate::models::{PairKey, PairScore, Profile};

/// Profile count above which the O(N²) pair enumeration gets slow
pub const LARGE_PROFILE_SET: usize = 5_000;

/// Options for the ranking engine
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatcherOptions {
    pub order: SelectionOrder,
    /// Score pairs on the rayon thread pool
    pub parallel: bool,
    /// Drop pairs the scorer rejects instead of failing the run
    pub skip_unscorable: bool,
}

/// Ranking engine - scores every unordered profile pair and selects the top K
///
/// # Pipeline Stages
/// 1. Reject duplicate profile ids
/// 2. Enumerate pairs i < j and score each once
/// 3. Bounded top-K selection with pair-key tie-break
#[derive(Debug, Clone, Default)]
pub struct Matcher {
    options: MatcherOptions,
}

impl Matcher {
    pub fn new(options: MatcherOptions) -> Self {
        Self { options }
    }

    /// Score and select the `k` top-ranked pairs across all profiles
    ///
    /// # Arguments
    /// * `profiles` - All profiles, ids unique
    /// * `k` - Number of pairs to return
    ///
    /// # Returns
    /// Exactly `k` pairs in rank order, or `SelectionUnderflow` when fewer
    /// than `k` scorable pairs exist.
    pub fn rank(&self, profiles: &[Profile], k: usize) -> Result<Vec<PairScore>, MatchError> {
        let started = Instant::now();

        let scores = self.score_all(profiles)?;
        let candidates: Vec<PairScore> = scores
            .into_iter()
            .map(|(key, score)| PairScore { key, score })
            .collect();
        let candidate_count = candidates.len();

        let selected = select_top_k(candidates, k, self.options.order)?;

        info!(
            "Ranked {} pairs from {} profiles, selected {} ({:?} first) in {:?}",
            candidate_count,
            profiles.len(),
            selected.len(),
            self.options.order,
            started.elapsed()
        );

        Ok(selected)
    }

    /// Score every unordered pair once, keyed by pair.
    ///
    /// The profile with the lower id is always the scorer's first argument,
    /// so the result does not depend on input order or on `parallel`.
    pub fn score_all(&self, profiles: &[Profile]) -> Result<BTreeMap<PairKey, f64>, MatchError> {
        check_unique_ids(profiles)?;

        let n = profiles.len();
        if n > LARGE_PROFILE_SET {
            warn!(
                "Scoring {} profiles means {} pairs; expect this to be slow",
                n,
                n * (n - 1) / 2
            );
        }

        let scored: Vec<(PairKey, Result<f64, ScoreError>)> = if self.options.parallel {
            (0..n)
                .into_par_iter()
                .flat_map_iter(|i| ((i + 1)..n).map(move |j| (i, j)))
                .map(|(i, j)| score_indexed(profiles, i, j))
                .collect::<Result<_, _>>()?
        } else {
            (0..n)
                .flat_map(|i| ((i + 1)..n).map(move |j| (i, j)))
                .map(|(i, j)| score_indexed(profiles, i, j))
                .collect::<Result<_, _>>()?
        };

        // Errors are resolved in enumeration order so the reported failure
        // is the same in sequential and parallel mode.
        let mut scores = BTreeMap::new();
        for (key, result) in scored {
            match result {
                Ok(score) => {
                    scores.insert(key, score);
                }
                Err(e) if self.options.skip_unscorable => {
                    warn!("Skipping pair ({}, {}): {}", key.first(), key.second(), e);
                }
                Err(e) => return Err(e.into()),
            }
        }

        debug!("Scored {} of {} pairs", scores.len(), n * n.saturating_sub(1) / 2);
        Ok(scores)
    }
}

fn score_indexed(
    profiles: &[Profile],
    i: usize,
    j: usize,
) -> Result<(PairKey, Result<f64, ScoreError>), MatchError> {
    let (p, q) = (&profiles[i], &profiles[j]);
    let key = PairKey::new(p.id(), q.id())?;
    let (a, b) = if p.id() < q.id() { (p, q) } else { (q, p) };
    Ok((key, score_pair(a, b)))
}

fn check_unique_ids(profiles: &[Profile]) -> Result<(), MatchError> {
    let mut seen = HashSet::with_capacity(profiles.len());
    for profile in profiles {
        if !seen.insert(profile.id()) {
            return Err(MatchError::DuplicateProfile(profile.id()));
        }
    }
    Ok(())
}
