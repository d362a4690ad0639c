use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use crate::error::{Result, SweepError};
use crate::models::{Band, Combination, BANDS_PER_COMBINATION};

/// Rejection-sampling attempts before falling back to enumeration.
const MAX_DRAW_ATTEMPTS: usize = 64;

/// Draws unique combinations uniformly at random from a fixed candidate set.
///
/// Every combination handed out (or seeded from history) is remembered and never
/// returned again. Once the unseen space gets small, draws switch from
/// rejection sampling to picking from the enumerated unseen combinations, so the
/// sampler always terminates and reports exhaustion with `None`.
pub struct CombinationSampler {
    candidates: Vec<Band>,
    seen: HashSet<Combination>,
    space: usize,
}

impl CombinationSampler {
    /// Create a sampler over `candidates`. Duplicate bands are ignored.
    pub fn new(candidates: &[Band]) -> Result<Self> {
        let mut unique = Vec::with_capacity(candidates.len());
        for &band in candidates {
            if !unique.contains(&band) {
                unique.push(band);
            }
        }

        if unique.len() < BANDS_PER_COMBINATION {
            return Err(SweepError::InvalidConfig(format!(
                "need at least {} distinct candidate bands, got {}",
                BANDS_PER_COMBINATION,
                unique.len()
            )));
        }

        let space = choose(unique.len(), BANDS_PER_COMBINATION);
        Ok(Self {
            candidates: unique,
            seen: HashSet::new(),
            space,
        })
    }

    /// Mark previously tried combinations as seen.
    ///
    /// Combinations using bands outside the candidate set are ignored.
    pub fn seed_history<I>(&mut self, history: I)
    where
        I: IntoIterator<Item = Combination>,
    {
        for combo in history {
            if self.contains(&combo) {
                self.seen.insert(combo);
            }
        }
    }

    /// Total number of distinct combinations, C(K, 3).
    pub fn space_size(&self) -> usize {
        self.space
    }

    /// Combinations not yet handed out or seeded.
    pub fn remaining(&self) -> usize {
        self.space - self.seen.len()
    }

    /// Draw the next unseen combination, or `None` once the space is exhausted.
    pub fn next_combination<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<Combination> {
        let remaining = self.remaining();
        if remaining == 0 {
            return None;
        }

        let combo = if remaining * 4 < self.space {
            self.pick_unseen(rng)
        } else {
            self.draw_rejecting(rng).or_else(|| self.pick_unseen(rng))
        }?;

        self.seen.insert(combo);
        Some(combo)
    }

    fn draw_rejecting<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Combination> {
        for attempt in 0..MAX_DRAW_ATTEMPTS {
            let drawn: Vec<Band> = self
                .candidates
                .choose_multiple(rng, BANDS_PER_COMBINATION)
                .copied()
                .collect();
            let combo = Combination::from_slice(&drawn)?;
            if !self.seen.contains(&combo) {
                return Some(combo);
            }
            debug!(%combo, attempt, "discarding duplicate draw");
        }
        None
    }

    fn pick_unseen<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Combination> {
        self.unseen().choose(rng).copied()
    }

    /// All combinations of the candidate set not yet seen.
    fn unseen(&self) -> Vec<Combination> {
        let n = self.candidates.len();
        let mut out = Vec::with_capacity(self.remaining());
        for i in 0..n {
            for j in (i + 1)..n {
                for k in (j + 1)..n {
                    let combo = Combination::new(
                        self.candidates[i],
                        self.candidates[j],
                        self.candidates[k],
                    );
                    if let Some(combo) = combo.filter(|c| !self.seen.contains(c)) {
                        out.push(combo);
                    }
                }
            }
        }
        out
    }

    fn contains(&self, combo: &Combination) -> bool {
        combo.bands().iter().all(|b| self.candidates.contains(b))
    }
}

/// Binomial coefficient C(n, k).
fn choose(n: usize, k: usize) -> usize {
    if k > n {
        return 0;
    }
    (0..k).fold(1, |acc, i| acc * (n - i) / (i + 1))
}
