//! Duration-Constrained Selector.
//!
//! Greedy, single pass, no backtracking: the candidates are shuffled once and
//! every track that still fits under the target is taken, until the running
//! total is within [`SLACK_SECS`] of the target.

use std::collections::HashSet;

use rand::{SeedableRng, rngs::StdRng, seq::SliceRandom};

use crate::{error::SetError, spotify::Catalog};

use super::TrackLookup;

/// Distance to the target at which the selection stops early.
pub const SLACK_SECS: u64 = 60;

/// Source of the candidate order.
pub trait Shuffler: Send {
    fn shuffle(&mut self, uris: &mut [String]);
}

/// Uniform full permutation driven by a seedable generator.
#[derive(Debug, Clone)]
pub struct SeededShuffle {
    rng: StdRng,
}

impl SeededShuffle {
    /// Reproducible order for a given seed.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Seeded from the operating system; what production requests use.
    pub fn fresh() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }
}

impl Shuffler for SeededShuffle {
    fn shuffle(&mut self, uris: &mut [String]) {
        uris.shuffle(&mut self.rng);
    }
}

/// Leaves the candidates in their given order.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeepOrder;

impl Shuffler for KeepOrder {
    fn shuffle(&mut self, _uris: &mut [String]) {}
}

/// Tracks chosen so far and their cumulative duration.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    uris: Vec<String>,
    seen: HashSet<String>,
    total_secs: u64,
}

impl Selection {
    pub fn contains(&self, uri: &str) -> bool {
        self.seen.contains(uri)
    }

    pub fn push(&mut self, uri: String, duration_secs: u64) {
        self.seen.insert(uri.clone());
        self.uris.push(uri);
        self.total_secs += duration_secs;
    }

    pub fn total_secs(&self) -> u64 {
        self.total_secs
    }

    pub fn into_uris(self) -> Vec<String> {
        self.uris
    }
}

/// Picks an ordered subset of `candidates` that fits in `target_minutes`.
///
/// Without a target the candidates are returned untouched. With a target, the
/// cumulative duration of the result never exceeds `target_minutes * 60`
/// seconds, and no uri is taken twice.
///
/// # Errors
///
/// Any failed track lookup aborts the selection; no partial result is
/// returned.
pub async fn select<C, S>(
    lookup: &mut TrackLookup<'_, C>,
    candidates: Vec<String>,
    target_minutes: Option<u32>,
    shuffler: &mut S,
) -> Result<Vec<String>, SetError>
where
    C: Catalog + ?Sized,
    S: Shuffler + ?Sized,
{
    let Some(minutes) = target_minutes else {
        return Ok(candidates);
    };

    let target = u64::from(minutes) * 60;
    let threshold = target.saturating_sub(SLACK_SECS);

    let mut pool = candidates;
    shuffler.shuffle(&mut pool);

    let mut selection = Selection::default();
    for uri in pool {
        if selection.contains(&uri) {
            continue;
        }

        let duration = lookup.get(&uri).await?.duration_secs();
        if selection.total_secs() + duration <= target {
            selection.push(uri, duration);
        }

        if selection.total_secs() >= threshold {
            break;
        }
    }

    Ok(selection.into_uris())
}
