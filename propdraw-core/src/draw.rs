//! Draw operations — single draw, draws with replacement, draws without
//! replacement.
//!
//! A [`Drawer`] owns the random source and borrows a [`WeightedChoice`] for
//! the length of one call. Every precondition is checked before the source is
//! touched, so a rejected call leaves the random stream where it was.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;

use crate::categorical::{Categorical, SamplerError};
use crate::profiling::{Operation, ProfileScope};
use crate::registry::WeightedChoice;
use crate::source::SharedSource;

/// Errors from draw operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DrawError {
    #[error("cannot draw from an empty registry")]
    EmptyRegistry,
    #[error("draw times must be a positive integer")]
    ZeroTimes,
    #[error("exclusive draw times ({times}) must be less than or equal to the {available} registry entries")]
    TooManyTimes { times: usize, available: usize },
    #[error("exclusive draw times ({times}) exceed the {positive} entries with a positive weight")]
    NotEnoughWeightedEntries { times: usize, positive: usize },
    #[error("sampler error: {0}")]
    Sampler(#[from] SamplerError),
    #[error("inconsistent state: {0}")]
    InconsistentState(&'static str),
}

/// Weighted drawing engine.
///
/// `R` is any `rand::Rng`. [`Drawer::new`] uses the process-wide
/// [`SharedSource`]; tests and reproducible runs inject a seeded source
/// through [`Drawer::with_source`] or [`Drawer::seeded`].
#[derive(Debug, Clone)]
pub struct Drawer<R = SharedSource> {
    rng: R,
}

impl Drawer<SharedSource> {
    /// Drawer over the process-default, uniquely seeded, thread-safe source.
    pub fn new() -> Self {
        Self::with_source(SharedSource::process_default())
    }
}

impl Default for Drawer<SharedSource> {
    fn default() -> Self {
        Self::new()
    }
}

impl Drawer<StdRng> {
    /// Drawer with its own reproducible generator.
    pub fn seeded(seed: u64) -> Self {
        Self::with_source(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Drawer<R> {
    pub fn with_source(rng: R) -> Self {
        Self { rng }
    }

    pub fn source_mut(&mut self) -> &mut R {
        &mut self.rng
    }

    /// Select one key.
    pub fn draw<K: Ord + Clone>(&mut self, choice: &WeightedChoice<K>) -> Result<K, DrawError> {
        let _scope = ProfileScope::new(Operation::Draw);
        if choice.is_empty() {
            return Err(DrawError::EmptyRegistry);
        }

        let snapshot = choice.snapshot();
        let dist = Categorical::new(snapshot.weights())?;
        let index = dist.sample(&mut self.rng);
        snapshot
            .key_at(index)
            .cloned()
            .ok_or(DrawError::InconsistentState("sampled index outside the key list"))
    }

    /// Select `times` keys independently; results may repeat.
    pub fn draw_duplicated<K: Ord + Clone>(
        &mut self,
        choice: &WeightedChoice<K>,
        times: usize,
    ) -> Result<Vec<K>, DrawError> {
        let _scope = ProfileScope::new(Operation::DrawDuplicated);
        if times == 0 {
            return Err(DrawError::ZeroTimes);
        }
        if choice.is_empty() {
            return Err(DrawError::EmptyRegistry);
        }

        // If we only have one choice, there is nothing to sample.
        if let Some(key) = choice.sole_key() {
            return Ok(vec![key.clone(); times]);
        }

        let snapshot = choice.snapshot();
        let dist = Categorical::new(snapshot.weights())?;
        dist.sample_many(&mut self.rng, times)
            .into_iter()
            .map(|index| {
                snapshot
                    .key_at(index)
                    .cloned()
                    .ok_or(DrawError::InconsistentState("sampled index outside the key list"))
            })
            .collect()
    }

    /// Select `times` distinct keys; each chosen key leaves the pool before
    /// the next draw.
    ///
    /// The caller's registry is never modified: draws run against a private
    /// working copy whose index↔key layout is rebuilt after every removal.
    pub fn draw_non_duplicated<K: Ord + Clone>(
        &mut self,
        choice: &WeightedChoice<K>,
        times: usize,
    ) -> Result<Vec<K>, DrawError> {
        let _scope = ProfileScope::new(Operation::DrawNonDuplicated);
        if times == 0 {
            return Err(DrawError::ZeroTimes);
        }
        if times > choice.len() {
            return Err(DrawError::TooManyTimes {
                times,
                available: choice.len(),
            });
        }

        if let Some(key) = choice.sole_key() {
            return Ok(vec![key.clone()]);
        }

        let positive = choice.positive_len();
        if times > positive {
            return Err(DrawError::NotEnoughWeightedEntries { times, positive });
        }

        let mut working = choice.clone();
        let mut results = Vec::with_capacity(times);
        for _ in 0..times {
            if working.is_empty() {
                return Err(DrawError::InconsistentState(
                    "working copy exhausted before all draws completed",
                ));
            }
            let snapshot = working.snapshot();
            let index = Categorical::new(snapshot.weights())?.sample(&mut self.rng);
            let key = snapshot
                .key_at(index)
                .cloned()
                .ok_or(DrawError::InconsistentState("sampled index outside the key list"))?;
            working.remove(&key);
            results.push(key);
        }

        Ok(results)
    }
}
