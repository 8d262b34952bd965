//! Categorical sampler — index draws proportional to a weight vector.
//!
//! The weight vector is turned into a cumulative partition of `[0, total)`.
//! One uniform value in `[0, total)` is drawn per sample and the segment
//! holding it is located by binary search. Zero weights produce zero-width
//! segments and are never selected.

use rand::Rng;
use thiserror::Error;

/// Errors from building a categorical distribution.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SamplerError {
    #[error("weight vector is empty")]
    Empty,
    #[error("weight {weight} at index {index} must be finite and non-negative")]
    InvalidWeight { index: usize, weight: f64 },
    #[error("total weight must be positive")]
    ZeroTotalWeight,
}

/// A categorical distribution over `0..len`.
///
/// Built once and sampled any number of times; the weights never change
/// between samples.
#[derive(Debug, Clone)]
pub struct Categorical {
    cumulative: Vec<f64>,
    total: f64,
    last_positive: usize,
}

impl Categorical {
    /// Validate `weights` and build the cumulative partition.
    ///
    /// Finite weights whose sum overflows are divided by the largest weight
    /// first; the relative proportions are unchanged.
    pub fn new(weights: &[f64]) -> Result<Self, SamplerError> {
        if weights.is_empty() {
            return Err(SamplerError::Empty);
        }

        let mut max = 0.0f64;
        for (index, &weight) in weights.iter().enumerate() {
            if !weight.is_finite() || weight < 0.0 {
                return Err(SamplerError::InvalidWeight { index, weight });
            }
            max = max.max(weight);
        }
        if max == 0.0 {
            return Err(SamplerError::ZeroTotalWeight);
        }

        let (cumulative, total, last_positive) = partition(weights, 1.0);
        let (cumulative, total, last_positive) = if total.is_finite() {
            (cumulative, total, last_positive)
        } else {
            partition(weights, max)
        };

        match last_positive {
            Some(last_positive) if total > 0.0 => Ok(Self {
                cumulative,
                total,
                last_positive,
            }),
            _ => Err(SamplerError::ZeroTotalWeight),
        }
    }

    /// Number of categories, including zero-weight ones.
    pub fn len(&self) -> usize {
        self.cumulative.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cumulative.is_empty()
    }

    /// Sum of the weights, or of the rescaled weights when the raw sum
    /// overflowed.
    pub fn total_weight(&self) -> f64 {
        self.total
    }

    /// Draw one index.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        let target = rng.gen::<f64>() * self.total;
        self.locate(target)
    }

    /// Draw `count` independent indices.
    pub fn sample_many<R: Rng + ?Sized>(&self, rng: &mut R, count: usize) -> Vec<usize> {
        (0..count).map(|_| self.sample(rng)).collect()
    }

    /// Index of the segment `[cumulative[i-1], cumulative[i])` holding `target`.
    fn locate(&self, target: f64) -> usize {
        // First index whose upper bound lies strictly above the target. Zero-width
        // segments share their upper bound with the previous one and are skipped.
        let index = self.cumulative.partition_point(|&upper| upper <= target);
        if index >= self.cumulative.len() {
            // `u * total` rounded up to `total`.
            self.last_positive
        } else {
            index
        }
    }
}

/// Running sums of `weights / scale`, their total and the last index whose
/// scaled weight is positive.
fn partition(weights: &[f64], scale: f64) -> (Vec<f64>, f64, Option<usize>) {
    let mut cumulative = Vec::with_capacity(weights.len());
    let mut running = 0.0;
    let mut last_positive = None;
    for (index, &weight) in weights.iter().enumerate() {
        let scaled = weight / scale;
        if scaled > 0.0 {
            last_positive = Some(index);
        }
        running += scaled;
        cumulative.push(running);
    }
    (cumulative, running, last_positive)
}

/// Draw one index with probability proportional to `weights[i]`.
pub fn sample<R: Rng + ?Sized>(weights: &[f64], rng: &mut R) -> Result<usize, SamplerError> {
    Ok(Categorical::new(weights)?.sample(rng))
}

/// Draw `count` independent indices against the same weight vector.
pub fn sample_many<R: Rng + ?Sized>(
    weights: &[f64],
    count: usize,
    rng: &mut R,
) -> Result<Vec<usize>, SamplerError> {
    Ok(Categorical::new(weights)?.sample_many(rng, count))
}
