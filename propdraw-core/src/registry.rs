//! Weighted choice registry.
//!
//! Maps unique, totally ordered keys to non-negative weights. The key
//! ordering is the canonical order: [`WeightedChoice::snapshot`] lays keys
//! and weights out in that order, so index `i` of the weight vector always
//! names the `i`-th key.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from populating a registry.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RegistryError {
    #[error("weight {weight} for key {key} must be finite and non-negative")]
    InvalidWeight { key: String, weight: f64 },
}

/// An ordered key→weight registry.
///
/// Weights need not sum to any fixed total; samplers normalize internally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(
    serialize = "K: Ord + Serialize",
    deserialize = "K: Ord + Deserialize<'de>"
))]
pub struct WeightedChoice<K> {
    entries: BTreeMap<K, f64>,
}

impl<K: Ord> Default for WeightedChoice<K> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }
}

impl<K: Ord + Clone> WeightedChoice<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from `(key, weight)` pairs. A repeated key keeps its
    /// last weight.
    pub fn from_entries<I>(entries: I) -> Result<Self, RegistryError>
    where
        I: IntoIterator<Item = (K, f64)>,
        K: std::fmt::Debug,
    {
        let mut choice = Self::new();
        for (key, weight) in entries {
            choice.insert(key, weight)?;
        }
        Ok(choice)
    }

    /// Insert or replace a key's weight, returning the previous weight.
    pub fn insert(&mut self, key: K, weight: f64) -> Result<Option<f64>, RegistryError>
    where
        K: std::fmt::Debug,
    {
        if !weight.is_finite() || weight < 0.0 {
            return Err(RegistryError::InvalidWeight {
                key: format!("{key:?}"),
                weight,
            });
        }
        Ok(self.entries.insert(key, weight))
    }

    /// Remove a key, returning its weight.
    pub fn remove(&mut self, key: &K) -> Option<f64> {
        self.entries.remove(key)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of entries that can actually be drawn.
    pub fn positive_len(&self) -> usize {
        self.entries.values().filter(|&&w| w > 0.0).count()
    }

    pub fn contains(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    pub fn weight(&self, key: &K) -> Option<f64> {
        self.entries.get(key).copied()
    }

    /// Sum of all weights; infinite when large finite weights overflow it.
    pub fn total_weight(&self) -> f64 {
        self.entries.values().sum()
    }

    /// Normalized probability of drawing `key` in a single draw.
    ///
    /// `None` for unknown keys or when every weight is zero.
    pub fn probability(&self, key: &K) -> Option<f64> {
        let weight = self.weight(key)?;
        let total = self.total_weight();
        if total <= 0.0 {
            return None;
        }
        if total.is_finite() {
            return Some(weight / total);
        }
        // Sum overflowed: compare against the largest weight instead.
        let max = self.entries.values().copied().fold(0.0, f64::max);
        let scaled: f64 = self.entries.values().map(|w| w / max).sum();
        Some(weight / max / scaled)
    }

    /// Entries in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, f64)> + '_ {
        self.entries.iter().map(|(k, &w)| (k, w))
    }

    /// Keys in canonical order.
    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.entries.keys()
    }

    /// The only key, when the registry holds exactly one entry.
    pub fn sole_key(&self) -> Option<&K> {
        if self.entries.len() == 1 {
            self.entries.keys().next()
        } else {
            None
        }
    }

    /// Lay the registry out as parallel key and weight vectors.
    pub fn snapshot(&self) -> IndexedWeights<K> {
        let mut keys = Vec::with_capacity(self.entries.len());
        let mut weights = Vec::with_capacity(self.entries.len());
        for (key, &weight) in &self.entries {
            keys.push(key.clone());
            weights.push(weight);
        }
        IndexedWeights { keys, weights }
    }
}

/// Parallel key and weight vectors in canonical order.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexedWeights<K> {
    keys: Vec<K>,
    weights: Vec<f64>,
}

impl<K> IndexedWeights<K> {
    pub fn keys(&self) -> &[K] {
        &self.keys
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Key at a sampled index.
    pub fn key_at(&self, index: usize) -> Option<&K> {
        self.keys.get(index)
    }
}
