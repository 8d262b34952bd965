//! Random sources.
//!
//! Anything implementing `rand::Rng` can drive the sampler. This module adds
//! the sources the crate hands out by default:
//! - [`SharedSource`]: a cloneable, thread-safe handle over a single `StdRng`
//! - [`SharedSource::process_default`]: one lazily built, entropy-seeded source per process
//! - [`SeedHierarchy`]: deterministic sub-seeds per `(label, round)`, derived via BLAKE3

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use std::sync::{Arc, Mutex, MutexGuard, OnceLock};

static PROCESS_DEFAULT: OnceLock<SharedSource> = OnceLock::new();

/// Thread-safe random source.
///
/// Clones share one generator; every call locks it, so draws from several
/// threads never observe the same state twice.
#[derive(Debug, Clone)]
pub struct SharedSource {
    inner: Arc<Mutex<StdRng>>,
}

impl SharedSource {
    /// Wrap an existing generator.
    pub fn new(rng: StdRng) -> Self {
        Self {
            inner: Arc::new(Mutex::new(rng)),
        }
    }

    /// A uniquely seeded source (OS entropy).
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }

    /// A reproducible source.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// Process-wide default source. Built on first use and seeded once from
    /// OS entropy; every call returns a handle to the same generator.
    pub fn process_default() -> Self {
        PROCESS_DEFAULT.get_or_init(Self::from_entropy).clone()
    }

    fn lock(&self) -> MutexGuard<'_, StdRng> {
        // A panic while holding the lock cannot leave StdRng half-updated.
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl RngCore for SharedSource {
    fn next_u32(&mut self) -> u32 {
        self.lock().next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.lock().next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.lock().fill_bytes(dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.lock().try_fill_bytes(dest)
    }
}

/// Uniquely seeded source returned by [`default_source`].
#[derive(Debug, Clone)]
pub enum DefaultSource {
    /// Private generator, no locking.
    Local(StdRng),
    /// Generator behind a mutex, safe to clone across threads.
    Shared(SharedSource),
}

impl RngCore for DefaultSource {
    fn next_u32(&mut self) -> u32 {
        match self {
            DefaultSource::Local(rng) => rng.next_u32(),
            DefaultSource::Shared(rng) => rng.next_u32(),
        }
    }

    fn next_u64(&mut self) -> u64 {
        match self {
            DefaultSource::Local(rng) => rng.next_u64(),
            DefaultSource::Shared(rng) => rng.next_u64(),
        }
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        match self {
            DefaultSource::Local(rng) => rng.fill_bytes(dest),
            DefaultSource::Shared(rng) => rng.fill_bytes(dest),
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        match self {
            DefaultSource::Local(rng) => rng.try_fill_bytes(dest),
            DefaultSource::Shared(rng) => rng.try_fill_bytes(dest),
        }
    }
}

/// Create a fresh, uniquely seeded source.
///
/// Set `thread_safe` when the source will be cloned into several threads;
/// otherwise the cheaper unlocked generator is returned.
pub fn default_source(thread_safe: bool) -> DefaultSource {
    if thread_safe {
        DefaultSource::Shared(SharedSource::from_entropy())
    } else {
        DefaultSource::Local(StdRng::from_entropy())
    }
}

/// Hash a textual seed into a `u64` seed.
pub fn seed_from_phrase(phrase: &str) -> u64 {
    let hash = blake3::hash(phrase.as_bytes());
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&hash.as_bytes()[..8]);
    u64::from_le_bytes(bytes)
}

/// Deterministic seed hierarchy.
///
/// The master seed is expanded into per-(label, round) sub-seeds using
/// BLAKE3. Derivation is hash-based, so the sub-seed for round 3 does not
/// depend on whether rounds 0..3 were ever drawn.
#[derive(Debug, Clone)]
pub struct SeedHierarchy {
    master_seed: u64,
}

impl SeedHierarchy {
    pub fn new(master_seed: u64) -> Self {
        Self { master_seed }
    }

    pub fn master_seed(&self) -> u64 {
        self.master_seed
    }

    /// Derive a deterministic sub-seed for a specific (label, round).
    pub fn sub_seed(&self, label: &str, round: u64) -> u64 {
        let mut hasher = blake3::Hasher::new();
        hasher.update(&self.master_seed.to_le_bytes());
        hasher.update(label.as_bytes());
        hasher.update(&round.to_le_bytes());
        let hash = hasher.finalize();
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(&hash.as_bytes()[..8]);
        u64::from_le_bytes(bytes)
    }

    /// Create a seeded StdRng from a sub-seed.
    pub fn rng_for(&self, label: &str, round: u64) -> StdRng {
        StdRng::seed_from_u64(self.sub_seed(label, round))
    }
}
