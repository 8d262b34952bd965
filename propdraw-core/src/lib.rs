//! propdraw core — weighted random selection.
//!
//! This crate contains the sampling engine:
//! - Categorical sampler over a non-negative weight vector
//! - Ordered key→weight registry with an explicit index↔key layout
//! - Draw operations: single, with replacement, without replacement
//! - Uniform integer/float/double helpers over the same random sources
//! - Thread-safe and seeded random sources, deterministic seed derivation
//! - TOML/JSON pool configuration
//!
//! ```
//! use propdraw_core::{Drawer, WeightedChoice};
//!
//! let prizes = WeightedChoice::from_entries([("gold", 1.0), ("silver", 4.0), ("bronze", 15.0)])?;
//! let mut drawer = Drawer::seeded(42);
//!
//! let winner = drawer.draw(&prizes)?;
//! assert!(prizes.contains(&winner));
//!
//! let podium = drawer.draw_non_duplicated(&prizes, 3)?;
//! assert_eq!(podium.len(), 3);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod categorical;
pub mod config;
pub mod draw;
pub mod profiling;
pub mod registry;
pub mod source;
pub mod uniform;

pub use categorical::{sample, sample_many, Categorical, SamplerError};
pub use config::{ConfigError, PoolConfig};
pub use draw::{DrawError, Drawer};
pub use registry::{IndexedWeights, RegistryError, WeightedChoice};
pub use source::{default_source, seed_from_phrase, DefaultSource, SeedHierarchy, SharedSource};
pub use uniform::{
    uniform_double, uniform_double_with, uniform_float, uniform_float_with, uniform_int,
    uniform_int_with, UniformError,
};

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: values handed across threads are Send + Sync.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        require_send::<SharedSource>();
        require_sync::<SharedSource>();
        require_send::<Drawer>();
        require_sync::<Drawer>();
        require_send::<Drawer<rand::rngs::StdRng>>();
        require_sync::<Drawer<rand::rngs::StdRng>>();
        require_send::<WeightedChoice<String>>();
        require_sync::<WeightedChoice<String>>();
        require_send::<Categorical>();
        require_sync::<Categorical>();
        require_send::<SeedHierarchy>();
        require_sync::<SeedHierarchy>();
        require_send::<PoolConfig>();
        require_sync::<PoolConfig>();

        require_send::<DrawError>();
        require_sync::<DrawError>();
        require_send::<ConfigError>();
        require_sync::<ConfigError>();
    }

    /// Drawers over one shared source can run on separate threads.
    #[test]
    fn drawers_share_a_source_across_threads() {
        let choice = WeightedChoice::from_entries((0..20).map(|i| (i, 1.0 + i as f64))).unwrap();
        let source = SharedSource::seeded(99);

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let choice = choice.clone();
                let mut drawer = Drawer::with_source(source.clone());
                std::thread::spawn(move || drawer.draw_non_duplicated(&choice, 5).unwrap())
            })
            .collect();

        for handle in handles {
            let drawn = handle.join().unwrap();
            assert_eq!(drawn.len(), 5);
            assert!(drawn.iter().all(|k| choice.contains(k)));
        }
    }
}
