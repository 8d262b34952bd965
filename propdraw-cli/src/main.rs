//! propdraw CLI — weighted draws from pool files and uniform values.
//!
//! Commands:
//! - `draw` — draw keys from a TOML/JSON pool file, with or without replacement
//! - `inspect` — list a pool's entries with their normalized probabilities
//! - `simulate` — compare empirical draw frequencies with the expected ones
//! - `uniform` — uniform int/float/double values in a closed range

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use rand::RngCore;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use propdraw_core::{
    profiling, seed_from_phrase, uniform_double_with, uniform_float_with, uniform_int_with,
    Drawer, PoolConfig, SeedHierarchy, SharedSource, WeightedChoice,
};

#[derive(Parser)]
#[command(name = "propdraw", about = "propdraw CLI — weighted random selection")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Draw keys from a pool file.
    Draw {
        /// Path to a TOML (or .json) pool file.
        #[arg(long)]
        pool: PathBuf,

        /// Number of keys to draw per round.
        #[arg(long, default_value_t = 1)]
        times: usize,

        /// Draw without replacement (no key repeats within a round).
        #[arg(long, default_value_t = false)]
        unique: bool,

        /// Seed (integer or phrase). Overrides the pool file's seed.
        #[arg(long)]
        seed: Option<String>,

        /// Number of independent rounds.
        #[arg(long, default_value_t = 1)]
        rounds: u64,

        /// Print results as JSON lines.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// List a pool's entries and their probabilities.
    Inspect {
        /// Path to a TOML (or .json) pool file.
        #[arg(long)]
        pool: PathBuf,
    },
    /// Draw many times with replacement and report observed frequencies.
    Simulate {
        /// Path to a TOML (or .json) pool file.
        #[arg(long)]
        pool: PathBuf,

        /// Number of draws.
        #[arg(long, default_value_t = 10_000)]
        trials: usize,

        /// Seed (integer or phrase). Overrides the pool file's seed.
        #[arg(long)]
        seed: Option<String>,
    },
    /// Uniform values in the closed range [min, max].
    Uniform {
        /// Value type.
        #[arg(value_enum)]
        kind: UniformKind,

        #[arg(long, allow_hyphen_values = true)]
        min: f64,

        #[arg(long, allow_hyphen_values = true)]
        max: f64,

        /// How many values to print.
        #[arg(long, default_value_t = 1)]
        count: usize,

        /// Seed (integer or phrase).
        #[arg(long)]
        seed: Option<String>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum UniformKind {
    Int,
    Float,
    Double,
}

#[derive(Serialize)]
struct DrawReport<'a> {
    round: u64,
    unique: bool,
    results: &'a [String],
}

fn main() -> Result<()> {
    profiling::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Draw {
            pool,
            times,
            unique,
            seed,
            rounds,
            json,
        } => run_draw(&pool, times, unique, seed, rounds, json),
        Commands::Inspect { pool } => run_inspect(&pool),
        Commands::Simulate { pool, trials, seed } => run_simulate(&pool, trials, seed),
        Commands::Uniform {
            kind,
            min,
            max,
            count,
            seed,
        } => run_uniform(kind, min, max, count, seed),
    }
}

/// Integers are used verbatim; anything else is hashed into a seed.
fn parse_seed(raw: &str) -> u64 {
    raw.trim()
        .parse::<u64>()
        .unwrap_or_else(|_| seed_from_phrase(raw))
}

/// Seeded runs get one reproducible stream per (label, round); unseeded runs
/// share the process-default source.
fn source_for(seed: Option<u64>, label: &str, round: u64) -> Box<dyn RngCore> {
    match seed {
        Some(seed) => Box::new(SeedHierarchy::new(seed).rng_for(label, round)),
        None => Box::new(SharedSource::process_default()),
    }
}

fn load_pool(path: &Path, seed_flag: Option<String>) -> Result<(WeightedChoice<String>, Option<u64>)> {
    let config = PoolConfig::from_file(path)
        .with_context(|| format!("loading pool {}", path.display()))?;
    let choice = config.to_choice()?;
    let seed = seed_flag.as_deref().map(parse_seed).or(config.seed);
    Ok((choice, seed))
}

fn run_draw(
    pool: &Path,
    times: usize,
    unique: bool,
    seed: Option<String>,
    rounds: u64,
    json: bool,
) -> Result<()> {
    if rounds == 0 {
        bail!("--rounds must be at least 1");
    }
    let (choice, seed) = load_pool(pool, seed)?;

    for round in 0..rounds {
        let mut drawer = Drawer::with_source(source_for(seed, "draw", round));
        let results = if unique {
            drawer.draw_non_duplicated(&choice, times)?
        } else {
            drawer.draw_duplicated(&choice, times)?
        };

        if json {
            let report = DrawReport {
                round,
                unique,
                results: &results,
            };
            println!("{}", serde_json::to_string(&report)?);
        } else if rounds > 1 {
            println!("Round {}: {}", round + 1, results.join(", "));
        } else {
            for key in &results {
                println!("{key}");
            }
        }
    }

    Ok(())
}

fn run_inspect(pool: &Path) -> Result<()> {
    let (choice, seed) = load_pool(pool, None)?;

    println!("Pool:         {}", pool.display());
    println!("Entries:      {}", choice.len());
    println!("Drawable:     {}", choice.positive_len());
    println!("Total weight: {}", choice.total_weight());
    if let Some(seed) = seed {
        println!("Seed:         {seed}");
    }
    println!();
    println!("{:<30} {:>12} {:>12}", "Key", "Weight", "Probability");
    println!("{}", "-".repeat(56));
    for (key, weight) in choice.iter() {
        let probability = choice
            .probability(key)
            .map(|p| format!("{:.4}%", p * 100.0))
            .unwrap_or_else(|| "-".into());
        println!("{:<30} {:>12} {:>12}", key, weight, probability);
    }

    Ok(())
}

fn run_simulate(pool: &Path, trials: usize, seed: Option<String>) -> Result<()> {
    let (choice, seed) = load_pool(pool, seed)?;
    let mut drawer = Drawer::with_source(source_for(seed, "simulate", 0));

    let before = profiling::operation_counts();
    let (draws, duration) =
        profiling::profile("simulate", || drawer.draw_duplicated(&choice, trials));
    let draws = draws?;
    let calls = profiling::operation_counts().since(&before);

    let mut counts: BTreeMap<&String, usize> = choice.keys().map(|k| (k, 0)).collect();
    for key in &draws {
        if let Some(count) = counts.get_mut(key) {
            *count += 1;
        }
    }

    println!("=== Simulation ===");
    println!("Trials:         {trials}");
    println!("Elapsed:        {:.3}ms", duration.as_secs_f64() * 1000.0);
    println!(
        "Draw calls:     draw={} draw_duplicated={} draw_non_duplicated={}",
        calls.draw, calls.draw_duplicated, calls.draw_non_duplicated
    );
    println!();
    println!("{:<30} {:>10} {:>10} {:>10}", "Key", "Count", "Observed", "Expected");
    println!("{}", "-".repeat(63));
    for (key, count) in &counts {
        let observed = *count as f64 / trials as f64;
        let expected = choice.probability(key).unwrap_or(0.0);
        println!(
            "{:<30} {:>10} {:>9.3}% {:>9.3}%",
            key,
            count,
            observed * 100.0,
            expected * 100.0
        );
    }

    Ok(())
}

fn run_uniform(
    kind: UniformKind,
    min: f64,
    max: f64,
    count: usize,
    seed: Option<String>,
) -> Result<()> {
    let seed = seed.as_deref().map(parse_seed);
    let mut rng = source_for(seed, "uniform", 0);

    for _ in 0..count {
        match kind {
            UniformKind::Int => {
                if min.fract() != 0.0 || max.fract() != 0.0 {
                    bail!("int bounds must be whole numbers, got [{min}, {max}]");
                }
                let lo = i32::try_from(min as i64).context("--min out of i32 range")?;
                let hi = i32::try_from(max as i64).context("--max out of i32 range")?;
                println!("{}", uniform_int_with(&mut rng, lo, hi)?);
            }
            UniformKind::Float => {
                println!("{}", uniform_float_with(&mut rng, min as f32, max as f32)?);
            }
            UniformKind::Double => {
                println!("{}", uniform_double_with(&mut rng, min, max)?);
            }
        }
    }

    Ok(())
}
