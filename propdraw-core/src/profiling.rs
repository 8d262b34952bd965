//! Draw-call accounting and timing diagnostics.
//!
//! Every draw operation opens a [`ProfileScope`] tagged with its
//! [`Operation`]. The scope bumps that operation's call counter and, when
//! `PROPDRAW_PROFILE=1` was seen by [`init`], reports its duration on stderr:
//!
//! ```text
//! [PROFILE] draw_non_duplicated took 0.012ms
//! ```
//!
//! [`operation_counts`] exposes the counters so callers (the CLI's
//! `simulate` command) can report how many calls a run made.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Environment switch read by [`init`].
pub const PROFILE_ENV: &str = "PROPDRAW_PROFILE";

static ENABLED: AtomicBool = AtomicBool::new(false);

static CALLS: [AtomicU64; 3] = [AtomicU64::new(0), AtomicU64::new(0), AtomicU64::new(0)];

/// The draw operations that are counted and timed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Draw,
    DrawDuplicated,
    DrawNonDuplicated,
}

impl Operation {
    pub fn name(self) -> &'static str {
        match self {
            Operation::Draw => "draw",
            Operation::DrawDuplicated => "draw_duplicated",
            Operation::DrawNonDuplicated => "draw_non_duplicated",
        }
    }

    fn slot(self) -> &'static AtomicU64 {
        &CALLS[self as usize]
    }
}

/// Call counts per draw operation since process start.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OperationCounts {
    pub draw: u64,
    pub draw_duplicated: u64,
    pub draw_non_duplicated: u64,
}

impl OperationCounts {
    /// Calls made between `earlier` and `self`.
    pub fn since(&self, earlier: &OperationCounts) -> OperationCounts {
        OperationCounts {
            draw: self.draw.saturating_sub(earlier.draw),
            draw_duplicated: self.draw_duplicated.saturating_sub(earlier.draw_duplicated),
            draw_non_duplicated: self
                .draw_non_duplicated
                .saturating_sub(earlier.draw_non_duplicated),
        }
    }

    pub fn total(&self) -> u64 {
        self.draw + self.draw_duplicated + self.draw_non_duplicated
    }
}

/// Read `PROPDRAW_PROFILE` and switch timing output on or off.
pub fn init() {
    let enabled = std::env::var(PROFILE_ENV)
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false);
    ENABLED.store(enabled, Ordering::Relaxed);
    if enabled {
        eprintln!("[PROFILING] Enabled ({PROFILE_ENV}=1)");
    }
}

#[inline]
pub fn is_enabled() -> bool {
    ENABLED.load(Ordering::Relaxed)
}

pub fn operation_counts() -> OperationCounts {
    OperationCounts {
        draw: Operation::Draw.slot().load(Ordering::Relaxed),
        draw_duplicated: Operation::DrawDuplicated.slot().load(Ordering::Relaxed),
        draw_non_duplicated: Operation::DrawNonDuplicated.slot().load(Ordering::Relaxed),
    }
}

/// Counts one call of `op` on creation; reports its duration on drop when
/// profiling is enabled.
pub struct ProfileScope {
    op: Operation,
    start: Instant,
}

impl ProfileScope {
    #[inline]
    pub fn new(op: Operation) -> Self {
        op.slot().fetch_add(1, Ordering::Relaxed);
        Self {
            op,
            start: Instant::now(),
        }
    }
}

impl Drop for ProfileScope {
    fn drop(&mut self) {
        if is_enabled() {
            report(self.op.name(), self.start.elapsed());
        }
    }
}

/// Run `f`, returning its result and how long it took.
pub fn profile<F, R>(name: &'static str, f: F) -> (R, Duration)
where
    F: FnOnce() -> R,
{
    let start = Instant::now();
    let result = f();
    let duration = start.elapsed();
    if is_enabled() {
        report(name, duration);
    }
    (result, duration)
}

fn report(name: &str, duration: Duration) {
    eprintln!("[PROFILE] {name} took {:.3}ms", duration.as_secs_f64() * 1000.0);
}
