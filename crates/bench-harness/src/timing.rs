//! Wall-clock timing of a batch of iterations.

use std::time::{Duration, Instant};

use crate::Workload;

/// Result of one timed batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchTiming {
    /// Iterations executed inside the timed region.
    pub iterations: u64,
    /// Wall-clock time they took.
    pub elapsed: Duration,
}

impl BatchTiming {
    /// Elapsed time in seconds.
    #[must_use]
    pub const fn seconds(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }
}

/// Runs `iterations` sequential [`Workload::iterate`] calls between two
/// monotonic timestamps. Reset is the caller's job and is not timed.
pub fn time_batch<W: Workload + ?Sized>(workload: &mut W, iterations: u64) -> BatchTiming {
    let start = Instant::now();
    for _ in 0..iterations {
        workload.iterate();
    }
    BatchTiming {
        iterations,
        elapsed: start.elapsed(),
    }
}
