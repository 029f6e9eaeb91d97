//! The reset, time, average, report loop.

use std::io::{self, Write};

use tracing::{debug, info};

use crate::{time_batch, RollingAverage, Workload};

/// Line prefix of every report.
pub const REPORT_PREFIX: &str = "Average time taken: ";

/// What a finished run measured.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunSummary {
    /// Batches completed and reported.
    pub batches: u64,
    /// Seconds taken by the final batch.
    pub last_sample: Option<f64>,
    /// Rolling average after the final batch.
    pub last_average: Option<f64>,
}

/// Formats one report line without its newline.
#[must_use]
pub fn report_line(average: f64) -> String {
    format!("{REPORT_PREFIX}{average:.6}")
}

/// Repeats batches until `should_continue` returns `false`.
///
/// Each pass resets the workload outside the timed region, times
/// `iterations` steps, pushes the sample into `window`, and writes the
/// current average to `sink`. The predicate runs once after each reported
/// batch.
///
/// # Errors
///
/// Returns the first error from writing or flushing `sink`.
pub fn run<W, S, F>(
    workload: &mut W,
    iterations: u64,
    window: &mut RollingAverage,
    sink: &mut S,
    mut should_continue: F,
) -> io::Result<RunSummary>
where
    W: Workload + ?Sized,
    S: Write + ?Sized,
    F: FnMut() -> bool,
{
    let mut summary = RunSummary {
        batches: 0,
        last_sample: None,
        last_average: None,
    };

    loop {
        workload.reset();
        let timing = time_batch(workload, iterations);
        let sample = timing.seconds();
        window.push(sample);

        if let Some(average) = window.average() {
            writeln!(sink, "{}", report_line(average))?;
            sink.flush()?;
            summary.last_average = Some(average);
        }

        summary.batches += 1;
        summary.last_sample = Some(sample);
        debug!(
            batch = summary.batches,
            seconds = sample,
            window = window.len(),
            "batch finished"
        );

        if !should_continue() {
            break;
        }
    }

    info!(batches = summary.batches, "run finished");
    Ok(summary)
}
