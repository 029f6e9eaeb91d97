//! Timing harness for the console core: load a cartridge, reset and iterate
//! the core in batches, and report a rolling average of batch wall-clock time.

/// Loader and harness error types.
pub mod error;
pub use error::{HarnessError, LoadError};

/// Cartridge image loading.
pub mod cartridge;
pub use cartridge::CartridgeImage;

/// Callback table handed to the core.
pub mod callbacks;
pub use callbacks::BenchmarkCallbacks;

/// Core session wiring and the [`Workload`] seam.
pub mod session;
pub use session::{Session, Workload};

/// Batch timing.
pub mod timing;
pub use timing::{time_batch, BatchTiming};

/// Sliding-window average.
pub mod rolling;
pub use rolling::{RollingAverage, SAMPLE_WINDOW_CAPACITY};

/// Run controller.
pub mod controller;
pub use controller::{report_line, run, RunSummary, REPORT_PREFIX};

/// Logger installation.
pub mod logging;
pub use logging::{setup_logger, DEFAULT_LOG_FILTER};

#[cfg(test)]
use proptest as _;
#[cfg(test)]
use rstest as _;
#[cfg(test)]
use tempfile as _;
