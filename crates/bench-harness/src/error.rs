//! Error types for the harness.

use std::collections::TryReserveError;
use std::io;
use std::path::PathBuf;

use thiserror::Error;
use tracing_subscriber::util::TryInitError;

/// Failure to bring a cartridge image into memory.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file could not be opened.
    #[error("unable to open ROM file {path}: {source}")]
    Open {
        /// Path that was opened.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// The file size could not be determined.
    #[error("unable to determine size of ROM file {path}: {source}")]
    Size {
        /// Path being loaded.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// The file is larger than the address space.
    #[error("ROM file {path} is too large to load ({size} bytes)")]
    TooLarge {
        /// Path being loaded.
        path: PathBuf,
        /// Reported size in bytes.
        size: u64,
    },
    /// The image buffer could not be allocated.
    #[error("unable to allocate {size} bytes for ROM file {path}")]
    Allocation {
        /// Path being loaded.
        path: PathBuf,
        /// Requested size in bytes.
        size: usize,
        /// Allocator error.
        #[source]
        source: TryReserveError,
    },
    /// Reading the contents failed.
    #[error("unable to read ROM file {path}: {source}")]
    Read {
        /// Path being loaded.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// The file ended before its reported size.
    #[error("unable to read ROM file {path}: expected {expected} bytes, got {actual}")]
    ShortRead {
        /// Path being loaded.
        path: PathBuf,
        /// Size reported by metadata.
        expected: usize,
        /// Bytes actually read.
        actual: usize,
    },
}

/// Any failure that ends a harness run.
#[derive(Debug, Error)]
pub enum HarnessError {
    /// The cartridge failed to load.
    #[error(transparent)]
    Load(#[from] LoadError),
    /// Writing the report failed.
    #[error("unable to write report: {0}")]
    Report(#[source] io::Error),
    /// The diagnostic subscriber could not be installed.
    #[error("unable to install logger: {0}")]
    Logger(#[from] TryInitError),
}
