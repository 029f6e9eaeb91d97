//! Cartridge image loading.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::LoadError;

/// Immutable cartridge bytes, loaded once per run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartridgeImage {
    bytes: Box<[u8]>,
}

impl CartridgeImage {
    /// Reads the whole file at `path` into an exactly sized buffer.
    ///
    /// # Errors
    ///
    /// Returns a distinct [`LoadError`] variant for each failure point: open,
    /// size query, size overflow, allocation, read, and short read.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| LoadError::Open {
            path: path.to_path_buf(),
            source,
        })?;

        let reported = file
            .metadata()
            .map_err(|source| LoadError::Size {
                path: path.to_path_buf(),
                source,
            })?
            .len();
        let size = usize::try_from(reported).map_err(|_| LoadError::TooLarge {
            path: path.to_path_buf(),
            size: reported,
        })?;

        let mut bytes = Vec::new();
        bytes
            .try_reserve_exact(size)
            .map_err(|source| LoadError::Allocation {
                path: path.to_path_buf(),
                size,
                source,
            })?;

        // `take` keeps a file that grew after the size query from reallocating.
        let actual = file
            .take(reported)
            .read_to_end(&mut bytes)
            .map_err(|source| LoadError::Read {
                path: path.to_path_buf(),
                source,
            })?;
        if actual != size {
            return Err(LoadError::ShortRead {
                path: path.to_path_buf(),
                expected: size,
                actual,
            });
        }

        Ok(Self::from_bytes(bytes))
    }

    /// Wraps bytes already in memory.
    #[must_use]
    pub fn from_bytes(bytes: impl Into<Box<[u8]>>) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }

    /// Returns the byte at `address`, or 0 past the end of the image.
    #[must_use]
    pub fn read(&self, address: u32) -> u8 {
        usize::try_from(address)
            .ok()
            .and_then(|index| self.bytes.get(index))
            .copied()
            .unwrap_or(0)
    }

    /// Image length in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the image holds no bytes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// The raw image.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}
