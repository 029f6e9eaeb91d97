//! Fixed-window rolling average of batch timings.

/// Samples held by [`RollingAverage`].
pub const SAMPLE_WINDOW_CAPACITY: usize = 16;

/// Circular buffer of the most recent samples.
///
/// Once full, each push evicts the oldest sample, so the average tracks recent
/// batches and forgets a slow cold-start batch.
#[derive(Debug, Clone, PartialEq)]
pub struct RollingAverage {
    samples: [f64; SAMPLE_WINDOW_CAPACITY],
    next: usize,
    len: usize,
}

impl Default for RollingAverage {
    fn default() -> Self {
        Self::new()
    }
}

impl RollingAverage {
    /// An empty window.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            samples: [0.0; SAMPLE_WINDOW_CAPACITY],
            next: 0,
            len: 0,
        }
    }

    /// Stores `sample`, overwriting the oldest once the window is full.
    pub const fn push(&mut self, sample: f64) {
        self.samples[self.next] = sample;
        self.next = (self.next + 1) % SAMPLE_WINDOW_CAPACITY;
        if self.len < SAMPLE_WINDOW_CAPACITY {
            self.len += 1;
        }
    }

    /// Mean of the stored samples, or `None` before the first push.
    #[must_use]
    pub fn average(&self) -> Option<f64> {
        if self.len == 0 {
            return None;
        }
        let sum: f64 = self.samples[..self.len].iter().sum();
        #[allow(clippy::cast_precision_loss)]
        let count = self.len as f64;
        Some(sum / count)
    }

    /// Number of stored samples.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Whether nothing has been pushed.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Window size.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        SAMPLE_WINDOW_CAPACITY
    }
}
