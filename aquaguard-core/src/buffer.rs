//! Fixed-Size Reading Window for On-Device History
//!
//! ## Overview
//!
//! Field units keep a sliding window of recent readings so the forecasting
//! features (lags, rolling statistics) have history to work from without a
//! database round trip. The window is a ring over a const-generic array:
//! capacity is fixed at compile time, pushes are O(1), and a full window
//! silently discards the oldest entry, which is exactly the retention
//! policy a sensor node wants.
//!
//! ## Design Notes
//!
//! Storage is `[Option<Reading>; N]` rather than `MaybeUninit` so the whole
//! module stays free of unsafe code. A `Reading` is a handful of floats and
//! a timestamp, so even a 64-slot window fits comfortably in a few KiB of
//! RAM.
//!
//! Feature extraction wants a contiguous slice in chronological order,
//! which a ring cannot hand out directly once it has wrapped. The
//! [`snapshot`](ReadingWindow::snapshot) method copies the logical order
//! into a vector (heapless off-std) for exactly that hand-off.
//!
//! ## Usage Example
//!
//! ```rust
//! use aquaguard_core::buffer::ReadingWindow;
//! use aquaguard_core::reading::Reading;
//!
//! let mut history: ReadingWindow<24> = ReadingWindow::new();
//! history.push(Reading::new(340.0, 0.9, 1_000));
//! history.push(Reading::new(355.0, 1.1, 2_000));
//!
//! let latest = history.last().unwrap();
//! assert_eq!(latest.tds_value, 355.0);
//!
//! // Chronological copy for feature extraction
//! let series = history.snapshot();
//! assert_eq!(series.len(), 2);
//! ```

use crate::reading::Reading;

#[cfg(not(feature = "std"))]
use heapless::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

/// Ring buffer of the most recent `N` readings
///
/// Invariants: `write_pos < N`, `len <= N`, and iteration always yields
/// chronological (insertion) order. Not thread-safe; wrap in a mutex when
/// shared.
#[derive(Debug, Clone)]
pub struct ReadingWindow<const N: usize> {
    /// Slot storage; `None` marks slots never written
    data: [Option<Reading>; N],
    /// Next write position, wraps at `N`
    write_pos: usize,
    /// Number of valid readings, saturates at `N`
    len: usize,
}

impl<const N: usize> ReadingWindow<N> {
    /// Empty window, usable in `static` contexts
    pub const fn new() -> Self {
        Self {
            data: [None; N],
            write_pos: 0,
            len: 0,
        }
    }

    /// Append a reading, discarding the oldest when full
    pub fn push(&mut self, reading: Reading) {
        self.data[self.write_pos] = Some(reading);
        self.write_pos = (self.write_pos + 1) % N;

        if self.len < N {
            self.len += 1;
        }
    }

    /// Number of stored readings
    pub fn len(&self) -> usize {
        self.len
    }

    /// True when nothing has been pushed yet
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// True when the next push will overwrite the oldest reading
    pub fn is_full(&self) -> bool {
        self.len == N
    }

    /// The most recent reading
    pub fn last(&self) -> Option<&Reading> {
        if self.is_empty() {
            return None;
        }

        let idx = if self.write_pos == 0 {
            N - 1
        } else {
            self.write_pos - 1
        };

        self.data[idx].as_ref()
    }

    /// Iterate from oldest to newest
    pub fn iter(&self) -> WindowIter<'_, N> {
        WindowIter {
            window: self,
            index: 0,
        }
    }

    /// Drop all readings
    pub fn clear(&mut self) {
        self.write_pos = 0;
        self.len = 0;
    }

    /// Chronological copy of the window contents
    ///
    /// This is the hand-off point to feature extraction, which needs a
    /// slice. On no-std targets the vector capacity equals the window
    /// capacity.
    #[cfg(feature = "std")]
    pub fn snapshot(&self) -> Vec<Reading> {
        self.iter().copied().collect()
    }

    /// Chronological copy of the window contents
    #[cfg(not(feature = "std"))]
    pub fn snapshot(&self) -> Vec<Reading, N> {
        let mut out = Vec::new();
        for reading in self.iter() {
            // Capacity matches the window, pushes cannot fail
            let _ = out.push(*reading);
        }
        out
    }

    /// Reading by logical index (0 = oldest)
    ///
    /// Before the first wrap, logical and physical indices coincide. After
    /// wrapping, the oldest entry sits at `write_pos` and the mapping is a
    /// modular offset.
    fn get(&self, index: usize) -> Option<&Reading> {
        if index >= self.len {
            return None;
        }

        let actual = if self.len < N {
            index
        } else {
            (self.write_pos + index) % N
        };

        self.data[actual].as_ref()
    }
}

/// Iterator over a window's readings, oldest first
pub struct WindowIter<'a, const N: usize> {
    window: &'a ReadingWindow<N>,
    index: usize,
}

impl<'a, const N: usize> Iterator for WindowIter<'a, N> {
    type Item = &'a Reading;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.window.get(self.index)?;
        self.index += 1;
        Some(item)
    }
}

impl<const N: usize> Default for ReadingWindow<N> {
    fn default() -> Self {
        Self::new()
    }
}
