//! Fixed-Capacity Circular Buffer for Smoother Memory
//!
//! ## Overview
//!
//! The smoother needs a short memory of recent values: the adaptive mode keeps
//! the last `K` emitted points for its long-window dampening term, the
//! trailing-mean mode keeps the last few bucket means. `K` is a per-timeframe
//! setting, so the buffer has a compile-time capacity `N` and a runtime
//! `limit <= N` that decides when the oldest value is evicted.
//!
//! ## Design Rationale
//!
//! - O(1) insertion (overwrites oldest when the limit is reached)
//! - O(1) access to the most recent value
//! - O(len) mean and iteration
//! - Zero heap allocations, so the smoother state is a plain `Copy`-able value
//!   that can be threaded through a fold
//!
//! ### Memory Layout
//!
//! ```text
//! CircularBuffer<8> with limit = 3, after pushing a, b, c, d:
//! ┌─────┬─────┬─────┬─────┬─────┬─────┬─────┬─────┐
//! │  d  │  b  │  c  │  -  │  -  │  -  │  -  │  -  │
//! └─────┴─────┴─────┴─────┴─────┴─────┴─────┴─────┘
//!          ↑
//!          └── write_pos = 1 (oldest value, next to be overwritten)
//!
//! Slots at index >= limit are never touched.
//! ```
//!
//! ## Usage Example
//!
//! ```rust
//! use votecurve_core::buffer::CircularBuffer;
//!
//! let mut recent: CircularBuffer<8> = CircularBuffer::with_limit(3);
//! for v in [10.0, 20.0, 30.0, 40.0] {
//!     recent.push(v);
//! }
//!
//! assert_eq!(recent.len(), 3);
//! assert_eq!(recent.last(), Some(40.0));
//! assert_eq!(recent.mean(), Some(30.0));
//! ```

/// Fixed-capacity ring of `f64` values with a runtime eviction limit
///
/// ## Internal Invariants
///
/// - `limit <= N`
/// - `write_pos < limit` whenever `limit > 0`
/// - `len <= limit`
/// - Iteration yields values oldest to newest
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircularBuffer<const N: usize> {
    data: [f64; N],

    /// Index where the next write will occur, wraps at `limit`
    write_pos: usize,

    /// Current number of valid values
    len: usize,

    /// Number of values retained before the oldest is evicted
    limit: usize,
}

impl<const N: usize> CircularBuffer<N> {
    /// Empty buffer retaining up to `N` values
    pub const fn new() -> Self {
        Self {
            data: [0.0; N],
            write_pos: 0,
            len: 0,
            limit: N,
        }
    }

    /// Empty buffer retaining up to `limit` values
    ///
    /// `limit` is clamped to `N`. A limit of zero gives a buffer that stays
    /// empty, which switches off anything that reads from it.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            limit: limit.min(N),
            ..Self::new()
        }
    }

    /// Adds a value, evicting the oldest once `limit` values are held
    pub fn push(&mut self, value: f64) {
        if self.limit == 0 {
            return;
        }

        self.data[self.write_pos] = value;
        self.write_pos = (self.write_pos + 1) % self.limit;

        if self.len < self.limit {
            self.len += 1;
        }
    }

    /// Number of stored values
    pub fn len(&self) -> usize {
        self.len
    }

    /// True when nothing has been pushed (or the limit is zero)
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// True when the next push evicts a value
    pub fn is_full(&self) -> bool {
        self.limit > 0 && self.len == self.limit
    }

    /// Runtime retention limit
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Compile-time capacity
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Most recent value
    pub fn last(&self) -> Option<f64> {
        if self.is_empty() {
            return None;
        }

        let idx = if self.write_pos == 0 { self.limit - 1 } else { self.write_pos - 1 };
        Some(self.data[idx])
    }

    /// Arithmetic mean of the stored values
    pub fn mean(&self) -> Option<f64> {
        if self.is_empty() {
            return None;
        }
        Some(self.iter().sum::<f64>() / self.len as f64)
    }

    /// Iterate oldest to newest
    pub fn iter(&self) -> CircularBufferIter<'_, N> {
        CircularBufferIter {
            buffer: self,
            index: 0,
        }
    }

    /// Drop all values, keeping the limit
    pub fn clear(&mut self) {
        self.write_pos = 0;
        self.len = 0;
    }

    /// Value by logical index (0 = oldest)
    ///
    /// Until the buffer is full, logical and physical indices match. Once
    /// full, the oldest value sits at `write_pos`:
    ///
    /// ```text
    /// Physical:  [D, E, A, B, C]  (write_pos = 2, limit = 5)
    /// Logical:   [A, B, C, D, E]
    /// logical[i] = physical[(write_pos + i) % limit]
    /// ```
    fn get(&self, index: usize) -> Option<f64> {
        if index >= self.len {
            return None;
        }

        let actual_index = if self.len < self.limit {
            index
        } else {
            (self.write_pos + index) % self.limit
        };

        Some(self.data[actual_index])
    }
}

/// Iterator over buffer contents, oldest first
pub struct CircularBufferIter<'a, const N: usize> {
    buffer: &'a CircularBuffer<N>,
    index: usize,
}

impl<const N: usize> Iterator for CircularBufferIter<'_, N> {
    type Item = f64;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.buffer.get(self.index)?;
        self.index += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.buffer.len().saturating_sub(self.index);
        (remaining, Some(remaining))
    }
}

impl<const N: usize> Default for CircularBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}
