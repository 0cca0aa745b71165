//! Window Planner
//!
//! Derives the closed, step-aligned window for a timeframe at a given instant:
//!
//! ```text
//! aligned_now  = floor(now / step) · step
//! end_closed   = aligned_now − step            last fully elapsed bucket
//! start        = end_closed − span + step      first visible bucket
//! buffer_start = start − buffer · step         warm-up, never emitted
//!
//!   buffer_start        start                end_closed  aligned_now   now
//!   |--b--|--b--|--b--|--b--|--v--|--v--|...|--v--|------|-------•
//!                                                   ^ in-flight, excluded
//! ```
//!
//! The bucket in flight is never part of the window, so every emitted point
//! is final: calls within the same step plan the same window. A sample belongs
//! to the window when `buffer_start ≤ t ≤ end_closed`; the last bucket only
//! collects samples stamped exactly at its start.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    errors::ConfigResult,
    time::{align_down, Timestamp},
    timeframe::TimeframeConfig,
};

/// Closed, step-aligned window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Window {
    /// First visible bucket
    pub start: Timestamp,
    /// Last completed bucket (inclusive)
    pub end_closed: Timestamp,
    /// Bucket width
    pub step_ms: i64,
    /// First warm-up bucket; equals `start` without a buffer
    pub buffer_start: Timestamp,
}

impl Window {
    /// Plan the window for `config` at `now` with `buffer` warm-up buckets
    ///
    /// Fails if the grid of `config` is malformed (non-positive step, span
    /// not a multiple of the step).
    pub fn plan(config: &TimeframeConfig, now: Timestamp, buffer: usize) -> ConfigResult<Self> {
        config.validate_grid()?;
        Ok(Self::aligned(config, now, buffer))
    }

    /// Plan without checking the grid; `config.step_ms` must be positive
    pub(crate) fn aligned(config: &TimeframeConfig, now: Timestamp, buffer: usize) -> Self {
        let step_ms = config.step_ms;
        let aligned_now = align_down(now, step_ms);
        let end_closed = aligned_now - step_ms;
        let start = end_closed - config.span_ms + step_ms;
        let buffer_start = start - buffer as i64 * step_ms;

        Self {
            start,
            end_closed,
            step_ms,
            buffer_start,
        }
    }

    /// Buckets from `start` through `end_closed`
    pub fn visible_len(&self) -> usize {
        ((self.end_closed - self.start) / self.step_ms + 1) as usize
    }

    /// Buckets from `buffer_start` through `end_closed`
    pub fn total_len(&self) -> usize {
        ((self.end_closed - self.buffer_start) / self.step_ms + 1) as usize
    }

    /// Warm-up buckets ahead of `start`
    pub fn buffer_len(&self) -> usize {
        self.total_len() - self.visible_len()
    }

    /// True if a sample at `ts` lands in some bucket (buffer included)
    pub fn contains(&self, ts: Timestamp) -> bool {
        ts >= self.buffer_start && ts <= self.end_closed
    }

    /// Bucket start times, buffer first
    pub fn bucket_starts(&self) -> impl Iterator<Item = Timestamp> {
        let first = self.buffer_start;
        let step = self.step_ms;
        (0..self.total_len() as i64).map(move |i| first + i * step)
    }
}
