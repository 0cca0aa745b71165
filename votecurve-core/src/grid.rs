//! Grid Bucketizer
//!
//! Partitions samples into one bucket per step, from the first warm-up bucket
//! through the last completed one. Buckets are allocated up front, so the grid
//! has no gaps whatever the samples look like; assignment is a single pass,
//! O(samples + buckets).
//!
//! A sample at `t` lands in bucket `floor((t − buffer_start) / step)`. Only
//! `buffer_start ≤ t ≤ end_closed` is kept; anything before the buffer or
//! after the start of the last completed bucket is dropped and counted in
//! [`GridStats`].

use alloc::vec::Vec;

use crate::{normalize::Sample, time::Timestamp, window::Window};

/// One step-aligned slot of the grid
#[derive(Debug, Clone, PartialEq)]
pub struct Bucket {
    /// Bucket start
    pub t: Timestamp,
    /// Values in sample order
    pub values: Vec<f64>,
}

impl Bucket {
    /// Empty bucket starting at `t`
    pub fn empty(t: Timestamp) -> Self {
        Self { t, values: Vec::new() }
    }

    /// True if no sample landed here
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Assignment counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GridStats {
    /// Samples placed into a bucket
    pub assigned: usize,
    /// Samples older than the first bucket
    pub too_old: usize,
    /// Samples stamped after `end_closed`
    pub too_new: usize,
}

impl GridStats {
    /// Samples that did not land in any bucket
    pub fn dropped(&self) -> usize {
        self.too_old + self.too_new
    }
}

/// Bucketed samples plus assignment counters
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    /// Contiguous buckets, ascending
    pub buckets: Vec<Bucket>,
    /// Counters for this pass
    pub stats: GridStats,
}

/// Assign samples to the window's buckets (warm-up buffer included)
pub fn bucketize(samples: &[Sample], window: &Window) -> Grid {
    let mut buckets: Vec<Bucket> = window.bucket_starts().map(Bucket::empty).collect();
    let mut stats = GridStats::default();

    for sample in samples {
        if sample.timestamp < window.buffer_start {
            stats.too_old += 1;
            continue;
        }
        if sample.timestamp > window.end_closed {
            stats.too_new += 1;
            continue;
        }

        let idx = ((sample.timestamp - window.buffer_start) / window.step_ms) as usize;
        match buckets.get_mut(idx) {
            Some(bucket) => {
                bucket.values.push(sample.value);
                stats.assigned += 1;
            }
            None => stats.too_new += 1,
        }
    }

    log_debug!(
        "bucketized {} samples into {} buckets ({} too old, {} too new)",
        stats.assigned,
        buckets.len(),
        stats.too_old,
        stats.too_new
    );

    Grid { buckets, stats }
}
