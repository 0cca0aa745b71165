//! Adaptive Smoother
//!
//! ## Overview
//!
//! Folds bucket means into the display series, strictly left to right. The
//! canonical mode is a volume-aware exponential smoother with three layers:
//!
//! ```text
//! alpha_eff = min(base_alpha, base_alpha · n / n_ref)
//! proposed  = (1 − alpha_eff)·prev + alpha_eff·mean          short memory
//! proposed  = (1 − beta)·proposed + beta·mean(last K)        long memory
//! proposed  = prev ± min(|proposed − prev|, max_delta)       change cap
//! v         = clamp(proposed, 0, 100)
//! ```
//!
//! ### Why volume-aware?
//!
//! A bucket holding one vote says little; a bucket holding fifty says a lot.
//! Scaling alpha by `n / n_ref` lets a quiet bucket barely move the line while
//! a busy one reaches full `base_alpha`. Empty buckets (`n = 0`) leave the
//! short-memory term exactly at `prev`.
//!
//! ### Long memory
//!
//! The last `K` emitted values pull every proposal back toward their mean, so
//! several busy buckets in a row cannot overshoot. With `K = 0` or before any
//! point has been emitted the term is skipped.
//!
//! ### Change cap
//!
//! Applied after both blends: no single step moves more than `max_delta`,
//! which guarantees `|v[i] − v[i−1]| ≤ max_delta` for consecutive points.
//!
//! ## State
//!
//! [`SmootherState`] is an explicit accumulator (`prev` plus a fixed-capacity
//! ring of recent values) threaded through `Iterator::scan`. Nothing outlives
//! one call.
//!
//! ## Reduced modes
//!
//! - [`SmoothingMode::TrailingMean`]: unweighted mean of the last `window`
//!   bucket means (the buffer lets the first visible points see their
//!   predecessors).
//! - [`SmoothingMode::FixedAlpha`]: plain EMA with the timeframe's
//!   `base_alpha`, seeded at 50.

use alloc::vec::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    buffer::CircularBuffer,
    constants::{
        scores::DISPLAY_DECIMALS_SCALE, DEFAULT_TRAILING_WINDOW, MAX_SMOOTHING_WINDOW,
        NEUTRAL_SCORE,
    },
    errors::{ConfigError, ConfigResult},
    reduce::BucketMean,
    time::Timestamp,
    traits::clamp_score,
};

/// Parameters of the adaptive smoother
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SmoothingParams {
    /// Maximum responsiveness, reached at `n_ref` samples
    pub base_alpha: f64,
    /// Sample count at which `base_alpha` is reached
    pub n_ref: u32,
    /// Number of emitted values in the long-memory term (K)
    pub long_window: usize,
    /// Weight of the long-memory term
    pub beta: f64,
    /// Largest allowed change between consecutive points
    pub max_delta: f64,
}

impl Default for SmoothingParams {
    fn default() -> Self {
        crate::timeframe::Timeframe::DEFAULT.config().smoothing
    }
}

impl SmoothingParams {
    /// Check ranges
    pub fn validate(&self) -> ConfigResult<()> {
        if !(self.base_alpha > 0.0 && self.base_alpha <= 1.0) {
            return Err(ConfigError::AlphaOutOfRange { alpha: self.base_alpha });
        }
        if self.n_ref == 0 {
            return Err(ConfigError::ZeroReference);
        }
        if self.long_window > MAX_SMOOTHING_WINDOW {
            return Err(ConfigError::WindowTooLarge {
                requested: self.long_window,
                capacity: MAX_SMOOTHING_WINDOW,
            });
        }
        if !(0.0..=1.0).contains(&self.beta) {
            return Err(ConfigError::BetaOutOfRange { beta: self.beta });
        }
        if !self.max_delta.is_finite() || self.max_delta < 0.0 {
            return Err(ConfigError::InvalidMaxDelta { max_delta: self.max_delta });
        }
        Ok(())
    }

    /// Responsiveness for a bucket carrying `n` samples
    pub fn effective_alpha(&self, n: usize) -> f64 {
        let scaled = self.base_alpha * n as f64 / self.n_ref as f64;
        scaled.min(self.base_alpha)
    }
}

/// Which smoother folds the bucket means
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SmoothingMode {
    /// Volume-aware EMA with long-memory dampening and change cap
    Adaptive,
    /// Unweighted mean of the last `window` bucket means
    TrailingMean {
        /// Number of bucket means averaged (1..=32)
        window: usize,
    },
    /// EMA with the timeframe's `base_alpha`, ignoring volume
    FixedAlpha,
}

impl Default for SmoothingMode {
    fn default() -> Self {
        SmoothingMode::Adaptive
    }
}

impl SmoothingMode {
    /// Trailing mean over the default five buckets
    pub const fn trailing() -> Self {
        SmoothingMode::TrailingMean {
            window: DEFAULT_TRAILING_WINDOW,
        }
    }

    /// Check mode-specific ranges
    pub fn validate(&self) -> ConfigResult<()> {
        match *self {
            SmoothingMode::TrailingMean { window } if window == 0 || window > MAX_SMOOTHING_WINDOW => {
                Err(ConfigError::WindowTooLarge {
                    requested: window,
                    capacity: MAX_SMOOTHING_WINDOW,
                })
            }
            _ => Ok(()),
        }
    }
}

/// One smoothed bucket
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SmoothedPoint {
    /// Bucket start
    pub t: Timestamp,
    /// Smoothed value in `[0, 100]`, one decimal
    pub v: f64,
    /// Real samples in the bucket
    pub n: usize,
}

/// Fold accumulator threaded bucket to bucket
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SmootherState {
    /// Last unrounded output
    pub prev: f64,
    /// Recent values: emitted points (adaptive) or bucket means (trailing)
    pub recent: CircularBuffer<MAX_SMOOTHING_WINDOW>,
}

impl SmootherState {
    /// Neutral state with a memory of `window` values
    pub fn new(window: usize) -> Self {
        Self {
            prev: NEUTRAL_SCORE,
            recent: CircularBuffer::with_limit(window),
        }
    }

    /// Adaptive step; returns the unrounded output and advances the state
    pub fn advance_adaptive(&mut self, mean: f64, n: usize, params: &SmoothingParams) -> f64 {
        let prev = self.prev;
        let alpha = params.effective_alpha(n);
        let mut proposed = (1.0 - alpha) * prev + alpha * mean;

        if let Some(long_mean) = self.recent.mean() {
            proposed = (1.0 - params.beta) * proposed + params.beta * long_mean;
        }

        let delta = proposed - prev;
        if libm::fabs(delta) > params.max_delta {
            proposed = prev + libm::copysign(params.max_delta, delta);
        }

        let value = clamp_score(proposed);
        self.recent.push(value);
        self.prev = value;
        value
    }

    /// Trailing-mean step
    pub fn advance_trailing(&mut self, mean: f64) -> f64 {
        self.recent.push(mean);
        let value = clamp_score(self.recent.mean().unwrap_or(mean));
        self.prev = value;
        value
    }

    /// Fixed-alpha EMA step
    pub fn advance_fixed(&mut self, mean: f64, alpha: f64) -> f64 {
        let value = clamp_score((1.0 - alpha) * self.prev + alpha * mean);
        self.prev = value;
        value
    }
}

/// Round to the display precision (one decimal)
pub fn round_display(value: f64) -> f64 {
    libm::round(value * DISPLAY_DECIMALS_SCALE) / DISPLAY_DECIMALS_SCALE
}

/// Smooth bucket means in order, one point per mean
pub fn smooth(means: &[BucketMean], mode: SmoothingMode, params: &SmoothingParams) -> Vec<SmoothedPoint> {
    let window = match mode {
        SmoothingMode::Adaptive => params.long_window,
        SmoothingMode::TrailingMean { window } => window,
        SmoothingMode::FixedAlpha => 0,
    };

    means
        .iter()
        .scan(SmootherState::new(window), |state, bucket| {
            let value = match mode {
                SmoothingMode::Adaptive => state.advance_adaptive(bucket.mean, bucket.n, params),
                SmoothingMode::TrailingMean { .. } => state.advance_trailing(bucket.mean),
                SmoothingMode::FixedAlpha => state.advance_fixed(bucket.mean, params.base_alpha),
            };
            log_trace!("t={} mean={:.2} n={} -> {:.2}", bucket.t, bucket.mean, bucket.n, value);

            Some(SmoothedPoint {
                t: bucket.t,
                v: round_display(value),
                n: bucket.real,
            })
        })
        .collect()
}
