//! Engine
//!
//! Wires the stages together for one request:
//!
//! ```text
//! records ─► normalize ─► samples
//!                            │
//! token ─► Timeframe ─► TimeframeConfig ─► Window::plan(now, buffer)
//!                            │                    │
//!                            ▼                    ▼
//!                         bucketize ◄─────────────┘
//!                            │
//!                         reduce (FillPolicy)
//!                            │
//!                         smooth (SmoothingMode)
//!                            │
//!                         trim_and_format ─► Series
//! ```
//!
//! An [`Engine`] holds only immutable configuration, so one instance can be
//! shared across threads and requests.

use alloc::vec::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    constants::{DEFAULT_BUFFER_BUCKETS, MAX_BUFFER_BUCKETS},
    errors::{ConfigError, ConfigResult},
    grid::bucketize,
    normalize::{normalize, RawRecord, Sample},
    output::{trim_and_format, Series},
    reduce::{reduce, FillPolicy},
    smoothing::{smooth, SmoothedPoint, SmoothingMode},
    time::{Clock, Timestamp},
    timeframe::{Timeframe, TimeframeConfig},
    traits::SampleSource,
    window::Window,
};

/// Engine-wide policy, shared by every timeframe
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EngineConfig {
    /// What empty buckets become
    pub fill: FillPolicy,
    /// How bucket means are folded
    pub smoothing: SmoothingMode,
    /// Warm-up buckets ahead of the visible window
    pub buffer_count: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            fill: FillPolicy::CarryForward,
            smoothing: SmoothingMode::Adaptive,
            buffer_count: DEFAULT_BUFFER_BUCKETS,
        }
    }
}

impl EngineConfig {
    /// Set the fill policy
    pub fn with_fill(mut self, fill: FillPolicy) -> Self {
        self.fill = fill;
        self
    }

    /// Set the smoothing mode
    pub fn with_smoothing(mut self, smoothing: SmoothingMode) -> Self {
        self.smoothing = smoothing;
        self
    }

    /// Set the number of warm-up buckets
    pub fn with_buffer_count(mut self, buffer_count: usize) -> Self {
        self.buffer_count = buffer_count;
        self
    }

    /// Check every component
    pub fn validate(&self) -> ConfigResult<()> {
        if self.buffer_count > MAX_BUFFER_BUCKETS {
            return Err(ConfigError::WindowTooLarge {
                requested: self.buffer_count,
                capacity: MAX_BUFFER_BUCKETS,
            });
        }
        self.smoothing.validate()?;
        self.fill.validate()
    }
}

/// Vote timeline engine
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Engine {
    config: EngineConfig,
}

impl Engine {
    /// Engine with a validated configuration
    pub fn new(config: EngineConfig) -> ConfigResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Active configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Series for a timeframe token; unknown tokens use the default timeframe
    pub fn compute(&self, samples: &[Sample], token: &str, now: Timestamp) -> Series {
        self.compute_timeframe(samples, Timeframe::resolve(token), now)
    }

    /// Series for a preset timeframe
    pub fn compute_timeframe(&self, samples: &[Sample], timeframe: Timeframe, now: Timestamp) -> Series {
        let config = timeframe.config();
        self.render(samples, timeframe.as_str(), &config, now)
    }

    /// Series for a custom timeframe
    ///
    /// The configuration is validated first; presets never fail.
    pub fn compute_config(
        &self,
        samples: &[Sample],
        tf: &'static str,
        config: &TimeframeConfig,
        now: Timestamp,
    ) -> ConfigResult<Series> {
        config.validate()?;
        Ok(self.render(samples, tf, config, now))
    }

    /// Series from raw records, dropping the malformed ones
    pub fn compute_records(&self, records: &[RawRecord], token: &str, now: Timestamp) -> Series {
        let normalized = normalize(records);
        self.compute(&normalized.samples, token, now)
    }

    /// Fetch from `source`, read `clock` once, and compute
    ///
    /// Source failures are passed through untouched.
    pub fn compute_from<S, C>(&self, source: &S, clock: &C, token: &str) -> Result<Series, S::Error>
    where
        S: SampleSource + ?Sized,
        C: Clock + ?Sized,
    {
        let records = source.fetch()?;
        Ok(self.compute_records(&records, token, clock.now()))
    }

    /// Planned window and every smoothed point, warm-up buffer included
    ///
    /// `config` is validated first, so a malformed custom timeframe is an
    /// error rather than a panic.
    pub fn smooth_window(
        &self,
        samples: &[Sample],
        config: &TimeframeConfig,
        now: Timestamp,
    ) -> ConfigResult<(Window, Vec<SmoothedPoint>)> {
        config.validate()?;
        Ok(self.run(samples, config, now))
    }

    // Callers guarantee `config` is valid: presets, or checked by the caller
    fn run(&self, samples: &[Sample], config: &TimeframeConfig, now: Timestamp) -> (Window, Vec<SmoothedPoint>) {
        let window = Window::aligned(config, now, self.config.buffer_count);
        let grid = bucketize(samples, &window);
        let means = reduce(&grid.buckets, &self.config.fill);
        let points = smooth(&means, self.config.smoothing, &config.smoothing);

        log_debug!(
            "window {}..={} step {} ms: {} buckets ({} buffer), {} samples, {} dropped",
            window.start,
            window.end_closed,
            window.step_ms,
            window.total_len(),
            window.buffer_len(),
            grid.stats.assigned,
            grid.stats.dropped()
        );

        (window, points)
    }

    fn render(&self, samples: &[Sample], tf: &'static str, config: &TimeframeConfig, now: Timestamp) -> Series {
        let (window, points) = self.run(samples, config, now);
        trim_and_format(&points, &window, tf, config.label)
    }
}
