//! Constants for Votecurve Core
//!
//! Every tuning number used by the engine lives here, grouped by concern:
//! - **Time**: unit conversions used to express spans and steps
//! - **Timeframes**: span, step and smoothing presets per timeframe token
//! - **Scores**: the bounded value domain and neutral prior
//! - **Fill**: buffer, trailing window and baseline defaults
//!
//! Use these instead of literals; presets in
//! [`Timeframe::config`](crate::Timeframe::config) are built from them.

/// Time unit conversions.
pub mod time;

/// Per-timeframe span, step and smoothing presets.
pub mod timeframes;

/// Value domain, smoothing state and fill-policy defaults.
pub mod scores;

pub use time::{MS_PER_SECOND, MS_PER_MINUTE, MS_PER_HOUR, MS_PER_DAY};

pub use scores::{
    SCORE_MIN, SCORE_MAX, NEUTRAL_SCORE,
    DEFAULT_BUFFER_BUCKETS, MAX_BUFFER_BUCKETS, DEFAULT_TRAILING_WINDOW, MAX_SMOOTHING_WINDOW,
};
