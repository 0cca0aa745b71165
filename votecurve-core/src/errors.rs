//! Error Types for Configuration and Sample Rejection
//!
//! ## Design Philosophy
//!
//! The engine never fails because of bad data. Votes that cannot be read are
//! dropped, empty buckets are filled, unknown timeframes fall back to a
//! default. That leaves two small error families:
//!
//! 1. **`ConfigError`**: a timeframe or engine configuration that would break
//!    a grid invariant (zero step, span not a whole number of steps, smoothing
//!    weights outside `[0, 1]`). Returned by constructors and `validate()`,
//!    never from `compute`.
//!
//! 2. **`SampleError`**: why a single raw record was rejected by the
//!    normalizer. Callers only ever see these through
//!    [`normalize_record`](crate::normalize::normalize_record); the bulk
//!    normalizer counts them and moves on.
//!
//! Both are `Copy` with fixed-size payloads so they can be
//! returned from hot paths on `no_std` targets.
//!
//! ## Handling Strategy
//!
//! ```rust
//! use votecurve_core::{ConfigError, TimeframeConfig, LabelFormat};
//!
//! match TimeframeConfig::new(3_600_000, 0, LabelFormat::HourMinute) {
//!     Ok(_) => {}
//!     Err(ConfigError::ZeroStep { .. }) => {
//!         // reject the custom timeframe, keep serving presets
//!     }
//!     Err(other) => panic!("unexpected: {other}"),
//! }
//! ```

use thiserror_no_std::Error;

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Invalid timeframe or engine configuration
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    /// Bucket width of zero (or negative) milliseconds
    #[error("Step must be positive, got {step_ms}ms")]
    ZeroStep {
        /// The rejected step width
        step_ms: i64,
    },

    /// Visible span is not a whole number of steps
    #[error("Span {span_ms}ms is not a positive multiple of step {step_ms}ms")]
    SpanNotMultipleOfStep {
        /// Visible duration
        span_ms: i64,
        /// Bucket width
        step_ms: i64,
    },

    /// Responsiveness outside `(0, 1]`
    #[error("Alpha {alpha} outside (0, 1]")]
    AlphaOutOfRange {
        /// The rejected alpha
        alpha: f64,
    },

    /// Long-window blend weight outside `[0, 1]`
    #[error("Beta {beta} outside [0, 1]")]
    BetaOutOfRange {
        /// The rejected beta
        beta: f64,
    },

    /// Reference sample count must be at least one
    #[error("Reference sample count must be at least 1")]
    ZeroReference,

    /// Long window larger than the ring buffer can hold
    #[error("Window {requested} exceeds capacity {capacity}")]
    WindowTooLarge {
        /// Requested window length
        requested: usize,
        /// Maximum supported length
        capacity: usize,
    },

    /// Per-step change cap must be non-negative and finite
    #[error("Max delta {max_delta} must be finite and >= 0")]
    InvalidMaxDelta {
        /// The rejected cap
        max_delta: f64,
    },

    /// Baseline ranges are inverted or leave `[0, 100]`
    #[error("Baseline range invalid: {reason}")]
    BaselineRange {
        /// Which bound is wrong
        reason: &'static str,
    },
}

/// Why a raw record could not become a [`Sample`](crate::Sample)
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleError {
    /// Record carries no creation timestamp
    #[error("Missing timestamp")]
    MissingTimestamp,

    /// Timestamp text is neither RFC 3339 nor integer milliseconds
    #[error("Unparseable timestamp")]
    InvalidTimestamp,

    /// Neither payload field is present
    #[error("Missing value")]
    MissingValue,

    /// Payload is text that does not parse as a number
    #[error("Non-numeric value")]
    NonNumericValue,

    /// Payload is NaN or infinite
    #[error("Non-finite value")]
    NonFiniteValue,
}
