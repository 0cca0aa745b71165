//! Timeframe Presets
//!
//! Span and step per timeframe token, plus the adaptive smoothing parameters
//! tuned for the vote volume each step usually collects.
//!
//! Every span is a whole number of steps, so the visible window always has
//! exactly `span / step` buckets:
//!
//! ```text
//! token  span      step   buckets  label
//! 1H     1 h       1 min  60       HH:MM
//! 1D     24 h      30 min 48       HH:MM
//! 7D     7 d       8 h    21       MM-DD
//! 1M     30 d      1 d    30       YYYY-MM-DD
//! 90D    90 d      3 d    30       YYYY-MM-DD
//! 1Y     364 d     14 d   26       YYYY-MM-DD
//! ```
//!
//! Wider steps gather more votes, so `n_ref` grows with the step while
//! `max_delta` loosens: a 14-day bucket may legitimately move further than a
//! one-minute one.

use super::time::{MS_PER_DAY, MS_PER_HOUR, MS_PER_MINUTE};

// ===== 1H =====

/// One hour visible span.
pub const ONE_HOUR_SPAN_MS: i64 = 60 * MS_PER_MINUTE;

/// One-minute buckets.
pub const ONE_HOUR_STEP_MS: i64 = MS_PER_MINUTE;

/// Full responsiveness reached at `ONE_HOUR_N_REF` votes per minute.
pub const ONE_HOUR_BASE_ALPHA: f64 = 0.35;

/// Votes per minute needed to reach `ONE_HOUR_BASE_ALPHA`.
pub const ONE_HOUR_N_REF: u32 = 5;

/// Long-memory length (buckets).
pub const ONE_HOUR_LONG_WINDOW: usize = 6;

/// Long-memory blend weight.
pub const ONE_HOUR_BETA: f64 = 0.25;

/// Largest move between consecutive minutes.
pub const ONE_HOUR_MAX_DELTA: f64 = 8.0;

// ===== 1D =====

/// One day visible span.
pub const ONE_DAY_SPAN_MS: i64 = 24 * MS_PER_HOUR;

/// Half-hour buckets.
pub const ONE_DAY_STEP_MS: i64 = 30 * MS_PER_MINUTE;

/// Maximum responsiveness.
pub const ONE_DAY_BASE_ALPHA: f64 = 0.3;

/// Votes per half hour needed to reach `ONE_DAY_BASE_ALPHA`.
pub const ONE_DAY_N_REF: u32 = 8;

/// Long-memory length (buckets).
pub const ONE_DAY_LONG_WINDOW: usize = 4;

/// Long-memory blend weight.
pub const ONE_DAY_BETA: f64 = 0.2;

/// Largest move between consecutive half hours.
pub const ONE_DAY_MAX_DELTA: f64 = 10.0;

// ===== 7D =====

/// One week visible span.
pub const SEVEN_DAYS_SPAN_MS: i64 = 7 * MS_PER_DAY;

/// Eight-hour buckets.
pub const SEVEN_DAYS_STEP_MS: i64 = 8 * MS_PER_HOUR;

/// Maximum responsiveness.
pub const SEVEN_DAYS_BASE_ALPHA: f64 = 0.4;

/// Votes per bucket needed to reach `SEVEN_DAYS_BASE_ALPHA`.
pub const SEVEN_DAYS_N_REF: u32 = 12;

/// Long-memory length (buckets).
pub const SEVEN_DAYS_LONG_WINDOW: usize = 3;

/// Long-memory blend weight.
pub const SEVEN_DAYS_BETA: f64 = 0.2;

/// Largest move between consecutive buckets.
pub const SEVEN_DAYS_MAX_DELTA: f64 = 12.0;

// ===== 1M =====

/// Thirty-day visible span.
pub const ONE_MONTH_SPAN_MS: i64 = 30 * MS_PER_DAY;

/// Daily buckets.
pub const ONE_MONTH_STEP_MS: i64 = MS_PER_DAY;

/// Maximum responsiveness.
pub const ONE_MONTH_BASE_ALPHA: f64 = 0.45;

/// Votes per day needed to reach `ONE_MONTH_BASE_ALPHA`.
pub const ONE_MONTH_N_REF: u32 = 15;

/// Long-memory length (buckets).
pub const ONE_MONTH_LONG_WINDOW: usize = 3;

/// Long-memory blend weight.
pub const ONE_MONTH_BETA: f64 = 0.15;

/// Largest move between consecutive days.
pub const ONE_MONTH_MAX_DELTA: f64 = 15.0;

// ===== 90D =====

/// Ninety-day visible span.
pub const NINETY_DAYS_SPAN_MS: i64 = 90 * MS_PER_DAY;

/// Three-day buckets.
pub const NINETY_DAYS_STEP_MS: i64 = 3 * MS_PER_DAY;

/// Maximum responsiveness.
pub const NINETY_DAYS_BASE_ALPHA: f64 = 0.5;

/// Votes per bucket needed to reach `NINETY_DAYS_BASE_ALPHA`.
pub const NINETY_DAYS_N_REF: u32 = 20;

/// Long-memory length (buckets).
pub const NINETY_DAYS_LONG_WINDOW: usize = 3;

/// Long-memory blend weight.
pub const NINETY_DAYS_BETA: f64 = 0.15;

/// Largest move between consecutive buckets.
pub const NINETY_DAYS_MAX_DELTA: f64 = 18.0;

// ===== 1Y =====

/// Fourteen-day buckets.
pub const ONE_YEAR_STEP_MS: i64 = 14 * MS_PER_DAY;

/// One year visible span, rounded down to 26 whole steps (364 days).
pub const ONE_YEAR_SPAN_MS: i64 = 26 * ONE_YEAR_STEP_MS;

/// Maximum responsiveness.
pub const ONE_YEAR_BASE_ALPHA: f64 = 0.55;

/// Votes per bucket needed to reach `ONE_YEAR_BASE_ALPHA`.
pub const ONE_YEAR_N_REF: u32 = 25;

/// Long-memory length (buckets).
pub const ONE_YEAR_LONG_WINDOW: usize = 2;

/// Long-memory blend weight.
pub const ONE_YEAR_BETA: f64 = 0.1;

/// Largest move between consecutive buckets.
pub const ONE_YEAR_MAX_DELTA: f64 = 20.0;
