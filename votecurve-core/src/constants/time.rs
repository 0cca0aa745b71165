//! Time-Related Constants
//!
//! Millisecond conversions. Timestamps are signed (`i64`) milliseconds since
//! the Unix epoch throughout the crate.

/// Milliseconds per second.
pub const MS_PER_SECOND: i64 = 1000;

/// Seconds per minute.
pub const SECONDS_PER_MINUTE: i64 = 60;

/// Minutes per hour.
pub const MINUTES_PER_HOUR: i64 = 60;

/// Hours per day.
pub const HOURS_PER_DAY: i64 = 24;

/// Milliseconds per minute.
pub const MS_PER_MINUTE: i64 = MS_PER_SECOND * SECONDS_PER_MINUTE;

/// Milliseconds per hour.
pub const MS_PER_HOUR: i64 = MS_PER_MINUTE * MINUTES_PER_HOUR;

/// Milliseconds per day.
pub const MS_PER_DAY: i64 = MS_PER_HOUR * HOURS_PER_DAY;
