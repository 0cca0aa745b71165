//! Timeframe presets and token resolution
//!
//! A timeframe is a named (span, step, label, smoothing) preset. Lookup is a
//! finite mapping from token to [`Timeframe`] to [`TimeframeConfig`]; unknown
//! tokens resolve to [`Timeframe::DEFAULT`] rather than failing.
//!
//! ```rust
//! use votecurve_core::Timeframe;
//!
//! assert_eq!(Timeframe::resolve("7d"), Timeframe::SevenDays);
//! assert_eq!(Timeframe::resolve(" 1w "), Timeframe::SevenDays);
//! assert_eq!(Timeframe::resolve("forever"), Timeframe::OneDay);
//!
//! let cfg = Timeframe::OneHour.config();
//! assert_eq!(cfg.visible_buckets(), 60);
//! ```

use alloc::string::{String, ToString};

use chrono::DateTime;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    constants::timeframes::*,
    errors::{ConfigError, ConfigResult},
    smoothing::SmoothingParams,
    time::Timestamp,
};

/// Longest token accepted by the resolver, aliases included
const MAX_TOKEN_LEN: usize = 8;

/// Supported display timeframes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Timeframe {
    /// `1H`: one hour of one-minute buckets
    OneHour,
    /// `1D`: one day of half-hour buckets
    OneDay,
    /// `7D`: one week of eight-hour buckets
    SevenDays,
    /// `1M`: thirty days of daily buckets
    OneMonth,
    /// `90D`: ninety days of three-day buckets
    NinetyDays,
    /// `1Y`: 26 two-week buckets
    OneYear,
}

impl Timeframe {
    /// Fallback for unrecognized tokens
    pub const DEFAULT: Timeframe = Timeframe::OneDay;

    /// Every timeframe, shortest first
    pub const ALL: [Timeframe; 6] = [
        Timeframe::OneHour,
        Timeframe::OneDay,
        Timeframe::SevenDays,
        Timeframe::OneMonth,
        Timeframe::NinetyDays,
        Timeframe::OneYear,
    ];

    /// Parse a token, case-insensitively and ignoring surrounding whitespace
    ///
    /// Accepts the canonical tokens plus a few aliases (`24H`, `1W`, `30D`,
    /// `3M`, `12M`, `365D`). Returns `None` for anything else.
    pub fn parse(token: &str) -> Option<Self> {
        let mut upper: heapless::String<MAX_TOKEN_LEN> = heapless::String::new();
        for c in token.trim().chars() {
            upper.push(c.to_ascii_uppercase()).ok()?;
        }

        match upper.as_str() {
            "1H" => Some(Timeframe::OneHour),
            "1D" | "24H" => Some(Timeframe::OneDay),
            "7D" | "1W" => Some(Timeframe::SevenDays),
            "1M" | "30D" => Some(Timeframe::OneMonth),
            "90D" | "3M" => Some(Timeframe::NinetyDays),
            "1Y" | "12M" | "365D" => Some(Timeframe::OneYear),
            _ => None,
        }
    }

    /// Parse a token, falling back to [`Timeframe::DEFAULT`]
    pub fn resolve(token: &str) -> Self {
        match Self::parse(token) {
            Some(tf) => tf,
            None => {
                log_debug!("unknown timeframe {:?}, using {}", token, Self::DEFAULT.as_str());
                Self::DEFAULT
            }
        }
    }

    /// Canonical token
    pub const fn as_str(&self) -> &'static str {
        match self {
            Timeframe::OneHour => "1H",
            Timeframe::OneDay => "1D",
            Timeframe::SevenDays => "7D",
            Timeframe::OneMonth => "1M",
            Timeframe::NinetyDays => "90D",
            Timeframe::OneYear => "1Y",
        }
    }

    /// Preset configuration
    pub const fn config(&self) -> TimeframeConfig {
        match self {
            Timeframe::OneHour => TimeframeConfig::preset(
                ONE_HOUR_SPAN_MS,
                ONE_HOUR_STEP_MS,
                LabelFormat::HourMinute,
                SmoothingParams {
                    base_alpha: ONE_HOUR_BASE_ALPHA,
                    n_ref: ONE_HOUR_N_REF,
                    long_window: ONE_HOUR_LONG_WINDOW,
                    beta: ONE_HOUR_BETA,
                    max_delta: ONE_HOUR_MAX_DELTA,
                },
            ),
            Timeframe::OneDay => TimeframeConfig::preset(
                ONE_DAY_SPAN_MS,
                ONE_DAY_STEP_MS,
                LabelFormat::HourMinute,
                SmoothingParams {
                    base_alpha: ONE_DAY_BASE_ALPHA,
                    n_ref: ONE_DAY_N_REF,
                    long_window: ONE_DAY_LONG_WINDOW,
                    beta: ONE_DAY_BETA,
                    max_delta: ONE_DAY_MAX_DELTA,
                },
            ),
            Timeframe::SevenDays => TimeframeConfig::preset(
                SEVEN_DAYS_SPAN_MS,
                SEVEN_DAYS_STEP_MS,
                LabelFormat::MonthDay,
                SmoothingParams {
                    base_alpha: SEVEN_DAYS_BASE_ALPHA,
                    n_ref: SEVEN_DAYS_N_REF,
                    long_window: SEVEN_DAYS_LONG_WINDOW,
                    beta: SEVEN_DAYS_BETA,
                    max_delta: SEVEN_DAYS_MAX_DELTA,
                },
            ),
            Timeframe::OneMonth => TimeframeConfig::preset(
                ONE_MONTH_SPAN_MS,
                ONE_MONTH_STEP_MS,
                LabelFormat::Date,
                SmoothingParams {
                    base_alpha: ONE_MONTH_BASE_ALPHA,
                    n_ref: ONE_MONTH_N_REF,
                    long_window: ONE_MONTH_LONG_WINDOW,
                    beta: ONE_MONTH_BETA,
                    max_delta: ONE_MONTH_MAX_DELTA,
                },
            ),
            Timeframe::NinetyDays => TimeframeConfig::preset(
                NINETY_DAYS_SPAN_MS,
                NINETY_DAYS_STEP_MS,
                LabelFormat::Date,
                SmoothingParams {
                    base_alpha: NINETY_DAYS_BASE_ALPHA,
                    n_ref: NINETY_DAYS_N_REF,
                    long_window: NINETY_DAYS_LONG_WINDOW,
                    beta: NINETY_DAYS_BETA,
                    max_delta: NINETY_DAYS_MAX_DELTA,
                },
            ),
            Timeframe::OneYear => TimeframeConfig::preset(
                ONE_YEAR_SPAN_MS,
                ONE_YEAR_STEP_MS,
                LabelFormat::Date,
                SmoothingParams {
                    base_alpha: ONE_YEAR_BASE_ALPHA,
                    n_ref: ONE_YEAR_N_REF,
                    long_window: ONE_YEAR_LONG_WINDOW,
                    beta: ONE_YEAR_BETA,
                    max_delta: ONE_YEAR_MAX_DELTA,
                },
            ),
        }
    }
}

impl Default for Timeframe {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl core::fmt::Display for Timeframe {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How bucket timestamps are rendered (always UTC)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum LabelFormat {
    /// `HH:MM`, for sub-day steps
    HourMinute,
    /// `MM-DD`, for multi-hour steps over a week
    MonthDay,
    /// `YYYY-MM-DD`, for day-or-longer steps
    Date,
}

impl LabelFormat {
    /// chrono format string
    pub const fn pattern(&self) -> &'static str {
        match self {
            LabelFormat::HourMinute => "%H:%M",
            LabelFormat::MonthDay => "%m-%d",
            LabelFormat::Date => "%Y-%m-%d",
        }
    }

    /// Render a timestamp; out-of-range instants fall back to raw milliseconds
    pub fn format(&self, ts: Timestamp) -> String {
        match DateTime::from_timestamp_millis(ts) {
            Some(dt) => dt.format(self.pattern()).to_string(),
            None => ts.to_string(),
        }
    }
}

/// Immutable grid and smoothing parameters for one timeframe
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TimeframeConfig {
    /// Total visible duration
    pub span_ms: i64,
    /// Bucket width
    pub step_ms: i64,
    /// Label rendering
    pub label: LabelFormat,
    /// Adaptive smoothing parameters
    pub smoothing: SmoothingParams,
}

impl TimeframeConfig {
    /// Custom timeframe with default smoothing
    ///
    /// Fails unless `step_ms > 0` and `span_ms` is a positive multiple of it.
    pub fn new(span_ms: i64, step_ms: i64, label: LabelFormat) -> ConfigResult<Self> {
        let config = Self::preset(span_ms, step_ms, label, SmoothingParams::default());
        config.validate()?;
        Ok(config)
    }

    /// Replace the smoothing parameters, validating them
    pub fn with_smoothing(mut self, smoothing: SmoothingParams) -> ConfigResult<Self> {
        smoothing.validate()?;
        self.smoothing = smoothing;
        Ok(self)
    }

    const fn preset(span_ms: i64, step_ms: i64, label: LabelFormat, smoothing: SmoothingParams) -> Self {
        Self {
            span_ms,
            step_ms,
            label,
            smoothing,
        }
    }

    /// Check grid and smoothing invariants
    pub fn validate(&self) -> ConfigResult<()> {
        self.validate_grid()?;
        self.smoothing.validate()
    }

    /// Check the grid alone: positive step, span a positive multiple of it
    pub fn validate_grid(&self) -> ConfigResult<()> {
        if self.step_ms <= 0 {
            return Err(ConfigError::ZeroStep { step_ms: self.step_ms });
        }
        if self.span_ms <= 0 || self.span_ms % self.step_ms != 0 {
            return Err(ConfigError::SpanNotMultipleOfStep {
                span_ms: self.span_ms,
                step_ms: self.step_ms,
            });
        }
        Ok(())
    }

    /// Number of buckets in the visible window
    pub fn visible_buckets(&self) -> usize {
        (self.span_ms / self.step_ms) as usize
    }
}

impl Default for TimeframeConfig {
    fn default() -> Self {
        Timeframe::DEFAULT.config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{MS_PER_DAY, MS_PER_MINUTE};

    #[test]
    fn tokens_are_case_insensitive() {
        assert_eq!(Timeframe::parse("1h"), Some(Timeframe::OneHour));
        assert_eq!(Timeframe::parse("1H"), Some(Timeframe::OneHour));
        assert_eq!(Timeframe::parse("90d"), Some(Timeframe::NinetyDays));
        assert_eq!(Timeframe::parse(" 1y\t"), Some(Timeframe::OneYear));
    }

    #[test]
    fn aliases_resolve() {
        assert_eq!(Timeframe::resolve("24h"), Timeframe::OneDay);
        assert_eq!(Timeframe::resolve("1w"), Timeframe::SevenDays);
        assert_eq!(Timeframe::resolve("30D"), Timeframe::OneMonth);
        assert_eq!(Timeframe::resolve("3m"), Timeframe::NinetyDays);
        assert_eq!(Timeframe::resolve("365d"), Timeframe::OneYear);
    }

    #[test]
    fn unknown_token_falls_back_to_one_day() {
        assert_eq!(Timeframe::parse("5Y"), None);
        assert_eq!(Timeframe::resolve("5Y"), Timeframe::OneDay);
        assert_eq!(Timeframe::resolve(""), Timeframe::OneDay);
        // Longer than any token: rejected without overflowing the buffer
        assert_eq!(Timeframe::resolve("a-very-long-token"), Timeframe::OneDay);
    }

    #[test]
    fn canonical_tokens_round_trip() {
        for tf in Timeframe::ALL {
            assert_eq!(Timeframe::parse(tf.as_str()), Some(tf));
        }
    }

    #[test]
    fn every_preset_is_valid() {
        for tf in Timeframe::ALL {
            let cfg = tf.config();
            assert!(cfg.validate().is_ok(), "{tf} preset invalid");
            assert_eq!(cfg.span_ms % cfg.step_ms, 0);
        }
    }

    #[test]
    fn preset_bucket_counts() {
        let counts: alloc::vec::Vec<usize> =
            Timeframe::ALL.iter().map(|tf| tf.config().visible_buckets()).collect();
        assert_eq!(counts, alloc::vec![60, 48, 21, 30, 30, 26]);
    }

    #[test]
    fn custom_config_rejects_bad_grid() {
        assert_eq!(
            TimeframeConfig::new(MS_PER_DAY, 0, LabelFormat::Date),
            Err(ConfigError::ZeroStep { step_ms: 0 })
        );
        assert!(matches!(
            TimeframeConfig::new(MS_PER_DAY, 7 * MS_PER_MINUTE, LabelFormat::HourMinute),
            Err(ConfigError::SpanNotMultipleOfStep { .. })
        ));
        assert!(TimeframeConfig::new(6 * 60 * MS_PER_MINUTE, 15 * MS_PER_MINUTE, LabelFormat::HourMinute).is_ok());
    }

    #[test]
    fn labels_render_in_utc() {
        // 2024-03-05T14:07:00Z
        let ts = 1_709_647_620_000;
        assert_eq!(LabelFormat::HourMinute.format(ts), "14:07");
        assert_eq!(LabelFormat::MonthDay.format(ts), "03-05");
        assert_eq!(LabelFormat::Date.format(ts), "2024-03-05");
    }
}
