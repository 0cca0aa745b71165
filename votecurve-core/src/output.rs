//! Trim and format
//!
//! Drops the warm-up buffer, renders bucket labels and derives the headline
//! score. Output order is ascending bucket time.

use alloc::{string::String, vec::Vec};

#[cfg(feature = "serde")]
use serde::Serialize;

use crate::{
    constants::NEUTRAL_SCORE,
    smoothing::SmoothedPoint,
    time::Timestamp,
    timeframe::LabelFormat,
    window::Window,
};

/// One rendered point
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct DisplayPoint {
    /// Bucket label, UTC
    pub t: String,
    /// Smoothed value, one decimal
    pub v: f64,
    /// Real samples in the bucket
    pub n: usize,
}

/// Window description attached to a series
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct SeriesMeta {
    /// Canonical timeframe token of the window actually served
    ///
    /// Aliases and unknown tokens are not echoed back: `"1w"` reports `"7D"`
    /// and an unrecognized token reports the fallback `"1D"`.
    pub tf: &'static str,
    /// First visible bucket
    pub start: Timestamp,
    /// Last completed bucket
    pub end: Timestamp,
    /// Bucket width
    #[cfg_attr(feature = "serde", serde(rename = "stepMs"))]
    pub step_ms: i64,
}

/// Display-ready result of one computation
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Series {
    /// Headline score: last point rounded to an integer, 50 without points
    pub current: u8,
    /// Visible points, ascending
    pub points: Vec<DisplayPoint>,
    /// Window summary
    pub meta: SeriesMeta,
}

impl Series {
    /// Last visible point, if any
    pub fn last(&self) -> Option<&DisplayPoint> {
        self.points.last()
    }
}

/// Headline integer for a smoothed value
pub fn headline(value: f64) -> u8 {
    // Values are already clamped to [0, 100]
    libm::round(value).clamp(0.0, 100.0) as u8
}

/// Drop buffer points, render labels and compute the headline
pub fn trim_and_format(points: &[SmoothedPoint], window: &Window, tf: &'static str, label: LabelFormat) -> Series {
    let points: Vec<DisplayPoint> = points
        .iter()
        .filter(|p| p.t >= window.start)
        .map(|p| DisplayPoint {
            t: label.format(p.t),
            v: p.v,
            n: p.n,
        })
        .collect();

    let current = headline(points.last().map_or(NEUTRAL_SCORE, |p| p.v));

    Series {
        current,
        points,
        meta: SeriesMeta {
            tf,
            start: window.start,
            end: window.end_closed,
            step_ms: window.step_ms,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timeframe::Timeframe;

    fn window() -> Window {
        Window::plan(&Timeframe::OneHour.config(), 1_700_000_040_000, 2).unwrap()
    }

    #[test]
    fn buffer_points_are_dropped() {
        let w = window();
        let points: Vec<SmoothedPoint> = w
            .bucket_starts()
            .map(|t| SmoothedPoint { t, v: 50.0, n: 0 })
            .collect();
        let series = trim_and_format(&points, &w, "1H", LabelFormat::HourMinute);

        assert_eq!(points.len(), 62);
        assert_eq!(series.points.len(), 60);
        assert_eq!(series.points[0].t, LabelFormat::HourMinute.format(w.start));
    }

    #[test]
    fn current_is_rounded_last_value() {
        let w = window();
        let points = [
            SmoothedPoint { t: w.start, v: 40.0, n: 1 },
            SmoothedPoint { t: w.end_closed, v: 61.5, n: 3 },
        ];
        let series = trim_and_format(&points, &w, "1H", LabelFormat::HourMinute);
        assert_eq!(series.current, 62);
        assert_eq!(series.last().map(|p| p.n), Some(3));
    }

    #[test]
    fn empty_series_reports_neutral() {
        let series = trim_and_format(&[], &window(), "1H", LabelFormat::HourMinute);
        assert_eq!(series.current, 50);
        assert!(series.points.is_empty());
    }

    #[test]
    fn meta_describes_window() {
        let w = window();
        let series = trim_and_format(&[], &w, "1H", LabelFormat::HourMinute);
        assert_eq!(series.meta.tf, "1H");
        assert_eq!(series.meta.start, w.start);
        assert_eq!(series.meta.end, w.end_closed);
        assert_eq!(series.meta.step_ms, 60_000);
    }

    #[test]
    fn headline_bounds() {
        assert_eq!(headline(0.0), 0);
        assert_eq!(headline(99.5), 100);
        assert_eq!(headline(49.4), 49);
    }
}
