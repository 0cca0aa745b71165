//! Shared fixtures for the integration tests
//!
//! - Deterministic vote generators (LCG, no external RNG)
//! - Named traffic scenarios
//! - Series assertion helpers

#![allow(dead_code)]

pub mod generators;
pub mod scenarios;

use votecurve_core::{Series, Timeframe, Timestamp, Window};

/// 2023-11-14T22:14:00Z, aligned to the minute
pub const NOW: Timestamp = 1_700_000_040_000;

/// Structural invariants every series must satisfy
pub fn assert_well_formed(series: &Series, timeframe: Timeframe) {
    let cfg = timeframe.config();

    assert_eq!(series.points.len(), cfg.visible_buckets(), "{timeframe}: point count");
    assert_eq!(series.meta.step_ms, cfg.step_ms);
    assert_eq!(series.meta.end - series.meta.start, cfg.span_ms - cfg.step_ms);
    assert_eq!(series.meta.tf, timeframe.as_str());

    for point in &series.points {
        assert!((0.0..=100.0).contains(&point.v), "{timeframe}: {} out of range", point.v);
        assert_eq!(point.v, (point.v * 10.0).round() / 10.0, "{timeframe}: more than one decimal");
    }
    assert!(series.current <= 100);
}

/// Visible window for `timeframe` at `now`, no buffer
pub fn visible_window(timeframe: Timeframe, now: Timestamp) -> Window {
    Window::plan(&timeframe.config(), now, 0).unwrap()
}
