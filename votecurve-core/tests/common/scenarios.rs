//! Named traffic patterns
//!
//! Each scenario pairs a sample set with the timeframe it targets, so the
//! same invariants can be run against all of them.

use votecurve_core::{Sample, Timeframe, Timestamp};

use super::generators::VoteGenerator;

pub struct Scenario {
    pub name: &'static str,
    pub timeframe: Timeframe,
    pub samples: Vec<Sample>,
}

/// Samples covering the visible window plus a margin on either side
fn cover(timeframe: Timeframe, now: Timestamp) -> (Timestamp, Timestamp) {
    let cfg = timeframe.config();
    (now - cfg.span_ms - 8 * cfg.step_ms, now + cfg.step_ms)
}

pub fn all(now: Timestamp) -> Vec<Scenario> {
    let mut gen = VoteGenerator::new(42);
    let mut scenarios = Vec::new();

    for timeframe in Timeframe::ALL {
        let (from, to) = cover(timeframe, now);
        let step = timeframe.config().step_ms;

        scenarios.push(Scenario { name: "quiet", timeframe, samples: Vec::new() });
        scenarios.push(Scenario {
            name: "steady",
            timeframe,
            samples: gen.uniform(from, to, 500, 65.0, 10.0),
        });
        scenarios.push(Scenario {
            name: "bursty",
            timeframe,
            samples: gen.bursty(from, to, step, 40),
        });
        scenarios.push(Scenario {
            name: "extremes",
            timeframe,
            samples: gen
                .uniform(from, to, 200, 50.0, 50.0)
                .into_iter()
                .map(|s| Sample::new(s.timestamp, if s.value >= 50.0 { 100.0 } else { 0.0 }))
                .collect(),
        });
    }

    scenarios
}
