//! Render a Series as JSON
//!
//! Generates a day of synthetic votes, runs them through the engine under
//! each fill policy and prints the resulting payloads.
//!
//! ```bash
//! cargo run --example render_series -- 7d
//! ```

use votecurve_core::{
    time::{Clock, SystemClock},
    Engine, EngineConfig, FillPolicy, RawRecord, Timeframe,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let token = std::env::args().nth(1).unwrap_or_else(|| "1D".into());
    let timeframe = Timeframe::resolve(&token);
    let now = SystemClock.now();

    // Drifting opinion with a little noise, one vote every few minutes
    let span = timeframe.config().span_ms;
    let mut seed: u32 = 7;
    let records: Vec<RawRecord> = (0..600)
        .map(|i| {
            seed = seed.wrapping_mul(1664525).wrapping_add(1013904223);
            let t = now - span + i * span / 600;
            let drift = 40.0 + 30.0 * i as f64 / 600.0;
            let noise = (seed >> 24) as f64 / 255.0 * 20.0 - 10.0;
            RawRecord::number(&t.to_string(), drift + noise)
        })
        .collect();

    for (name, fill) in [
        ("carry-forward", FillPolicy::CarryForward),
        ("neutral", FillPolicy::Neutral),
        ("baseline", FillPolicy::baseline()),
    ] {
        let engine = Engine::new(EngineConfig::default().with_fill(fill))?;
        let series = engine.compute_records(&records, timeframe.as_str(), now);

        println!("== {name} ({timeframe}) current={}", series.current);
        println!("{}", serde_json::to_string_pretty(&series)?);
    }

    Ok(())
}
