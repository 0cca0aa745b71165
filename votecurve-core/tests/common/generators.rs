//! Deterministic vote generators
//!
//! A linear congruential generator keeps fixtures reproducible across runs
//! and platforms without pulling in an RNG crate.

use votecurve_core::{RawRecord, RawValue, Sample, Timestamp};

/// Seeded vote stream
pub struct VoteGenerator {
    seed: u32,
}

impl VoteGenerator {
    pub fn new(seed: u32) -> Self {
        Self { seed }
    }

    /// `count` votes spread uniformly over `[from, to)`, centred on `center`
    /// with ±`spread` jitter
    pub fn uniform(&mut self, from: Timestamp, to: Timestamp, count: usize, center: f64, spread: f64) -> Vec<Sample> {
        let span = (to - from).max(1) as u64;
        (0..count)
            .map(|_| {
                let t = from + (self.next_u32() as u64 % span) as i64;
                let v = center + (self.random_float() * 2.0 - 1.0) * spread;
                Sample::new(t, v)
            })
            .collect()
    }

    /// Bursty traffic: each step of `[from, to)` gets between 0 and `max_per_step`
    /// votes, with roughly a third of the steps left empty
    pub fn bursty(&mut self, from: Timestamp, to: Timestamp, step: i64, max_per_step: u32) -> Vec<Sample> {
        let mut samples = Vec::new();
        let mut t = from;
        while t < to {
            if self.random_float() > 0.33 {
                let n = self.random_int(1, max_per_step.max(1));
                for _ in 0..n {
                    let offset = (self.next_u32() as i64) % step;
                    samples.push(Sample::new(t + offset, self.random_float() * 100.0));
                }
            }
            t += step;
        }
        samples
    }

    /// Raw submissions, a fraction of them malformed in the ways the
    /// normalizer must tolerate
    pub fn records(&mut self, from: Timestamp, to: Timestamp, count: usize) -> Vec<RawRecord> {
        self.uniform(from, to, count, 50.0, 50.0)
            .into_iter()
            .map(|s| {
                let created_at = chrono::DateTime::from_timestamp_millis(s.timestamp)
                    .map(|dt| dt.to_rfc3339())
                    .unwrap_or_default();
                match self.random_int(0, 9) {
                    0 => RawRecord { created_at: None, ..RawRecord::number(&created_at, s.value) },
                    1 => RawRecord::text(&created_at, "n/a"),
                    2 => RawRecord {
                        created_at: Some(created_at),
                        value: Some(RawValue::Null),
                        choice: Some(RawValue::Text(format!("{:.0}", s.value))),
                    },
                    3 => RawRecord::text(&created_at, &format!(" {} ", s.value)),
                    _ => RawRecord::number(&created_at, s.value),
                }
            })
            .collect()
    }

    fn next_u32(&mut self) -> u32 {
        self.seed = self.seed.wrapping_mul(1664525).wrapping_add(1013904223);
        self.seed
    }

    fn random_float(&mut self) -> f64 {
        (self.next_u32() >> 8) as f64 / (1u32 << 24) as f64
    }

    fn random_int(&mut self, min: u32, max: u32) -> u32 {
        min + self.next_u32() % (max - min + 1)
    }
}
