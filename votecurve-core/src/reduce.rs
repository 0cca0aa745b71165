//! Bucket Reducer
//!
//! Collapses each bucket's votes into one representative mean, and decides
//! what an empty bucket looks like. The fill policy is engine configuration,
//! applied to every bucket of a request.
//!
//! ## Fill Policies
//!
//! ```text
//! policy         empty bucket                 non-empty bucket
//! Neutral        mean 50, n 0                 plain mean
//! CarryForward   previous mean (50 first)     plain mean
//! Baseline       synthetic (count, mean)      synthetic blended with real votes
//! ```
//!
//! Under `Baseline` the synthetic pair comes from a stable FNV-1a hash of the
//! bucket timestamp, so the same bucket always gets the same pair, across
//! calls and across processes.

use alloc::vec::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    constants::{
        scores::{
            BASELINE_MAX_COUNT, BASELINE_MAX_MEAN, BASELINE_MIN_COUNT, BASELINE_MIN_MEAN,
            FNV_OFFSET_BASIS, FNV_PRIME,
        },
        NEUTRAL_SCORE, SCORE_MAX, SCORE_MIN,
    },
    errors::{ConfigError, ConfigResult},
    grid::Bucket,
    time::Timestamp,
    traits::clamp_score,
};

/// One reduced bucket
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BucketMean {
    /// Bucket start
    pub t: Timestamp,
    /// Representative value in `[0, 100]`
    pub mean: f64,
    /// Weight seen by the smoother: real votes plus any synthetic ones
    pub n: usize,
    /// Real votes only
    pub real: usize,
}

/// Ranges of the synthetic baseline
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BaselineConfig {
    /// Fewest synthetic votes
    pub min_count: u32,
    /// Most synthetic votes (inclusive)
    pub max_count: u32,
    /// Lowest synthetic mean
    pub min_mean: f64,
    /// Highest synthetic mean
    pub max_mean: f64,
}

impl Default for BaselineConfig {
    fn default() -> Self {
        Self {
            min_count: BASELINE_MIN_COUNT,
            max_count: BASELINE_MAX_COUNT,
            min_mean: BASELINE_MIN_MEAN,
            max_mean: BASELINE_MAX_MEAN,
        }
    }
}

impl BaselineConfig {
    /// Check the ranges are ordered and inside the score domain
    pub fn validate(&self) -> ConfigResult<()> {
        if self.min_count > self.max_count {
            return Err(ConfigError::BaselineRange { reason: "min_count > max_count" });
        }
        if !(self.min_mean <= self.max_mean) {
            return Err(ConfigError::BaselineRange { reason: "min_mean > max_mean" });
        }
        if self.min_mean < SCORE_MIN || self.max_mean > SCORE_MAX {
            return Err(ConfigError::BaselineRange { reason: "mean outside [0, 100]" });
        }
        Ok(())
    }

    /// Synthetic `(count, mean)` for the bucket starting at `t`
    ///
    /// Pure: depends on nothing but `t` and the configured ranges.
    pub fn synthesize(&self, t: Timestamp) -> (u32, f64) {
        let h = fnv1a64(&t.to_le_bytes());

        let count_span = u64::from(self.max_count - self.min_count) + 1;
        let count = self.min_count + (h % count_span) as u32;

        // Upper 53 bits of a remixed hash → uniform fraction in [0, 1)
        let h2 = fnv1a64(&h.to_le_bytes());
        let unit = (h2 >> 11) as f64 / (1u64 << 53) as f64;
        let mean = self.min_mean + unit * (self.max_mean - self.min_mean);

        (count, mean)
    }
}

/// What an empty bucket becomes
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FillPolicy {
    /// Mean 50, zero weight
    Neutral,
    /// Repeat the previous bucket's mean (50 for the first), zero weight
    CarryForward,
    /// Deterministic synthetic votes, blended with real ones
    Baseline(BaselineConfig),
}

impl Default for FillPolicy {
    fn default() -> Self {
        FillPolicy::CarryForward
    }
}

impl FillPolicy {
    /// Baseline policy with default ranges
    pub fn baseline() -> Self {
        FillPolicy::Baseline(BaselineConfig::default())
    }

    /// Check policy-specific ranges
    pub fn validate(&self) -> ConfigResult<()> {
        match self {
            FillPolicy::Baseline(cfg) => cfg.validate(),
            _ => Ok(()),
        }
    }

    /// Reduce one bucket given the previous bucket's mean
    pub fn reduce_bucket(&self, bucket: &Bucket, prev_mean: f64) -> BucketMean {
        let real = bucket.values.len();
        let sum: f64 = bucket.values.iter().sum();

        match self {
            FillPolicy::Baseline(cfg) => {
                let (count, base_mean) = cfg.synthesize(bucket.t);
                let weight = count as usize + real;
                let mean = if weight == 0 {
                    NEUTRAL_SCORE
                } else {
                    (base_mean * count as f64 + sum) / weight as f64
                };
                BucketMean {
                    t: bucket.t,
                    mean: clamp_score(mean),
                    n: weight,
                    real,
                }
            }
            _ if real > 0 => BucketMean {
                t: bucket.t,
                mean: clamp_score(sum / real as f64),
                n: real,
                real,
            },
            FillPolicy::CarryForward => BucketMean {
                t: bucket.t,
                mean: prev_mean,
                n: 0,
                real: 0,
            },
            FillPolicy::Neutral => BucketMean {
                t: bucket.t,
                mean: NEUTRAL_SCORE,
                n: 0,
                real: 0,
            },
        }
    }
}

/// Reduce every bucket, in order
pub fn reduce(buckets: &[Bucket], policy: &FillPolicy) -> Vec<BucketMean> {
    buckets
        .iter()
        .scan(NEUTRAL_SCORE, |prev_mean, bucket| {
            let reduced = policy.reduce_bucket(bucket, *prev_mean);
            *prev_mean = reduced.mean;
            Some(reduced)
        })
        .collect()
}

/// 64-bit FNV-1a
pub fn fnv1a64(bytes: &[u8]) -> u64 {
    bytes.iter().fold(FNV_OFFSET_BASIS, |hash, &byte| {
        (hash ^ u64::from(byte)).wrapping_mul(FNV_PRIME)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn bucket(t: Timestamp, values: &[f64]) -> Bucket {
        Bucket { t, values: values.to_vec() }
    }

    #[test]
    fn mean_of_real_votes() {
        let b = bucket(0, &[20.0, 80.0, 50.0]);
        let m = FillPolicy::Neutral.reduce_bucket(&b, 50.0);
        assert_eq!(m.mean, 50.0);
        assert_eq!(m.n, 3);
        assert_eq!(m.real, 3);
    }

    #[test]
    fn neutral_fill() {
        let m = FillPolicy::Neutral.reduce_bucket(&bucket(0, &[]), 80.0);
        assert_eq!(m.mean, 50.0);
        assert_eq!(m.n, 0);
    }

    #[test]
    fn carry_forward_repeats_previous_mean() {
        let buckets = vec![
            bucket(0, &[]),
            bucket(1, &[90.0, 70.0]),
            bucket(2, &[]),
            bucket(3, &[]),
            bucket(4, &[10.0]),
        ];
        let means: Vec<f64> = reduce(&buckets, &FillPolicy::CarryForward)
            .iter()
            .map(|m| m.mean)
            .collect();
        assert_eq!(means, vec![50.0, 80.0, 80.0, 80.0, 10.0]);
    }

    #[test]
    fn baseline_is_deterministic() {
        let cfg = BaselineConfig::default();
        for t in [0i64, 60_000, 1_700_000_000_000, -86_400_000] {
            assert_eq!(cfg.synthesize(t), cfg.synthesize(t));
        }
    }

    #[test]
    fn baseline_stays_in_range() {
        let cfg = BaselineConfig::default();
        for i in 0..2_000i64 {
            let (count, mean) = cfg.synthesize(i * 1_800_000);
            assert!((cfg.min_count..=cfg.max_count).contains(&count));
            assert!(mean >= cfg.min_mean && mean <= cfg.max_mean);
        }
    }

    #[test]
    fn baseline_spreads_counts() {
        let cfg = BaselineConfig::default();
        let mut seen = [false; 9];
        for i in 0..500i64 {
            let (count, _) = cfg.synthesize(i * 60_000);
            seen[count as usize] = true;
        }
        // Every count in 2..=8 shows up
        assert!(seen[2..=8].iter().all(|&s| s));
    }

    #[test]
    fn baseline_blends_real_votes() {
        let policy = FillPolicy::baseline();
        let t = 1_700_000_000_000;
        let (count, base) = BaselineConfig::default().synthesize(t);

        let m = policy.reduce_bucket(&bucket(t, &[100.0, 100.0]), 50.0);
        let expected = (base * count as f64 + 200.0) / (count as f64 + 2.0);
        assert!((m.mean - expected).abs() < 1e-9);
        assert_eq!(m.n, count as usize + 2);
        assert_eq!(m.real, 2);

        let empty = policy.reduce_bucket(&bucket(t, &[]), 50.0);
        assert!((empty.mean - base).abs() < 1e-9);
        assert_eq!(empty.real, 0);
    }

    #[test]
    fn zero_count_baseline_falls_back_to_neutral() {
        let policy = FillPolicy::Baseline(BaselineConfig {
            min_count: 0,
            max_count: 0,
            ..BaselineConfig::default()
        });
        let m = policy.reduce_bucket(&bucket(0, &[]), 80.0);
        assert_eq!(m.mean, 50.0);
        assert_eq!(m.n, 0);
    }

    #[test]
    fn baseline_validation() {
        assert!(BaselineConfig::default().validate().is_ok());
        let inverted = BaselineConfig { min_count: 9, ..BaselineConfig::default() };
        assert!(inverted.validate().is_err());
        let out_of_domain = BaselineConfig { max_mean: 120.0, ..BaselineConfig::default() };
        assert!(out_of_domain.validate().is_err());
    }

    #[test]
    fn fnv_reference_values() {
        assert_eq!(fnv1a64(b""), 0xcbf2_9ce4_8422_2325);
        assert_eq!(fnv1a64(b"a"), 0xaf63_dc4c_8601_ec8c);
    }
}
