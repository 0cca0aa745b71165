//! Seams between the engine and its collaborators
//!
//! Keep these small: the engine only needs records in and a few value checks.

use alloc::vec::Vec;
use core::convert::Infallible;

use crate::normalize::RawRecord;

/// Supplier of raw vote records
///
/// Implementations own discovery, authentication and pagination. The engine
/// neither knows nor cares where records come from, and never retries: an
/// error here is the caller's to report.
pub trait SampleSource {
    /// Failure type of the underlying transport
    type Error;

    /// Every record that may fall inside the requested window, in any order
    fn fetch(&self) -> Result<Vec<RawRecord>, Self::Error>;
}

impl SampleSource for Vec<RawRecord> {
    type Error = Infallible;

    fn fetch(&self) -> Result<Vec<RawRecord>, Self::Error> {
        Ok(self.clone())
    }
}

impl SampleSource for [RawRecord] {
    type Error = Infallible;

    fn fetch(&self) -> Result<Vec<RawRecord>, Self::Error> {
        Ok(self.to_vec())
    }
}

/// Values that can be checked for numeric sanity
pub trait Validatable {
    /// True if the value is a usable number (not NaN, not infinite)
    fn is_valid(&self) -> bool;
}

impl Validatable for f64 {
    fn is_valid(&self) -> bool {
        self.is_finite()
    }
}

/// Clamp into the score domain `[0, 100]`
///
/// NaN maps to the neutral score so a bad value can never escape a stage.
pub fn clamp_score(value: f64) -> f64 {
    use crate::constants::{NEUTRAL_SCORE, SCORE_MAX, SCORE_MIN};

    if value.is_nan() {
        NEUTRAL_SCORE
    } else {
        value.clamp(SCORE_MIN, SCORE_MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validatable_f64() {
        assert!(5.0f64.is_valid());
        assert!(!f64::NAN.is_valid());
        assert!(!f64::INFINITY.is_valid());
    }

    #[test]
    fn clamp_score_bounds() {
        assert_eq!(clamp_score(-3.0), 0.0);
        assert_eq!(clamp_score(140.0), 100.0);
        assert_eq!(clamp_score(42.5), 42.5);
        assert_eq!(clamp_score(f64::NAN), 50.0);
    }

    #[test]
    fn vec_is_an_infallible_source() {
        let records = alloc::vec![RawRecord::number("2024-01-01T00:00:00Z", 10.0)];
        let fetched = records.fetch().unwrap();
        assert_eq!(fetched.len(), 1);
    }
}
