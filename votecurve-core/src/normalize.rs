//! Sample Normalizer
//!
//! Turns raw records, as handed over by a [`SampleSource`](crate::SampleSource),
//! into validated `(timestamp, value)` samples.
//!
//! ## Record Shape
//!
//! A submission carries a creation timestamp and a payload under one of two
//! field names. The schema drifted once, so `value` is read first and
//! `choice` is used only when `value` is absent or null.
//!
//! ## Rejection Rules
//!
//! ```text
//! created_at missing                     → MissingTimestamp
//! created_at not RFC 3339 / integer ms   → InvalidTimestamp
//! value and choice both missing/null     → MissingValue
//! text that does not parse as a number   → NonNumericValue
//! NaN / ±inf                             → NonFiniteValue
//! ```
//!
//! Rejected records are counted, never fatal. Accepted values are clamped to
//! `[0, 100]`.

use alloc::{string::String, vec::Vec};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    errors::SampleError,
    time::Timestamp,
    traits::{clamp_score, Validatable},
};

/// A validated vote
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Sample {
    /// Creation time, ms since epoch
    pub timestamp: Timestamp,
    /// Vote in `[0, 100]`
    pub value: f64,
}

impl Sample {
    /// Build a sample, clamping `value` into `[0, 100]`
    pub fn new(timestamp: Timestamp, value: f64) -> Self {
        Self {
            timestamp,
            value: clamp_score(value),
        }
    }
}

/// Payload field as received
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum RawValue {
    /// Explicit null
    Null,
    /// Numeric payload
    Number(f64),
    /// Text payload, parsed leniently (surrounding whitespace ignored)
    Text(String),
    /// Anything else (booleans, arrays, objects)
    Unsupported,
}

impl RawValue {
    fn is_null(&self) -> bool {
        matches!(self, RawValue::Null)
    }

    /// Numeric reading of the payload
    pub fn to_number(&self) -> Result<f64, SampleError> {
        let number = match self {
            RawValue::Null => return Err(SampleError::MissingValue),
            RawValue::Number(n) => *n,
            RawValue::Text(text) => {
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    return Err(SampleError::NonNumericValue);
                }
                trimmed.parse::<f64>().map_err(|_| SampleError::NonNumericValue)?
            }
            RawValue::Unsupported => return Err(SampleError::NonNumericValue),
        };

        if number.is_valid() {
            Ok(number)
        } else {
            Err(SampleError::NonFiniteValue)
        }
    }
}

/// One submission before validation
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RawRecord {
    /// Creation timestamp text
    pub created_at: Option<String>,
    /// Primary payload field
    pub value: Option<RawValue>,
    /// Legacy payload field, read when `value` is absent or null
    pub choice: Option<RawValue>,
}

impl RawRecord {
    /// Record with a numeric `value`
    pub fn number(created_at: &str, value: f64) -> Self {
        Self {
            created_at: Some(created_at.into()),
            value: Some(RawValue::Number(value)),
            choice: None,
        }
    }

    /// Record with a text `value`
    pub fn text(created_at: &str, value: &str) -> Self {
        Self {
            created_at: Some(created_at.into()),
            value: Some(RawValue::Text(value.into())),
            choice: None,
        }
    }

    /// Payload after the `value` → `choice` fallback
    pub fn payload(&self) -> Option<&RawValue> {
        match &self.value {
            Some(v) if !v.is_null() => Some(v),
            _ => self.choice.as_ref().filter(|v| !v.is_null()),
        }
    }
}

/// Parse an RFC 3339 timestamp or integer milliseconds
pub fn parse_timestamp(text: &str) -> Result<Timestamp, SampleError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(SampleError::MissingTimestamp);
    }

    if let Ok(ms) = trimmed.parse::<i64>() {
        return Ok(ms);
    }

    chrono::DateTime::parse_from_rfc3339(trimmed)
        .map(|dt| dt.timestamp_millis())
        .map_err(|_| SampleError::InvalidTimestamp)
}

/// Validate a single record
pub fn normalize_record(record: &RawRecord) -> Result<Sample, SampleError> {
    let created_at = record.created_at.as_deref().ok_or(SampleError::MissingTimestamp)?;
    let timestamp = parse_timestamp(created_at)?;
    let value = record.payload().ok_or(SampleError::MissingValue)?.to_number()?;

    Ok(Sample::new(timestamp, value))
}

/// Counters from one normalization pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NormalizeStats {
    /// Records turned into samples
    pub accepted: usize,
    /// Accepted samples whose value was pulled into `[0, 100]`
    pub clamped: usize,
    /// Records without a usable timestamp
    pub bad_timestamp: usize,
    /// Records without a usable value
    pub bad_value: usize,
}

impl NormalizeStats {
    /// All rejected records
    pub fn rejected(&self) -> usize {
        self.bad_timestamp + self.bad_value
    }

    fn record(&mut self, error: SampleError) {
        match error {
            SampleError::MissingTimestamp | SampleError::InvalidTimestamp => self.bad_timestamp += 1,
            SampleError::MissingValue | SampleError::NonNumericValue | SampleError::NonFiniteValue => {
                self.bad_value += 1
            }
        }
    }
}

/// Samples that survived validation, with counters
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Normalized {
    /// Accepted samples, in record order
    pub samples: Vec<Sample>,
    /// Pass counters
    pub stats: NormalizeStats,
}

/// Validate every record, dropping the malformed ones
pub fn normalize(records: &[RawRecord]) -> Normalized {
    let mut out = Normalized {
        samples: Vec::with_capacity(records.len()),
        stats: NormalizeStats::default(),
    };

    for record in records {
        match normalize_record(record) {
            Ok(sample) => {
                let raw = record.payload().and_then(|v| v.to_number().ok());
                if raw.is_some_and(|r| r != sample.value) {
                    out.stats.clamped += 1;
                }
                out.stats.accepted += 1;
                out.samples.push(sample);
            }
            Err(error) => {
                log_trace!("dropping record {:?}: {}", record.created_at, error);
                out.stats.record(error);
            }
        }
    }

    log_debug!(
        "normalized {} records: {} accepted ({} clamped), {} rejected",
        records.len(),
        out.stats.accepted,
        out.stats.clamped,
        out.stats.rejected()
    );

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn numeric_record() {
        let sample = normalize_record(&RawRecord::number("2024-01-01T00:00:00Z", 42.0)).unwrap();
        assert_eq!(sample.timestamp, 1_704_067_200_000);
        assert_eq!(sample.value, 42.0);
    }

    #[test]
    fn text_values_are_parsed() {
        let sample = normalize_record(&RawRecord::text("2024-01-01T00:00:00Z", " 73.5 ")).unwrap();
        assert_eq!(sample.value, 73.5);
    }

    #[test]
    fn offsets_are_honoured() {
        let sample = normalize_record(&RawRecord::number("2024-01-01T02:00:00+02:00", 1.0)).unwrap();
        assert_eq!(sample.timestamp, 1_704_067_200_000);
    }

    #[test]
    fn integer_millis_accepted() {
        assert_eq!(parse_timestamp("1704067200000"), Ok(1_704_067_200_000));
    }

    #[test]
    fn values_are_clamped() {
        let high = normalize_record(&RawRecord::number("2024-01-01T00:00:00Z", 250.0)).unwrap();
        let low = normalize_record(&RawRecord::number("2024-01-01T00:00:00Z", -4.0)).unwrap();
        assert_eq!(high.value, 100.0);
        assert_eq!(low.value, 0.0);
    }

    #[test]
    fn choice_is_fallback_for_missing_or_null_value() {
        let mut record = RawRecord {
            created_at: Some("2024-01-01T00:00:00Z".into()),
            value: None,
            choice: Some(RawValue::Text("60".into())),
        };
        assert_eq!(normalize_record(&record).unwrap().value, 60.0);

        record.value = Some(RawValue::Null);
        assert_eq!(normalize_record(&record).unwrap().value, 60.0);

        // A present value wins even when it is garbage
        record.value = Some(RawValue::Text("abc".into()));
        assert_eq!(normalize_record(&record), Err(SampleError::NonNumericValue));
    }

    #[test]
    fn rejection_reasons() {
        let no_ts = RawRecord { created_at: None, ..RawRecord::number("", 1.0) };
        assert_eq!(normalize_record(&no_ts), Err(SampleError::MissingTimestamp));
        assert_eq!(
            normalize_record(&RawRecord::number("yesterday", 1.0)),
            Err(SampleError::InvalidTimestamp)
        );
        assert_eq!(
            normalize_record(&RawRecord { value: None, ..RawRecord::number("2024-01-01T00:00:00Z", 1.0) }),
            Err(SampleError::MissingValue)
        );
        assert_eq!(
            normalize_record(&RawRecord::text("2024-01-01T00:00:00Z", "")),
            Err(SampleError::NonNumericValue)
        );
        assert_eq!(
            normalize_record(&RawRecord::number("2024-01-01T00:00:00Z", f64::NAN)),
            Err(SampleError::NonFiniteValue)
        );
        assert_eq!(
            normalize_record(&RawRecord::text("2024-01-01T00:00:00Z", "inf")),
            Err(SampleError::NonFiniteValue)
        );
        let unsupported = RawRecord {
            value: Some(RawValue::Unsupported),
            ..RawRecord::number("2024-01-01T00:00:00Z", 1.0)
        };
        assert_eq!(normalize_record(&unsupported), Err(SampleError::NonNumericValue));
    }

    #[test]
    fn bulk_normalize_counts() {
        let records = vec![
            RawRecord::number("2024-01-01T00:00:00Z", 10.0),
            RawRecord::number("2024-01-01T00:01:00Z", 140.0),
            RawRecord::number("not a date", 10.0),
            RawRecord::text("2024-01-01T00:02:00Z", "yes"),
        ];
        let out = normalize(&records);

        assert_eq!(out.samples.len(), 2);
        assert_eq!(out.stats.accepted, 2);
        assert_eq!(out.stats.clamped, 1);
        assert_eq!(out.stats.bad_timestamp, 1);
        assert_eq!(out.stats.bad_value, 1);
        assert_eq!(out.stats.rejected(), 2);
    }
}
