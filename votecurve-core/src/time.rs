//! Time sources and step arithmetic
//!
//! The engine never reads the clock itself; callers pass `now` in. These
//! sources exist so the connectors (and tests) can share one abstraction:
//! - System clock (when `std` is available)
//! - Fixed clock (tests, replays)

/// Milliseconds since the Unix epoch
pub type Timestamp = i64;

/// Source of the current instant
pub trait Clock {
    /// Current time in milliseconds since the epoch
    fn now(&self) -> Timestamp;
}

/// Wall clock (requires std)
#[cfg(feature = "std")]
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

#[cfg(feature = "std")]
impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        use std::time::{SystemTime, UNIX_EPOCH};

        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as Timestamp
    }
}

/// Fixed clock for tests and replays
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    timestamp: Timestamp,
}

impl FixedClock {
    /// Clock frozen at `timestamp`
    pub fn new(timestamp: Timestamp) -> Self {
        Self { timestamp }
    }

    /// Move to an absolute instant
    pub fn set(&mut self, timestamp: Timestamp) {
        self.timestamp = timestamp;
    }

    /// Move forward by `ms`
    pub fn advance(&mut self, ms: i64) {
        self.timestamp += ms;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> Timestamp {
        self.timestamp
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> Timestamp {
        (**self).now()
    }
}

/// Round `ts` down to a multiple of `step_ms`
///
/// Uses Euclidean division so instants before the epoch still round toward
/// negative infinity. `step_ms` must be positive.
pub fn align_down(ts: Timestamp, step_ms: i64) -> Timestamp {
    ts.div_euclid(step_ms) * step_ms
}
