//! Aggregation and smoothing engine for public vote timelines
//!
//! Turns irregular, timestamped votes in `[0, 100]` into a fixed-cadence,
//! smoothed series for a requested timeframe (`1H` … `1Y`).
//!
//! The engine is a pure function of (samples, timeframe, now):
//! - No I/O, no shared state, no suspension points
//! - Identical inputs within one step give identical output
//! - Builds without `std` (needs `alloc`)
//!
//! ```no_run
//! use votecurve_core::{Engine, Sample};
//!
//! let engine = Engine::default();
//! let samples = [Sample::new(1_700_000_000_000, 72.0)];
//!
//! let series = engine.compute(&samples, "1h", 1_700_000_100_000);
//! assert_eq!(series.points.len(), 60);
//! println!("current = {}", series.current);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

extern crate alloc;

#[macro_use]
mod macros;

pub mod buffer;
pub mod constants;
pub mod engine;
pub mod errors;
pub mod grid;
pub mod normalize;
pub mod output;
pub mod reduce;
pub mod smoothing;
pub mod time;
pub mod timeframe;
pub mod traits;
pub mod window;

// Public API
pub use engine::{Engine, EngineConfig};
pub use errors::{ConfigError, ConfigResult, SampleError};
pub use normalize::{RawRecord, RawValue, Sample};
pub use output::{DisplayPoint, Series, SeriesMeta};
pub use reduce::{BaselineConfig, BucketMean, FillPolicy};
pub use smoothing::{SmoothedPoint, SmoothingMode};
pub use time::{Clock, Timestamp};
pub use timeframe::{LabelFormat, Timeframe, TimeframeConfig};
pub use traits::SampleSource;
pub use window::Window;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
