//! Score Domain and Fill Defaults
//!
//! Votes are bounded scalars. Every stage clamps to
//! `[SCORE_MIN, SCORE_MAX]`, and the smoother starts from the midpoint.

// ===== VALUE DOMAIN =====

/// Lowest representable score.
pub const SCORE_MIN: f64 = 0.0;

/// Highest representable score.
pub const SCORE_MAX: f64 = 100.0;

/// Neutral prior: initial smoother state, empty-series `current`, and the
/// mean used for empty buckets under the neutral fill policy.
pub const NEUTRAL_SCORE: f64 = 50.0;

// ===== WINDOWING =====

/// Warm-up buckets computed before the visible window and never emitted.
pub const DEFAULT_BUFFER_BUCKETS: usize = 4;

/// Upper bound on warm-up buckets accepted by `EngineConfig::validate`.
pub const MAX_BUFFER_BUCKETS: usize = 64;

/// Window of the trailing-mean smoothing mode.
pub const DEFAULT_TRAILING_WINDOW: usize = 5;

/// Capacity of the smoother's ring buffer; bounds both the adaptive long
/// window and the trailing-mean window.
pub const MAX_SMOOTHING_WINDOW: usize = 32;

// ===== DISPLAY =====

/// Points are emitted with one decimal.
pub const DISPLAY_DECIMALS_SCALE: f64 = 10.0;

// ===== BASELINE FILL =====

/// Fewest synthetic votes a baseline bucket carries.
pub const BASELINE_MIN_COUNT: u32 = 2;

/// Most synthetic votes a baseline bucket carries.
pub const BASELINE_MAX_COUNT: u32 = 8;

/// Lowest synthetic mean.
pub const BASELINE_MIN_MEAN: f64 = 45.0;

/// Highest synthetic mean.
pub const BASELINE_MAX_MEAN: f64 = 55.0;

/// FNV-1a 64-bit offset basis.
pub const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;

/// FNV-1a 64-bit prime.
pub const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;
