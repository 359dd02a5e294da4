// =============================================================================
// =============================================================================

/// Version string for synthcut
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Identifier used when a sequence has no header
pub const DEFAULT_SEQUENCE_ID: &str = "Synthcut_Seq_1";

// =============================================================================
// =============================================================================

/// GC fraction at or below which a window is scored at the full risk scale
pub const GC_HARD_LOWER_LIMIT: f64 = 0.2;

/// GC fraction above which a window is scored at the full risk scale
pub const GC_HARD_UPPER_LIMIT: f64 = 0.8;

/// Maximum normalized GC risk
pub const GC_RISK_SCALE: f64 = 10.0;

/// Divisor applied to alignment scores painted over the homology track
pub const HOMOLOGY_SCORE_DIVISOR: f64 = 10.0;

/// Divisor applied to negated hairpin free energies above threshold
pub const HAIRPIN_ENERGY_DIVISOR: f64 = 500.0;

// =============================================================================
// =============================================================================

/// Default minimum fragment length in base pairs
pub const DEFAULT_MIN_FRAGMENT_LENGTH: usize = 1000;

/// Default maximum fragment length in base pairs
pub const DEFAULT_MAX_FRAGMENT_LENGTH: usize = 1744;

/// Default minimum overlap between consecutive fragments
pub const DEFAULT_MIN_OVERLAP: usize = 50;

/// Default maximum overlap between consecutive fragments
pub const DEFAULT_MAX_OVERLAP: usize = 50;

/// Default upper bound on the number of fragments
pub const DEFAULT_MAX_FRAGMENTS: usize = 10;

/// Sequences longer than this are segmented chunk by chunk
pub const DEFAULT_CHUNK_CAP: usize = 100_000;

/// Candidate-end strides tried in order until a state has a successor
pub const SEARCH_STRIDES: [usize; 5] = [20, 10, 5, 2, 1];

// =============================================================================
// =============================================================================

/// Default GC sliding window size
pub const DEFAULT_GC_WINDOW_SIZE: usize = 51;

/// Default lower edge of the GC safe band
pub const DEFAULT_GC_LOWER_THRESHOLD: f64 = 0.3;

/// Default upper edge of the GC safe band
pub const DEFAULT_GC_UPPER_THRESHOLD: f64 = 0.7;

/// Default hairpin sliding window size
pub const DEFAULT_HAIRPIN_WINDOW_SIZE: usize = 61;

/// Default hairpin threshold on the negated free energy (cal/mol)
pub const DEFAULT_HAIRPIN_THRESHOLD: f64 = 3000.0;

/// Default repeat detection window size
pub const DEFAULT_REPEAT_WINDOW_SIZE: usize = 200;

/// Default duplication strength threshold
pub const DEFAULT_REPEAT_THRESHOLD: f64 = 2.0;
