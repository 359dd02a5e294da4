use std::collections::BTreeSet;
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_CHUNK_CAP, DEFAULT_GC_LOWER_THRESHOLD, DEFAULT_GC_UPPER_THRESHOLD,
    DEFAULT_GC_WINDOW_SIZE, DEFAULT_HAIRPIN_THRESHOLD, DEFAULT_HAIRPIN_WINDOW_SIZE,
    DEFAULT_MAX_FRAGMENT_LENGTH, DEFAULT_MAX_FRAGMENTS, DEFAULT_MAX_OVERLAP,
    DEFAULT_MIN_FRAGMENT_LENGTH, DEFAULT_MIN_OVERLAP, DEFAULT_REPEAT_THRESHOLD,
    DEFAULT_REPEAT_WINDOW_SIZE, GC_HARD_LOWER_LIMIT, GC_HARD_UPPER_LIMIT,
};
use crate::types::SynthcutError;

/// Output format options for fragmentation results.
///
/// # Formats
///
/// - **Tsv**: Tab-separated fragment table with overlap risk per junction
/// - **Gff**: General Feature Format version 3, one feature per fragment
/// - **Bed**: Zero-based half-open intervals for genome browsers
///
/// # Examples
///
/// ```rust
/// use synthcut_core::config::{OutputFormat, SynthcutConfig};
///
/// let config = SynthcutConfig {
///     output_format: OutputFormat::Gff,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Tab-separated fragment table.
    ///
    /// One row per fragment with coordinates, length, overlap with the next
    /// fragment and the risk summed over that overlap.
    #[default]
    Tsv,

    /// General Feature Format version 3.
    Gff,

    /// BED6 intervals (0-based, half-open).
    Bed,
}

/// The four independent synthesis-difficulty signals.
///
/// Ordering is fixed: aggregation iterates enabled signals in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignalKind {
    /// Windowed GC content
    Gc,
    /// Local alignment hits against the sequence itself and reference backbones
    Homology,
    /// Windowed hairpin free energy
    Hairpin,
    /// Windowed self-similarity / duplication strength
    Repeat,
}

impl SignalKind {
    /// All signal kinds in aggregation order
    pub const ALL: [SignalKind; 4] = [Self::Gc, Self::Homology, Self::Hairpin, Self::Repeat];

    /// Lowercase name used in configuration files and output headers
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Gc => "gc",
            Self::Homology => "homology",
            Self::Hairpin => "hairpin",
            Self::Repeat => "repeat",
        }
    }
}

impl fmt::Display for SignalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for SignalKind {
    type Err = SynthcutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gc" => Ok(Self::Gc),
            "homology" | "blast" => Ok(Self::Homology),
            "hairpin" | "primer3" => Ok(Self::Hairpin),
            "repeat" | "ndu" => Ok(Self::Repeat),
            other => Err(SynthcutError::InvalidConfig(format!(
                "unknown signal '{other}' (expected gc, homology, hairpin or repeat)"
            ))),
        }
    }
}

/// Segmentation objective.
///
/// `Max` is the default used for fragment cutting: it minimizes the single
/// worst junction instead of the total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Objective {
    /// Minimize the sum of overlap costs
    Sum,
    /// Minimize the largest overlap cost
    #[default]
    Max,
}

impl Objective {
    /// Combines the cost of one transition with the best future cost.
    #[inline]
    #[must_use]
    pub fn combine(self, transition_cost: f64, future_cost: f64) -> f64 {
        match self {
            Self::Sum => transition_cost + future_cost,
            Self::Max => transition_cost.max(future_cost),
        }
    }

    /// Value of an empty set of transitions
    #[must_use]
    pub const fn identity(self) -> f64 {
        0.0
    }
}

impl fmt::Display for Objective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sum => f.write_str("sum"),
            Self::Max => f.write_str("max"),
        }
    }
}

impl std::str::FromStr for Objective {
    type Err = SynthcutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sum" | "minimize-sum" => Ok(Self::Sum),
            "max" | "minimize-max" | "minimax" => Ok(Self::Max),
            other => Err(SynthcutError::InvalidConfig(format!(
                "unknown objective '{other}' (expected sum or max)"
            ))),
        }
    }
}

/// Fragment length, overlap and count constraints.
///
/// # Examples
///
/// ```rust
/// use synthcut_core::config::{FragmentationConfig, Objective};
///
/// let config = FragmentationConfig {
///     min_length: 50,
///     max_length: 70,
///     min_overlap: 5,
///     max_overlap: 10,
///     max_fragments: 5,
///     objective: Objective::Max,
///     ..Default::default()
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FragmentationConfig {
    /// Minimum fragment length (l_min)
    pub min_length: usize,
    /// Maximum fragment length (l_max)
    pub max_length: usize,
    /// Minimum overlap between consecutive fragments (o_min)
    pub min_overlap: usize,
    /// Maximum overlap between consecutive fragments (o_max)
    pub max_overlap: usize,
    /// Upper bound on the number of fragments (n_max)
    pub max_fragments: usize,
    /// Aggregate used to score a partition
    pub objective: Objective,
    /// Sequences longer than this are segmented chunk by chunk
    pub chunk_cap: usize,
}

impl Default for FragmentationConfig {
    fn default() -> Self {
        Self {
            min_length: DEFAULT_MIN_FRAGMENT_LENGTH,
            max_length: DEFAULT_MAX_FRAGMENT_LENGTH,
            min_overlap: DEFAULT_MIN_OVERLAP,
            max_overlap: DEFAULT_MAX_OVERLAP,
            max_fragments: DEFAULT_MAX_FRAGMENTS,
            objective: Objective::Max,
            chunk_cap: DEFAULT_CHUNK_CAP,
        }
    }
}

impl FragmentationConfig {
    /// Checks the constraints before any segmentation work.
    ///
    /// # Errors
    ///
    /// Returns [`SynthcutError::InvalidConfig`] when a bound is zero, a range
    /// is inverted, or `min_length <= max_overlap` (no fragment could be
    /// longer than the overlap it shares).
    pub fn validate(&self) -> Result<(), SynthcutError> {
        let bounds = [
            ("min_length", self.min_length),
            ("max_length", self.max_length),
            ("min_overlap", self.min_overlap),
            ("max_overlap", self.max_overlap),
            ("max_fragments", self.max_fragments),
            ("chunk_cap", self.chunk_cap),
        ];
        if let Some((name, _)) = bounds.iter().find(|(_, value)| *value == 0) {
            return Err(SynthcutError::InvalidConfig(format!(
                "{name} must be positive"
            )));
        }
        if self.max_length < self.min_length {
            return Err(SynthcutError::InvalidConfig(format!(
                "max_length ({}) is smaller than min_length ({})",
                self.max_length, self.min_length
            )));
        }
        if self.max_overlap < self.min_overlap {
            return Err(SynthcutError::InvalidConfig(format!(
                "max_overlap ({}) is smaller than min_overlap ({})",
                self.max_overlap, self.min_overlap
            )));
        }
        if self.min_length <= self.max_overlap {
            return Err(SynthcutError::InvalidConfig(format!(
                "min_length ({}) must exceed max_overlap ({})",
                self.min_length, self.max_overlap
            )));
        }
        if self.chunk_cap < self.max_length {
            return Err(SynthcutError::InvalidConfig(format!(
                "chunk_cap ({}) is smaller than max_length ({})",
                self.chunk_cap, self.max_length
            )));
        }
        Ok(())
    }
}

/// GC content window and safe band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GcConfig {
    pub window_size: usize,
    /// Lower edge of the zero-risk band
    pub lower_threshold: f64,
    /// Upper edge of the zero-risk band
    pub upper_threshold: f64,
}

impl Default for GcConfig {
    fn default() -> Self {
        Self {
            window_size: DEFAULT_GC_WINDOW_SIZE,
            lower_threshold: DEFAULT_GC_LOWER_THRESHOLD,
            upper_threshold: DEFAULT_GC_UPPER_THRESHOLD,
        }
    }
}

/// Local alignment search parameters.
///
/// These are handed unchanged to the [`HomologySearch`](crate::signals::HomologySearch)
/// collaborator; the engine itself only consumes the hits it returns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HomologyConfig {
    pub word_size: usize,
    pub percent_identity: f64,
    pub evalue: f64,
    pub reward: i32,
    pub penalty: i32,
    pub gap_open: i32,
    pub gap_extend: i32,
}

impl Default for HomologyConfig {
    fn default() -> Self {
        Self {
            word_size: 11,
            percent_identity: 90.0,
            evalue: 1e-3,
            reward: 1,
            penalty: -2,
            gap_open: 5,
            gap_extend: 2,
        }
    }
}

/// Hairpin window and threshold on the negated free energy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HairpinConfig {
    pub window_size: usize,
    pub threshold: f64,
}

impl Default for HairpinConfig {
    fn default() -> Self {
        Self {
            window_size: DEFAULT_HAIRPIN_WINDOW_SIZE,
            threshold: DEFAULT_HAIRPIN_THRESHOLD,
        }
    }
}

/// Repeat detection window and duplication strength threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RepeatConfig {
    pub window_size: usize,
    pub threshold: f64,
}

impl Default for RepeatConfig {
    fn default() -> Self {
        Self {
            window_size: DEFAULT_REPEAT_WINDOW_SIZE,
            threshold: DEFAULT_REPEAT_THRESHOLD,
        }
    }
}

/// Which signals feed the risk profile, and how each one is computed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Enabled signals. Disabled signals are excluded from the sum entirely.
    pub signals: BTreeSet<SignalKind>,
    pub gc: GcConfig,
    pub homology: HomologyConfig,
    pub hairpin: HairpinConfig,
    pub repeat: RepeatConfig,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            signals: BTreeSet::from([SignalKind::Gc]),
            gc: GcConfig::default(),
            homology: HomologyConfig::default(),
            hairpin: HairpinConfig::default(),
            repeat: RepeatConfig::default(),
        }
    }
}

impl ScoringConfig {
    /// Returns `true` if `kind` contributes to the risk profile.
    #[must_use]
    pub fn is_enabled(&self, kind: SignalKind) -> bool {
        self.signals.contains(&kind)
    }

    /// Checks windows and thresholds of the enabled signals.
    ///
    /// # Errors
    ///
    /// Returns [`SynthcutError::InvalidConfig`] for a zero window, a GC band
    /// outside `[0.2, 0.8]` or inverted, or a negative hairpin/repeat
    /// threshold (which would let negative risk into the profile).
    pub fn validate(&self) -> Result<(), SynthcutError> {
        if self.is_enabled(SignalKind::Gc) {
            let gc = &self.gc;
            if gc.window_size == 0 {
                return Err(SynthcutError::InvalidConfig(
                    "gc.window_size must be positive".to_string(),
                ));
            }
            let in_limits = |x: f64| (GC_HARD_LOWER_LIMIT..=GC_HARD_UPPER_LIMIT).contains(&x);
            if !in_limits(gc.lower_threshold)
                || !in_limits(gc.upper_threshold)
                || gc.lower_threshold > gc.upper_threshold
            {
                return Err(SynthcutError::InvalidConfig(format!(
                    "GC band [{}, {}] must be ordered and lie within [{}, {}]",
                    gc.lower_threshold,
                    gc.upper_threshold,
                    GC_HARD_LOWER_LIMIT,
                    GC_HARD_UPPER_LIMIT
                )));
            }
        }
        if self.is_enabled(SignalKind::Hairpin) {
            if self.hairpin.window_size == 0 {
                return Err(SynthcutError::InvalidConfig(
                    "hairpin.window_size must be positive".to_string(),
                ));
            }
            if self.hairpin.threshold.is_nan() || self.hairpin.threshold < 0.0 {
                return Err(SynthcutError::InvalidConfig(format!(
                    "hairpin.threshold must be non-negative, got {}",
                    self.hairpin.threshold
                )));
            }
        }
        if self.is_enabled(SignalKind::Repeat) {
            if self.repeat.window_size == 0 {
                return Err(SynthcutError::InvalidConfig(
                    "repeat.window_size must be positive".to_string(),
                ));
            }
            if self.repeat.threshold.is_nan() || self.repeat.threshold < 0.0 {
                return Err(SynthcutError::InvalidConfig(format!(
                    "repeat.threshold must be non-negative, got {}",
                    self.repeat.threshold
                )));
            }
        }
        Ok(())
    }
}

/// Configuration settings for a synthcut run.
///
/// # Examples
///
/// ## Default configuration
///
/// ```rust
/// use synthcut_core::config::SynthcutConfig;
///
/// let config = SynthcutConfig::default();
/// assert!(config.validate().is_ok());
/// ```
///
/// ## Loading from TOML
///
/// ```rust
/// use synthcut_core::config::{Objective, SynthcutConfig};
///
/// let config: SynthcutConfig = toml::from_str(r#"
///     [fragmentation]
///     min_length = 300
///     max_length = 500
///     objective = "sum"
///
///     [scoring]
///     signals = ["gc", "hairpin"]
/// "#)?;
/// assert_eq!(config.fragmentation.objective, Objective::Sum);
/// # Ok::<(), toml::de::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SynthcutConfig {
    pub fragmentation: FragmentationConfig,
    pub scoring: ScoringConfig,

    /// Output format for fragmentation results.
    ///
    /// **Default**: [`OutputFormat::Tsv`]
    pub output_format: OutputFormat,

    /// Suppress informational logging.
    ///
    /// **Default**: `false`
    pub quiet: bool,

    /// Number of worker threads for batch processing.
    ///
    /// **Default**: `None` (use all available cores)
    pub num_threads: Option<usize>,
}

impl Default for SynthcutConfig {
    fn default() -> Self {
        Self {
            fragmentation: FragmentationConfig::default(),
            scoring: ScoringConfig::default(),
            output_format: OutputFormat::Tsv,
            quiet: false,
            num_threads: None,
        }
    }
}

impl SynthcutConfig {
    /// Loads a configuration from a TOML file. Missing keys take defaults.
    ///
    /// # Errors
    ///
    /// Returns [`SynthcutError::ConfigRead`] or [`SynthcutError::ConfigParse`]
    /// naming the offending path.
    pub fn from_file(path: &Path) -> Result<Self, SynthcutError> {
        let content = std::fs::read_to_string(path).map_err(|e| SynthcutError::ConfigRead {
            path: path.to_owned(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| SynthcutError::ConfigParse {
            path: path.to_owned(),
            source: e,
        })
    }

    /// Validates both the fragmentation and the scoring sections.
    ///
    /// # Errors
    ///
    /// Returns [`SynthcutError::InvalidConfig`] describing the first problem.
    pub fn validate(&self) -> Result<(), SynthcutError> {
        self.fragmentation.validate()?;
        self.scoring.validate()?;
        if self.num_threads == Some(0) {
            return Err(SynthcutError::InvalidConfig(
                "num_threads must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
