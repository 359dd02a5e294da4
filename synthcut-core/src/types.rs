use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::config::{FragmentationConfig, Objective, SignalKind};
use crate::risk::RiskProfile;

/// One synthesis fragment, 1-indexed and inclusive on both ends.
///
/// # Examples
///
/// ```rust
/// use synthcut_core::types::Fragment;
///
/// let fragment = Fragment::new(1, 60);
/// assert_eq!(fragment.len(), 60);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Fragment {
    /// First base of the fragment
    pub start: usize,
    /// Last base of the fragment
    pub end: usize,
}

impl Fragment {
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Number of bases covered
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end + 1 - self.start
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.end < self.start
    }

    /// Same fragment moved `offset` bases downstream
    #[must_use]
    pub const fn shifted(&self, offset: usize) -> Self {
        Self {
            start: self.start + offset,
            end: self.end + offset,
        }
    }
}

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.start, self.end)
    }
}

/// An ordered chain of overlapping fragments covering a whole sequence.
///
/// Consecutive fragments overlap on `[next.start, current.end]`; the
/// partition cost aggregates the risk over those overlap regions with the
/// configured [`Objective`].
#[derive(Debug, Clone, PartialEq)]
pub struct Partition {
    pub fragments: Vec<Fragment>,
    /// Optimal value of the objective
    pub cost: f64,
    pub objective: Objective,
}

impl Partition {
    /// Builds a partition from the start and end coordinate lists.
    ///
    /// # Errors
    ///
    /// Returns [`SynthcutError::InfeasiblePartition`] if the lists differ in
    /// length or are empty.
    pub fn from_bounds(
        starts: &[usize],
        ends: &[usize],
        cost: f64,
        objective: Objective,
    ) -> Result<Self, SynthcutError> {
        if starts.is_empty() || starts.len() != ends.len() {
            return Err(SynthcutError::InfeasiblePartition(format!(
                "mismatched fragment bounds: {} starts, {} ends",
                starts.len(),
                ends.len()
            )));
        }
        let fragments = starts
            .iter()
            .zip(ends)
            .map(|(&start, &end)| Fragment::new(start, end))
            .collect();
        Ok(Self {
            fragments,
            cost,
            objective,
        })
    }

    /// Number of fragments
    #[must_use]
    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    #[must_use]
    pub fn starts(&self) -> Vec<usize> {
        self.fragments.iter().map(|f| f.start).collect()
    }

    #[must_use]
    pub fn ends(&self) -> Vec<usize> {
        self.fragments.iter().map(|f| f.end).collect()
    }

    /// Overlap regions between consecutive fragments, as fragments.
    #[must_use]
    pub fn overlap_regions(&self) -> Vec<Fragment> {
        self.fragments
            .windows(2)
            .map(|pair| Fragment::new(pair[1].start, pair[0].end))
            .collect()
    }

    /// Overlap length between each fragment and the next one.
    #[must_use]
    pub fn overlaps(&self) -> Vec<usize> {
        self.fragments
            .windows(2)
            .map(|pair| (pair[0].end + 1).saturating_sub(pair[1].start))
            .collect()
    }

    /// Recomputes the objective value of this partition over `profile`.
    #[must_use]
    pub fn evaluate_cost(&self, profile: &RiskProfile, objective: Objective) -> f64 {
        self.overlap_regions()
            .iter()
            .rev()
            .fold(objective.identity(), |future, region| {
                objective.combine(profile.range_sum(region.start, region.end), future)
            })
    }

    /// Checks that the partition is a gapless, constraint-respecting cover
    /// of `[1, length]`.
    ///
    /// # Errors
    ///
    /// Returns [`SynthcutError::InfeasiblePartition`] describing the first
    /// violated constraint.
    pub fn validate(
        &self,
        config: &FragmentationConfig,
        length: usize,
    ) -> Result<(), SynthcutError> {
        let violation = |msg: String| Err(SynthcutError::InfeasiblePartition(msg));

        let (Some(first), Some(last)) = (self.fragments.first(), self.fragments.last()) else {
            return violation("partition has no fragments".to_string());
        };
        if first.start != 1 || last.end != length {
            return violation(format!(
                "partition covers [{}, {}] instead of [1, {length}]",
                first.start, last.end
            ));
        }
        if self.len() > config.max_fragments {
            return violation(format!(
                "{} fragments exceed the maximum of {}",
                self.len(),
                config.max_fragments
            ));
        }
        for fragment in &self.fragments {
            if fragment.is_empty()
                || fragment.len() < config.min_length
                || fragment.len() > config.max_length
            {
                return violation(format!(
                    "fragment {fragment} has length outside [{}, {}]",
                    config.min_length, config.max_length
                ));
            }
        }
        for pair in self.fragments.windows(2) {
            let (current, next) = (pair[0], pair[1]);
            if next.start <= current.start || next.start > current.end {
                return violation(format!(
                    "fragments {current} and {next} do not overlap"
                ));
            }
            let overlap = current.end + 1 - next.start;
            if overlap < config.min_overlap || overlap > config.max_overlap {
                return violation(format!(
                    "overlap {overlap} between {current} and {next} is outside [{}, {}]",
                    config.min_overlap, config.max_overlap
                ));
            }
        }
        Ok(())
    }
}

/// One local alignment hit reported by a homology search.
///
/// Query coordinates are 1-indexed and inclusive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlignmentHit {
    pub query_start: usize,
    pub query_end: usize,
    pub score: f64,
}

impl AlignmentHit {
    #[must_use]
    pub const fn new(query_start: usize, query_end: usize, score: f64) -> Self {
        Self {
            query_start,
            query_end,
            score,
        }
    }
}

/// Error types that can occur while profiling or fragmenting a sequence
#[derive(Error, Debug)]
pub enum SynthcutError {
    /// A signal collaborator failed or returned unusable data
    #[error("Signal '{signal}' unavailable: {reason}")]
    SignalUnavailable { signal: SignalKind, reason: String },
    /// Configuration values violate a constraint
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    /// No fragment count admits a valid partition
    #[error("Infeasible partition: {0}")]
    InfeasiblePartition(String),
    /// The run was cancelled through a cancellation token
    #[error("Cancellation requested")]
    CancellationRequested,
    /// Invalid input sequence format or content
    #[error("Invalid sequence: {0}")]
    InvalidSequence(String),
    /// Risk values that are empty, negative or not finite
    #[error("Invalid risk profile: {0}")]
    InvalidRiskProfile(String),
    /// Error parsing input data
    #[error("Parse error: {0}")]
    ParseError(String),
    #[error("Failed to read config file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    /// File I/O operation failed
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl SynthcutError {
    pub(crate) fn unavailable(signal: SignalKind, reason: impl Into<String>) -> Self {
        Self::SignalUnavailable {
            signal,
            reason: reason.into(),
        }
    }
}
