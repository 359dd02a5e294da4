//! Per-base risk profiles.
//!
//! Every enabled signal is turned into a [`SignalTrack`] holding its raw and
//! normalized values; the normalized values of all tracks are summed into a
//! single [`RiskProfile`], the input of the segmentation solver.
//!
//! ## Modules
//!
//! - [`normalize`]: Per-signal conversion to the common risk scale
//! - [`painting`]: Building raw homology and repeat tracks from collaborator output
//! - [`aggregator`]: [`RiskProfileAggregator`], which drives the signal sources

use crate::config::SignalKind;
use crate::types::SynthcutError;

pub mod aggregator;
pub mod normalize;
pub mod painting;

pub use aggregator::RiskProfileAggregator;

/// Non-negative per-base risk values.
///
/// Positions are 1-indexed in every method taking coordinates.
///
/// # Examples
///
/// ```rust
/// use synthcut_core::risk::RiskProfile;
///
/// let profile = RiskProfile::new(vec![1.0, 0.0, 2.5, 0.5])?;
/// assert_eq!(profile.len(), 4);
/// assert_eq!(profile.range_sum(2, 3), 2.5);
/// # Ok::<(), synthcut_core::types::SynthcutError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RiskProfile {
    values: Vec<f64>,
}

impl RiskProfile {
    /// Creates a profile from raw values.
    ///
    /// # Errors
    ///
    /// Returns [`SynthcutError::InvalidRiskProfile`] if `values` is empty or
    /// holds a negative or non-finite entry.
    pub fn new(values: Vec<f64>) -> Result<Self, SynthcutError> {
        if values.is_empty() {
            return Err(SynthcutError::InvalidRiskProfile(
                "profile is empty".to_string(),
            ));
        }
        if let Some((i, v)) = values
            .iter()
            .enumerate()
            .find(|(_, v)| !v.is_finite() || **v < 0.0)
        {
            return Err(SynthcutError::InvalidRiskProfile(format!(
                "value {v} at position {} is not a finite non-negative number",
                i + 1
            )));
        }

        Ok(Self { values })
    }

    /// All-zero profile of the given length
    pub fn zeros(length: usize) -> Result<Self, SynthcutError> {
        Self::new(vec![0.0; length])
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Sum of the risk over `[start, end]`, clamped to the profile.
    ///
    /// Returns 0 for an empty or out-of-range interval. The slice is summed
    /// left to right, so intervals with equal contents have bit-identical
    /// sums wherever they lie.
    #[must_use]
    pub fn range_sum(&self, start: usize, end: usize) -> f64 {
        let lo = start.max(1);
        let hi = end.min(self.values.len());
        if lo > hi {
            return 0.0;
        }
        self.values[lo - 1..hi].iter().sum()
    }

    /// Sub-profile covering `[start, end]`, renumbered from 1.
    pub fn slice(&self, start: usize, end: usize) -> Result<Self, SynthcutError> {
        let lo = start.max(1);
        let hi = end.min(self.values.len());
        if lo > hi {
            return Err(SynthcutError::InvalidRiskProfile(format!(
                "slice [{start}, {end}] is outside a profile of length {}",
                self.values.len()
            )));
        }
        Self::new(self.values[lo - 1..hi].to_vec())
    }
}

/// Raw and normalized values of one enabled signal.
#[derive(Debug, Clone, PartialEq)]
pub struct SignalTrack {
    pub kind: SignalKind,
    pub raw: Vec<f64>,
    pub normalized: Vec<f64>,
}

/// The enabled signal tracks together with their summed profile.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredProfile {
    /// Tracks in aggregation order
    pub tracks: Vec<SignalTrack>,
    pub profile: RiskProfile,
}

impl ScoredProfile {
    /// Wraps a profile that was not built from individual signals.
    #[must_use]
    pub fn from_profile(profile: RiskProfile) -> Self {
        Self {
            tracks: Vec::new(),
            profile,
        }
    }

    #[must_use]
    pub fn track(&self, kind: SignalKind) -> Option<&SignalTrack> {
        self.tracks.iter().find(|t| t.kind == kind)
    }
}
