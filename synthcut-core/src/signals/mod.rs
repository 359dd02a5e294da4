//! Synthesis-difficulty signal sources.
//!
//! The risk aggregator never computes alignments, folding energies or
//! duplication strengths itself. It talks to collaborators through the
//! traits in this module and only relies on the shape of what they return:
//! one value per base for windowed signals, a hit list for homology, and
//! per-anchor window profiles for repeats.
//!
//! In-process implementations:
//!
//! - [`WindowedGc`]: rolling GC fraction, computed natively
//! - [`WindowedHairpin`]: adapts any [`HairpinEstimator`] to a per-base track
//! - [`PrecomputedTrack`] / [`PrecomputedHits`] / [`PrecomputedRepeats`]:
//!   values produced by external tools and loaded from files

use std::path::Path;

use crate::config::HomologyConfig;
use crate::sequence::{Sequence, centered_window, read_fasta_sequences, windowed_gc_fraction};
use crate::types::{AlignmentHit, SynthcutError};

pub mod precomputed;

pub use precomputed::{PrecomputedHits, PrecomputedRepeats, PrecomputedTrack};

/// A per-base signal computed over centered windows.
pub trait SignalSource: Send + Sync {
    /// Returns one raw value per base of `sequence`.
    fn compute(&self, sequence: &Sequence, window_size: usize) -> Result<Vec<f64>, SynthcutError>;
}

/// Local alignment search of a sequence against itself and a reference set.
///
/// Implementations must report the self-identity hit first; it is discarded
/// when the hits are painted onto the homology track.
pub trait HomologySearch: Send + Sync {
    fn search(
        &self,
        sequence: &Sequence,
        params: &HomologyConfig,
        reference: &ReferenceDatabase,
    ) -> Result<Vec<AlignmentHit>, SynthcutError>;
}

/// Hairpin free energy (ΔG) of a short window.
pub trait HairpinEstimator: Send + Sync {
    fn free_energy(&self, window: &[u8]) -> Result<f64, SynthcutError>;
}

/// Self-similarity detector.
pub trait RepeatDetector: Send + Sync {
    /// Duplication strength at every base.
    fn duplication_strength(&self, sequence: &Sequence) -> Result<Vec<f64>, SynthcutError>;

    /// Duplication profile of the window anchored at the 1-indexed `anchor`.
    fn window_profile(
        &self,
        sequence: &Sequence,
        anchor: usize,
        window: usize,
    ) -> Result<Vec<f64>, SynthcutError>;
}

/// Backbone sequences searched alongside the query for homology.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceDatabase {
    pub sequences: Vec<(String, Vec<u8>)>,
}

impl ReferenceDatabase {
    /// Loads all records of a FASTA file.
    pub fn from_fasta(path: &Path) -> Result<Self, SynthcutError> {
        let sequences = read_fasta_sequences(path)?
            .into_iter()
            .map(|(id, _, seq)| (id, seq))
            .collect();
        Ok(Self { sequences })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sequences.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sequences.is_empty()
    }
}

/// GC fraction over centered windows.
#[derive(Debug, Clone, Copy, Default)]
pub struct WindowedGc;

impl SignalSource for WindowedGc {
    fn compute(&self, sequence: &Sequence, window_size: usize) -> Result<Vec<f64>, SynthcutError> {
        Ok(windowed_gc_fraction(sequence.as_bytes(), window_size))
    }
}

/// Negated hairpin free energy over centered windows.
///
/// Positions without a full window get 0.
#[derive(Debug, Clone, Default)]
pub struct WindowedHairpin<E> {
    estimator: E,
}

impl<E: HairpinEstimator> WindowedHairpin<E> {
    pub fn new(estimator: E) -> Self {
        Self { estimator }
    }
}

impl<E: HairpinEstimator> SignalSource for WindowedHairpin<E> {
    fn compute(&self, sequence: &Sequence, window_size: usize) -> Result<Vec<f64>, SynthcutError> {
        let bases = sequence.as_bytes();
        (0..bases.len())
            .map(|i| match centered_window(i, bases.len(), window_size) {
                Some(range) => self.estimator.free_energy(&bases[range]).map(|dg| 0.0 - dg),
                None => Ok(0.0),
            })
            .collect()
    }
}

/// The collaborators available to one planner.
///
/// GC is always available; the other signals need a source to be plugged in
/// before they can be enabled.
pub struct SignalSources {
    pub gc: Box<dyn SignalSource>,
    pub homology: Option<Box<dyn HomologySearch>>,
    pub hairpin: Option<Box<dyn SignalSource>>,
    pub repeat: Option<Box<dyn RepeatDetector>>,
    pub reference: ReferenceDatabase,
}

impl Default for SignalSources {
    fn default() -> Self {
        Self {
            gc: Box::new(WindowedGc),
            homology: None,
            hairpin: None,
            repeat: None,
            reference: ReferenceDatabase::default(),
        }
    }
}

impl SignalSources {
    #[must_use]
    pub fn with_homology(mut self, search: impl HomologySearch + 'static) -> Self {
        self.homology = Some(Box::new(search));
        self
    }

    #[must_use]
    pub fn with_hairpin(mut self, source: impl SignalSource + 'static) -> Self {
        self.hairpin = Some(Box::new(source));
        self
    }

    #[must_use]
    pub fn with_repeat(mut self, detector: impl RepeatDetector + 'static) -> Self {
        self.repeat = Some(Box::new(detector));
        self
    }

    #[must_use]
    pub fn with_reference(mut self, reference: ReferenceDatabase) -> Self {
        self.reference = reference;
        self
    }
}

impl std::fmt::Debug for SignalSources {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignalSources")
            .field("homology", &self.homology.is_some())
            .field("hairpin", &self.hairpin.is_some())
            .field("repeat", &self.repeat.is_some())
            .field("reference", &self.reference.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    struct CountingEstimator;

    impl HairpinEstimator for CountingEstimator {
        fn free_energy(&self, window: &[u8]) -> Result<f64, SynthcutError> {
            Ok(-(window.iter().filter(|&&b| b == b'G').count() as f64) * 1000.0)
        }
    }

    #[test]
    fn test_windowed_gc_source() {
        let sequence = Sequence::new(b"GGGGGAAAAA").unwrap();
        let track = WindowedGc.compute(&sequence, 3).unwrap();
        assert_eq!(track.len(), 10);
        assert_eq!(track[0], 0.0);
        assert_eq!(track[1], 1.0);
        assert_eq!(track[9], 0.0);
    }

    #[test]
    fn test_windowed_hairpin_negates_energy() {
        let sequence = Sequence::new(b"GGGAAA").unwrap();
        let source = WindowedHairpin::new(CountingEstimator);
        let track = source.compute(&sequence, 3).unwrap();
        assert_eq!(track, vec![0.0, 3000.0, 2000.0, 1000.0, 0.0, 0.0]);
    }

    #[test]
    fn test_reference_database_from_fasta() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, ">backbone\nACGTACGT\n>adapter\nGGCC\n").unwrap();
        let db = ReferenceDatabase::from_fasta(file.path()).unwrap();
        assert_eq!(db.len(), 2);
        assert_eq!(db.sequences[1], ("adapter".to_string(), b"GGCC".to_vec()));
    }

    #[test]
    fn test_default_sources() {
        let sources = SignalSources::default();
        assert!(sources.homology.is_none());
        assert!(sources.reference.is_empty());
    }
}
