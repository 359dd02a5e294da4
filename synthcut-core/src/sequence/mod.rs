//! Nucleotide sequence handling.
//!
//! ## Modules
//!
//! - [`io`]: FASTA file reading and parsing
//! - [`processing`]: Centered sliding windows and windowed GC fractions
//!
//! ## Examples
//!
//! ```rust
//! use synthcut_core::sequence::Sequence;
//!
//! let sequence = Sequence::new(b"atgcGGCC")?;
//! assert_eq!(sequence.as_bytes(), b"ATGCGGCC");
//! assert_eq!(sequence.gc_content(), 0.75);
//! # Ok::<(), synthcut_core::types::SynthcutError>(())
//! ```

use bio::alphabets::dna;
use bio::seq_analysis::gc::gc_content;

use crate::types::SynthcutError;

pub mod io;
pub mod processing;

pub use io::{FastaRecord, read_fasta_sequences};
pub use processing::{centered_window, windowed_gc_fraction};

/// An immutable, upper-cased DNA sequence over `{A, C, G, T}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Sequence {
    bases: Vec<u8>,
}

impl Sequence {
    /// Upper-cases and validates raw sequence bytes.
    ///
    /// # Errors
    ///
    /// Returns [`SynthcutError::InvalidSequence`] if the sequence is empty or
    /// contains a symbol outside `{A, C, G, T}` (ambiguity codes included).
    pub fn new(raw: &[u8]) -> Result<Self, SynthcutError> {
        if raw.is_empty() {
            return Err(SynthcutError::InvalidSequence(
                "sequence is empty".to_string(),
            ));
        }

        let bases = raw.to_ascii_uppercase();
        if !dna::alphabet().is_word(&bases) {
            let (position, symbol) = bases
                .iter()
                .enumerate()
                .find(|&(_, b)| !matches!(b, b'A' | b'C' | b'G' | b'T'))
                .map(|(i, &b)| (i + 1, b as char))
                .unwrap_or((0, '?'));
            return Err(SynthcutError::InvalidSequence(format!(
                "unexpected symbol '{symbol}' at position {position}"
            )));
        }

        Ok(Self { bases })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bases.len()
    }

    /// Always `false`; construction rejects empty input.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bases.is_empty()
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bases
    }

    /// Overall GC fraction of the sequence
    #[must_use]
    pub fn gc_content(&self) -> f64 {
        f64::from(gc_content(&self.bases))
    }

    /// Bases covered by a 1-indexed inclusive interval, clamped to the sequence.
    #[must_use]
    pub fn slice(&self, start: usize, end: usize) -> &[u8] {
        let lo = start.saturating_sub(1).min(self.bases.len());
        let hi = end.min(self.bases.len()).max(lo);
        &self.bases[lo..hi]
    }
}

impl std::str::FromStr for Sequence {
    type Err = SynthcutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.as_bytes())
    }
}

impl AsRef<[u8]> for Sequence {
    fn as_ref(&self) -> &[u8] {
        &self.bases
    }
}
