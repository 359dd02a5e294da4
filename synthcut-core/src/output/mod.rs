//! Output formatting for fragmentation results.
//!
//! ## Supported Formats
//!
//! - **TSV**: Fragment table with overlap length and overlap risk
//! - **GFF3**: One `synthesis_fragment` feature per fragment
//! - **BED**: Zero-based half-open fragment intervals
//!
//! Per-base risk tracks are written separately with
//! [`write_profile_tracks`].
//!
//! ## Examples
//!
//! ```rust
//! use synthcut_core::FragmentPlanner;
//! use synthcut_core::config::{OutputFormat, SynthcutConfig};
//! use synthcut_core::output::write_results;
//! use synthcut_core::risk::RiskProfile;
//!
//! let mut config = SynthcutConfig::default();
//! config.fragmentation.min_length = 50;
//! config.fragmentation.max_length = 70;
//! config.fragmentation.min_overlap = 5;
//! config.fragmentation.max_overlap = 10;
//!
//! let planner = FragmentPlanner::new(config);
//! let results = planner.analyze_profile(RiskProfile::new(vec![1.0; 120])?, None)?;
//!
//! let mut buffer = Vec::new();
//! write_results(&mut buffer, &results, OutputFormat::Bed)?;
//! assert_eq!(String::from_utf8_lossy(&buffer).lines().count(), 2);
//! # Ok::<(), synthcut_core::types::SynthcutError>(())
//! ```

use crate::{SynthcutError, config::OutputFormat, results::FragmentationResults};
use std::io::Write;

mod formats {
    pub mod bed;
    pub mod gff;
    pub mod track;
    pub mod tsv;
}

use formats::{
    bed::write_bed_format, gff::write_gff_format, track::write_track_format,
    tsv::write_tsv_format,
};

/// Writes fragmentation results in the specified format.
///
/// # Errors
///
/// Returns [`SynthcutError::IoError`] if writing fails.
pub fn write_results<W: Write>(
    writer: &mut W,
    results: &FragmentationResults,
    format: OutputFormat,
) -> Result<(), SynthcutError> {
    match format {
        OutputFormat::Tsv => write_tsv_format(writer, results),
        OutputFormat::Gff => write_gff_format(writer, results),
        OutputFormat::Bed => write_bed_format(writer, results),
    }
}

/// Writes the summed risk and every normalized signal, one row per base.
///
/// # Errors
///
/// Returns [`SynthcutError::IoError`] if writing fails.
pub fn write_profile_tracks<W: Write>(
    writer: &mut W,
    results: &FragmentationResults,
) -> Result<(), SynthcutError> {
    write_track_format(writer, results)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::config::Objective;
    use crate::results::SequenceInfo;
    use crate::risk::{RiskProfile, ScoredProfile};
    use crate::types::Partition;

    pub(crate) fn create_test_results(objective: Objective) -> FragmentationResults {
        let partition = Partition::from_bounds(&[1, 66], &[70, 120], 5.0, objective).unwrap();
        FragmentationResults {
            sequence_info: SequenceInfo {
                length: 120,
                gc_content: Some(0.5),
                num_fragments: partition.len(),
                header: "test_sequence".to_string(),
                description: Some("Test sequence for unit tests".to_string()),
            },
            partition,
            scored: ScoredProfile::from_profile(RiskProfile::new(vec![1.0; 120]).unwrap()),
        }
    }

    #[test]
    fn test_write_results_dispatch() {
        let results = create_test_results(Objective::Max);
        for (format, marker) in [
            (OutputFormat::Tsv, "#seqid\tfragment"),
            (OutputFormat::Gff, "##gff-version 3"),
            (OutputFormat::Bed, "test_sequence\t0\t70"),
        ] {
            let mut output = Vec::new();
            write_results(&mut output, &results, format).unwrap();
            let text = String::from_utf8(output).unwrap();
            assert!(text.starts_with(marker), "{format:?}: {text}");
        }
    }

    #[test]
    fn test_write_profile_tracks_without_signals() {
        let results = create_test_results(Objective::Max);
        let mut output = Vec::new();
        write_profile_tracks(&mut output, &results).unwrap();

        let text = String::from_utf8(output).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 121);
        assert_eq!(lines[0], "#seqid\tposition\ttotal");
        assert_eq!(lines[120], "test_sequence\t120\t1.0000");
    }
}
