use std::io::Write;

use crate::{SynthcutError, results::FragmentationResults};

/// Write the per-base risk profile and each normalized signal track
pub fn write_track_format<W: Write>(
    writer: &mut W,
    results: &FragmentationResults,
) -> Result<(), SynthcutError> {
    let seqid = &results.sequence_info.header;
    let scored = &results.scored;

    write!(writer, "#seqid\tposition\ttotal")?;
    for track in &scored.tracks {
        write!(writer, "\t{}", track.kind)?;
    }
    writeln!(writer)?;

    for (i, total) in scored.profile.values().iter().enumerate() {
        write!(writer, "{seqid}\t{}\t{total:.4}", i + 1)?;
        for track in &scored.tracks {
            write!(writer, "\t{:.4}", track.normalized[i])?;
        }
        writeln!(writer)?;
    }
    Ok(())
}
