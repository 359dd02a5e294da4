use std::io::Write;

use crate::{SynthcutError, results::FragmentationResults};

/// Write fragments as BED6 (0-based, half-open)
pub fn write_bed_format<W: Write>(
    writer: &mut W,
    results: &FragmentationResults,
) -> Result<(), SynthcutError> {
    let seqid = &results.sequence_info.header;
    for (i, fragment) in results.partition.fragments.iter().enumerate() {
        writeln!(
            writer,
            "{seqid}\t{}\t{}\t{seqid}_frag{}\t0\t+",
            fragment.start - 1,
            fragment.end,
            i + 1
        )?;
    }
    Ok(())
}
