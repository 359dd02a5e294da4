use std::io::Write;

use bio::bio_types::strand::Strand;

use crate::{SynthcutError, constants::VERSION, results::FragmentationResults};

/// Write results in GFF format
pub fn write_gff_format<W: Write>(
    writer: &mut W,
    results: &FragmentationResults,
) -> Result<(), SynthcutError> {
    let info = &results.sequence_info;
    let partition = &results.partition;

    writeln!(writer, "##gff-version 3")?;
    writeln!(writer, "##sequence-region {} 1 {}", info.header, info.length)?;
    let gc = info
        .gc_content
        .map_or_else(|| ".".to_string(), |gc| format!("{:.2}", gc * 100.0));
    match &info.description {
        Some(desc) => writeln!(
            writer,
            "# Sequence Data: seqlen={};seqhdr=\"{} {}\";gc_cont={gc}",
            info.length, info.header, desc
        )?,
        None => writeln!(
            writer,
            "# Sequence Data: seqlen={};seqhdr=\"{}\";gc_cont={gc}",
            info.length, info.header
        )?,
    }
    writeln!(
        writer,
        "# Plan Data: version=synthcut.v{VERSION};objective={};cost={:.4};fragments={}",
        partition.objective,
        partition.cost,
        partition.len()
    )?;

    // synthesis fragments are always ordered on the forward strand
    let strand_char = Strand::Forward.strand_symbol();
    let overlaps = partition.overlaps();
    for (i, fragment) in partition.fragments.iter().enumerate() {
        writeln!(
            writer,
            "{}\tsynthcut_v{VERSION}\tsynthesis_fragment\t{}\t{}\t.\t{strand_char}\t.\tID={}_frag{};overlap_next={}",
            info.header,
            fragment.start,
            fragment.end,
            info.header,
            i + 1,
            overlaps.get(i).map_or_else(|| ".".to_string(), usize::to_string)
        )?;
    }
    Ok(())
}
