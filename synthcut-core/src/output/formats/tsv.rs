use std::io::Write;

use crate::{SynthcutError, results::FragmentationResults};

/// Write a fragment table with one row per fragment and a cost trailer
pub fn write_tsv_format<W: Write>(
    writer: &mut W,
    results: &FragmentationResults,
) -> Result<(), SynthcutError> {
    let seqid = &results.sequence_info.header;
    let partition = &results.partition;
    let overlaps = partition.overlaps();
    let risks = results.overlap_risks();

    writeln!(
        writer,
        "#seqid\tfragment\tstart\tend\tlength\toverlap_next\toverlap_risk"
    )?;
    for (i, fragment) in partition.fragments.iter().enumerate() {
        match (overlaps.get(i), risks.get(i)) {
            (Some(overlap), Some(risk)) => writeln!(
                writer,
                "{seqid}\t{}\t{}\t{}\t{}\t{overlap}\t{risk:.4}",
                i + 1,
                fragment.start,
                fragment.end,
                fragment.len()
            )?,
            _ => writeln!(
                writer,
                "{seqid}\t{}\t{}\t{}\t{}\t.\t.",
                i + 1,
                fragment.start,
                fragment.end,
                fragment.len()
            )?,
        }
    }
    writeln!(
        writer,
        "# cost={:.4} fragments={} objective={}",
        partition.cost,
        partition.len(),
        partition.objective
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Objective;
    use crate::output::tests::create_test_results;

    #[test]
    fn test_write_tsv_format() {
        let results = create_test_results(Objective::Max);
        let mut output = Vec::new();
        write_tsv_format(&mut output, &results).unwrap();

        let text = String::from_utf8(output).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[1], "test_sequence\t1\t1\t70\t70\t5\t5.0000");
        assert_eq!(lines[2], "test_sequence\t2\t66\t120\t55\t.\t.");
        assert_eq!(lines[3], "# cost=5.0000 fragments=2 objective=max");
    }
}
