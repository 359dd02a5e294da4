use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use bio::io::fasta;

use crate::types::SynthcutError;

/// Identifier, optional description and raw bases of one FASTA record
pub type FastaRecord = (String, Option<String>, Vec<u8>);

/// Read all records of a FASTA file using rust-bio
pub fn read_fasta_sequences(path: &Path) -> Result<Vec<FastaRecord>, SynthcutError> {
    let file = File::open(path)?;
    let reader = fasta::Reader::new(file);
    let mut sequences = Vec::new();

    for result in reader.records() {
        let record = result.map_err(|e| SynthcutError::ParseError(e.to_string()))?;
        let id = record.id().to_string();
        let description = record.desc().map(String::from);
        let seq = record.seq().to_vec();
        sequences.push((id, description, seq));
    }

    Ok(sequences)
}

/// Reads one numeric value per line.
///
/// Blank lines and lines starting with `#` are skipped. When a line holds
/// several comma- or tab-separated fields, only the first one is used, so
/// single-column CSV exports load unchanged.
pub fn read_score_values(path: &Path) -> Result<Vec<f64>, SynthcutError> {
    let reader = BufReader::new(File::open(path)?);
    let mut values = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let field = trimmed
            .split([',', '\t'])
            .next()
            .unwrap_or(trimmed)
            .trim();
        let value = field.parse::<f64>().map_err(|e| {
            SynthcutError::ParseError(format!(
                "{}:{}: invalid score '{field}': {e}",
                path.display(),
                index + 1
            ))
        })?;
        values.push(value);
    }

    Ok(values)
}
