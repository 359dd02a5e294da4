//! # Synthcut CLI - Synthesis Fragment Planner
//!
//! A command-line interface for cutting DNA sequences into overlapping
//! synthesis fragments placed where synthesis risk is lowest.
//!
//! ## Usage
//!
//! ```bash
//! # Plan fragments for every record of a FASTA file
//! synthcut -i construct.fasta -o fragments.tsv
//!
//! # Output in GFF format with a configuration file
//! synthcut -i construct.fasta -c synthcut.toml -f gff -o fragments.gff
//!
//! # Cut a precomputed per-base risk profile directly
//! synthcut --scores risk.csv --min-length 1000 --max-length 1744
//!
//! # Add homology hits from an external search and dump the risk tracks
//! synthcut -i construct.fasta -s gc,homology --homology-hits hits.tsv --profile-out risk.tsv
//! ```
//!
//! ## Options
//!
//! - `-i, --input <FILE>`: Input FASTA file
//! - `--scores <FILE>`: Precomputed risk scores, one per line
//! - `-o, --output <FILE>`: Output file (default: stdout)
//! - `-f, --format <FORMAT>`: Output format: tsv, gff, bed (default: tsv)
//! - `-c, --config <FILE>`: TOML configuration file
//! - `-s, --signals <LIST>`: Enabled signals, comma separated
//! - `-j, --threads <N>`: Worker threads for multi-record input
//! - `-q, --quiet`: Only log warnings and errors
//!
//! Command-line values override the configuration file.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Arg, ArgAction, ArgGroup, ArgMatches, Command, value_parser};
use tracing::{Level, info, warn};
use tracing_subscriber::FmtSubscriber;

use synthcut_core::config::{Objective, OutputFormat, SignalKind, SynthcutConfig};
use synthcut_core::output::{write_profile_tracks, write_results};
use synthcut_core::results::{BatchEntry, FragmentationResults};
use synthcut_core::risk::RiskProfile;
use synthcut_core::sequence::io::read_score_values;
use synthcut_core::sequence::read_fasta_sequences;
use synthcut_core::signals::{PrecomputedHits, PrecomputedRepeats, PrecomputedTrack, SignalSources};
use synthcut_core::FragmentPlanner;

fn cli() -> Command {
    Command::new("synthcut")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Plan overlapping DNA synthesis fragments with minimal junction risk")
        .arg(
            Arg::new("input")
                .short('i')
                .long("input")
                .value_name("FILE")
                .value_parser(value_parser!(PathBuf))
                .help("Input FASTA file"),
        )
        .arg(
            Arg::new("scores")
                .long("scores")
                .value_name("FILE")
                .value_parser(value_parser!(PathBuf))
                .help("Precomputed per-base risk scores, one value per line"),
        )
        .group(
            ArgGroup::new("source")
                .args(["input", "scores"])
                .required(true),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("FILE")
                .value_parser(value_parser!(PathBuf))
                .help("Output file (default: stdout)"),
        )
        .arg(
            Arg::new("format")
                .short('f')
                .long("format")
                .value_name("FORMAT")
                .value_parser(["tsv", "gff", "bed"])
                .help("Output format: tsv, gff, bed [default: tsv]"),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .value_parser(value_parser!(PathBuf))
                .help("TOML configuration file"),
        )
        .arg(
            Arg::new("signals")
                .short('s')
                .long("signals")
                .value_name("LIST")
                .value_delimiter(',')
                .help("Enabled signals: gc, homology, hairpin, repeat"),
        )
        .arg(
            Arg::new("homology-hits")
                .long("homology-hits")
                .value_name("FILE")
                .value_parser(value_parser!(PathBuf))
                .help("Alignment hits (start end score, or BLAST tabular), self hit first"),
        )
        .arg(
            Arg::new("hairpin-track")
                .long("hairpin-track")
                .value_name("FILE")
                .value_parser(value_parser!(PathBuf))
                .help("Per-base negated hairpin free energy, one value per line"),
        )
        .arg(
            Arg::new("repeat-track")
                .long("repeat-track")
                .value_name("FILE")
                .value_parser(value_parser!(PathBuf))
                .help("Per-base duplication strength, with a tab and the comma-separated window profile on anchor lines"),
        )
        .arg(length_arg("min-length", "Minimum fragment length"))
        .arg(length_arg("max-length", "Maximum fragment length"))
        .arg(length_arg("min-overlap", "Minimum overlap between fragments"))
        .arg(length_arg("max-overlap", "Maximum overlap between fragments"))
        .arg(length_arg("max-fragments", "Maximum number of fragments"))
        .arg(length_arg(
            "chunk-cap",
            "Length above which sequences are cut chunk by chunk",
        ))
        .arg(
            Arg::new("objective")
                .long("objective")
                .value_name("OBJECTIVE")
                .value_parser(["sum", "max"])
                .help("Minimize the sum or the maximum of overlap risks"),
        )
        .arg(
            Arg::new("profile-out")
                .long("profile-out")
                .value_name("FILE")
                .value_parser(value_parser!(PathBuf))
                .help("Write per-base risk tracks to this file"),
        )
        .arg(
            Arg::new("threads")
                .short('j')
                .long("threads")
                .value_name("N")
                .value_parser(value_parser!(usize))
                .help("Worker threads for multi-record input (default: all cores)"),
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .action(ArgAction::SetTrue)
                .help("Quiet mode"),
        )
}

/// Inputs precomputed for one sequence, which cannot be shared by a batch.
const PER_SEQUENCE_INPUTS: [&str; 3] = ["homology-hits", "hairpin-track", "repeat-track"];

fn length_arg(name: &'static str, help: &'static str) -> Arg {
    Arg::new(name)
        .long(name)
        .value_name("N")
        .value_parser(value_parser!(usize))
        .help(help)
}

fn setup_logging(quiet: bool) -> Result<()> {
    let level = if quiet { Level::WARN } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(io::stderr)
        .compact()
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("Failed to set subscriber")
}

/// Layers command-line overrides on top of the loaded configuration.
fn build_config(matches: &ArgMatches) -> Result<SynthcutConfig> {
    let mut config = match matches.get_one::<PathBuf>("config") {
        Some(path) => SynthcutConfig::from_file(path)?,
        None => SynthcutConfig::default(),
    };

    let fragmentation = &mut config.fragmentation;
    for (name, field) in [
        ("min-length", &mut fragmentation.min_length),
        ("max-length", &mut fragmentation.max_length),
        ("min-overlap", &mut fragmentation.min_overlap),
        ("max-overlap", &mut fragmentation.max_overlap),
        ("max-fragments", &mut fragmentation.max_fragments),
        ("chunk-cap", &mut fragmentation.chunk_cap),
    ] {
        if let Some(value) = matches.get_one::<usize>(name) {
            *field = *value;
        }
    }
    if let Some(objective) = matches.get_one::<String>("objective") {
        fragmentation.objective = objective.parse::<Objective>()?;
    }

    if let Some(signals) = matches.get_many::<String>("signals") {
        config.scoring.signals = signals
            .map(|s| s.parse::<SignalKind>())
            .collect::<Result<_, _>>()?;
    }

    if let Some(format) = matches.get_one::<String>("format") {
        config.output_format = match format.as_str() {
            "gff" => OutputFormat::Gff,
            "bed" => OutputFormat::Bed,
            _ => OutputFormat::Tsv,
        };
    }
    if let Some(threads) = matches.get_one::<usize>("threads") {
        config.num_threads = Some(*threads);
    }
    config.quiet |= matches.get_flag("quiet");

    config.validate()?;
    Ok(config)
}

fn build_sources(matches: &ArgMatches) -> Result<SignalSources> {
    let mut sources = SignalSources::default();

    if let Some(path) = matches.get_one::<PathBuf>("homology-hits") {
        let hits = PrecomputedHits::from_file(path)
            .with_context(|| format!("Failed to load homology hits from {}", path.display()))?;
        sources = sources.with_homology(hits);
    }
    if let Some(path) = matches.get_one::<PathBuf>("hairpin-track") {
        let track = PrecomputedTrack::from_file(path)
            .with_context(|| format!("Failed to load hairpin track from {}", path.display()))?;
        sources = sources.with_hairpin(track);
    }
    if let Some(path) = matches.get_one::<PathBuf>("repeat-track") {
        let repeats = PrecomputedRepeats::from_file(path)
            .with_context(|| format!("Failed to load repeat track from {}", path.display()))?;
        sources = sources.with_repeat(repeats);
    }

    Ok(sources)
}

fn analyze_scores(planner: &FragmentPlanner, path: &Path) -> Result<Vec<BatchEntry>> {
    let values = read_score_values(path)
        .with_context(|| format!("Failed to read scores from {}", path.display()))?;
    let header = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "scores".to_string());

    let outcome = RiskProfile::new(values)
        .and_then(|profile| planner.analyze_profile(profile, Some(header.clone())));
    if let Err(e) = &outcome {
        warn!(record = %header, error = %e, "record skipped");
    }
    Ok(vec![BatchEntry { header, outcome }])
}

fn open_output(path: Option<&PathBuf>) -> Result<Box<dyn Write>> {
    Ok(match path {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("Failed to create {}", path.display()))?,
        )),
        None => Box::new(BufWriter::new(io::stdout())),
    })
}

/// Main entry point for the synthcut CLI application.
///
/// Parses command-line arguments, builds the configuration and signal
/// sources, plans fragments for every input record, and writes results in
/// the requested format. Exits with an error if any record failed.
fn main() -> Result<()> {
    let matches = cli().get_matches();
    let config = build_config(&matches)?;
    setup_logging(config.quiet)?;

    let sources = build_sources(&matches)?;
    let output_format = config.output_format;
    let planner = FragmentPlanner::with_sources(config, sources);

    let entries = if let Some(path) = matches.get_one::<PathBuf>("scores") {
        analyze_scores(&planner, path)?
    } else if let Some(path) = matches.get_one::<PathBuf>("input") {
        let records = read_fasta_sequences(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        if records.len() > 1 {
            if let Some(flag) = PER_SEQUENCE_INPUTS.iter().find(|id| matches.contains_id(id)) {
                bail!(
                    "--{flag} describes a single sequence but {} holds {} records",
                    path.display(),
                    records.len()
                );
            }
        }
        info!(path = %path.display(), records = records.len(), "loaded FASTA records");
        planner
            .analyze_records(records)
            .with_context(|| format!("Failed to analyze {}", path.display()))?
    } else {
        bail!("either --input or --scores is required");
    };

    let successes: Vec<&FragmentationResults> =
        entries.iter().filter_map(|e| e.outcome.as_ref().ok()).collect();

    let mut writer = open_output(matches.get_one::<PathBuf>("output"))?;
    for results in &successes {
        write_results(&mut writer, results, output_format)?;
    }
    writer.flush()?;

    if let Some(path) = matches.get_one::<PathBuf>("profile-out") {
        let mut tracks = open_output(Some(path))?;
        for results in &successes {
            write_profile_tracks(&mut tracks, results)?;
        }
        tracks.flush()?;
    }

    let failed = entries.len() - successes.len();
    info!(
        records = entries.len(),
        fragments = successes.iter().map(|r| r.partition.len()).sum::<usize>(),
        failed,
        "planning complete"
    );
    if failed > 0 {
        for entry in entries.iter() {
            if let Err(e) = &entry.outcome {
                eprintln!("{}: {e}", entry.header);
            }
        }
        bail!("{failed} of {} records failed", entries.len());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli() {
        cli().debug_assert();
    }

    #[test]
    fn test_overrides_apply() {
        let matches = cli().get_matches_from([
            "synthcut",
            "--scores",
            "risk.csv",
            "--min-length",
            "50",
            "--max-length",
            "70",
            "--min-overlap",
            "5",
            "--max-overlap",
            "10",
            "--objective",
            "sum",
            "-s",
            "gc,hairpin",
            "-f",
            "bed",
        ]);
        let config = build_config(&matches).unwrap();
        assert_eq!(config.fragmentation.min_length, 50);
        assert_eq!(config.fragmentation.max_overlap, 10);
        assert_eq!(config.fragmentation.objective, Objective::Sum);
        assert_eq!(config.output_format, OutputFormat::Bed);
        assert!(config.scoring.is_enabled(SignalKind::Hairpin));
        assert!(!config.scoring.is_enabled(SignalKind::Homology));
    }

    #[test]
    fn test_invalid_override_rejected() {
        let matches = cli().get_matches_from([
            "synthcut",
            "--scores",
            "risk.csv",
            "--min-length",
            "10",
            "--max-length",
            "20",
            "--max-overlap",
            "15",
            "--min-overlap",
            "5",
        ]);
        assert!(build_config(&matches).is_err());
    }

    #[test]
    fn test_quiet_from_flag_or_config_file() {
        let matches = cli().get_matches_from(["synthcut", "--scores", "risk.csv", "-q"]);
        assert!(build_config(&matches).unwrap().quiet);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quiet.toml");
        std::fs::write(&path, "quiet = true\n").unwrap();
        let matches = cli().get_matches_from([
            "synthcut",
            "--scores",
            "risk.csv",
            "-c",
            path.to_str().unwrap(),
        ]);
        assert!(build_config(&matches).unwrap().quiet);
    }

    #[test]
    fn test_repeat_track_accepted() {
        let matches = cli().get_matches_from([
            "synthcut",
            "-i",
            "in.fa",
            "-s",
            "repeat",
            "--repeat-track",
            "repeats.tsv",
        ]);
        assert_eq!(
            matches.get_one::<PathBuf>("repeat-track"),
            Some(&PathBuf::from("repeats.tsv"))
        );
        assert!(
            cli()
                .try_get_matches_from(["synthcut", "-i", "in.fa", "--reference", "backbone.fa"])
                .is_err()
        );
    }

    #[test]
    fn test_input_or_scores_required() {
        assert!(cli().try_get_matches_from(["synthcut"]).is_err());
        assert!(
            cli()
                .try_get_matches_from(["synthcut", "-i", "a.fa", "--scores", "b.csv"])
                .is_err()
        );
    }
}
