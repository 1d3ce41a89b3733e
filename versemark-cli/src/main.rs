//! Command-line interface for versemark
//! Re-synchronizes highlight word indices with an edited corpus.
//!
//! Usage:
//!   versemark                                  - Rewrite the default highlights file in place
//!   versemark --check                          - Report whether the highlights file is current
//!   versemark --config `<file>` [--output `<file>`]   - Run with a project configuration

mod settings;

use anyhow::{Context, Result};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use settings::Overrides;
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::EnvFilter;
use versemark_core::{SyncJob, SyncOutcome, MAQAF};

fn cli() -> Command {
    Command::new("versemark")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Recompute highlight word indices against the current corpus")
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("Configuration file layered over the built-in defaults")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("root")
                .long("root")
                .help("Directory that relative configuration paths resolve against")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("corpus")
                .long("corpus")
                .help("Corpus text file")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("highlights")
                .long("highlights")
                .help("Highlights JSON file to rewrite")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("output")
                .long("output")
                .short('o')
                .help("Write the result here instead of overwriting the highlights file")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("indent")
                .long("indent")
                .help("Spaces per indentation level in the written JSON")
                .value_parser(value_parser!(usize)),
        )
        .arg(
            Arg::new("check")
                .long("check")
                .help("Compute only; exit with status 1 if a rewrite would change the file, formatting included")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log each dropped word and a run summary to stderr")
                .action(ArgAction::SetTrue),
        )
}

fn main() -> Result<()> {
    let matches = cli().get_matches();

    init_logging(matches.get_flag("verbose"));

    let overrides = overrides_from(&matches);
    let base = settings::base_dir(overrides.root.as_deref(), overrides.config_file.as_deref())?;
    let config = settings::load_config(&overrides, &base)?;
    let job = settings::build_job(&config, &overrides, &base);
    debug!(
        corpus = %job.corpus_path().display(),
        highlights = %job.highlights_path().display(),
        output = %job.output_path().display(),
        "resolved paths"
    );

    if matches.get_flag("check") {
        handle_check_command(&job)
    } else {
        handle_sync_command(&job)
    }
}

/// `RUST_LOG` wins; otherwise warnings only, or debug with `--verbose`.
fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("warn")
        }
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn overrides_from(matches: &ArgMatches) -> Overrides {
    let path = |id: &str| matches.get_one::<PathBuf>(id).cloned();
    Overrides {
        config_file: path("config"),
        root: path("root"),
        corpus: path("corpus"),
        highlights: path("highlights"),
        output: path("output"),
        indent: matches.get_one::<usize>("indent").copied(),
    }
}

/// Handle the default rewrite
fn handle_sync_command(job: &SyncJob) -> Result<()> {
    let outcome = job.run().with_context(|| {
        format!(
            "Failed to update {}",
            display_name(job.highlights_path())
        )
    })?;

    println!(
        "Updated {} indices based on {} word splitting.",
        display_name(&outcome.output),
        splitting_label(job)
    );
    Ok(())
}

/// Handle --check
fn handle_check_command(job: &SyncJob) -> Result<()> {
    let outcome = job.check().with_context(|| {
        format!(
            "Failed to check {}",
            display_name(job.highlights_path())
        )
    })?;

    if outcome.in_sync {
        println!("{} is up to date.", display_name(job.highlights_path()));
        return Ok(());
    }

    println!("{}", summarize(job, &outcome));
    std::process::exit(1);
}

fn summarize(job: &SyncJob, outcome: &SyncOutcome) -> String {
    let report = &outcome.report;
    if !report.is_changed() {
        return format!(
            "{} is out of date: indices are current but the formatting differs.",
            display_name(job.highlights_path())
        );
    }
    let mut lines = vec![format!(
        "{} is out of date: {} relocated, {} dropped.",
        display_name(job.highlights_path()),
        report.relocated(),
        report.dropped()
    )];
    for (position, group) in report.groups.iter().enumerate() {
        if group.dropped.is_empty() {
            continue;
        }
        let label = group
            .label
            .clone()
            .unwrap_or_else(|| format!("group {}", position + 1));
        lines.push(format!("  {}: drops {}", label, group.dropped.join(", ")));
    }
    lines.join("\n")
}

fn splitting_label(job: &SyncJob) -> &'static str {
    if job.tokenizer().delimiters().contains(&MAQAF) {
        "maqaf-aware"
    } else {
        "whitespace"
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
