use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::warn;
use tracing_subscriber::EnvFilter;

use midi_splitter::{expand_inputs, run_batch, SplitOptions};

#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// MIDI files or directories of MIDI files to split
    #[arg(required = true)]
    input: Vec<PathBuf>,

    /// Output directory for the split MIDI files
    #[arg(short, long, alias = "output_path")]
    output_path: PathBuf,

    /// Duplicate the first track onto all tracks
    #[arg(short, long)]
    duplicate_first_track: bool,

    /// Name output files after the track names
    #[arg(short, long)]
    track_names: bool,

    /// Add instrument names to output file names
    #[arg(short, long)]
    instrument_names: bool,

    /// Remove tracks that do not contain note or control-change events
    #[arg(short, long)]
    remove_empty_tracks: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Number of files to process in parallel (default: number of CPUs)
    #[arg(short, long)]
    jobs: Option<usize>,
}

impl From<&Args> for SplitOptions {
    fn from(args: &Args) -> Self {
        SplitOptions {
            duplicate_first_track: args.duplicate_first_track,
            filter_by_names: args.track_names,
            filter_by_instrument: args.instrument_names,
            remove_empty_tracks: args.remove_empty_tracks,
        }
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

// Verbose log lines share stderr with the bar, so the bar stays hidden then.
fn progress_bar(len: u64, verbose: bool) -> Result<ProgressBar> {
    if verbose {
        return Ok(ProgressBar::hidden());
    }
    let progress = ProgressBar::new(len);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{msg} [{bar:40}] {pos}/{len} ({elapsed})")
            .context("progress bar template")?
            .progress_chars("=> "),
    );
    progress.set_message("Processing MIDI files");
    Ok(progress)
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let files = expand_inputs(&args.input);
    if files.is_empty() {
        warn!("No MIDI files found in the given inputs");
        return Ok(());
    }

    fs::create_dir_all(&args.output_path)
        .with_context(|| format!("create output directory {}", args.output_path.display()))?;

    let progress = progress_bar(files.len() as u64, args.verbose)?;

    let outcomes = run_batch(
        &files,
        &args.output_path,
        SplitOptions::from(&args),
        args.jobs.unwrap_or(0),
        |_| progress.inc(1),
    )
    .context("start worker pool")?;
    progress.finish();

    let mut tracks = 0;
    let mut failed_files = 0;
    let mut failed_tracks = 0;
    for outcome in &outcomes {
        match &outcome.result {
            Ok(report) => {
                tracks += report.written.len();
                failed_tracks += report.failures.len();
            }
            Err(_) => failed_files += 1,
        }
    }

    println!(
        "Split {} of {} files into {} tracks",
        outcomes.len() - failed_files,
        outcomes.len(),
        tracks
    );
    if failed_files > 0 || failed_tracks > 0 {
        bail!("{failed_files} files failed, {failed_tracks} tracks could not be written");
    }

    Ok(())
}
