use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use rayon::ThreadPoolBuilder;
use tracing::{error, warn};

use crate::output::{process_file, FileReport, ProcessError};
use crate::splitter::SplitOptions;

#[derive(Debug)]
pub struct FileOutcome {
    pub input: PathBuf,
    pub result: Result<FileReport, ProcessError>,
}

fn has_mid_extension(path: &Path) -> bool {
    path.file_name()
        .map(|name| name.to_string_lossy().ends_with(".mid"))
        .unwrap_or(false)
}

/// Directories contribute their direct `*.mid` children, sorted by path.
pub fn expand_inputs<P: AsRef<Path>>(inputs: &[P]) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for input in inputs {
        let input = input.as_ref();
        if input.is_dir() {
            let entries = match fs::read_dir(input) {
                Ok(entries) => entries,
                Err(e) => {
                    warn!("Could not read directory {}: {}", input.display(), e);
                    continue;
                }
            };
            let mut children: Vec<PathBuf> = entries
                .filter_map(|entry| entry.ok().map(|e| e.path()))
                .filter(|path| path.is_file() && has_mid_extension(path))
                .collect();
            children.sort();
            files.extend(children);
        } else if input.is_file() && has_mid_extension(input) {
            files.push(input.to_path_buf());
        } else {
            warn!("Skipping {}: not a .mid file or directory", input.display());
        }
    }
    files
}

/// Process every file on a pool of `jobs` worker threads.
/// `on_done` runs once per file as it finishes, from the worker thread.
pub fn run_batch<F>(
    files: &[PathBuf],
    output_root: &Path,
    options: SplitOptions,
    jobs: usize,
    on_done: F,
) -> Result<Vec<FileOutcome>, rayon::ThreadPoolBuildError>
where
    F: Fn(&FileOutcome) + Sync,
{
    let pool = ThreadPoolBuilder::new().num_threads(jobs).build()?;
    let outcomes: Vec<FileOutcome> = pool.install(|| {
        files
            .par_iter()
            .map(|input| {
                let outcome = FileOutcome {
                    input: input.clone(),
                    result: process_file(input, output_root, options),
                };
                if let Err(e) = &outcome.result {
                    error!("{}", e);
                }
                on_done(&outcome);
                outcome
            })
            .collect()
    });
    Ok(outcomes)
}
