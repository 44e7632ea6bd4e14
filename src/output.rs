use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::formatter::{resolve_collision, sanitize};
use crate::smf::{DecodeError, EncodeError, MidiDocument};
use crate::splitter::{SplitOptions, Splitter, TrackReport};

#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("could not read {path}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("could not decode {path}: {source}")]
    Decode { path: PathBuf, source: DecodeError },
    #[error("could not create output directory {path}: {source}")]
    CreateDir { path: PathBuf, source: io::Error },
}

#[derive(Debug, Error)]
pub enum WriteError {
    #[error("encoding failed: {0}")]
    Encode(#[from] EncodeError),
    #[error("write failed: {0}")]
    Io(#[from] io::Error),
}

#[derive(Debug)]
pub struct WrittenTrack {
    pub path: PathBuf,
    pub report: TrackReport,
}

#[derive(Debug)]
pub struct WriteFailure {
    pub path: PathBuf,
    pub report: TrackReport,
    pub error: WriteError,
}

#[derive(Debug)]
pub struct FileReport {
    pub input: PathBuf,
    pub output_dir: PathBuf,
    pub written: Vec<WrittenTrack>,
    pub failures: Vec<WriteFailure>,
}

/// Tracks the file names claimed in one output directory.
#[derive(Debug)]
pub struct NameRegistry {
    dir: PathBuf,
    claimed: HashSet<String>,
}

impl NameRegistry {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            claimed: HashSet::new(),
        }
    }

    pub fn claim(&mut self, name: &str) -> String {
        let unique = resolve_collision(name, |candidate| {
            self.claimed.contains(candidate) || self.dir.join(candidate).exists()
        });
        self.claimed.insert(unique.clone());
        unique
    }
}

pub fn output_dir_for(input: &Path, output_root: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    output_root.join(sanitize(&stem))
}

pub fn process_file(
    input: &Path,
    output_root: &Path,
    options: SplitOptions,
) -> Result<FileReport, ProcessError> {
    let bytes = fs::read(input).map_err(|source| ProcessError::Read {
        path: input.to_path_buf(),
        source,
    })?;
    let document = MidiDocument::decode(&bytes).map_err(|source| ProcessError::Decode {
        path: input.to_path_buf(),
        source,
    })?;
    info!(
        "Successfully loaded MIDI file: {} ({} tracks)",
        input.display(),
        document.tracks.len()
    );

    let output_dir = output_dir_for(input, output_root);
    if !output_dir.is_dir() {
        fs::create_dir_all(&output_dir).map_err(|source| ProcessError::CreateDir {
            path: output_dir.clone(),
            source,
        })?;
        info!("Created directory: {}", output_dir.display());
    }

    let mut registry = NameRegistry::new(&output_dir);
    let mut written = Vec::new();
    let mut failures = Vec::new();
    for unit in Splitter::new(&document, options).run() {
        let file_name = registry.claim(&unit.file_name);
        let path = output_dir.join(&file_name);
        if file_name != unit.file_name {
            debug!("{} already taken, using {}", unit.file_name, file_name);
        }
        match write_document(&unit.document, &path) {
            Ok(()) => {
                info!(
                    "Track saved: {} - Instrument: {}",
                    path.display(),
                    unit.report.instrument
                );
                written.push(WrittenTrack {
                    path,
                    report: unit.report,
                });
            }
            Err(error) => {
                warn!("Could not save track {}: {}", path.display(), error);
                failures.push(WriteFailure {
                    path,
                    report: unit.report,
                    error,
                });
            }
        }
    }

    Ok(FileReport {
        input: input.to_path_buf(),
        output_dir,
        written,
        failures,
    })
}

fn write_document(document: &MidiDocument, path: &Path) -> Result<(), WriteError> {
    let bytes = document.encode()?;
    fs::write(path, bytes)?;
    Ok(())
}
