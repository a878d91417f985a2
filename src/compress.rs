//! The batch re-encoder.
//!
//! Walks the direct entries of the configured directory in whatever order the
//! platform lists them, and for every file whose name ends with the source
//! suffix (any case):
//!
//! ```text
//! size on disk → identify → resize policy → decode/resize/RGB/encode → size on disk → event
//! ```
//!
//! Outputs are written next to their inputs under the derived name, replacing
//! any existing file. Inputs are never modified or deleted.
//!
//! ## Failures
//!
//! With [`ErrorPolicy::Abort`] (the default) the first failing file ends the
//! batch: earlier outputs stay on disk, later files are never attempted. With
//! [`ErrorPolicy::Continue`] the failure is reported as an event, recorded in
//! the summary, and the loop moves on. A missing or unreadable directory is
//! fatal under both policies.
//!
//! Processing is strictly sequential; events are sent as each file finishes so
//! a consumer can print them while the batch runs.

use crate::config::{CompressConfig, ErrorPolicy};
use crate::imaging::{
    BackendError, ImageBackend, Quality, RustBackend, convert_image, get_dimensions,
    plan_conversion,
};
use crate::naming::output_file_name;
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CompressError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("{}: {source}", file.display())]
    File {
        file: PathBuf,
        #[source]
        source: FileError,
    },
}

/// Why a single file could not be converted.
#[derive(Error, Debug)]
pub enum FileError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Imaging(#[from] BackendError),
}

/// Progress events emitted while the batch runs.
#[derive(Debug, Clone, PartialEq)]
pub enum CompressEvent {
    FileCompressed(CompressedFile),
    FileFailed { file_name: String, error: String },
}

/// One converted file.
#[derive(Debug, Clone, PartialEq)]
pub struct CompressedFile {
    pub file_name: String,
    pub output_name: String,
    pub original_bytes: u64,
    pub output_bytes: u64,
    pub original_dims: (u32, u32),
    pub output_dims: (u32, u32),
    pub alpha_dropped: bool,
}

/// A file that failed under [`ErrorPolicy::Continue`].
#[derive(Debug, Clone, PartialEq)]
pub struct FailedFile {
    pub file_name: String,
    pub error: String,
}

/// Outcome of a completed batch.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct CompressSummary {
    pub compressed: Vec<CompressedFile>,
    pub failed: Vec<FailedFile>,
}

impl CompressSummary {
    pub fn original_bytes(&self) -> u64 {
        self.compressed.iter().map(|f| f.original_bytes).sum()
    }

    pub fn output_bytes(&self) -> u64 {
        self.compressed.iter().map(|f| f.output_bytes).sum()
    }

    /// Bytes saved across all converted files; negative if outputs grew.
    pub fn saved_bytes(&self) -> i64 {
        self.original_bytes() as i64 - self.output_bytes() as i64
    }

    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

/// A qualifying input and where its output goes.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub file_name: String,
    pub output_name: String,
    pub source: PathBuf,
    pub output: PathBuf,
}

/// List the qualifying inputs of `config.source_dir` in directory order.
///
/// Non-matching names, non-UTF-8 names, and anything that is not a regular
/// file are skipped silently.
pub fn find_candidates(config: &CompressConfig) -> Result<Vec<Candidate>, CompressError> {
    let dir = &config.source_dir;
    let mut candidates = Vec::new();

    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let Ok(file_name) = entry.file_name().into_string() else {
            continue;
        };
        let Some(output_name) =
            output_file_name(&file_name, &config.source_suffix, &config.target_suffix)
        else {
            continue;
        };
        if !entry.path().is_file() {
            continue;
        }

        candidates.push(Candidate {
            source: dir.join(&file_name),
            output: dir.join(&output_name),
            file_name,
            output_name,
        });
    }

    Ok(candidates)
}

/// Run the batch with the pure Rust backend.
pub fn compress(
    config: &CompressConfig,
    events: Option<Sender<CompressEvent>>,
) -> Result<CompressSummary, CompressError> {
    compress_with_backend(&RustBackend::new(), config, events)
}

/// Run the batch against a specific backend (allows testing with mock).
pub fn compress_with_backend(
    backend: &impl ImageBackend,
    config: &CompressConfig,
    events: Option<Sender<CompressEvent>>,
) -> Result<CompressSummary, CompressError> {
    let quality = Quality::new(config.quality);
    let mut summary = CompressSummary::default();

    // Listing happens up front so outputs written during the batch are
    // never picked up as inputs, whatever their suffix.
    for candidate in find_candidates(config)? {
        match compress_one(backend, &candidate, config.max_width, quality) {
            Ok(file) => {
                emit(&events, CompressEvent::FileCompressed(file.clone()));
                summary.compressed.push(file);
            }
            Err(source) => match config.on_error {
                ErrorPolicy::Abort => {
                    return Err(CompressError::File {
                        file: candidate.source,
                        source,
                    });
                }
                ErrorPolicy::Continue => {
                    let failed = FailedFile {
                        file_name: candidate.file_name,
                        error: source.to_string(),
                    };
                    emit(
                        &events,
                        CompressEvent::FileFailed {
                            file_name: failed.file_name.clone(),
                            error: failed.error.clone(),
                        },
                    );
                    summary.failed.push(failed);
                }
            },
        }
    }

    Ok(summary)
}

fn compress_one(
    backend: &impl ImageBackend,
    candidate: &Candidate,
    max_width: u32,
    quality: Quality,
) -> Result<CompressedFile, FileError> {
    let original_bytes = file_size(&candidate.source)?;
    let original_dims = get_dimensions(backend, &candidate.source)?;

    let params = plan_conversion(
        &candidate.source,
        &candidate.output,
        original_dims,
        max_width,
        quality,
    );
    let outcome = convert_image(backend, &params)?;
    let output_bytes = file_size(&candidate.output)?;

    Ok(CompressedFile {
        file_name: candidate.file_name.clone(),
        output_name: candidate.output_name.clone(),
        original_bytes,
        output_bytes,
        original_dims,
        output_dims: outcome.output.into(),
        alpha_dropped: outcome.source_layout.has_alpha(),
    })
}

fn file_size(path: &Path) -> std::io::Result<u64> {
    Ok(std::fs::metadata(path)?.len())
}

fn emit(events: &Option<Sender<CompressEvent>>, event: CompressEvent) {
    if let Some(tx) = events {
        // A dropped receiver only means nobody is listening.
        tx.send(event).ok();
    }
}

/// A conversion the batch would perform, for the `check` command.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedFile {
    pub file_name: String,
    pub output_name: String,
    pub original_dims: (u32, u32),
    pub output_dims: (u32, u32),
}

impl PlannedFile {
    pub fn resized(&self) -> bool {
        self.original_dims != self.output_dims
    }
}

/// Dry run: identify every candidate and compute its output dimensions
/// without decoding pixels or writing anything.
pub fn plan(config: &CompressConfig) -> Result<Vec<PlannedFile>, CompressError> {
    plan_with_backend(&RustBackend::new(), config)
}

pub fn plan_with_backend(
    backend: &impl ImageBackend,
    config: &CompressConfig,
) -> Result<Vec<PlannedFile>, CompressError> {
    let quality = Quality::new(config.quality);
    find_candidates(config)?
        .into_iter()
        .map(|candidate| -> Result<PlannedFile, CompressError> {
            let original_dims =
                get_dimensions(backend, &candidate.source).map_err(|e| CompressError::File {
                    file: candidate.source.clone(),
                    source: e.into(),
                })?;
            let params = plan_conversion(
                &candidate.source,
                &candidate.output,
                original_dims,
                config.max_width,
                quality,
            );
            Ok(PlannedFile {
                file_name: candidate.file_name,
                output_name: candidate.output_name,
                original_dims,
                output_dims: (params.width, params.height),
            })
        })
        .collect()
}
