//! The docking run: scan → pair → composite → write, one pair at a time.
//!
//! ## Flow
//!
//! ```text
//! validate   check config, scan input (must hold ≥1 image), prepare output dir
//! process    for k in 1..=ceil(N/2): composite pair k → combined_image_{k:04}.jpg
//! done       return how many files were written
//! ```
//!
//! Nothing is attempted once a step fails. Outputs already written by
//! earlier pairs stay on disk; a failed pair itself never leaves a file
//! under its final name.
//!
//! ## Progress and cancellation
//!
//! Callers that want progress pass a [`Sender<RunEvent>`]; the run is
//! otherwise silent apart from `tracing` diagnostics. A cancel flag is
//! checked before each pair, never in the middle of one.

use crate::config::{ComposeConfig, ConfigError};
use crate::imaging::{BackendError, ImageBackend, RustBackend, create_composite};
use crate::naming::{output_file_name, output_path};
use crate::pairing::{pair_count, pairs};
use crate::scan::{ScanError, scan};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum RunError {
    #[error("No images (jpg, jpeg, png, gif) found in {}", .0.display())]
    EmptyInput(PathBuf),
    #[error("Cannot read input directory {}: {source}", path.display())]
    InputPath {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid output directory '{}': {reason}", path.display())]
    OutputPath { path: PathBuf, reason: String },
    #[error("Cannot decode image {}: {message}", path.display())]
    ImageDecode { path: PathBuf, message: String },
    #[error("Cannot write image {}: {message}", path.display())]
    ImageEncode { path: PathBuf, message: String },
    #[error("Run cancelled after writing {written} file(s)")]
    Cancelled { written: usize },
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl From<ScanError> for RunError {
    fn from(e: ScanError) -> Self {
        match e {
            ScanError::NoImages(path) => RunError::EmptyInput(path),
            ScanError::Io { path, source } => RunError::InputPath { path, source },
            ScanError::NotADirectory(path) => RunError::InputPath {
                path,
                source: std::io::Error::new(std::io::ErrorKind::InvalidInput, "not a directory"),
            },
        }
    }
}

impl From<BackendError> for RunError {
    fn from(e: BackendError) -> Self {
        match e {
            BackendError::Decode { path, message } => RunError::ImageDecode { path, message },
            BackendError::Encode { path, message } => RunError::ImageEncode { path, message },
        }
    }
}

/// Progress notifications emitted during a run.
#[derive(Debug, Clone, PartialEq)]
pub enum RunEvent {
    /// Validation passed; `pairs` composites are about to be written.
    Started {
        input: PathBuf,
        output: PathBuf,
        images: usize,
        pairs: usize,
    },
    PairWritten {
        index: usize,
        first: String,
        /// `None` when the partner was a filler.
        second: Option<String>,
        output: String,
        width: u32,
        height: u32,
    },
    Finished {
        written: usize,
    },
}

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub images: usize,
    pub pairs_written: usize,
    pub outputs: Vec<PathBuf>,
}

/// One pair as it would be written, without touching any pixels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedPair {
    pub index: usize,
    pub first: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub second: Option<String>,
    pub output: String,
}

/// Dry run: the pairs and output names a run over `input_dir` would produce.
pub fn plan(input_dir: &Path) -> Result<Vec<PlannedPair>, RunError> {
    let images = scan(input_dir)?;
    Ok(pairs(&images)
        .map(|pair| PlannedPair {
            index: pair.index,
            first: pair.first.display_name(),
            second: pair.second_image().map(|img| img.display_name()),
            output: output_file_name(pair.index),
        })
        .collect())
}

/// Composite every pair in `input_dir` into `output_dir` with the pure Rust backend.
pub fn run(
    input_dir: &Path,
    output_dir: &Path,
    config: &ComposeConfig,
) -> Result<RunSummary, RunError> {
    run_with_backend(&RustBackend::new(), input_dir, output_dir, config, None, None)
}

/// Run with a specific backend (allows testing with mock).
pub fn run_with_backend(
    backend: &impl ImageBackend,
    input_dir: &Path,
    output_dir: &Path,
    config: &ComposeConfig,
    events: Option<Sender<RunEvent>>,
    cancel: Option<&AtomicBool>,
) -> Result<RunSummary, RunError> {
    let emit = |event: RunEvent| {
        if let Some(tx) = &events {
            // A dropped receiver only means nobody is watching
            let _ = tx.send(event);
        }
    };

    config.validate()?;
    let images = scan(input_dir)?;
    prepare_output_dir(output_dir)?;

    let total = pair_count(images.len());
    info!(
        input = %input_dir.display(),
        output = %output_dir.display(),
        images = images.len(),
        pairs = total,
        "Starting run"
    );
    emit(RunEvent::Started {
        input: input_dir.to_path_buf(),
        output: output_dir.to_path_buf(),
        images: images.len(),
        pairs: total,
    });

    let composite_config = config.composite_config();
    let mut outputs = Vec::with_capacity(total);

    for pair in pairs(&images) {
        if cancel.is_some_and(|flag| flag.load(Ordering::Relaxed)) {
            info!(written = outputs.len(), "Run cancelled");
            return Err(RunError::Cancelled {
                written: outputs.len(),
            });
        }

        let second = pair.second_image();
        let out = output_path(output_dir, pair.index);
        debug!(index = pair.index, first = %pair.first.display_name(), "Compositing pair");

        let layout = create_composite(
            backend,
            &pair.first.path,
            second.map(|img| img.path.as_path()),
            &out,
            &composite_config,
        )?;

        emit(RunEvent::PairWritten {
            index: pair.index,
            first: pair.first.display_name(),
            second: second.map(|img| img.display_name()),
            output: output_file_name(pair.index),
            width: layout.canvas_width(),
            height: layout.canvas_height(),
        });
        outputs.push(out);
    }

    emit(RunEvent::Finished {
        written: outputs.len(),
    });
    info!(written = outputs.len(), "Run complete");

    Ok(RunSummary {
        images: images.len(),
        pairs_written: outputs.len(),
        outputs,
    })
}

/// Make sure `dir` exists and is a directory, creating parents as needed.
fn prepare_output_dir(dir: &Path) -> Result<(), RunError> {
    let fail = |reason: String| RunError::OutputPath {
        path: dir.to_path_buf(),
        reason,
    };

    if dir.as_os_str().is_empty() {
        return Err(fail("no output directory given".into()));
    }
    if dir.exists() && !dir.is_dir() {
        return Err(fail("exists and is not a directory".into()));
    }
    std::fs::create_dir_all(dir).map_err(|e| fail(e.to_string()))
}
