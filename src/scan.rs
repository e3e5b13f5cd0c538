//! Input discovery.
//!
//! Stage 1 of the docking pipeline. Lists the images directly inside the
//! input directory in the order they will be paired.
//!
//! ## Rules
//!
//! - Only the top level is read; subdirectories are ignored, even ones named
//!   like images (`shots.png/`).
//! - A file is eligible when its extension, compared case-insensitively, is
//!   one of `jpg`, `jpeg`, `png` or `gif`.
//! - Files are ordered by file name using plain byte comparison. This is not
//!   locale-aware: uppercase sorts before lowercase, so `A.png` comes before
//!   `b.png`, and `10.png` comes before `9.png`.
//!
//! ```text
//! input/
//! ├── A.png        → 1st
//! ├── b.png        → 2nd
//! ├── c.JPG        → 3rd
//! ├── notes.txt    (skipped)
//! └── raw/         (skipped)
//! ```

use crate::imaging::supported_input_extensions;
use crate::types::ImageFile;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Cannot read input directory {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Input path is not a directory: {0}")]
    NotADirectory(PathBuf),
    #[error("No images (jpg, jpeg, png, gif) found in {0}")]
    NoImages(PathBuf),
}

/// List eligible images in `dir`, ordered by file name bytes.
///
/// Fails with [`ScanError::NoImages`] when nothing qualifies.
pub fn scan(dir: &Path) -> Result<Vec<ImageFile>, ScanError> {
    if dir.exists() && !dir.is_dir() {
        return Err(ScanError::NotADirectory(dir.to_path_buf()));
    }

    let io_err = |source| ScanError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let entries = fs::read_dir(dir)
        .map_err(io_err)?
        .map(|entry| entry.map(|e| e.path()));
    select(dir, entries)
}

/// Keep the eligible paths and order them by name bytes.
///
/// An unreadable entry fails the whole scan rather than being dropped.
fn select(
    dir: &Path,
    entries: impl IntoIterator<Item = std::io::Result<PathBuf>>,
) -> Result<Vec<ImageFile>, ScanError> {
    let mut images = Vec::new();
    for entry in entries {
        let path = entry.map_err(|source| ScanError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        if is_image(&path) {
            images.push(ImageFile::new(path));
        }
    }

    if images.is_empty() {
        return Err(ScanError::NoImages(dir.to_path_buf()));
    }

    images.sort_by(|a, b| a.name.as_encoded_bytes().cmp(b.name.as_encoded_bytes()));
    Ok(images)
}

fn is_image(path: &Path) -> bool {
    if !path.is_file() {
        return false;
    }
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| {
            supported_input_extensions()
                .iter()
                .any(|s| s.eq_ignore_ascii_case(ext))
        })
}
