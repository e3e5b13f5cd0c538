//! Shared types used across pipeline stages.

use std::ffi::OsString;
use std::path::PathBuf;

/// An eligible input image found by [`scan`](crate::scan::scan).
///
/// Only the path is known at this point; dimensions are read by the backend
/// when the image's pair is composited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFile {
    pub path: PathBuf,
    /// Raw file name, the ordering key.
    pub name: OsString,
}

impl ImageFile {
    pub fn new(path: PathBuf) -> Self {
        let name = path.file_name().map(OsString::from).unwrap_or_default();
        Self { path, name }
    }

    /// File name for display.
    pub fn display_name(&self) -> String {
        self.name.to_string_lossy().into_owned()
    }
}
