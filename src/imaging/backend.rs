//! Image processing backend trait and shared types.
//!
//! The [`ImageBackend`] trait defines the two operations every backend must
//! support: identify and composite.
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend): pure Rust, built on the
//! `image` crate. Everything is statically linked into the binary.

use super::params::CompositeParams;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("Failed to decode {}: {message}", path.display())]
    Decode { path: PathBuf, message: String },
    #[error("Failed to write {}: {message}", path.display())]
    Encode { path: PathBuf, message: String },
}

/// Result of an identify operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl From<Dimensions> for (u32, u32) {
    fn from(d: Dimensions) -> Self {
        (d.width, d.height)
    }
}

/// Trait for image processing backends.
///
/// The rest of the codebase only talks to this trait, so pipeline logic can
/// be exercised with a recording mock and no pixel work.
pub trait ImageBackend {
    /// Get image dimensions without decoding pixel data.
    fn identify(&self, path: &Path) -> Result<Dimensions, BackendError>;

    /// Decode, scale and place both halves, then encode the canvas to
    /// `params.output`. Must not leave a partial file at that path.
    fn composite(&self, params: &CompositeParams) -> Result<(), BackendError>;
}
