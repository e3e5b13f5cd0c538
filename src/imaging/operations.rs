//! High-level image operations.
//!
//! These functions combine calculations with backend execution.
//! They take configuration, compute parameters, and call the backend.

use super::backend::{BackendError, ImageBackend};
use super::calculations::{CompositeLayout, calculate_layout};
use super::params::{CompositeParams, Quality, ResizeFilter, SecondHalf};
use std::path::Path;

/// Result type for image operations.
pub type Result<T> = std::result::Result<T, BackendError>;

/// Get image dimensions using the backend.
pub fn get_dimensions(backend: &impl ImageBackend, path: &Path) -> Result<(u32, u32)> {
    let dims = backend.identify(path)?;
    Ok((dims.width, dims.height))
}

/// Configuration for composite generation.
#[derive(Debug, Clone)]
pub struct CompositeConfig {
    pub quality: Quality,
    pub filter: ResizeFilter,
    /// Color of the synthetic partner for an unpaired image.
    pub filler_color: [u8; 3],
}

impl Default for CompositeConfig {
    fn default() -> Self {
        Self {
            quality: Quality::default(),
            filter: ResizeFilter::default(),
            filler_color: [255, 255, 255],
        }
    }
}

/// Plan a composite operation without executing it.
///
/// `second_dims` is `None` when the right half is a filler, which takes on
/// the first image's dimensions. Fails with [`BackendError::Encode`] when the
/// pair has no representable canvas.
pub fn plan_composite(
    first: &Path,
    first_dims: (u32, u32),
    second: Option<(&Path, (u32, u32))>,
    output_path: &Path,
    config: &CompositeConfig,
) -> Result<CompositeParams> {
    let (second, second_dims) = match second {
        Some((path, dims)) => (SecondHalf::Image(path.to_path_buf()), dims),
        None => (
            SecondHalf::Filler {
                color: config.filler_color,
            },
            first_dims,
        ),
    };

    let layout =
        calculate_layout(first_dims, second_dims).ok_or_else(|| BackendError::Encode {
            path: output_path.to_path_buf(),
            message: format!(
                "{}x{} next to {}x{} gives a canvas wider than {} pixels",
                first_dims.0,
                first_dims.1,
                second_dims.0,
                second_dims.1,
                u32::MAX
            ),
        })?;

    Ok(CompositeParams {
        first: first.to_path_buf(),
        second,
        output: output_path.to_path_buf(),
        layout,
        quality: config.quality,
        filter: config.filter,
    })
}

/// Create one side-by-side composite from `first` and an optional `second`.
///
/// Both sources are identified first so the layout is known before any
/// pixel data is decoded. Returns the layout that was written.
pub fn create_composite(
    backend: &impl ImageBackend,
    first: &Path,
    second: Option<&Path>,
    output_path: &Path,
    config: &CompositeConfig,
) -> Result<CompositeLayout> {
    let first_dims = get_dimensions(backend, first)?;
    let second = match second {
        Some(path) => Some((path, get_dimensions(backend, path)?)),
        None => None,
    };

    let params = plan_composite(first, first_dims, second, output_path, config)?;
    backend.composite(&params)?;
    Ok(params.layout)
}
