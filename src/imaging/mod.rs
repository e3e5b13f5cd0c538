//! Image processing in pure Rust, built on the `image` crate.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Identify** | `ImageReader::into_dimensions` |
//! | **Scale** | `resize_exact` (bilinear by default) |
//! | **Composite → JPEG** | `imageops::overlay` + `JpegEncoder` |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for composite geometry (unit testable)
//! - **Parameters**: Data structures describing image operations
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]
//! - **Operations**: High-level functions combining calculations + backend

pub mod backend;
mod calculations;
pub mod operations;
mod params;
pub mod rust_backend;

pub use backend::{BackendError, Dimensions, ImageBackend};
pub use calculations::{CompositeLayout, Placement, calculate_layout, scaled_width};
pub use operations::{CompositeConfig, create_composite, get_dimensions};
pub use params::{CompositeParams, Quality, ResizeFilter, SecondHalf};
pub use rust_backend::{RustBackend, supported_input_extensions};
