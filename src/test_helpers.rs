//! Shared test utilities for the image-docking test suite.
//!
//! Synthetic images are generated on the fly with the `image` crate, so no
//! binary fixtures live in the repository.

use image::{DynamicImage, ImageFormat, RgbImage};
use std::path::{Path, PathBuf};

/// Per-channel tolerance for colors that went through JPEG.
const JPEG_TOLERANCE: u8 = 24;

/// Write a solid-color image; the format follows the file extension.
pub fn write_solid_image(dir: &Path, name: &str, width: u32, height: u32, rgb: [u8; 3]) -> PathBuf {
    let path = dir.join(name);
    let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, image::Rgb(rgb)));
    let format = ImageFormat::from_path(&path).unwrap();
    // The GIF encoder wants RGBA input
    let img = if format == ImageFormat::Gif {
        DynamicImage::ImageRgba8(img.to_rgba8())
    } else {
        img
    };
    img.save_with_format(&path, format).unwrap();
    path
}

/// Assert two colors match within JPEG noise.
pub fn assert_rgb_near(actual: [u8; 3], expected: [u8; 3]) {
    let close = actual
        .iter()
        .zip(expected.iter())
        .all(|(a, e)| a.abs_diff(*e) <= JPEG_TOLERANCE);
    assert!(close, "color {actual:?} not within {JPEG_TOLERANCE} of {expected:?}");
}
