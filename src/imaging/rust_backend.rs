//! Pure Rust image processing backend.
//!
//! Everything is statically linked into the binary.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Identify | `image::ImageReader::into_dimensions` (header only) |
//! | Decode (JPEG, PNG, GIF) | `image` crate, format sniffed from content |
//! | Scale | `image::DynamicImage::resize_exact`, skipped when already the right size |
//! | Place | `image::imageops::overlay` onto an opaque white RGBA canvas |
//! | Encode → JPEG | `image::codecs::jpeg::JpegEncoder` (baseline) |
//!
//! Transparent source pixels end up blended onto white, since JPEG has no
//! alpha channel.

use super::backend::{BackendError, Dimensions, ImageBackend};
use super::calculations::Placement;
use super::params::{CompositeParams, Quality, ResizeFilter, SecondHalf};
use image::codecs::jpeg::JpegEncoder;
use image::imageops::{self, FilterType};
use image::{DynamicImage, ImageFormat, ImageReader, Rgba, RgbaImage};
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use tracing::debug;

/// Extensions accepted as input, with the decoder each one needs.
const INPUT_CANDIDATES: &[(&str, ImageFormat)] = &[
    ("jpg", ImageFormat::Jpeg),
    ("jpeg", ImageFormat::Jpeg),
    ("png", ImageFormat::Png),
    ("gif", ImageFormat::Gif),
];

static SUPPORTED_EXTENSIONS: LazyLock<Vec<&'static str>> = LazyLock::new(|| {
    INPUT_CANDIDATES
        .iter()
        .filter(|(_, fmt)| fmt.reading_enabled())
        .map(|(ext, _)| *ext)
        .collect()
});

/// Returns the set of image file extensions that have working decoders compiled in.
pub fn supported_input_extensions() -> &'static [&'static str] {
    &SUPPORTED_EXTENSIONS
}

const CANVAS_BACKGROUND: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Largest RGBA canvas the compositor will allocate (1 GiB).
const MAX_CANVAS_BYTES: u64 = 1 << 30;

/// Pure Rust backend using the `image` crate.
///
/// See the [module docs](self) for the crate-to-operation mapping.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

fn decode_error(path: &Path, e: impl std::fmt::Display) -> BackendError {
    BackendError::Decode {
        path: path.to_path_buf(),
        message: e.to_string(),
    }
}

fn encode_error(path: &Path, e: impl std::fmt::Display) -> BackendError {
    BackendError::Encode {
        path: path.to_path_buf(),
        message: e.to_string(),
    }
}

fn open(path: &Path) -> Result<ImageReader<std::io::BufReader<fs::File>>, BackendError> {
    ImageReader::open(path)
        .and_then(|r| r.with_guessed_format())
        .map_err(|e| decode_error(path, e))
}

/// Load and decode an image from disk.
fn load_image(path: &Path) -> Result<DynamicImage, BackendError> {
    open(path)?.decode().map_err(|e| decode_error(path, e))
}

fn filter_type(filter: ResizeFilter) -> FilterType {
    match filter {
        ResizeFilter::Nearest => FilterType::Nearest,
        ResizeFilter::Triangle => FilterType::Triangle,
        ResizeFilter::CatmullRom => FilterType::CatmullRom,
        ResizeFilter::Gaussian => FilterType::Gaussian,
        ResizeFilter::Lanczos3 => FilterType::Lanczos3,
    }
}

/// Scale `img` to exactly fill `slot`, then draw it onto the canvas.
fn place(canvas: &mut RgbaImage, img: DynamicImage, slot: Placement, filter: ResizeFilter) {
    let (w, h) = (img.width(), img.height());
    let fitted = if (w, h) == (slot.width, slot.height) {
        debug!(w, h, "Source already at target size, skipping resize");
        img
    } else {
        debug!(w, h, to_w = slot.width, to_h = slot.height, %filter, "Resizing source");
        img.resize_exact(slot.width, slot.height, filter_type(filter))
    };
    imageops::overlay(canvas, &fitted.to_rgba8(), slot.x as i64, 0);
}

/// Path the encoder writes to before the final rename.
fn partial_path(output: &Path) -> PathBuf {
    let name = output
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    output.with_file_name(format!(".{name}.partial"))
}

/// Encode as baseline JPEG into a sibling temp file, then rename into place.
fn save_jpeg(img: &DynamicImage, path: &Path, quality: Quality) -> Result<(), BackendError> {
    let tmp = partial_path(path);
    let result = write_jpeg(img, &tmp, quality)
        .and_then(|()| fs::rename(&tmp, path).map_err(|e| encode_error(path, e)));
    if result.is_err() {
        let _ = fs::remove_file(&tmp);
    }
    result
}

fn write_jpeg(img: &DynamicImage, tmp: &Path, quality: Quality) -> Result<(), BackendError> {
    let file = fs::File::create(tmp).map_err(|e| encode_error(tmp, e))?;
    let mut writer = BufWriter::new(file);
    let encoder = JpegEncoder::new_with_quality(&mut writer, quality.as_u8());
    img.write_with_encoder(encoder)
        .map_err(|e| encode_error(tmp, format!("JPEG encode failed: {e}")))?;
    writer.flush().map_err(|e| encode_error(tmp, e))
}

impl ImageBackend for RustBackend {
    fn identify(&self, path: &Path) -> Result<Dimensions, BackendError> {
        let (width, height) = open(path)?
            .into_dimensions()
            .map_err(|e| decode_error(path, e))?;
        if width == 0 || height == 0 {
            return Err(decode_error(path, "image has no pixels"));
        }
        Ok(Dimensions { width, height })
    }

    fn composite(&self, params: &CompositeParams) -> Result<(), BackendError> {
        let layout = params.layout;
        let width = u64::from(layout.first.width) + u64::from(layout.second.width);
        let height = u64::from(layout.canvas_height());
        if width * height * 4 > MAX_CANVAS_BYTES {
            return Err(encode_error(
                &params.output,
                format!(
                    "{width}x{height} canvas exceeds the {} MiB limit",
                    MAX_CANVAS_BYTES >> 20
                ),
            ));
        }

        let mut canvas = RgbaImage::from_pixel(
            layout.canvas_width(),
            layout.canvas_height(),
            CANVAS_BACKGROUND,
        );

        // Each decoded source is moved into `place` and dropped there, so at
        // most one full-size source is alive at a time.
        place(
            &mut canvas,
            load_image(&params.first)?,
            layout.first,
            params.filter,
        );

        match &params.second {
            SecondHalf::Image(path) => {
                place(&mut canvas, load_image(path)?, layout.second, params.filter);
            }
            SecondHalf::Filler { color } => {
                let [r, g, b] = *color;
                let slot = layout.second;
                let block = RgbaImage::from_pixel(slot.width, slot.height, Rgba([r, g, b, 255]));
                imageops::overlay(&mut canvas, &block, slot.x as i64, 0);
            }
        }

        let flattened = DynamicImage::ImageRgb8(DynamicImage::ImageRgba8(canvas).to_rgb8());
        debug!(
            width = flattened.width(),
            height = flattened.height(),
            output = %params.output.display(),
            "Encoding composite"
        );
        save_jpeg(&flattened, &params.output, params.quality)
    }
}
