//! # Image Docking
//!
//! Pair up the images in a directory and dock each pair side by side into a
//! single JPEG: `combined_image_0001.jpg`, `combined_image_0002.jpg`, …
//!
//! # Architecture: Three-Stage Pipeline
//!
//! Every run goes through the same stages, once per pair, strictly in order:
//!
//! ```text
//! 1. Scan       input/      →  ordered image list   (top level only, byte order)
//! 2. Pair       image list  →  (a, b), (c, d), (e, filler)
//! 3. Composite  pair        →  output/combined_image_NNNN.jpg
//! ```
//!
//! Scanning and pairing are pure list work; only the composite stage touches
//! pixels, and it holds decoded images for the length of one pair.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`scan`] | Stage 1: lists eligible images in name order |
//! | [`pairing`] | Stage 2: groups images into pairs, filler for an odd last one |
//! | [`imaging`] | Stage 3: geometry, backend trait, pure Rust compositor |
//! | [`compose`] | The run itself: validation, per-pair loop, progress events, dry-run plan |
//! | [`naming`] | `combined_image_NNNN.jpg` output names |
//! | [`config`] | Layered `config.toml` loading and validation |
//! | [`types`] | Types shared between stages |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Byte-Order Sorting
//!
//! Input files are ordered by raw file name bytes, not by locale collation or
//! natural number order. The same directory pairs the same way on every
//! machine. Zero-pad numbered inputs (`01.png`, `02.png`, …) to get numeric
//! order.
//!
//! ## Same Height, Own Width
//!
//! Both images of a pair are scaled to the taller one's height and keep their
//! aspect ratio, so nothing is cropped or letterboxed. When a source is already
//! at the target height it is copied as-is, without resampling.
//!
//! ## JPEG-Only Output
//!
//! Output is always baseline JPEG regardless of the input formats, so a
//! directory of mixed PNG/GIF/JPEG inputs yields a uniform result set.
//!
//! ## Fail Fast, Keep What Was Written
//!
//! The first undecodable input or unwritable output ends the run with a typed
//! [`compose::RunError`]. Composites written before that point are left on
//! disk; each one is written to a temporary file and renamed into place, so a
//! failure never leaves a truncated `combined_image_*.jpg` behind.

pub mod compose;
pub mod config;
pub mod imaging;
pub mod naming;
pub mod output;
pub mod pairing;
pub mod scan;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
