//! Output file naming.
//!
//! The k-th pair (k starting at 1) is written as `combined_image_{k:04}.jpg`:
//! `combined_image_0001.jpg`, `combined_image_0002.jpg`, … Past 9999 the
//! number simply grows wider (`combined_image_10000.jpg`), so names stay
//! unique but no longer sort lexically after that point.

use std::path::{Path, PathBuf};

pub const OUTPUT_PREFIX: &str = "combined_image_";
pub const OUTPUT_EXTENSION: &str = "jpg";

/// File name for the output of pair `index` (1-based).
pub fn output_file_name(index: usize) -> String {
    format!("{OUTPUT_PREFIX}{index:04}.{OUTPUT_EXTENSION}")
}

/// Full path for the output of pair `index` inside `output_dir`.
pub fn output_path(output_dir: &Path, index: usize) -> PathBuf {
    output_dir.join(output_file_name(index))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_output_is_0001() {
        assert_eq!(output_file_name(1), "combined_image_0001.jpg");
    }

    #[test]
    fn pads_to_four_digits() {
        assert_eq!(output_file_name(42), "combined_image_0042.jpg");
        assert_eq!(output_file_name(9999), "combined_image_9999.jpg");
    }

    #[test]
    fn widens_past_four_digits() {
        assert_eq!(output_file_name(10000), "combined_image_10000.jpg");
    }

    #[test]
    fn path_joins_output_dir() {
        assert_eq!(
            output_path(Path::new("/out/set"), 3),
            PathBuf::from("/out/set/combined_image_0003.jpg")
        );
    }
}
