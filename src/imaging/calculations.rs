//! Pure calculation functions for composite geometry.
//!
//! All functions here are pure and testable without any I/O or images.

/// One source image's slot on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// Left edge on the canvas.
    pub x: u32,
    /// Width after scaling to the canvas height.
    pub width: u32,
    /// Always the canvas height.
    pub height: u32,
}

/// Geometry of a side-by-side composite: first image on the left, second on
/// the right, both scaled to the same height.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompositeLayout {
    pub first: Placement,
    pub second: Placement,
}

impl CompositeLayout {
    /// Fits in a `u32` for any layout built by [`calculate_layout`].
    pub fn canvas_width(&self) -> u32 {
        self.first.width + self.second.width
    }

    pub fn canvas_height(&self) -> u32 {
        self.first.height
    }
}

/// Width of an image after scaling it to `target_height`, preserving aspect.
///
/// Rounds half up using integer arithmetic only, so an image whose height
/// already equals `target_height` keeps its width exactly. Never returns 0.
/// Returns `None` when the scaled width does not fit in a `u32`.
///
/// ```
/// # use image_docking::imaging::scaled_width;
/// assert_eq!(scaled_width((100, 50), 100), Some(200));
/// assert_eq!(scaled_width((333, 100), 100), Some(333));
/// assert_eq!(scaled_width((70_000, 1), 65_536), None);
/// ```
pub fn scaled_width(original: (u32, u32), target_height: u32) -> Option<u32> {
    let (w, h) = original;
    let (w, h, t) = (w as u128, h.max(1) as u128, target_height as u128);
    let scaled = (2 * w * t + h) / (2 * h);
    u32::try_from(scaled).ok().map(|width| width.max(1))
}

/// Calculate the layout for a pair of images given their original dimensions.
///
/// The canvas height is the taller of the two; each image is scaled to it
/// and the second starts where the first ends. Returns `None` if either
/// scaled width or the canvas width would not fit in a `u32`.
pub fn calculate_layout(first: (u32, u32), second: (u32, u32)) -> Option<CompositeLayout> {
    let height = first.1.max(second.1);
    let first_width = scaled_width(first, height)?;
    let second_width = scaled_width(second, height)?;
    first_width.checked_add(second_width)?;

    Some(CompositeLayout {
        first: Placement {
            x: 0,
            width: first_width,
            height,
        },
        second: Placement {
            x: first_width,
            width: second_width,
            height,
        },
    })
}
