//! Grouping of the ordered input list into composite pairs.
//!
//! Stage 2 of the docking pipeline. Adjacent images are paired in order:
//! `[a, b, c, d, e]` becomes `(a, b)`, `(c, d)`, `(e, filler)`. The filler
//! only ever takes the second slot.

use crate::types::ImageFile;

/// Right-hand member of a pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Partner<'a> {
    Image(&'a ImageFile),
    /// Blank stand-in for the odd image out, sized like `first`.
    Filler,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pair<'a> {
    /// 1-based position in pairing order; also the output sequence number.
    pub index: usize,
    pub first: &'a ImageFile,
    pub second: Partner<'a>,
}

impl<'a> Pair<'a> {
    pub fn second_image(&self) -> Option<&'a ImageFile> {
        match self.second {
            Partner::Image(img) => Some(img),
            Partner::Filler => None,
        }
    }
}

/// Number of pairs `n` images produce.
pub fn pair_count(n: usize) -> usize {
    n.div_ceil(2)
}

/// Pair up `images` in order without copying them.
pub fn pairs(images: &[ImageFile]) -> impl ExactSizeIterator<Item = Pair<'_>> {
    images.chunks(2).enumerate().map(|(i, chunk)| Pair {
        index: i + 1,
        first: &chunk[0],
        second: chunk.get(1).map_or(Partner::Filler, Partner::Image),
    })
}
