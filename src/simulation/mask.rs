//! Per-pixel opacity masks for pixel-accurate collision.
//!
//! A mask marks every pixel of a sprite whose alpha exceeds a threshold.
//! Two masks collide when at least one set pixel of each lands on the same
//! playfield coordinate.

use ndarray::Array2;

/// Alpha value above which a pixel counts as solid.
pub const ALPHA_THRESHOLD: u8 = 127;

/// Opacity mask indexed as `[y, x]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    bits: Array2<bool>,
}

impl Mask {
    /// Creates an empty mask of the given size.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            bits: Array2::from_elem((height, width), false),
        }
    }

    /// Builds a mask from tightly packed RGBA8 pixels.
    ///
    /// # Panics
    ///
    /// Panics if `rgba` does not hold exactly `width * height * 4` bytes.
    pub fn from_rgba(width: usize, height: usize, rgba: &[u8]) -> Self {
        assert_eq!(rgba.len(), width * height * 4, "rgba buffer size mismatch");
        let bits = Array2::from_shape_fn((height, width), |(y, x)| {
            rgba[(y * width + x) * 4 + 3] > ALPHA_THRESHOLD
        });
        Self { bits }
    }

    /// Mask width in pixels.
    pub fn width(&self) -> usize {
        self.bits.ncols()
    }

    /// Mask height in pixels.
    pub fn height(&self) -> usize {
        self.bits.nrows()
    }

    /// Returns whether the pixel at `(x, y)` is solid. Out-of-range is empty.
    pub fn get(&self, x: i32, y: i32) -> bool {
        if x < 0 || y < 0 {
            return false;
        }
        self.bits
            .get((y as usize, x as usize))
            .copied()
            .unwrap_or(false)
    }

    /// Marks the pixel at `(x, y)` as solid or clear.
    pub fn set(&mut self, x: usize, y: usize, solid: bool) {
        if let Some(bit) = self.bits.get_mut((y, x)) {
            *bit = solid;
        }
    }

    /// Number of solid pixels.
    pub fn count(&self) -> usize {
        self.bits.iter().filter(|&&b| b).count()
    }

    /// Returns the mask mirrored top-to-bottom.
    pub fn flipped_vertically(&self) -> Self {
        let height = self.height();
        Self {
            bits: Array2::from_shape_fn(self.bits.dim(), |(y, x)| self.bits[[height - 1 - y, x]]),
        }
    }

    /// Finds the first overlapping solid pixel with `other`.
    ///
    /// `offset` is the position of `other`'s top-left corner expressed in this
    /// mask's coordinates. The returned point is in this mask's coordinates.
    pub fn overlap(&self, other: &Mask, offset: (i32, i32)) -> Option<(i32, i32)> {
        let (dx, dy) = offset;
        let x_start = dx.max(0);
        let y_start = dy.max(0);
        let x_end = (self.width() as i32).min(dx + other.width() as i32);
        let y_end = (self.height() as i32).min(dy + other.height() as i32);

        for y in y_start..y_end {
            for x in x_start..x_end {
                if self.get(x, y) && other.get(x - dx, y - dy) {
                    return Some((x, y));
                }
            }
        }
        None
    }

    /// Returns whether any solid pixels overlap.
    pub fn overlaps(&self, other: &Mask, offset: (i32, i32)) -> bool {
        self.overlap(other, offset).is_some()
    }
}
