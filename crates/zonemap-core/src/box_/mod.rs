//! Box - Rectangle regions
//!
//! Bounding boxes of labeled regions, in raster coordinates.

use crate::error::{Error, Result};

/// A rectangle region
///
/// `(x, y)` is the top-left pixel; `right()` and `bottom()` are exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Box {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Box {
    /// Create a new box
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if width or height is negative.
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Result<Self> {
        if w < 0 || h < 0 {
            return Err(Error::InvalidParameter(format!(
                "box size must be non-negative, got {}x{}",
                w, h
            )));
        }
        Ok(Self { x, y, w, h })
    }

    /// Create a box without validation
    pub const fn new_unchecked(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Box spanning the inclusive pixel extent
    /// `[min_x, max_x] x [min_y, max_y]`.
    pub fn from_extent(min_x: i32, min_y: i32, max_x: i32, max_y: i32) -> Self {
        Self::new_unchecked(min_x, min_y, max_x - min_x + 1, max_y - min_y + 1)
    }

    #[inline]
    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    #[inline]
    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    /// Whether the box covers no pixel.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.w <= 0 || self.h <= 0
    }

    /// Whether pixel (x, y) lies inside the box.
    #[inline]
    pub fn contains_point(&self, x: i32, y: i32) -> bool {
        (self.x..self.right()).contains(&x) && (self.y..self.bottom()).contains(&y)
    }
}
