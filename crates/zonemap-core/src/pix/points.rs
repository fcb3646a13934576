//! Point lists from binary masks

use super::{Pix, PixelDepth};
use crate::error::{Error, Result};

impl Pix {
    /// Collect the coordinates of every set pixel of a 1-bit image.
    ///
    /// Points are listed column by column: `x` outer, `y` inner. The result
    /// feeds directly into [`PixMut::paint_pixels`](super::PixMut::paint_pixels).
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRasterKind`] if the image is not 1 bpp.
    pub fn set_points(&self) -> Result<Vec<(i32, i32)>> {
        if self.depth() != PixelDepth::Bit1 {
            return Err(Error::InvalidRasterKind {
                operation: "set_points",
                expected: "binary (1 bpp)",
                actual: self.kind().to_string(),
            });
        }

        let mut points = Vec::new();
        for x in 0..self.width() {
            for y in 0..self.height() {
                if self.get_value_unchecked(x, y, 0) == 1 {
                    points.push((x as i32, y as i32));
                }
            }
        }
        Ok(points)
    }
}
