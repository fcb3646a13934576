//! Pixel access functions
//!
//! Low-level functions for getting and setting individual samples.
//!
//! # Sample packing
//!
//! Samples are packed MSB-to-LSB within each 32-bit word. In a 1-bit image,
//! pixel 0 occupies bit 31 (MSB) of the first word of its row. A pixel with
//! several channels occupies consecutive samples, so sample index
//! `x * channels + channel` addresses channel `channel` of pixel `x`.

use super::{Pix, PixMut, PixelDepth};
use crate::error::{Error, Result};

impl Pix {
    /// Get the bit at (x, y) of a 1-bit image.
    ///
    /// Returns `None` if coordinates are out of bounds or the image is not
    /// 1 bpp.
    pub fn get_bit(&self, x: u32, y: u32) -> Option<u32> {
        if self.depth() != PixelDepth::Bit1 || x >= self.width() || y >= self.height() {
            return None;
        }
        Some(get_data_bit(self.row_data(y), x))
    }

    /// Get one channel of the pixel at (x, y).
    ///
    /// Returns `None` if coordinates or channel are out of bounds.
    pub fn get_value(&self, x: u32, y: u32, channel: u32) -> Option<u32> {
        if x >= self.width() || y >= self.height() || channel >= self.channels() {
            return None;
        }
        Some(self.inner.get_sample(x, y, channel))
    }

    /// Get one channel of the pixel at (x, y) without bounds checking.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`; an out-of-range `x` reads padding or the
    /// next row.
    #[inline]
    pub fn get_value_unchecked(&self, x: u32, y: u32, channel: u32) -> u32 {
        self.inner.get_sample(x, y, channel)
    }
}

impl PixMut {
    /// Get the bit at (x, y) of a 1-bit image.
    pub fn get_bit(&self, x: u32, y: u32) -> Option<u32> {
        if self.depth() != PixelDepth::Bit1 || x >= self.width() || y >= self.height() {
            return None;
        }
        Some(self.inner.get_sample(x, y, 0))
    }

    /// Get one channel of the pixel at (x, y).
    pub fn get_value(&self, x: u32, y: u32, channel: u32) -> Option<u32> {
        if x >= self.width() || y >= self.height() || channel >= self.channels() {
            return None;
        }
        Some(self.inner.get_sample(x, y, channel))
    }

    /// Set one channel of the pixel at (x, y).
    ///
    /// The value is masked to the depth's range.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] if coordinates are out of bounds and
    /// [`Error::IndexOutOfBounds`] if `channel >= channels`.
    pub fn set_value(&mut self, x: u32, y: u32, channel: u32, val: u32) -> Result<()> {
        if x >= self.width() || y >= self.height() {
            return Err(Error::OutOfBounds {
                x: x as i64,
                y: y as i64,
                width: self.width(),
                height: self.height(),
            });
        }
        if channel >= self.channels() {
            return Err(Error::IndexOutOfBounds {
                index: channel as usize,
                len: self.channels() as usize,
            });
        }
        self.inner.set_sample(x, y, channel, val);
        Ok(())
    }

    /// Set one channel of the pixel at (x, y) without bounds checking.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn set_value_unchecked(&mut self, x: u32, y: u32, channel: u32, val: u32) {
        self.inner.set_sample(x, y, channel, val);
    }

    /// Set the bit at (x, y) of a 1-bit image.
    ///
    /// # Errors
    ///
    /// Returns an error if the image is not 1 bpp or (x, y) is out of bounds.
    pub fn set_bit(&mut self, x: u32, y: u32, val: u32) -> Result<()> {
        if self.depth() != PixelDepth::Bit1 {
            return Err(Error::InvalidRasterKind {
                operation: "set_bit",
                expected: "binary (1 bpp)",
                actual: self.kind().to_string(),
            });
        }
        self.set_value(x, y, 0, val & 1)
    }
}

/// Get a sample of the given depth from a row.
#[inline]
pub fn get_data_sample(line: &[u32], depth: PixelDepth, index: u32) -> u32 {
    match depth {
        PixelDepth::Bit1 => get_data_bit(line, index),
        PixelDepth::Bit8 => get_data_byte(line, index),
        PixelDepth::Bit16 => get_data_two_bytes(line, index),
    }
}

/// Set a sample of the given depth in a row.
#[inline]
pub fn set_data_sample(line: &mut [u32], depth: PixelDepth, index: u32, val: u32) {
    match depth {
        PixelDepth::Bit1 => set_data_bit(line, index, val),
        PixelDepth::Bit8 => set_data_byte(line, index, val),
        PixelDepth::Bit16 => set_data_two_bytes(line, index, val),
    }
}

/// Get a 1-bit pixel value.
///
/// Pixels are packed MSB to LSB within each 32-bit word.
#[inline]
pub fn get_data_bit(line: &[u32], x: u32) -> u32 {
    (line[(x >> 5) as usize] >> (31 - (x & 31))) & 1
}

/// Set a 1-bit pixel value.
#[inline]
pub fn set_data_bit(line: &mut [u32], x: u32, val: u32) {
    let word = &mut line[(x >> 5) as usize];
    let shift = 31 - (x & 31);
    *word = (*word & !(1 << shift)) | ((val & 1) << shift);
}

/// Get an 8-bit sample value.
#[inline]
pub fn get_data_byte(line: &[u32], x: u32) -> u32 {
    (line[(x >> 2) as usize] >> (24 - 8 * (x & 3))) & 0xff
}

/// Set an 8-bit sample value.
#[inline]
pub fn set_data_byte(line: &mut [u32], x: u32, val: u32) {
    let word = &mut line[(x >> 2) as usize];
    let shift = 24 - 8 * (x & 3);
    *word = (*word & !(0xff << shift)) | ((val & 0xff) << shift);
}

/// Get a 16-bit sample value.
#[inline]
pub fn get_data_two_bytes(line: &[u32], x: u32) -> u32 {
    (line[(x >> 1) as usize] >> (16 - 16 * (x & 1))) & 0xffff
}

/// Set a 16-bit sample value.
#[inline]
pub fn set_data_two_bytes(line: &mut [u32], x: u32, val: u32) {
    let word = &mut line[(x >> 1) as usize];
    let shift = 16 - 16 * (x & 1);
    *word = (*word & !(0xffff << shift)) | ((val & 0xffff) << shift);
}
