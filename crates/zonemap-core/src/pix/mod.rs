//! PIX - The raster container
//!
//! The `Pix` structure is the raster type consumed by the segmentation
//! engine. It supports 1, 8 and 16 bits per sample, one or more samples per
//! pixel, and an optional position offset when it represents a sub-region
//! of a larger image.
//!
//! # Pixel layout
//!
//! - Image data is stored in 32-bit words
//! - Every row starts on a 32-bit boundary
//! - Samples are packed MSB to LSB within each word
//! - A pixel occupies `channels` consecutive samples (R, G, B[, A] for RGB)
//!
//! # Ownership model
//!
//! `Pix` uses `Arc` for efficient cloning (shared ownership).
//! To modify pixel data, convert to `PixMut` via [`Pix::try_into_mut`]
//! or [`Pix::to_mut`], then convert back with `Into<Pix>`.

mod access;
mod kind;
pub mod paint;
mod points;

pub use access::*;
pub use kind::{ColorModel, ImageKind};
pub use paint::PaintOptions;

use crate::error::{Error, Result};
use std::sync::Arc;

/// Pixel depth (bits per sample)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum PixelDepth {
    /// 1-bit binary image
    Bit1 = 1,
    /// 8-bit samples
    Bit8 = 8,
    /// 16-bit samples
    Bit16 = 16,
}

impl PixelDepth {
    /// Create `PixelDepth` from a raw bit count.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDepth`] if `bits` is not 1, 8, or 16.
    pub fn from_bits(bits: u32) -> Result<Self> {
        match bits {
            1 => Ok(PixelDepth::Bit1),
            8 => Ok(PixelDepth::Bit8),
            16 => Ok(PixelDepth::Bit16),
            _ => Err(Error::InvalidDepth(bits)),
        }
    }

    /// Get the number of bits per sample.
    pub fn bits(self) -> u32 {
        self as u32
    }

    /// Get the maximum sample value representable at this depth.
    pub fn max_value(self) -> u32 {
        (1u32 << self.bits()) - 1
    }
}

/// Internal PIX data
#[derive(Debug)]
struct PixData {
    /// Width in pixels
    width: u32,
    /// Height in pixels
    height: u32,
    /// Depth, channel count and color model
    kind: ImageKind,
    /// 32-bit words per line
    wpl: u32,
    /// Origin of this raster inside its parent image
    position: (i32, i32),
    /// The image data (packed 32-bit words)
    data: Vec<u32>,
}

impl PixData {
    fn alloc(width: u32, height: u32, kind: ImageKind) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        let wpl = compute_wpl(width, kind)?;
        let data = vec![0u32; (wpl as usize) * (height as usize)];
        Ok(PixData {
            width,
            height,
            kind,
            wpl,
            position: (0, 0),
            data,
        })
    }

    #[inline]
    fn sample_index(&self, x: u32, channel: u32) -> u32 {
        x * self.kind.channels() + channel
    }

    #[inline]
    fn get_sample(&self, x: u32, y: u32, channel: u32) -> u32 {
        let start = (y * self.wpl) as usize;
        let line = &self.data[start..start + self.wpl as usize];
        get_data_sample(line, self.kind.depth(), self.sample_index(x, channel))
    }

    #[inline]
    fn set_sample(&mut self, x: u32, y: u32, channel: u32, val: u32) {
        let depth = self.kind.depth();
        let index = self.sample_index(x, channel);
        let start = (y * self.wpl) as usize;
        let end = start + self.wpl as usize;
        set_data_sample(&mut self.data[start..end], depth, index, val);
    }

    fn clone_data(&self) -> Self {
        PixData {
            width: self.width,
            height: self.height,
            kind: self.kind,
            wpl: self.wpl,
            position: self.position,
            data: self.data.clone(),
        }
    }
}

/// Compute words per line for given width and kind.
///
/// Uses u64 arithmetic to prevent overflow for large widths.
fn compute_wpl(width: u32, kind: ImageKind) -> Result<u32> {
    let bits_per_line =
        u64::from(width) * u64::from(kind.channels()) * u64::from(kind.depth().bits());
    let wpl = bits_per_line.div_ceil(32);
    u32::try_from(wpl).map_err(|_| Error::InvalidParameter(format!(
        "image row too large: width={} kind={} requires {} words",
        width, kind, wpl
    )))
}

/// PIX - Raster container
///
/// `Pix` uses reference counting via `Arc` for efficient cloning.
///
/// # Examples
///
/// ```
/// use zonemap_core::{Pix, PixelDepth};
///
/// let pix = Pix::new(64, 48, PixelDepth::Bit8).unwrap();
/// assert_eq!(pix.width(), 64);
/// assert_eq!(pix.max_value(), 255);
/// ```
#[derive(Debug, Clone)]
pub struct Pix {
    inner: Arc<PixData>,
}

impl Pix {
    /// Create a new single-channel PIX with the specified dimensions and depth.
    ///
    /// The image data is initialized to zero.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if width or height is 0.
    pub fn new(width: u32, height: u32, depth: PixelDepth) -> Result<Self> {
        Self::new_with_kind(width, height, ImageKind::grey_for_depth(depth))
    }

    /// Create a new PIX of the given kind.
    ///
    /// Color samples start at zero; alpha samples start fully opaque.
    pub fn new_with_kind(width: u32, height: u32, kind: ImageKind) -> Result<Self> {
        let mut inner = PixData::alloc(width, height, kind)?;
        if kind.alpha() {
            let alpha = kind.components();
            let max = kind.depth().max_value();
            for y in 0..height {
                for x in 0..width {
                    inner.set_sample(x, y, alpha, max);
                }
            }
        }
        Ok(Pix {
            inner: Arc::new(inner),
        })
    }

    /// Create a 1-bit PIX from a continuous, row-major bit stream.
    ///
    /// Pixel `i = y * width + x` is bit `7 - i % 8` of byte `i / 8`
    /// (most significant bit first, no row padding).
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if `bytes` holds fewer than
    /// `width * height` bits.
    pub fn from_packed_bits(width: u32, height: u32, bytes: &[u8]) -> Result<Self> {
        let mut inner = PixData::alloc(width, height, ImageKind::Binary)?;
        let needed = ImageKind::Binary.packed_len(width as usize * height as usize);
        if bytes.len() < needed {
            return Err(Error::InvalidParameter(format!(
                "packed bit buffer too short: {} bytes for {}x{} pixels (need {})",
                bytes.len(),
                width,
                height,
                needed
            )));
        }
        for y in 0..height {
            for x in 0..width {
                let i = (y * width + x) as usize;
                let bit = (bytes[i >> 3] >> (7 - (i & 7))) & 1;
                if bit != 0 {
                    inner.set_sample(x, y, 0, 1);
                }
            }
        }
        Ok(Pix {
            inner: Arc::new(inner),
        })
    }

    /// Create a PIX from a row-major list of interleaved samples.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if the sample count is not
    /// `width * height * channels`, or a sample exceeds the kind's maximum.
    pub fn from_samples(width: u32, height: u32, kind: ImageKind, samples: &[u32]) -> Result<Self> {
        let mut inner = PixData::alloc(width, height, kind)?;
        let channels = kind.channels();
        let expected = width as usize * height as usize * channels as usize;
        if samples.len() != expected {
            return Err(Error::InvalidParameter(format!(
                "expected {} samples for {}x{} {}, got {}",
                expected,
                width,
                height,
                kind,
                samples.len()
            )));
        }
        let max = kind.depth().max_value();
        if let Some(bad) = samples.iter().find(|&&v| v > max) {
            return Err(Error::InvalidParameter(format!(
                "sample value {} exceeds maximum {} for {}",
                bad, max, kind
            )));
        }
        let mut it = samples.iter();
        for y in 0..height {
            for x in 0..width {
                for c in 0..channels {
                    if let Some(&v) = it.next() {
                        inner.set_sample(x, y, c, v);
                    }
                }
            }
        }
        Ok(Pix {
            inner: Arc::new(inner),
        })
    }

    /// Get the image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Get the bits per sample.
    #[inline]
    pub fn depth(&self) -> PixelDepth {
        self.inner.kind.depth()
    }

    /// Get the raster kind.
    #[inline]
    pub fn kind(&self) -> ImageKind {
        self.inner.kind
    }

    /// Get the samples per pixel (components plus alpha).
    #[inline]
    pub fn channels(&self) -> u32 {
        self.inner.kind.channels()
    }

    #[inline]
    pub fn color_model(&self) -> ColorModel {
        self.inner.kind.color_model()
    }

    /// Get the largest sample value at this raster's depth.
    #[inline]
    pub fn max_value(&self) -> u32 {
        self.inner.kind.depth().max_value()
    }

    /// Get the origin of this raster inside its parent image.
    #[inline]
    pub fn position(&self) -> (i32, i32) {
        self.inner.position
    }

    /// Get the words per line.
    #[inline]
    pub fn wpl(&self) -> u32 {
        self.inner.wpl
    }

    /// Get the number of pixels.
    #[inline]
    pub fn size(&self) -> usize {
        self.inner.width as usize * self.inner.height as usize
    }

    /// Get raw access to the image data.
    #[inline]
    pub fn data(&self) -> &[u32] {
        &self.inner.data
    }

    /// Get the number of strong references to this PIX.
    #[inline]
    pub fn ref_count(&self) -> usize {
        Arc::strong_count(&self.inner)
    }

    /// Get a slice of the words of one row.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row_data(&self, y: u32) -> &[u32] {
        let start = (y * self.inner.wpl) as usize;
        let end = start + self.inner.wpl as usize;
        &self.inner.data[start..end]
    }

    /// Check if two PIX have the same width, height, and kind.
    pub fn sizes_equal(&self, other: &Pix) -> bool {
        self.inner.width == other.inner.width
            && self.inner.height == other.inner.height
            && self.inner.kind == other.inner.kind
    }

    /// Create a deep copy of this PIX.
    ///
    /// Unlike `clone()` which shares data via Arc, this creates
    /// a completely independent copy.
    pub fn deep_clone(&self) -> Self {
        Pix {
            inner: Arc::new(self.inner.clone_data()),
        }
    }

    /// Try to get mutable access to the image data.
    ///
    /// Succeeds only if there is exactly one reference to the data.
    /// If successful, returns a [`PixMut`] that allows modification.
    pub fn try_into_mut(self) -> std::result::Result<PixMut, Self> {
        match Arc::try_unwrap(self.inner) {
            Ok(data) => Ok(PixMut { inner: data }),
            Err(arc) => Err(Pix { inner: arc }),
        }
    }

    /// Create a mutable copy of this PIX.
    ///
    /// Always creates a new copy that can be modified.
    pub fn to_mut(&self) -> PixMut {
        PixMut {
            inner: self.inner.clone_data(),
        }
    }
}

/// Mutable PIX
///
/// Allows modification of image data. Convert back to an immutable
/// [`Pix`] using `Into<Pix>`.
#[derive(Debug)]
pub struct PixMut {
    inner: PixData,
}

impl PixMut {
    /// Get the image width.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the image height.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Get the bits per sample.
    #[inline]
    pub fn depth(&self) -> PixelDepth {
        self.inner.kind.depth()
    }

    #[inline]
    pub fn kind(&self) -> ImageKind {
        self.inner.kind
    }

    /// Get samples per pixel.
    #[inline]
    pub fn channels(&self) -> u32 {
        self.inner.kind.channels()
    }

    #[inline]
    pub fn color_model(&self) -> ColorModel {
        self.inner.kind.color_model()
    }

    #[inline]
    pub fn max_value(&self) -> u32 {
        self.inner.kind.depth().max_value()
    }

    #[inline]
    pub fn position(&self) -> (i32, i32) {
        self.inner.position
    }

    /// Set the origin of this raster inside its parent image.
    pub fn set_position(&mut self, x: i32, y: i32) {
        self.inner.position = (x, y);
    }
}

impl From<PixMut> for Pix {
    fn from(pix_mut: PixMut) -> Self {
        Pix {
            inner: Arc::new(pix_mut.inner),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pixel_depth() {
        assert_eq!(PixelDepth::from_bits(1).unwrap(), PixelDepth::Bit1);
        assert_eq!(PixelDepth::from_bits(16).unwrap(), PixelDepth::Bit16);
        assert!(PixelDepth::from_bits(4).is_err());
        assert!(PixelDepth::from_bits(32).is_err());

        assert_eq!(PixelDepth::Bit1.max_value(), 1);
        assert_eq!(PixelDepth::Bit8.max_value(), 255);
        assert_eq!(PixelDepth::Bit16.max_value(), 65535);
    }

    #[test]
    fn test_pix_creation() {
        let pix = Pix::new(100, 200, PixelDepth::Bit8).unwrap();
        assert_eq!(pix.width(), 100);
        assert_eq!(pix.height(), 200);
        assert_eq!(pix.kind(), ImageKind::Grey);
        assert_eq!(pix.channels(), 1);
        assert_eq!(pix.position(), (0, 0));

        // 100 * 8 = 800 bits = 25 words
        assert_eq!(pix.wpl(), 25);
    }

    #[test]
    fn test_pix_creation_invalid() {
        assert!(Pix::new(0, 100, PixelDepth::Bit8).is_err());
        assert!(Pix::new(100, 0, PixelDepth::Bit8).is_err());
    }

    #[test]
    fn test_wpl_calculation() {
        // 1-bit: 32 pixels fit in 1 word
        let pix = Pix::new(32, 1, PixelDepth::Bit1).unwrap();
        assert_eq!(pix.wpl(), 1);

        let pix = Pix::new(33, 1, PixelDepth::Bit1).unwrap();
        assert_eq!(pix.wpl(), 2);

        // RGB 8-bit: 3 bytes per pixel, 4 pixels = 12 bytes = 3 words
        let pix = Pix::new_with_kind(4, 1, ImageKind::Rgb).unwrap();
        assert_eq!(pix.wpl(), 3);

        // RGB 16-bit: 6 bytes per pixel
        let pix = Pix::new_with_kind(2, 1, ImageKind::Rgb16).unwrap();
        assert_eq!(pix.wpl(), 3);
    }

    #[test]
    fn test_pix_clone_shares_data() {
        let pix1 = Pix::new(10, 10, PixelDepth::Bit8).unwrap();
        let pix2 = pix1.clone();

        assert_eq!(pix1.ref_count(), 2);
        assert_eq!(pix1.data().as_ptr(), pix2.data().as_ptr());

        let pix3 = pix1.deep_clone();
        assert_eq!(pix3.ref_count(), 1);
        assert_ne!(pix1.data().as_ptr(), pix3.data().as_ptr());
    }

    #[test]
    fn test_alpha_starts_opaque() {
        let pix = Pix::new_with_kind(3, 2, ImageKind::Rgba).unwrap();
        assert_eq!(pix.get_value(2, 1, 3), Some(255));
        assert_eq!(pix.get_value(2, 1, 0), Some(0));
    }

    #[test]
    fn test_from_packed_bits() {
        // 0b11000000: first row set, second row clear
        let pix = Pix::from_packed_bits(2, 2, &[0b1100_0000]).unwrap();
        assert_eq!(pix.get_bit(0, 0), Some(1));
        assert_eq!(pix.get_bit(1, 0), Some(1));
        assert_eq!(pix.get_bit(0, 1), Some(0));
        assert_eq!(pix.get_bit(1, 1), Some(0));

        // Bits run across row boundaries without padding
        let pix = Pix::from_packed_bits(4, 4, &[0b0011_1111, 0b1100_0000]).unwrap();
        assert_eq!(pix.get_bit(1, 0), Some(0));
        assert_eq!(pix.get_bit(2, 0), Some(1));
        assert_eq!(pix.get_bit(1, 2), Some(1));
        assert_eq!(pix.get_bit(2, 2), Some(0));

        assert!(Pix::from_packed_bits(4, 4, &[0xff]).is_err());
    }

    #[test]
    fn test_from_samples() {
        let pix = Pix::from_samples(2, 1, ImageKind::Rgb, &[1, 2, 3, 4, 5, 6]).unwrap();
        assert_eq!(pix.get_value(1, 0, 0), Some(4));
        assert_eq!(pix.get_value(1, 0, 2), Some(6));

        assert!(Pix::from_samples(2, 1, ImageKind::Rgb, &[1, 2, 3]).is_err());
        assert!(Pix::from_samples(1, 1, ImageKind::Grey, &[256]).is_err());
        assert!(Pix::from_samples(1, 1, ImageKind::Grey16, &[256]).is_ok());
    }

    #[test]
    fn test_pix_mut_position() {
        let pix = Pix::new(4, 4, PixelDepth::Bit1).unwrap();
        let mut pm = pix.try_into_mut().unwrap();
        pm.set_position(7, -2);
        let pix: Pix = pm.into();
        assert_eq!(pix.position(), (7, -2));

        let copy = pix.deep_clone();
        assert_eq!(copy.position(), (7, -2));
        assert!(copy.sizes_equal(&pix));
    }
}
