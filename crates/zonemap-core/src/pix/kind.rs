//! Raster kinds
//!
//! A raster's depth, component count, alpha flag and color model are fixed
//! together by its [`ImageKind`]. Operations that only accept some kinds
//! match on it exhaustively instead of probing individual fields.

use super::PixelDepth;
use std::fmt;

/// Color model of a raster
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ColorModel {
    /// Single intensity component
    #[default]
    Grey,
    /// Red, green and blue components
    Rgb,
}

/// The closed set of raster layouts the engine understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ImageKind {
    /// 1-bit mask, one sample per pixel
    #[default]
    Binary,
    /// 8-bit grey
    Grey,
    /// 8-bit grey with alpha
    GreyA,
    /// 16-bit grey
    Grey16,
    /// 8-bit RGB
    Rgb,
    /// 8-bit RGB with alpha
    Rgba,
    /// 16-bit RGB
    Rgb16,
}

impl ImageKind {
    /// Number of color components (alpha excluded).
    pub fn components(self) -> u32 {
        match self {
            ImageKind::Binary | ImageKind::Grey | ImageKind::GreyA | ImageKind::Grey16 => 1,
            ImageKind::Rgb | ImageKind::Rgba | ImageKind::Rgb16 => 3,
        }
    }

    /// Whether the kind carries an alpha sample after its components.
    pub fn alpha(self) -> bool {
        matches!(self, ImageKind::GreyA | ImageKind::Rgba)
    }

    /// Samples per pixel: components plus alpha.
    pub fn channels(self) -> u32 {
        self.components() + u32::from(self.alpha())
    }

    /// Bits per sample.
    pub fn depth(self) -> PixelDepth {
        match self {
            ImageKind::Binary => PixelDepth::Bit1,
            ImageKind::Grey | ImageKind::GreyA | ImageKind::Rgb | ImageKind::Rgba => {
                PixelDepth::Bit8
            }
            ImageKind::Grey16 | ImageKind::Rgb16 => PixelDepth::Bit16,
        }
    }

    pub fn color_model(self) -> ColorModel {
        match self.components() {
            3 => ColorModel::Rgb,
            _ => ColorModel::Grey,
        }
    }

    /// Default single-channel kind for a depth.
    pub fn grey_for_depth(depth: PixelDepth) -> Self {
        match depth {
            PixelDepth::Bit1 => ImageKind::Binary,
            PixelDepth::Bit8 => ImageKind::Grey,
            PixelDepth::Bit16 => ImageKind::Grey16,
        }
    }

    /// Number of bytes an interleaved buffer of `pixel_count` pixels of
    /// this kind occupies.
    ///
    /// 1-bit kinds pack eight samples per byte.
    pub fn packed_len(self, pixel_count: usize) -> usize {
        let samples = pixel_count * self.channels() as usize;
        match self.depth() {
            PixelDepth::Bit1 => samples.div_ceil(8),
            PixelDepth::Bit8 => samples,
            PixelDepth::Bit16 => samples * 2,
        }
    }

    /// Whether this is a 3-component RGB kind at 8 or 16 bits.
    pub fn is_rgb(self) -> bool {
        matches!(self, ImageKind::Rgb | ImageKind::Rgba | ImageKind::Rgb16)
    }

    /// Whether this is a single-channel grey kind at 8 or 16 bits.
    pub fn is_grey(self) -> bool {
        matches!(self, ImageKind::Grey | ImageKind::Grey16)
    }
}

impl fmt::Display for ImageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ImageKind::Binary => "binary (1 bpp)",
            ImageKind::Grey => "grey (8 bpp)",
            ImageKind::GreyA => "grey+alpha (8 bpp)",
            ImageKind::Grey16 => "grey (16 bpp)",
            ImageKind::Rgb => "rgb (8 bpp)",
            ImageKind::Rgba => "rgba (8 bpp)",
            ImageKind::Rgb16 => "rgb (16 bpp)",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_table() {
        assert_eq!(ImageKind::Binary.channels(), 1);
        assert_eq!(ImageKind::Binary.depth(), PixelDepth::Bit1);
        assert_eq!(ImageKind::GreyA.channels(), 2);
        assert_eq!(ImageKind::Rgba.channels(), 4);
        assert_eq!(ImageKind::Rgba.color_model(), ColorModel::Rgb);
        assert_eq!(ImageKind::Grey16.color_model(), ColorModel::Grey);
    }

    #[test]
    fn test_packed_len() {
        assert_eq!(ImageKind::Binary.packed_len(4), 1);
        assert_eq!(ImageKind::Binary.packed_len(16), 2);
        assert_eq!(ImageKind::Binary.packed_len(17), 3);
        assert_eq!(ImageKind::Rgb.packed_len(10), 30);
        assert_eq!(ImageKind::Rgba.packed_len(10), 40);
        assert_eq!(ImageKind::Rgb16.packed_len(2), 12);
    }
}
