//! Paint operators
//!
//! Renders point lists and positioned binary masks onto an RGB raster.
//! Both operators check the target kind (and, for masks, every mask and
//! its footprint) before writing anything, so a failed call leaves the
//! target untouched.

use super::{Pix, PixMut, PixelDepth};
use crate::error::{Error, Result};
use crate::shape::Shape;

/// Options for [`PixMut::paint_pixels`] and [`PixMut::paint_masks`]
#[derive(Debug, Clone, Default)]
pub struct PaintOptions {
    /// Per-channel color, clamped to the target's maximum sample value;
    /// `None` paints `[max, 0, 0]` (red)
    pub color: Option<Vec<u32>>,
    /// Stamp applied at every point (ignored by `paint_masks`)
    pub shape: Shape,
}

impl PaintOptions {
    /// Create options with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the per-channel color
    pub fn with_color(mut self, color: &[u32]) -> Self {
        self.color = Some(color.to_vec());
        self
    }

    /// Set the stamp shape
    pub fn with_shape(mut self, shape: Shape) -> Self {
        self.shape = shape;
        self
    }

    /// Color to write, each channel clamped to `max_value`.
    fn resolve_color(&self, max_value: u32) -> Vec<u32> {
        match &self.color {
            Some(color) => color.iter().map(|&c| c.min(max_value)).collect(),
            None => vec![max_value, 0, 0],
        }
    }
}

impl PixMut {
    fn check_paintable(&self, operation: &'static str) -> Result<()> {
        if !self.kind().is_rgb() {
            return Err(Error::InvalidRasterKind {
                operation,
                expected: "rgb (8 or 16 bpp)",
                actual: self.kind().to_string(),
            });
        }
        Ok(())
    }

    /// Stamp `options.shape` at every point, writing `options.color`.
    ///
    /// For each point and each shape offset, channels
    /// `0..min(channels, color.len())` of the pixel at `point + offset` are
    /// set. Coordinates outside the raster are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRasterKind`] unless the target is an RGB
    /// raster of depth 8 or 16.
    pub fn paint_pixels(&mut self, points: &[(i32, i32)], options: &PaintOptions) -> Result<()> {
        self.check_paintable("paint_pixels")?;

        let color = options.resolve_color(self.max_value());
        let nchannels = (self.channels() as usize).min(color.len()) as u32;
        let w = self.width() as i64;
        let h = self.height() as i64;

        log::debug!(
            "paint_pixels: {} points, {} shape offsets, {} channels",
            points.len(),
            options.shape.len(),
            nchannels
        );

        for &(xp, yp) in points {
            for &(xs, ys) in options.shape.pixels() {
                let x = xp as i64 + xs as i64;
                let y = yp as i64 + ys as i64;
                if x < 0 || y < 0 || x >= w || y >= h {
                    continue;
                }
                for channel in 0..nchannels {
                    self.set_value_unchecked(x as u32, y as u32, channel, color[channel as usize]);
                }
            }
        }

        Ok(())
    }

    /// Paint the set pixels of positioned binary masks.
    ///
    /// A set bit at local `(x, y)` of a mask writes `options.color` at
    /// `(x + mask.position().0, y + mask.position().1)`.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidRasterKind`] unless the target is an RGB raster of
    ///   depth 8 or 16, or if any mask is not 1 bpp
    /// - [`Error::OutOfBounds`] if a set bit of any mask lands outside the
    ///   target
    pub fn paint_masks(&mut self, masks: &[Pix], options: &PaintOptions) -> Result<()> {
        self.check_paintable("paint_masks")?;

        for mask in masks {
            if mask.depth() != PixelDepth::Bit1 {
                return Err(Error::InvalidRasterKind {
                    operation: "paint_masks",
                    expected: "binary (1 bpp) mask",
                    actual: mask.kind().to_string(),
                });
            }
            self.check_mask_footprint(mask)?;
        }

        let color = options.resolve_color(self.max_value());
        let nchannels = (self.channels() as usize).min(color.len()) as u32;

        log::debug!("paint_masks: {} masks, {} channels", masks.len(), nchannels);

        for mask in masks {
            let (px, py) = mask.position();
            for y in 0..mask.height() {
                for x in 0..mask.width() {
                    if mask.get_value_unchecked(x, y, 0) == 0 {
                        continue;
                    }
                    let tx = (x as i64 + px as i64) as u32;
                    let ty = (y as i64 + py as i64) as u32;
                    for channel in 0..nchannels {
                        self.set_value_unchecked(tx, ty, channel, color[channel as usize]);
                    }
                }
            }
        }

        Ok(())
    }

    /// Fail if any set bit of `mask` maps outside this raster.
    fn check_mask_footprint(&self, mask: &Pix) -> Result<()> {
        let (px, py) = (mask.position().0 as i64, mask.position().1 as i64);
        let w = self.width() as i64;
        let h = self.height() as i64;

        let fully_inside = px >= 0
            && py >= 0
            && px + mask.width() as i64 <= w
            && py + mask.height() as i64 <= h;
        if fully_inside {
            return Ok(());
        }

        for y in 0..mask.height() {
            for x in 0..mask.width() {
                if mask.get_value_unchecked(x, y, 0) == 0 {
                    continue;
                }
                let tx = x as i64 + px;
                let ty = y as i64 + py;
                if tx < 0 || ty < 0 || tx >= w || ty >= h {
                    return Err(Error::OutOfBounds {
                        x: tx,
                        y: ty,
                        width: self.width(),
                        height: self.height(),
                    });
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pix::ImageKind;
    use crate::shape::ShapeKind;

    fn rgb(width: u32, height: u32) -> PixMut {
        Pix::new_with_kind(width, height, ImageKind::Rgb)
            .unwrap()
            .try_into_mut()
            .unwrap()
    }

    #[test]
    fn test_paint_pixels_default_red() {
        let mut pm = rgb(4, 4);
        pm.paint_pixels(&[(1, 2)], &PaintOptions::new()).unwrap();
        assert_eq!(pm.get_value(1, 2, 0), Some(255));
        assert_eq!(pm.get_value(1, 2, 1), Some(0));
        assert_eq!(pm.get_value(0, 0, 0), Some(0));
    }

    #[test]
    fn test_paint_pixels_clips_shape() {
        let mut pm = rgb(3, 3);
        let options = PaintOptions::new()
            .with_color(&[1, 2, 3])
            .with_shape(Shape::new(ShapeKind::Square, 3, true));
        pm.paint_pixels(&[(0, 0)], &options).unwrap();
        assert_eq!(pm.get_value(1, 1, 2), Some(3));
        assert_eq!(pm.get_value(2, 2, 0), Some(0));
    }

    #[test]
    fn test_paint_pixels_partial_color() {
        let mut pm = rgb(2, 2);
        pm.paint_pixels(&[(0, 0)], &PaintOptions::new().with_color(&[9]))
            .unwrap();
        assert_eq!(pm.get_value(0, 0, 0), Some(9));
        assert_eq!(pm.get_value(0, 0, 1), Some(0));
    }

    #[test]
    fn test_paint_color_saturates() {
        let mut pm = rgb(1, 1);
        let options = PaintOptions::new().with_color(&[256, 300, 7]);
        pm.paint_pixels(&[(0, 0)], &options).unwrap();
        assert_eq!(pm.get_value(0, 0, 0), Some(255));
        assert_eq!(pm.get_value(0, 0, 1), Some(255));
        assert_eq!(pm.get_value(0, 0, 2), Some(7));
        assert_eq!(options.resolve_color(65535), vec![256, 300, 7]);
    }

    #[test]
    fn test_paint_rejects_grey() {
        let mut pm = Pix::new(4, 4, PixelDepth::Bit8).unwrap().to_mut();
        assert!(matches!(
            pm.paint_pixels(&[(0, 0)], &PaintOptions::new()),
            Err(Error::InvalidRasterKind { .. })
        ));
        assert!(matches!(
            pm.paint_masks(&[], &PaintOptions::new()),
            Err(Error::InvalidRasterKind { .. })
        ));
    }

    #[test]
    fn test_paint_masks_positioned() {
        let mut mask = Pix::from_packed_bits(2, 1, &[0b0100_0000]).unwrap().to_mut();
        mask.set_position(2, 3);
        let mask: Pix = mask.into();

        let mut pm = rgb(5, 5);
        pm.paint_masks(&[mask], &PaintOptions::new().with_color(&[0, 200, 0]))
            .unwrap();
        assert_eq!(pm.get_value(3, 3, 1), Some(200));
        assert_eq!(pm.get_value(2, 3, 1), Some(0));
    }

    #[test]
    fn test_paint_masks_out_of_bounds_leaves_target() {
        let mut inside = Pix::from_packed_bits(1, 1, &[0x80]).unwrap().to_mut();
        inside.set_position(0, 0);
        let mut outside = Pix::from_packed_bits(1, 1, &[0x80]).unwrap().to_mut();
        outside.set_position(5, 0);

        let mut pm = rgb(5, 5);
        let err = pm.paint_masks(&[inside.into(), outside.into()], &PaintOptions::new());
        assert!(matches!(err, Err(Error::OutOfBounds { x: 5, y: 0, .. })));
        assert_eq!(pm.get_value(0, 0, 0), Some(0));
    }

    #[test]
    fn test_paint_masks_clear_bits_may_overhang() {
        // Only set bits must fall inside the target
        let mut mask = Pix::from_packed_bits(2, 1, &[0b1000_0000]).unwrap().to_mut();
        mask.set_position(4, 0);
        let mut pm = rgb(5, 1);
        pm.paint_masks(&[mask.into()], &PaintOptions::new()).unwrap();
        assert_eq!(pm.get_value(4, 0, 0), Some(255));
    }
}
