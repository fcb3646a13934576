//! Region rendering
//!
//! Paints every region of a registry onto an RGB raster with its own color.

use crate::error::RegionResult;
use crate::registry::RegionRegistry;
use zonemap_core::{PaintOptions, PixMut};

/// Number of hue steps in a full turn of the color wheel.
const HUE_RANGE: u32 = 240;

/// Fully saturated color of hue `h` (`0..240`), scaled to `max_value`.
///
/// The wheel is split into six sectors of 40 steps: red, yellow, green,
/// cyan, blue, magenta.
fn hue_to_rgb(h: u32, max_value: u32) -> [u32; 3] {
    let h = h % HUE_RANGE;
    let sector = h / 40;
    let f = h % 40;
    let rising = max_value * f / 40;
    let falling = max_value * (40 - f) / 40;
    let v = max_value;
    match sector {
        0 => [v, rising, 0],
        1 => [falling, v, 0],
        2 => [0, v, rising],
        3 => [0, falling, v],
        4 => [rising, 0, v],
        _ => [v, 0, falling],
    }
}

/// Build `n` colors with hues spread evenly around the wheel.
pub fn region_palette(n: usize, max_value: u32) -> Vec<Vec<u32>> {
    (0..n)
        .map(|i| {
            let h = (i as u64 * u64::from(HUE_RANGE) / n.max(1) as u64) as u32;
            hue_to_rgb(h, max_value).to_vec()
        })
        .collect()
}

/// Paint every region of `registry` onto `target`.
///
/// Regions are painted in [`RegionRegistry::regions`] order. Region `i`
/// takes `colors[i % colors.len()]`; with no colors given, a palette of
/// evenly spread hues at the target's depth is used.
///
/// # Errors
///
/// Fails like [`PixMut::paint_masks`]: the target must be an RGB raster and
/// every region must lie inside it at its position.
pub fn paint_regions(
    target: &mut PixMut,
    registry: &RegionRegistry,
    colors: &[Vec<u32>],
) -> RegionResult<()> {
    let palette;
    let colors = if colors.is_empty() {
        palette = region_palette(registry.len(), target.max_value());
        &palette
    } else {
        colors
    };

    // Check every mask before painting any of them
    target.paint_masks(&registry.masks(), &PaintOptions::new().with_color(&[]))?;

    for (i, region) in registry.regions().iter().enumerate() {
        let options = PaintOptions::new().with_color(&colors[i % colors.len()]);
        target.paint_masks(&[region.to_mask()], &options)?;
    }

    log::debug!("paint_regions: {} regions painted", registry.len());
    Ok(())
}
